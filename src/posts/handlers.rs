//! One handler per posts route. Each parses its input, runs one store
//! operation, and answers with JSON or a [`PostError`].

use crate::request::Request;
use crate::response::{IntoResponse, Json, Response};
use crate::status::Status;

use super::error::PostError;
use super::model::{NewComment, NewPost, Post, parse_body};
use super::store::PostStore;

// GET /
pub async fn list(store: PostStore, _req: Request) -> Response {
    Json(store.list().await).into_response()
}

// GET /category/{category}
pub async fn list_by_category(store: PostStore, req: Request) -> Response {
    let category = req.param("category").unwrap_or_default();
    Json(store.list_by_category(category).await).into_response()
}

// GET /{id}
pub async fn get(store: PostStore, req: Request) -> Result<Json<Post>, PostError> {
    let post = store.get(id(&req)).await?;
    Ok(Json(post))
}

// POST /
pub async fn create(store: PostStore, req: Request) -> Result<Response, PostError> {
    let new = NewPost::from_body(&parse_body(req.body())?)?;
    let post = store.create(new).await;
    let location = format!("{}/{}", req.path().trim_end_matches('/'), post.id);
    Ok(Response::builder()
        .status(Status::Created)
        .header("location", &location)
        .json_of(&post))
}

// POST /{id}/comments
pub async fn add_comment(store: PostStore, req: Request) -> Result<Response, PostError> {
    let NewComment(comment) = NewComment::from_body(&parse_body(req.body())?)?;
    let comment = store.add_comment(id(&req), comment).await?;
    Ok((Status::Created, Json(comment)).into_response())
}

// PATCH /{id}
pub async fn update(store: PostStore, req: Request) -> Result<Json<Post>, PostError> {
    let body = parse_body(req.body())?;
    let post = store.update(id(&req), &body).await?;
    Ok(Json(post))
}

// DELETE /{id}
pub async fn delete(store: PostStore, req: Request) -> Result<Status, PostError> {
    store.delete(id(&req)).await?;
    Ok(Status::NoContent)
}

/// Every `{id}` route registers the param, so a miss here can only mean an
/// empty id, which no post has.
fn id(req: &Request) -> &str {
    req.param("id").unwrap_or_default()
}
