//! The post store service: CRUD over an in-memory list of posts, each
//! with nested comments.
//!
//! | Method | Path | Success | Failure |
//! |---|---|---|---|
//! | GET | `{base}` | 200, all posts | |
//! | GET | `{base}/category/{category}` | 200, matching posts | |
//! | GET | `{base}/{id}` | 200, post | 404 |
//! | POST | `{base}` | 201, created post | 400 |
//! | POST | `{base}/{id}/comments` | 201, created comment | 400 / 404 |
//! | PATCH | `{base}/{id}` | 200, updated post | 400 / 404 |
//! | DELETE | `{base}/{id}` | 204, empty body | 404 |

mod error;
mod handlers;
mod id;
mod model;
mod store;

pub use error::PostError;
pub use model::{Comment, NewComment, NewPost, Post, PostPatch};
pub use store::PostStore;

use crate::router::Router;

/// Mounts the posts routes under `base` (e.g. `/posts`).
///
/// `base` must start with `/` and must not end with one.
pub fn routes(base: &str, store: PostStore) -> Router<PostStore> {
    mount(Router::new(store), base)
}

/// Adds the posts routes to an existing router whose state is the store.
pub fn mount(router: Router<PostStore>, base: &str) -> Router<PostStore> {
    router
        .get(base, handlers::list)
        .post(base, handlers::create)
        .get(&format!("{base}/category/{{category}}"), handlers::list_by_category)
        .get(&format!("{base}/{{id}}"), handlers::get)
        .patch(&format!("{base}/{{id}}"), handlers::update)
        .delete(&format!("{base}/{{id}}"), handlers::delete)
        .post(&format!("{base}/{{id}}/comments"), handlers::add_comment)
}
