//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. Register a path, get a
//! handler. The router also owns the application state handed to every
//! handler call.

use std::collections::HashMap;
use std::str::Utf8Error;
use std::sync::Arc;

use matchit::Router as MatchitRouter;
use percent_encoding::percent_decode_str;
use tracing::debug;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// The application router.
///
/// Build it once at startup and pass it to [`Server::serve`](crate::Server::serve).
/// Each registration returns `self` so calls chain naturally.
pub struct Router<S> {
    routes: HashMap<Method, MatchitRouter<BoxedHandler<S>>>,
    state: S,
}

impl<S> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Creates an empty router whose handlers all receive a clone of `state`.
    pub fn new(state: S) -> Self {
        Self { routes: HashMap::new(), state }
    }

    /// Register a handler for a method + path pair.
    ///
    /// Path parameters use `{name}` syntax; `req.param("name")` retrieves them.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or conflicts with one already
    /// registered for `method`. Routes are fixed at startup.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler<S>) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{method} {path}`: {e}"));
        self
    }

    pub fn get(self, path: &str, handler: impl Handler<S>) -> Self {
        self.on(Method::Get, path, handler)
    }

    pub fn post(self, path: &str, handler: impl Handler<S>) -> Self {
        self.on(Method::Post, path, handler)
    }

    pub fn patch(self, path: &str, handler: impl Handler<S>) -> Self {
        self.on(Method::Patch, path, handler)
    }

    pub fn delete(self, path: &str, handler: impl Handler<S>) -> Self {
        self.on(Method::Delete, path, handler)
    }

    /// Routes one request to its handler.
    ///
    /// Unmatched requests get a bare `404`, and path parameters that do not
    /// decode to UTF-8 a bare `400`. `HEAD` falls back to the `GET` route
    /// and drops the body.
    pub(crate) async fn handle(&self, mut req: Request) -> Response {
        let head = req.method == Method::Head;
        let found = self.lookup(req.method, &req.path).or_else(|| {
            if head { self.lookup(Method::Get, &req.path) } else { None }
        });

        match found {
            Some(Ok((handler, params))) => {
                req.params = params;
                let res = handler.call(self.state.clone(), req).await;
                if head { res.without_body() } else { res }
            }
            Some(Err(e)) => {
                debug!(method = %req.method, path = %req.path, "bad path parameter: {e}");
                Response::status(Status::BadRequest)
            }
            None => {
                debug!(method = %req.method, path = %req.path, "no route");
                Response::status(Status::NotFound)
            }
        }
    }

    /// Params are percent-decoded, so `/posts/category/web%20dev` captures
    /// `web dev`.
    fn lookup(
        &self,
        method: Method,
        path: &str,
    ) -> Option<Result<(BoxedHandler<S>, HashMap<String, String>), Utf8Error>> {
        let tree = self.routes.get(&method)?;
        let matched = tree.at(normalize(path)).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| -> Result<(String, String), Utf8Error> {
                Ok((k.to_owned(), percent_decode_str(v).decode_utf8()?.into_owned()))
            })
            .collect::<Result<HashMap<_, _>, _>>();
        Some(params.map(|params| (handler, params)))
    }
}

/// Strips a single trailing slash so `/posts/` routes like `/posts`.
fn normalize(path: &str) -> &str {
    match path.strip_suffix('/') {
        Some(trimmed) if !trimmed.is_empty() => trimmed,
        _ => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn echo_id(_: (), req: Request) -> String {
        req.param("id").unwrap_or("-").to_owned()
    }

    async fn category(_: (), req: Request) -> String {
        format!("category:{}", req.param("category").unwrap_or("-"))
    }

    fn router() -> Router<()> {
        Router::new(())
            .get("/posts/{id}", echo_id)
            .get("/posts/category/{category}", category)
    }

    #[tokio::test]
    async fn extracts_path_params() {
        let res = router().handle(Request::test(Method::Get, "/posts/42", "")).await;
        assert_eq!(res.status_code(), Status::Ok);
        assert_eq!(res.body(), b"42");
    }

    #[tokio::test]
    async fn static_segment_wins_over_param() {
        let res = router().handle(Request::test(Method::Get, "/posts/category/news", "")).await;
        assert_eq!(res.body(), b"category:news");
    }

    #[tokio::test]
    async fn trailing_slash_is_ignored() {
        let res = router().handle(Request::test(Method::Get, "/posts/7/", "")).await;
        assert_eq!(res.body(), b"7");
    }

    #[tokio::test]
    async fn unmatched_method_or_path_is_404() {
        let router = router();
        let res = router.handle(Request::test(Method::Delete, "/posts/42", "")).await;
        assert_eq!(res.status_code(), Status::NotFound);
        let res = router.handle(Request::test(Method::Get, "/nope", "")).await;
        assert_eq!(res.status_code(), Status::NotFound);
    }

    #[tokio::test]
    async fn params_are_percent_decoded() {
        let res = router().handle(Request::test(Method::Get, "/posts/category/caf%C3%A9%20au%20lait", "")).await;
        assert_eq!(res.body(), "category:café au lait".as_bytes());
    }

    #[tokio::test]
    async fn undecodable_param_is_400() {
        let res = router().handle(Request::test(Method::Get, "/posts/%FF", "")).await;
        assert_eq!(res.status_code(), Status::BadRequest);
    }

    #[tokio::test]
    async fn head_uses_get_route_without_body() {
        let res = router().handle(Request::test(Method::Head, "/posts/42", "")).await;
        assert_eq!(res.status_code(), Status::Ok);
        assert!(res.body().is_empty());
        assert_eq!(res.header("content-type"), Some("text/plain; charset=utf-8"));
    }

    #[test]
    fn normalize_keeps_root() {
        assert_eq!(normalize("/"), "/");
        assert_eq!(normalize("/posts/"), "/posts");
        assert_eq!(normalize("/posts"), "/posts");
    }
}
