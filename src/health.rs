//! Health-check handlers.
//!
//! | Check | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? |
//! | **Readiness** | `/readyz` | Can the process serve traffic? |
//!
//! Both are generic over the router state so they mount on any router:
//!
//! ```rust
//! use postboard::{Router, health};
//!
//! let app = Router::new(())
//!     .get("/healthz", health::liveness)
//!     .get("/readyz", health::readiness);
//! ```

use crate::{Request, Response};

/// Always `200 OK` with body `"ok"`.
pub async fn liveness<S>(_state: S, _req: Request) -> Response {
    Response::text("ok")
}

/// `200 OK` with body `"ready"`. The store lives in process memory, so there
/// is nothing to warm up or wait for.
pub async fn readiness<S>(_state: S, _req: Request) -> Response {
    Response::text("ready")
}
