use std::time::Instant;

use tracing::{error, info};

use crate::request::Request;
use crate::response::Response;
use crate::router::Router;

/// Routes `req` and logs method, path, status and latency once it completes.
///
/// Server errors log at `error`, everything else at `info`.
pub(crate) async fn trace<S>(router: &Router<S>, req: Request) -> Response
where
    S: Clone + Send + Sync + 'static,
{
    let method = req.method();
    let path = req.path().to_owned();
    let started = Instant::now();

    let res = router.handle(req).await;

    let status = res.status_code().as_u16();
    let latency_us = started.elapsed().as_micros() as u64;
    if status >= 500 {
        error!(%method, %path, status, latency_us, "request failed");
    } else {
        info!(%method, %path, status, latency_us, "request");
    }
    res
}
