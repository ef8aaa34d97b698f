//! Middleware layer.
//!
//! Cross-cutting concerns that wrap every dispatched request. Currently one:
//! [`trace`], a completion log line per request.

mod trace;

pub(crate) use trace::trace;
