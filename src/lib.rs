//! # postboard
//!
//! A disposable REST backend: posts with nested comments, held in process
//! memory and gone on restart. No persistence, no auth, no pagination.
//!
//! The crate is two layers:
//!
//! - A minimal HTTP framework: radix-tree routing via [`matchit`], hyper
//!   connections on tokio, graceful shutdown on SIGTERM / Ctrl-C, and a
//!   router-owned state handle injected into every handler.
//! - The [`posts`] service built on it.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use postboard::{PostStore, Server, health, posts};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), postboard::Error> {
//!     let app = posts::routes("/posts", PostStore::new())
//!         .get("/healthz", health::liveness);
//!
//!     Server::bind(([0, 0, 0, 0], 3000).into()).serve(app).await
//! }
//! ```

mod config;
mod error;
mod handler;
mod method;
mod middleware;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod health;
pub mod posts;

pub use config::Config;
pub use error::Error;
pub use handler::Handler;
pub use method::{Method, UnknownMethod};
pub use posts::PostStore;
pub use request::Request;
pub use response::{IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use status::Status;
