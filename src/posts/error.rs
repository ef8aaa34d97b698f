use serde::Serialize;
use tracing::debug;

use crate::response::{IntoResponse, Json};
use crate::status::Status;

/// Why a posts request was rejected. Every variant is answered immediately
/// with a `{ "message": ... }` body; nothing is retried or propagated.
#[derive(Debug, thiserror::Error)]
pub enum PostError {
    #[error("Missing field.")]
    MissingField,

    #[error("Post not found")]
    NotFound,

    #[error("Invalid field.")]
    InvalidField {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid JSON body.")]
    InvalidBody(#[source] serde_json::Error),
}

impl PostError {
    pub fn status(&self) -> Status {
        match self {
            Self::NotFound => Status::NotFound,
            Self::MissingField | Self::InvalidField { .. } | Self::InvalidBody(_) => Status::BadRequest,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for PostError {
    fn into_response(self) -> crate::Response {
        match &self {
            Self::InvalidField { field, source } => debug!(field, "invalid field: {source}"),
            Self::InvalidBody(source) => debug!("invalid body: {source}"),
            Self::MissingField | Self::NotFound => {}
        }
        (self.status(), Json(ErrorBody { message: self.to_string() })).into_response()
    }
}
