//! Unified server error type.
//!
//! Every handler returns `Result<T, ServerError>`, which implements
//! [`axum::response::IntoResponse`] so errors are automatically converted
//! to a JSON-body HTTP response with an appropriate status code.
//!
//! **Security note:** internal errors (I/O, archive writing, task failures)
//! are logged with full detail but only a generic message is returned to the
//! caller so that temp paths and library internals never leak to clients.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use convgate_core::{ConvertError, ErrorKind};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// All errors that can occur in the convgate-server request lifecycle.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Propagated from convgate-core.
    #[error(transparent)]
    Convert(#[from] ConvertError),

    /// The caller sent an invalid or malformed request.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The request body exceeded the configured limit.
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),

    /// An unclassified internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::Convert(e) => match e.kind() {
                ErrorKind::Validation => match e {
                    ConvertError::TooManyFiles { .. } | ConvertError::PayloadTooLarge { .. } => {
                        StatusCode::PAYLOAD_TOO_LARGE
                    }
                    _ => StatusCode::BAD_REQUEST,
                },
                ErrorKind::Decode | ErrorKind::UnsupportedOption => StatusCode::BAD_REQUEST,
                ErrorKind::Upstream => StatusCode::BAD_GATEWAY,
                ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let client_message = match &self {
            ServerError::Convert(e) if e.kind() == ErrorKind::Internal => {
                error!(error = %e, "conversion failed internally");
                "internal server error".to_owned()
            }
            ServerError::Convert(e) if e.kind() == ErrorKind::Upstream => {
                warn!(error = %e, "upstream rate service failure");
                e.to_string()
            }
            ServerError::Convert(e) => e.to_string(),
            ServerError::BadRequest(m) | ServerError::PayloadTooLarge(m) => m.clone(),
            ServerError::Internal(m) => {
                error!(message = %m, "internal server error");
                "internal server error".to_owned()
            }
        };
        (status, Json(json!({ "error": client_message }))).into_response()
    }
}

impl From<MultipartError> for ServerError {
    fn from(e: MultipartError) -> Self {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ServerError::PayloadTooLarge(e.body_text())
        } else {
            ServerError::BadRequest(format!("failed to read multipart body: {}", e.body_text()))
        }
    }
}

impl From<tokio::task::JoinError> for ServerError {
    fn from(e: tokio::task::JoinError) -> Self {
        ServerError::Internal(format!("conversion task failed: {e}"))
    }
}
