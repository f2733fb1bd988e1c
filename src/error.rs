//! Unified error types for toggleboard.
//!
//! [`ToggleError`] covers both request-level failures (validation, missing
//! records, storage problems) and process-level failures (bind address,
//! I/O, the `health` subcommand's HTTP client). Request-level variants map
//! onto HTTP status codes through the [`IntoResponse`] implementation, which
//! always renders a `{"error": "..."}` JSON body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ToggleError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Could not connect to the database ({backend}): {source}")]
    StorageUnavailable {
        backend: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("Database error ({backend}): {source}")]
    Storage {
        backend: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("Invalid address: {0}")]
    AddressParse(#[from] std::net::AddrParseError),

    #[error("Invalid URI: {source}")]
    UriParse {
        #[source]
        source: BoxError,
    },

    #[error("HTTP request failed: {source}")]
    HttpRequest {
        #[source]
        source: BoxError,
    },

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Health check failed with status {0}")]
    HealthCheckFailed(hyper::StatusCode),
}

impl ToggleError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn toggle_not_found() -> Self {
        Self::NotFound("Feature toggle not found".into())
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ToggleError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "request rejected");
        }

        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_errors_map_to_status_codes() {
        assert_eq!(
            ToggleError::validation("bad").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ToggleError::toggle_not_found().status(),
            StatusCode::NOT_FOUND
        );
        let storage = ToggleError::Storage {
            backend: "memory",
            source: "boom".into(),
        };
        assert_eq!(storage.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn unavailable_message_names_backend() {
        let err = ToggleError::StorageUnavailable {
            backend: "mongodb",
            source: "server selection timeout".into(),
        };
        assert_eq!(
            err.to_string(),
            "Could not connect to the database (mongodb): server selection timeout"
        );
    }
}
