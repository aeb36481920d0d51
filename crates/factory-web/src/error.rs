//! Error types for the factory web interface.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use database::DatabaseError;
use identity::IdentityError;
use orchestrator::OrchestratorError;
use thiserror::Error;

/// Errors that can occur in request handlers.
///
/// Only the status and a generic message reach the client; details are logged.
#[derive(Debug, Error)]
pub enum WebError {
    /// Malformed or incomplete request.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Requested record does not exist for this user.
    #[error("Not found: {0}")]
    NotFound(&'static str),

    /// Job orchestration error.
    #[error("Orchestrator error: {0}")]
    Orchestrator(#[from] OrchestratorError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Identity provider error.
    #[error("Identity error: {0}")]
    Identity(#[from] IdentityError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl WebError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            WebError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            WebError::NotFound(what) => (StatusCode::NOT_FOUND, format!("{what} not found")),
            WebError::Orchestrator(err) => match err {
                OrchestratorError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                OrchestratorError::NotSigned(_) => {
                    (StatusCode::NOT_FOUND, "Signature not found".to_string())
                }
                OrchestratorError::Database(db) if db.is_not_found() => {
                    (StatusCode::NOT_FOUND, "Plumbus not found".to_string())
                }
                OrchestratorError::SigStore(_) => (
                    StatusCode::BAD_GATEWAY,
                    "Signature service unavailable".to_string(),
                ),
                OrchestratorError::Database(_) | OrchestratorError::JobAborted { .. } => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                ),
            },
            WebError::Database(err) if err.is_not_found() => {
                (StatusCode::NOT_FOUND, "Not found".to_string())
            }
            WebError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database error".to_string(),
            ),
            WebError::Identity(_) => (StatusCode::BAD_GATEWAY, "Authentication failed".to_string()),
            WebError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");
        }

        let body = serde_json::json!({
            "error": message
        });

        (status, Json(body)).into_response()
    }
}

/// Result type for handlers.
pub type Result<T> = std::result::Result<T, WebError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (WebError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (WebError::NotFound("Image"), StatusCode::NOT_FOUND),
            (
                OrchestratorError::Validation("missing required fields: name".into()).into(),
                StatusCode::BAD_REQUEST,
            ),
            (
                OrchestratorError::NotSigned(uuid::Uuid::nil()).into(),
                StatusCode::NOT_FOUND,
            ),
            (
                DatabaseError::NotFound {
                    entity: "plumbus",
                    id: "x".into(),
                }
                .into(),
                StatusCode::NOT_FOUND,
            ),
            (
                IdentityError::Status { status: 401 }.into(),
                StatusCode::BAD_GATEWAY,
            ),
            (WebError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_server_errors_hide_details() {
        let err = WebError::Internal("secret path /var/lib/factory".into());
        let (_, message) = err.status_and_message();
        assert_eq!(message, "Internal server error");
    }
}
