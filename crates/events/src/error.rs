//! Event publishing errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventError {
    #[error("failed to connect to NATS: {0}")]
    Connect(String),

    #[error("failed to publish event: {0}")]
    Publish(String),

    #[error("failed to serialize event: {0}")]
    Json(#[from] serde_json::Error),
}
