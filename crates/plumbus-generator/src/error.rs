//! Error types for plumbus-generator.

use thiserror::Error;

/// Errors that can occur when generating a plumbus image.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// HTTP request failed (connect, timeout, body stream).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-200 status.
    #[error("service returned status {0}")]
    Status(u16),

    /// Writing the image to local storage failed.
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),
}
