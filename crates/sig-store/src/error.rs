//! Error types for sig-store.

use thiserror::Error;

/// Errors that can occur when talking to sig-store.
#[derive(Debug, Error)]
pub enum SigStoreError {
    /// HTTP request failed, or the response body could not be decoded.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Sig-store answered with a non-200 status.
    #[error("sig-store returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The artifact could not be read from disk.
    #[error("failed to read artifact: {0}")]
    Io(#[from] std::io::Error),
}
