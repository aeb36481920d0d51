//! Error types for identity.

use thiserror::Error;

/// Errors that can occur while talking to the identity provider.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// HTTP request failed, or the response body could not be decoded.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider rejected the request.
    #[error("identity provider returned status {status}")]
    Status { status: u16 },

    /// User-info lacked one of `sub`, `preferred_username`, `email`.
    #[error("incomplete user info: missing {0}")]
    IncompleteUserInfo(&'static str),

    /// A configured URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}
