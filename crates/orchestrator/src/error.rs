//! Error types for orchestrator operations.

use database::DatabaseError;
use sig_store::SigStoreError;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur while submitting or running plumbus jobs.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// The submitted attributes were rejected.
    #[error("invalid request: {0}")]
    Validation(String),

    /// Persistence failed.
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),

    /// Sig-store could not be reached or refused the request.
    #[error("sig-store error: {0}")]
    SigStore(#[from] SigStoreError),

    /// Verification was requested for a plumbus that was never signed.
    #[error("plumbus {0} has no signed image")]
    NotSigned(Uuid),

    /// The background job panicked or was aborted.
    #[error("job for plumbus {id} did not finish: {reason}")]
    JobAborted { id: Uuid, reason: String },
}

impl OrchestratorError {
    /// Check if this is a not-found error from the store.
    pub fn is_not_found(&self) -> bool {
        matches!(self, OrchestratorError::Database(e) if e.is_not_found())
    }
}
