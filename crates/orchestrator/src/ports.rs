//! Seams between the orchestrator and its external services.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use plumbus_generator::{GenerationRequest, GeneratorClient, GeneratorError};
use sig_store::{Registration, SigStoreClient, SigStoreError, Verification};

/// Produces a plumbus image and returns where it was stored.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<PathBuf, GeneratorError>;
}

/// Signs generated artifacts and checks existing signatures.
#[async_trait]
pub trait ArtifactSigner: Send + Sync {
    /// Register the file and obtain its signature.
    async fn sign(&self, path: &Path) -> Result<Registration, SigStoreError>;

    /// Check the file against a previously issued signature.
    async fn verify(&self, path: &Path, signature: &str) -> Result<Verification, SigStoreError>;
}

#[async_trait]
impl ImageGenerator for GeneratorClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<PathBuf, GeneratorError> {
        GeneratorClient::generate(self, request).await
    }
}

#[async_trait]
impl ArtifactSigner for SigStoreClient {
    async fn sign(&self, path: &Path) -> Result<Registration, SigStoreError> {
        self.register(path).await
    }

    async fn verify(&self, path: &Path, signature: &str) -> Result<Verification, SigStoreError> {
        SigStoreClient::verify(self, path, signature).await
    }
}
