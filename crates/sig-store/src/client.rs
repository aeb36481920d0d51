//! Sig-store HTTP client.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::config::SigStoreConfig;
use crate::error::SigStoreError;
use crate::types::{Registration, Verification};

/// Client for the sig-store signing service.
#[derive(Clone)]
pub struct SigStoreClient {
    http: Client,
    config: SigStoreConfig,
}

impl SigStoreClient {
    /// Build a client for the configured sig-store.
    pub fn new(config: SigStoreConfig) -> Result<Self, SigStoreError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(SigStoreError::Http)?;

        Ok(Self { http, config })
    }

    /// Register a file and obtain its signature.
    pub async fn register(&self, path: impl AsRef<Path>) -> Result<Registration, SigStoreError> {
        let path = path.as_ref();
        let form = Form::new().part("file", file_part(path).await?);

        let registration: Registration = self.post_form(&self.config.register_url(), form).await?;

        info!(
            path = %path.display(),
            serial_number = registration.serial_number,
            "Registered artifact with sig-store"
        );
        Ok(registration)
    }

    /// Check that a file matches a previously issued signature.
    pub async fn verify(
        &self,
        path: impl AsRef<Path>,
        signature: &str,
    ) -> Result<Verification, SigStoreError> {
        let path = path.as_ref();
        let form = Form::new()
            .part("file", file_part(path).await?)
            .text("signature", signature.to_string());

        let verification: Verification = self.post_form(&self.config.verify_url(), form).await?;

        debug!(path = %path.display(), valid = verification.valid, "Verified artifact");
        Ok(verification)
    }

    async fn post_form<R: DeserializeOwned>(&self, url: &str, form: Form) -> Result<R, SigStoreError> {
        debug!(%url, "Sig-store request");

        let response = self.http.post(url).multipart(form).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(SigStoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

async fn file_part(path: &Path) -> Result<Part, SigStoreError> {
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "artifact".to_string());

    Ok(Part::bytes(bytes).file_name(file_name))
}

impl std::fmt::Debug for SigStoreClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigStoreClient")
            .field("config", &self.config)
            .finish()
    }
}
