//! Generation service HTTP client.

use std::path::{Path, PathBuf};

use futures::StreamExt;
use reqwest::{Client, StatusCode};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::GeneratorConfig;
use crate::error::GeneratorError;
use crate::types::GenerationRequest;

/// Client for the plumbus image-generation service.
#[derive(Clone)]
pub struct GeneratorClient {
    http: Client,
    config: GeneratorConfig,
}

impl GeneratorClient {
    /// Build a client. No request is made until [`generate`](Self::generate).
    pub fn new(config: GeneratorConfig) -> Result<Self, GeneratorError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(GeneratorError::Http)?;

        Ok(Self { http, config })
    }

    /// Request an image and stream it to `{image_dir}/{uuid}.png`.
    ///
    /// Returns the path of the stored file. Any non-200 answer is an error and
    /// leaves nothing on disk.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<PathBuf, GeneratorError> {
        let url = self.config.generate_url();
        debug!(%url, "Requesting plumbus image");

        let response = self.http.post(&url).json(request).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(GeneratorError::Status(status.as_u16()));
        }

        tokio::fs::create_dir_all(&self.config.image_dir).await?;
        let path = self.config.image_dir.join(format!("{}.png", Uuid::new_v4()));

        if let Err(e) = write_body(&path, response).await {
            if let Err(cleanup) = tokio::fs::remove_file(&path).await {
                warn!(path = %path.display(), error = %cleanup, "Failed to remove partial image");
            }
            return Err(e);
        }

        info!(path = %path.display(), "Stored generated image");
        Ok(path)
    }
}

async fn write_body(path: &Path, response: reqwest::Response) -> Result<(), GeneratorError> {
    let mut file = tokio::fs::File::create(path).await?;
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        file.write_all(&chunk?).await?;
    }

    file.flush().await?;
    Ok(())
}

impl std::fmt::Debug for GeneratorClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorClient")
            .field("config", &self.config)
            .finish()
    }
}
