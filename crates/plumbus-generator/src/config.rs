//! Configuration types for plumbus-generator.

use std::path::PathBuf;
use std::time::Duration;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the generation service client.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Base URL of the service (e.g., "http://localhost:8081").
    pub base_url: String,
    /// Directory generated images are written to.
    pub image_dir: PathBuf,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl GeneratorConfig {
    /// Create a new configuration with the given base URL and image directory.
    pub fn new(base_url: impl Into<String>, image_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_url: base_url.into(),
            image_dir: image_dir.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the generation endpoint URL.
    pub fn generate_url(&self) -> String {
        format!("{}/plumbus", self.base_url.trim_end_matches('/'))
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new("http://localhost:8081", "storage/images")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_url() {
        let config = GeneratorConfig::new("http://gen:8081/", "/tmp/img");
        assert_eq!(config.generate_url(), "http://gen:8081/plumbus");
    }

    #[test]
    fn test_default() {
        let config = GeneratorConfig::default();
        assert_eq!(config.base_url, "http://localhost:8081");
        assert_eq!(config.image_dir, PathBuf::from("storage/images"));
        assert_eq!(config.timeout, Duration::from_secs(30));
    }
}
