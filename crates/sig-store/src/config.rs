//! Configuration types for sig-store.

use std::time::Duration;

/// Configuration for the sig-store client.
#[derive(Debug, Clone)]
pub struct SigStoreConfig {
    /// Base URL of sig-store (e.g., "http://localhost:3000").
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl SigStoreConfig {
    /// Create a new configuration with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Get the registration endpoint URL.
    pub fn register_url(&self) -> String {
        format!("{}/api/v1/register", self.base_url.trim_end_matches('/'))
    }

    /// Get the verification endpoint URL.
    pub fn verify_url(&self) -> String {
        format!("{}/api/v1/verify", self.base_url.trim_end_matches('/'))
    }
}

impl Default for SigStoreConfig {
    fn default() -> Self {
        Self::new("http://localhost:3000")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let config = SigStoreConfig::new("http://sig:3000");
        assert_eq!(config.register_url(), "http://sig:3000/api/v1/register");
        assert_eq!(config.verify_url(), "http://sig:3000/api/v1/verify");
    }
}
