//! Client for the plumbus image-generation service.
//!
//! The service takes the five descriptive attributes of a plumbus and answers
//! with raw image bytes. This crate streams that body to local storage and
//! hands back the stored path.
//!
//! # Example
//!
//! ```no_run
//! use plumbus_generator::{GenerationRequest, GeneratorClient, GeneratorConfig};
//!
//! # async fn example() -> Result<(), plumbus_generator::GeneratorError> {
//! let client = GeneratorClient::new(GeneratorConfig::default())?;
//!
//! let request = GenerationRequest {
//!     size: "medium".to_string(),
//!     color: "blue".to_string(),
//!     shape: "round".to_string(),
//!     weight: "light".to_string(),
//!     wrapping: "gift".to_string(),
//! };
//! let path = client.generate(&request).await?;
//! println!("Stored at {}", path.display());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::GeneratorClient;
pub use config::GeneratorConfig;
pub use error::GeneratorError;
pub use types::GenerationRequest;
