//! Sig-store client library.
//!
//! Sig-store registers artifacts and hands back a detached signature, and can
//! later confirm that a file still matches a signature it issued. Both calls
//! upload the artifact as a multipart form.
//!
//! # Example
//!
//! ```no_run
//! use sig_store::{SigStoreClient, SigStoreConfig};
//!
//! # async fn example() -> Result<(), sig_store::SigStoreError> {
//! let client = SigStoreClient::new(SigStoreConfig::default())?;
//!
//! let registration = client.register("storage/images/plumbus.png").await?;
//! let verification = client
//!     .verify("storage/images/plumbus.png", &registration.signature)
//!     .await?;
//! assert!(verification.valid);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::SigStoreClient;
pub use config::SigStoreConfig;
pub use error::SigStoreError;
pub use types::{Registration, Verification};
