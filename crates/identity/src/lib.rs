//! Keycloak OpenID Connect client.
//!
//! Covers the three calls the factory needs for the authorization-code flow:
//! building the browser login URL, exchanging the returned code for an access
//! token, and resolving a token to the user behind it.
//!
//! The [`IdentityProvider`] trait is the seam the web layer depends on, so it
//! can run against a fake provider in tests.
//!
//! # Example
//!
//! ```no_run
//! use identity::{IdentityProvider, KeycloakClient, KeycloakConfig};
//!
//! # async fn example(code: &str) -> Result<(), identity::IdentityError> {
//! let client = KeycloakClient::new(KeycloakConfig::default())?;
//! let redirect_uri = "http://localhost:8080/auth/callback";
//!
//! println!("Send the browser to {}", client.login_url(redirect_uri)?);
//!
//! let token = client.exchange_code(code, redirect_uri).await?;
//! let who = client.user_info(&token.access_token).await?.into_identity()?;
//! println!("Logged in as {} <{}>", who.username, who.email);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod provider;
pub mod types;

pub use client::KeycloakClient;
pub use config::KeycloakConfig;
pub use error::IdentityError;
pub use provider::IdentityProvider;
pub use types::{Identity, TokenResponse, UserInfo};

/// Re-exported so implementors don't need their own dependency.
pub use async_trait::async_trait;
