//! Application state shared across handlers.

use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use database::Database;
use identity::IdentityProvider;
use orchestrator::Factory;
use sha2::{Digest, Sha512};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Plumbus job orchestration.
    pub factory: Factory,
    /// OIDC provider used for login and per-request token checks.
    pub identity: Arc<dyn IdentityProvider>,
    /// Key signing the session cookies.
    pub cookie_key: Key,
}

impl AppState {
    /// Create new application state, deriving the cookie key from `session_secret`.
    pub fn new(factory: Factory, identity: Arc<dyn IdentityProvider>, session_secret: &str) -> Self {
        // SHA-512 yields exactly the 64 bytes a signing key needs.
        let digest = Sha512::digest(session_secret.as_bytes());

        Self {
            factory,
            identity,
            cookie_key: Key::from(digest.as_slice()),
        }
    }

    /// Database connection.
    pub fn db(&self) -> &Database {
        self.factory.database()
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}
