//! Configuration types for identity.

use std::time::Duration;

/// Configuration for the Keycloak client.
#[derive(Debug, Clone)]
pub struct KeycloakConfig {
    /// Browser-facing Keycloak URL, used for the login redirect.
    pub public_url: String,
    /// Keycloak URL reachable from this service, used for back-channel calls.
    pub internal_url: String,
    pub realm: String,
    pub client_id: String,
    pub client_secret: String,
    /// Per-request timeout for back-channel calls.
    pub timeout: Duration,
}

impl KeycloakConfig {
    fn realm_base(base: &str, realm: &str) -> String {
        format!(
            "{}/realms/{}/protocol/openid-connect",
            base.trim_end_matches('/'),
            realm
        )
    }

    /// Get the browser authorization endpoint URL.
    pub fn auth_url(&self) -> String {
        format!("{}/auth", Self::realm_base(&self.public_url, &self.realm))
    }

    /// Get the token endpoint URL.
    pub fn token_url(&self) -> String {
        format!("{}/token", Self::realm_base(&self.internal_url, &self.realm))
    }

    /// Get the user-info endpoint URL.
    pub fn userinfo_url(&self) -> String {
        format!("{}/userinfo", Self::realm_base(&self.internal_url, &self.realm))
    }
}

impl Default for KeycloakConfig {
    fn default() -> Self {
        Self {
            public_url: "http://localhost:8080".to_string(),
            internal_url: "http://localhost:8080".to_string(),
            realm: "master".to_string(),
            client_id: "factory".to_string(),
            client_secret: String::new(),
            timeout: Duration::from_secs(30),
        }
    }
}
