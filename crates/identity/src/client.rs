//! Keycloak HTTP client.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use crate::config::KeycloakConfig;
use crate::error::IdentityError;
use crate::provider::IdentityProvider;
use crate::types::{TokenResponse, UserInfo};

/// Keycloak implementation of [`IdentityProvider`].
#[derive(Clone)]
pub struct KeycloakClient {
    http: Client,
    config: KeycloakConfig,
}

impl KeycloakClient {
    /// Build a client for the configured realm.
    pub fn new(config: KeycloakConfig) -> Result<Self, IdentityError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(IdentityError::Http)?;

        Ok(Self { http, config })
    }
}

#[async_trait]
impl IdentityProvider for KeycloakClient {
    fn login_url(&self, redirect_uri: &str) -> Result<String, IdentityError> {
        let url = Url::parse_with_params(
            &self.config.auth_url(),
            &[
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", redirect_uri),
                ("response_type", "code"),
                ("scope", "openid profile email"),
            ],
        )
        .map_err(|e| IdentityError::InvalidUrl(e.to_string()))?;

        Ok(url.into())
    }

    async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<TokenResponse, IdentityError> {
        let url = self.config.token_url();
        debug!(%url, "Exchanging authorization code");

        let response = self
            .http
            .post(&url)
            .form(&[
                ("grant_type", "authorization_code"),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("code", code),
                ("redirect_uri", redirect_uri),
            ])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(IdentityError::Status {
                status: status.as_u16(),
            });
        }

        Ok(response.json().await?)
    }

    async fn user_info(&self, access_token: &str) -> Result<UserInfo, IdentityError> {
        let response = self
            .http
            .get(self.config.userinfo_url())
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(IdentityError::Status {
                status: status.as_u16(),
            });
        }

        Ok(response.json().await?)
    }
}

impl std::fmt::Debug for KeycloakClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeycloakClient")
            .field("public_url", &self.config.public_url)
            .field("internal_url", &self.config.internal_url)
            .field("realm", &self.config.realm)
            .field("client_id", &self.config.client_id)
            .finish()
    }
}
