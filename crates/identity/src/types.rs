//! OIDC wire types.

use serde::{Deserialize, Serialize};

use crate::error::IdentityError;

/// Token endpoint response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    /// Lifetime of the access token in seconds.
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub id_token: Option<String>,
}

impl TokenResponse {
    /// A bare bearer token.
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: Some("Bearer".to_string()),
            expires_in: None,
            refresh_token: None,
            id_token: None,
        }
    }
}

/// User-info endpoint response. Every claim is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub preferred_username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// A fully resolved identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Provider subject.
    pub subject: String,
    pub username: String,
    pub email: String,
}

impl UserInfo {
    /// Require all three identity claims.
    pub fn into_identity(self) -> Result<Identity, IdentityError> {
        let subject = self.sub.ok_or(IdentityError::IncompleteUserInfo("sub"))?;
        let username = self
            .preferred_username
            .ok_or(IdentityError::IncompleteUserInfo("preferred_username"))?;
        let email = self.email.ok_or(IdentityError::IncompleteUserInfo("email"))?;

        Ok(Identity {
            subject,
            username,
            email,
        })
    }
}
