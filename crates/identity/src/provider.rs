//! The identity provider trait.

use async_trait::async_trait;

use crate::error::IdentityError;
use crate::types::{TokenResponse, UserInfo};

/// An OpenID Connect provider supporting the authorization-code flow.
///
/// This trait is object-safe and can be used with `Arc<dyn IdentityProvider>`.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// URL to send the browser to for login.
    fn login_url(&self, redirect_uri: &str) -> Result<String, IdentityError>;

    /// Exchange an authorization code for tokens.
    async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<TokenResponse, IdentityError>;

    /// Resolve an access token to the user behind it.
    ///
    /// Also serves as token verification: an expired or revoked token fails.
    async fn user_info(&self, access_token: &str) -> Result<UserInfo, IdentityError>;
}
