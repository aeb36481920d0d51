//! Login, callback and logout.

use axum::extract::{Host, Query, State};
use axum::response::Redirect;
use axum_extra::extract::cookie::{CookieJar, SignedCookieJar};
use database::user;
use serde::Deserialize;
use tracing::info;

use crate::error::{Result, WebError};
use crate::session;
use crate::state::AppState;

/// Query parameters Keycloak sends back to the callback.
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
}

/// Callback URL for the host the browser used to reach us.
fn redirect_uri(host: &str) -> String {
    format!("http://{host}/auth/callback")
}

/// Send the browser to the identity provider.
pub async fn login(State(state): State<AppState>, Host(host): Host) -> Result<Redirect> {
    let url = state.identity.login_url(&redirect_uri(&host))?;
    Ok(Redirect::temporary(&url))
}

/// Finish the authorization-code flow and open a session.
pub async fn callback(
    State(state): State<AppState>,
    Host(host): Host,
    jar: SignedCookieJar,
    Query(params): Query<CallbackParams>,
) -> Result<(SignedCookieJar, Redirect)> {
    let code = params
        .code
        .filter(|code| !code.is_empty())
        .ok_or_else(|| WebError::BadRequest("Missing authorization code".to_string()))?;

    let token = state
        .identity
        .exchange_code(&code, &redirect_uri(&host))
        .await?;
    let identity = state
        .identity
        .user_info(&token.access_token)
        .await?
        .into_identity()?;

    let user = user::find_or_create_user(
        state.db().pool(),
        &identity.subject,
        &identity.username,
        &identity.email,
    )
    .await?;

    info!(user_id = %user.id, username = %user.username, "User authenticated");

    let jar = session::start_session(jar, token.access_token, user.id);
    Ok((jar, Redirect::temporary("/dashboard")))
}

/// Drop the session.
pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    info!("User logged out");
    (session::end_session(jar), Redirect::temporary("/"))
}
