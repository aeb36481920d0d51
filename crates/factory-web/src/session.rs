//! Cookie session and the middleware guarding logged-in routes.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite, SignedCookieJar};
use database::{user, User};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::state::AppState;

pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
pub const USER_ID_COOKIE: &str = "user_id";

/// How long a login lasts.
const SESSION_TTL: time::Duration = time::Duration::hours(1);

/// The authenticated user, placed in request extensions by [`require_session`].
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
}

/// Add the session cookies for a freshly authenticated user.
pub fn start_session(jar: SignedCookieJar, access_token: String, user_id: Uuid) -> SignedCookieJar {
    let token = Cookie::build((ACCESS_TOKEN_COOKIE, access_token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(SESSION_TTL);
    let user = Cookie::build((USER_ID_COOKIE, user_id.to_string()))
        .path("/")
        .same_site(SameSite::Lax)
        .max_age(SESSION_TTL);

    jar.add(token).add(user)
}

/// Expire both session cookies.
///
/// Works on the unsigned jar so the browser is told to drop the cookies even
/// when they were never present or fail signature verification.
pub fn end_session(jar: CookieJar) -> CookieJar {
    jar.add(expired(ACCESS_TOKEN_COOKIE)).add(expired(USER_ID_COOKIE))
}

fn expired(name: &'static str) -> Cookie<'static> {
    Cookie::build((name, ""))
        .path("/")
        .max_age(time::Duration::ZERO)
        .expires(time::OffsetDateTime::UNIX_EPOCH)
        .build()
}

/// Let the request through only with a session the identity provider still accepts.
///
/// Anything else clears the cookies and sends the browser back to `/`.
pub async fn require_session(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    plain: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    match authenticate(&state, &jar).await {
        Some(current) => {
            request.extensions_mut().insert(current);
            next.run(request).await
        }
        None => (end_session(plain), Redirect::temporary("/")).into_response(),
    }
}

async fn authenticate(state: &AppState, jar: &SignedCookieJar) -> Option<CurrentUser> {
    let access_token = jar.get(ACCESS_TOKEN_COOKIE)?.value().to_string();
    let raw_user_id = jar.get(USER_ID_COOKIE)?.value().to_string();

    let user_id = match Uuid::parse_str(&raw_user_id) {
        Ok(id) => id,
        Err(e) => {
            warn!(error = %e, "Malformed user id in session cookie");
            return None;
        }
    };

    let info = match state.identity.user_info(&access_token).await {
        Ok(info) => info,
        Err(e) => {
            debug!(%user_id, error = %e, "Token verification failed");
            return None;
        }
    };

    let user = match user::get_user(state.db().pool(), user_id).await {
        Ok(user) => user,
        Err(e) => {
            warn!(%user_id, error = %e, "Session user could not be loaded");
            return None;
        }
    };

    if info.sub.as_deref() != Some(user.keycloak_id.as_str()) {
        warn!(%user_id, "Token subject does not match session user");
        return None;
    }

    Some(CurrentUser { user })
}
