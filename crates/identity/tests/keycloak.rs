//! Tests for the Keycloak client against a throwaway local realm.

use std::collections::HashMap;
use std::net::SocketAddr;

use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use identity::{IdentityError, IdentityProvider, KeycloakClient, KeycloakConfig};
use serde_json::json;

const REALM_PATH: &str = "/realms/citadel/protocol/openid-connect";

async fn spawn_realm() -> SocketAddr {
    let app = Router::new()
        .route(
            &format!("{REALM_PATH}/token"),
            post(|Form(form): Form<HashMap<String, String>>| async move {
                let ok = form.get("grant_type").map(String::as_str) == Some("authorization_code")
                    && form.get("client_id").map(String::as_str) == Some("factory")
                    && form.get("client_secret").map(String::as_str) == Some("s3cret")
                    && form.get("redirect_uri").map(String::as_str)
                        == Some("http://app/auth/callback");
                match form.get("code") {
                    Some(code) if ok && code == "good-code" => Json(json!({
                        "access_token": "token-123",
                        "token_type": "Bearer",
                        "expires_in": 300,
                    }))
                    .into_response(),
                    _ => (StatusCode::BAD_REQUEST, Json(json!({"error": "invalid_grant"})))
                        .into_response(),
                }
            }),
        )
        .route(
            &format!("{REALM_PATH}/userinfo"),
            get(|headers: HeaderMap| async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default();
                match auth {
                    "Bearer token-123" => Json(json!({
                        "sub": "kc-subject-1",
                        "preferred_username": "rick",
                        "email": "rick@citadel.io",
                    }))
                    .into_response(),
                    "Bearer token-partial" => Json(json!({ "sub": "kc-subject-2" })).into_response(),
                    _ => StatusCode::UNAUTHORIZED.into_response(),
                }
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client_for(addr: SocketAddr) -> KeycloakClient {
    KeycloakClient::new(KeycloakConfig {
        public_url: "https://sso.example.com".to_string(),
        internal_url: format!("http://{addr}"),
        realm: "citadel".to_string(),
        client_id: "factory".to_string(),
        client_secret: "s3cret".to_string(),
        ..KeycloakConfig::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_login_url_targets_public_endpoint() {
    let addr = spawn_realm().await;
    let client = client_for(addr);

    let url = client.login_url("http://app/auth/callback").unwrap();

    assert!(url.starts_with(
        "https://sso.example.com/realms/citadel/protocol/openid-connect/auth?"
    ));
    assert!(url.contains("client_id=factory"));
    assert!(url.contains("redirect_uri=http%3A%2F%2Fapp%2Fauth%2Fcallback"));
    assert!(url.contains("response_type=code"));
    assert!(url.contains("scope=openid+profile+email"));
}

#[tokio::test]
async fn test_exchange_code_and_resolve_identity() {
    let addr = spawn_realm().await;
    let client = client_for(addr);

    let token = client
        .exchange_code("good-code", "http://app/auth/callback")
        .await
        .unwrap();
    assert_eq!(token.access_token, "token-123");
    assert_eq!(token.expires_in, Some(300));

    let identity = client
        .user_info(&token.access_token)
        .await
        .unwrap()
        .into_identity()
        .unwrap();
    assert_eq!(identity.subject, "kc-subject-1");
    assert_eq!(identity.username, "rick");
    assert_eq!(identity.email, "rick@citadel.io");
}

#[tokio::test]
async fn test_exchange_rejected_code() {
    let addr = spawn_realm().await;
    let client = client_for(addr);

    let err = client
        .exchange_code("stolen-code", "http://app/auth/callback")
        .await
        .unwrap_err();
    assert!(matches!(err, IdentityError::Status { status: 400 }));
}

#[tokio::test]
async fn test_user_info_rejects_invalid_token() {
    let addr = spawn_realm().await;
    let client = client_for(addr);

    let err = client.user_info("expired").await.unwrap_err();
    assert!(matches!(err, IdentityError::Status { status: 401 }));
}

#[tokio::test]
async fn test_user_info_with_missing_claims() {
    let addr = spawn_realm().await;
    let client = client_for(addr);

    let info = client.user_info("token-partial").await.unwrap();
    assert_eq!(info.sub.as_deref(), Some("kc-subject-2"));
    assert!(matches!(
        info.into_identity(),
        Err(IdentityError::IncompleteUserInfo("preferred_username"))
    ));
}
