//! Route handlers for the factory web interface.

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod home;
pub mod plumbus;


use axum::middleware;
use axum::routing::{get, post};
use axum::Router;

use crate::session;
use crate::state::AppState;

/// Build the router with all routes.
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        // HTML pages
        .route("/dashboard", get(dashboard::dashboard_page))
        // API endpoints
        .route("/plumbus/generate", post(plumbus::generate))
        .route("/plumbus/status/:id", get(plumbus::status))
        .route("/plumbus/image/:id", get(plumbus::image))
        .route("/plumbus/verify/:id", get(plumbus::verify))
        .route("/plumbus/list", get(plumbus::list))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            session::require_session,
        ));

    Router::new()
        .route("/", get(home::home_page))
        // Health check
        .route("/health", get(health::health))
        // Login flow
        .route("/auth/login", get(auth::login))
        .route("/auth/callback", get(auth::callback))
        .route("/auth/logout", get(auth::logout))
        .merge(protected)
        .with_state(state)
}
