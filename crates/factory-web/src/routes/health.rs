//! Health check endpoint.

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
}

/// Liveness probe. Does not touch any collaborator.
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}
