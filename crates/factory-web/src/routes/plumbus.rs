//! Plumbus JSON API.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use chrono::{DateTime, Utc};
use database::{plumbus, Plumbus, PlumbusStatus};
use orchestrator::PlumbusRequest;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{Result, WebError};
use crate::session::CurrentUser;
use crate::state::AppState;

/// Reply to a generation request.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub id: Uuid,
    pub status: &'static str,
    pub is_rare: bool,
}

/// Status poll reply. Signature fields are `null` until signed.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub id: Uuid,
    pub status: PlumbusStatus,
    pub name: String,
    pub is_rare: bool,
    pub signature: Option<String>,
    pub signature_date: Option<DateTime<Utc>>,
}

/// Signature check reply.
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub id: Uuid,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| WebError::BadRequest("Invalid ID".to_string()))
}

async fn owned_plumbus(state: &AppState, current: &CurrentUser, raw_id: &str) -> Result<Plumbus> {
    let id = parse_id(raw_id)?;
    Ok(state.factory.plumbus_for_user(current.user.id, id).await?)
}

/// Accept a new plumbus request and start its job.
pub async fn generate(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    payload: std::result::Result<Json<PlumbusRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>> {
    let Json(request) = payload.map_err(|e| WebError::BadRequest(e.body_text()))?;

    let submission = state.factory.submit(&current.user, request).await?;
    let created = submission.plumbus;
    submission.job.detach();

    info!(
        plumbus_id = %created.id,
        user_id = %current.user.id,
        is_rare = created.is_rare,
        "Plumbus generation started"
    );

    Ok(Json(GenerateResponse {
        id: created.id,
        status: PlumbusStatus::Generating.as_str(),
        is_rare: created.is_rare,
    }))
}

/// Current status of one plumbus.
pub async fn status(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<StatusResponse>> {
    let found = owned_plumbus(&state, &current, &id).await?;

    Ok(Json(StatusResponse {
        id: found.id,
        status: found.status,
        name: found.name,
        is_rare: found.is_rare,
        signature: found.signature,
        signature_date: found.signature_date,
    }))
}

/// Generated PNG of a completed plumbus.
pub async fn image(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let found = owned_plumbus(&state, &current, &id).await?;

    let path = match (&found.status, &found.image_path) {
        (PlumbusStatus::Completed, Some(path)) => path,
        _ => return Err(WebError::NotFound("Image")),
    };

    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(plumbus_id = %found.id, path = %path, "Image file missing on disk");
            return Err(WebError::NotFound("Image"));
        }
        Err(e) => return Err(WebError::Internal(format!("reading {path}: {e}"))),
    };

    Ok(([(header::CONTENT_TYPE, "image/png")], bytes))
}

/// Re-check a plumbus signature with sig-store.
pub async fn verify(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<VerifyResponse>> {
    let found = owned_plumbus(&state, &current, &id).await?;
    let verification = state.factory.verify(&found).await?;

    Ok(Json(VerifyResponse {
        id: found.id,
        valid: verification.valid,
        message: verification.message,
    }))
}

/// All of the session user's plumbuses, newest first.
pub async fn list(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<Vec<Plumbus>>> {
    let plumbuses = plumbus::list_plumbuses_for_user(state.db().pool(), current.user.id).await?;
    Ok(Json(plumbuses))
}
