//! Dashboard page.

use askama::Template;
use axum::extract::State;
use axum::Extension;
use database::{plumbus, Plumbus, PlumbusStatus};

use crate::error::Result;
use crate::session::CurrentUser;
use crate::state::AppState;

/// Dashboard page template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub title: &'static str,
    pub username: String,
    pub email: String,
    pub counts: Vec<StatusCount>,
    pub plumbuses: Vec<PlumbusCard>,
}

/// Number of plumbuses in one status.
pub struct StatusCount {
    pub status: &'static str,
    pub count: i64,
}

/// One plumbus as shown on the dashboard.
pub struct PlumbusCard {
    pub id: String,
    pub name: String,
    pub size: String,
    pub color: String,
    pub shape: String,
    pub weight: String,
    pub wrapping: String,
    pub status: &'static str,
    pub is_rare: bool,
    pub has_image: bool,
    pub signature: String,
    pub signature_date: String,
    pub error_msg: String,
    pub created_at: String,
}

impl From<Plumbus> for PlumbusCard {
    fn from(p: Plumbus) -> Self {
        Self {
            id: p.id.to_string(),
            has_image: p.status == PlumbusStatus::Completed && p.image_path.is_some(),
            status: p.status.as_str(),
            name: p.name,
            size: p.size,
            color: p.color,
            shape: p.shape,
            weight: p.weight,
            wrapping: p.wrapping,
            is_rare: p.is_rare,
            signature: p.signature.unwrap_or_default(),
            signature_date: p
                .signature_date
                .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
            error_msg: p.error_msg.unwrap_or_default(),
            created_at: p.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Render the dashboard for the session user.
pub async fn dashboard_page(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<DashboardTemplate> {
    let pool = state.db().pool();
    let user = current.user;

    let by_status = plumbus::count_plumbuses_by_status(pool, user.id).await?;
    let counts = PlumbusStatus::ALL
        .iter()
        .map(|status| StatusCount {
            status: status.as_str(),
            count: by_status.get(status).copied().unwrap_or(0),
        })
        .collect();

    let plumbuses = plumbus::list_plumbuses_for_user(pool, user.id)
        .await?
        .into_iter()
        .map(PlumbusCard::from)
        .collect();

    Ok(DashboardTemplate {
        title: "Dashboard - Rick & Morty Plumbus Factory",
        username: user.username,
        email: user.email,
        counts,
        plumbuses,
    })
}
