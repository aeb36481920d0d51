//! Database models.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A user known to the factory, keyed by their identity-provider subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Internal identifier.
    pub id: Uuid,
    /// Keycloak subject (`sub` claim).
    pub keycloak_id: String,
    /// Display username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Lifecycle status of a plumbus generation job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum PlumbusStatus {
    /// Recorded, job not started yet.
    Pending,
    /// Background job is talking to the generation service.
    Generating,
    /// Image generated (possibly unsigned).
    Completed,
    /// Generation failed.
    Failed,
}

impl PlumbusStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [PlumbusStatus; 4] = [
        PlumbusStatus::Pending,
        PlumbusStatus::Generating,
        PlumbusStatus::Completed,
        PlumbusStatus::Failed,
    ];

    /// Wire/storage name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlumbusStatus::Pending => "pending",
            PlumbusStatus::Generating => "generating",
            PlumbusStatus::Completed => "completed",
            PlumbusStatus::Failed => "failed",
        }
    }

    /// Terminal states accept no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PlumbusStatus::Completed | PlumbusStatus::Failed)
    }
}

impl fmt::Display for PlumbusStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A plumbus generation record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Plumbus {
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    pub name: String,
    pub size: String,
    pub color: String,
    pub shape: String,
    pub weight: String,
    pub wrapping: String,
    pub status: PlumbusStatus,
    /// Decided once at creation.
    pub is_rare: bool,
    /// Local path of the generated image, set on completion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    /// Sig-store signature, set when signing succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    /// Sig-store registration time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature_date: Option<DateTime<Utc>>,
    /// Generation error text, set on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_msg: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields needed to insert a new plumbus record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlumbus {
    pub user_id: Uuid,
    pub name: String,
    pub size: String,
    pub color: String,
    pub shape: String,
    pub weight: String,
    pub wrapping: String,
    pub is_rare: bool,
}

/// Sparse update of a plumbus record. Only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlumbusUpdate {
    pub status: Option<PlumbusStatus>,
    pub image_path: Option<String>,
    pub signature: Option<String>,
    pub signature_date: Option<DateTime<Utc>>,
    pub error_msg: Option<String>,
}

impl PlumbusUpdate {
    /// Status change only.
    pub fn status(status: PlumbusStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Terminal failure with an error message.
    pub fn failed(error_msg: String) -> Self {
        Self {
            status: Some(PlumbusStatus::Failed),
            error_msg: Some(error_msg),
            ..Self::default()
        }
    }

    /// Completion without a signature.
    pub fn completed(image_path: String) -> Self {
        Self {
            status: Some(PlumbusStatus::Completed),
            image_path: Some(image_path),
            ..Self::default()
        }
    }

    /// Completion with a sig-store signature.
    pub fn signed(image_path: String, signature: String, signature_date: DateTime<Utc>) -> Self {
        Self {
            status: Some(PlumbusStatus::Completed),
            image_path: Some(image_path),
            signature: Some(signature),
            signature_date: Some(signature_date),
            error_msg: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display_matches_storage_name() {
        for status in PlumbusStatus::ALL {
            assert_eq!(status.to_string(), status.as_str());
        }
        assert_eq!(PlumbusStatus::Generating.to_string(), "generating");
    }

    #[test]
    fn test_terminal_states() {
        assert!(!PlumbusStatus::Pending.is_terminal());
        assert!(!PlumbusStatus::Generating.is_terminal());
        assert!(PlumbusStatus::Completed.is_terminal());
        assert!(PlumbusStatus::Failed.is_terminal());
    }

    #[test]
    fn test_update_constructors() {
        let failed = PlumbusUpdate::failed("boom".to_string());
        assert_eq!(failed.status, Some(PlumbusStatus::Failed));
        assert!(failed.image_path.is_none());

        let completed = PlumbusUpdate::completed("a.png".to_string());
        assert_eq!(completed.status, Some(PlumbusStatus::Completed));
        assert!(completed.signature.is_none());
        assert!(completed.error_msg.is_none());
    }
}
