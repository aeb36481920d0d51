//! Sig-store response types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Answer to `POST /api/v1/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    /// Detached signature of the uploaded artifact.
    pub signature: String,
    /// Serial number sig-store assigned to the registration.
    #[serde(rename = "id")]
    pub serial_number: i64,
    /// When sig-store registered the artifact.
    pub created_at: DateTime<Utc>,
}

/// Answer to `POST /api/v1/verify`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
    pub valid: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_reads_serial_from_id() {
        let json = r#"{"signature":"MEUCIQ","id":17,"created_at":"2025-03-01T12:00:00Z"}"#;
        let registration: Registration = serde_json::from_str(json).unwrap();
        assert_eq!(registration.signature, "MEUCIQ");
        assert_eq!(registration.serial_number, 17);
        assert_eq!(registration.created_at.to_rfc3339(), "2025-03-01T12:00:00+00:00");
    }

    #[test]
    fn test_verification_message_is_optional() {
        let verification: Verification = serde_json::from_str(r#"{"valid":false}"#).unwrap();
        assert!(!verification.valid);
        assert!(verification.message.is_none());
    }
}
