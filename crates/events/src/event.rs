//! Event envelopes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event type of [`PlumbusCreatedEvent`].
pub const PLUMBUS_CREATED: &str = "plumbus.created";

/// The attributes a plumbus was requested with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlumbusData {
    pub name: String,
    pub size: String,
    pub color: String,
    pub shape: String,
    pub weight: String,
    pub wrapping: String,
}

/// Payload of a `plumbus.created` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlumbusCreatedData {
    pub plumbus_id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub plumbus_data: PlumbusData,
    pub is_rare: bool,
}

/// Envelope announcing that a plumbus record was created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlumbusCreatedEvent {
    /// Unique event id.
    pub id: Uuid,
    #[serde(rename = "type")]
    pub event_type: String,
    pub source: String,
    pub timestamp: DateTime<Utc>,
    pub data: PlumbusCreatedData,
}

impl PlumbusCreatedEvent {
    /// Wrap `data` in a fresh envelope stamped with `source` and the current time.
    pub fn new(source: impl Into<String>, data: PlumbusCreatedData) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_type: PLUMBUS_CREATED.to_string(),
            source: source.into(),
            timestamp: Utc::now(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> PlumbusCreatedData {
        PlumbusCreatedData {
            plumbus_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            username: "rick".to_string(),
            email: "rick@citadel.io".to_string(),
            plumbus_data: PlumbusData {
                name: "Gift".to_string(),
                size: "medium".to_string(),
                color: "blue".to_string(),
                shape: "round".to_string(),
                weight: "light".to_string(),
                wrapping: "gift".to_string(),
            },
            is_rare: true,
        }
    }

    #[test]
    fn test_envelope_shape() {
        let data = data();
        let event = PlumbusCreatedEvent::new("factory", data.clone());
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "plumbus.created");
        assert_eq!(json["source"], "factory");
        assert_eq!(json["id"], event.id.to_string());
        assert!(json["timestamp"].is_string());
        assert_eq!(json["data"]["plumbus_id"], data.plumbus_id.to_string());
        assert_eq!(json["data"]["user_id"], data.user_id.to_string());
        assert_eq!(json["data"]["username"], "rick");
        assert_eq!(json["data"]["email"], "rick@citadel.io");
        assert_eq!(json["data"]["is_rare"], true);
        assert_eq!(json["data"]["plumbus_data"]["name"], "Gift");
        assert_eq!(json["data"]["plumbus_data"]["wrapping"], "gift");
        assert!(json.get("event_type").is_none());
    }

    #[test]
    fn test_each_envelope_gets_its_own_id() {
        let a = PlumbusCreatedEvent::new("factory", data());
        let b = PlumbusCreatedEvent::new("factory", data());
        assert_ne!(a.id, b.id);
    }
}
