//! Plumbus submission payload.

use database::NewPlumbus;
use events::PlumbusData;
use plumbus_generator::GenerationRequest;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::OrchestratorError;

/// Attributes a user picks for a new plumbus.
///
/// Missing JSON fields deserialize as empty strings so that validation, not
/// the extractor, decides what is acceptable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlumbusRequest {
    pub name: String,
    pub size: String,
    pub color: String,
    pub shape: String,
    pub weight: String,
    pub wrapping: String,
}

impl PlumbusRequest {
    /// Reject the request if any attribute is blank.
    pub fn validate(&self) -> Result<(), OrchestratorError> {
        let fields = [
            ("name", &self.name),
            ("size", &self.size),
            ("color", &self.color),
            ("shape", &self.shape),
            ("weight", &self.weight),
            ("wrapping", &self.wrapping),
        ];

        let missing: Vec<&str> = fields
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| *field)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(OrchestratorError::Validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )))
        }
    }

    /// Row to insert for this request.
    pub fn to_new_plumbus(&self, user_id: Uuid, is_rare: bool) -> NewPlumbus {
        NewPlumbus {
            user_id,
            name: self.name.clone(),
            size: self.size.clone(),
            color: self.color.clone(),
            shape: self.shape.clone(),
            weight: self.weight.clone(),
            wrapping: self.wrapping.clone(),
            is_rare,
        }
    }

    /// Body sent to the generation service. The name is not part of it.
    pub fn to_generation_request(&self) -> GenerationRequest {
        GenerationRequest {
            size: self.size.clone(),
            color: self.color.clone(),
            shape: self.shape.clone(),
            weight: self.weight.clone(),
            wrapping: self.wrapping.clone(),
        }
    }

    /// Attributes as carried in the `plumbus.created` event.
    pub fn to_event_data(&self) -> PlumbusData {
        PlumbusData {
            name: self.name.clone(),
            size: self.size.clone(),
            color: self.color.clone(),
            shape: self.shape.clone(),
            weight: self.weight.clone(),
            wrapping: self.wrapping.clone(),
        }
    }
}
