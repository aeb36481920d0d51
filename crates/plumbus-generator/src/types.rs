//! Wire types for the generation service.

use serde::{Deserialize, Serialize};

/// Body of `POST /plumbus`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub size: String,
    pub color: String,
    pub shape: String,
    pub weight: String,
    pub wrapping: String,
}
