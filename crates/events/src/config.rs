//! Publisher configuration.

/// Where and as whom events are published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventsConfig {
    /// NATS server URL.
    pub url: String,
    /// Topic (subject) every event goes to.
    pub topic: String,
    /// `source` stamped on every envelope.
    pub source: String,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            url: "nats://localhost:4222".to_string(),
            topic: "accountats".to_string(),
            source: "factory".to_string(),
        }
    }
}
