//! Event publishers.

use async_trait::async_trait;
use tracing::info;

use crate::config::EventsConfig;
use crate::error::EventError;
use crate::event::PlumbusCreatedEvent;

/// Sink for factory events.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish_plumbus_created(&self, event: &PlumbusCreatedEvent) -> Result<(), EventError>;
}

/// Publishes events as JSON to a NATS topic.
#[derive(Clone)]
pub struct NatsPublisher {
    client: async_nats::Client,
    topic: String,
}

impl NatsPublisher {
    /// Connect to the configured NATS server.
    pub async fn connect(config: &EventsConfig) -> Result<Self, EventError> {
        let client = async_nats::connect(config.url.as_str())
            .await
            .map_err(|e| EventError::Connect(e.to_string()))?;

        info!(nats_url = %config.url, topic = %config.topic, "Connected to NATS");

        Ok(Self {
            client,
            topic: config.topic.clone(),
        })
    }

    /// Flush anything still buffered. Call before shutdown.
    pub async fn close(&self) -> Result<(), EventError> {
        self.client
            .flush()
            .await
            .map_err(|e| EventError::Publish(e.to_string()))?;
        info!("NATS connection flushed");
        Ok(())
    }
}

#[async_trait]
impl EventPublisher for NatsPublisher {
    async fn publish_plumbus_created(&self, event: &PlumbusCreatedEvent) -> Result<(), EventError> {
        let payload = serde_json::to_vec(event)?;

        self.client
            .publish(self.topic.clone(), payload.into())
            .await
            .map_err(|e| EventError::Publish(e.to_string()))?;
        self.client
            .flush()
            .await
            .map_err(|e| EventError::Publish(e.to_string()))?;

        info!(
            event_id = %event.id,
            event_type = %event.event_type,
            source = %event.source,
            plumbus_id = %event.data.plumbus_id,
            user_id = %event.data.user_id,
            username = %event.data.username,
            is_rare = event.data.is_rare,
            topic = %self.topic,
            "Published plumbus.created event"
        );

        Ok(())
    }
}

impl std::fmt::Debug for NatsPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NatsPublisher")
            .field("topic", &self.topic)
            .finish()
    }
}
