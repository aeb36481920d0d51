//! Plumbus lifecycle events.
//!
//! Events are JSON envelopes (`id`, `type`, `source`, `timestamp`, `data`)
//! published to a single NATS topic for downstream auditing. Publishing is
//! best effort: callers log failures and move on.

pub mod config;
pub mod error;
pub mod event;
pub mod publish;

pub use config::EventsConfig;
pub use error::EventError;
pub use event::{PlumbusCreatedData, PlumbusCreatedEvent, PlumbusData, PLUMBUS_CREATED};
pub use publish::{EventPublisher, NatsPublisher};

/// Re-exported so implementors don't need their own dependency.
pub use async_trait::async_trait;
