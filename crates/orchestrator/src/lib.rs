//! Plumbus job orchestration.
//!
//! This crate provides the [`Factory`] type which accepts plumbus requests,
//! draws their rarity, persists them and drives each one through generation
//! and signing on a background task.
//!
//! # Lifecycle
//!
//! ```text
//! submit(user, request)
//!          ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        FACTORY                              │
//! │                                                             │
//! │  1. Validate attributes, draw rarity                        │
//! │  2. Insert record ─────────────────────────────► pending    │
//! │  3. Publish plumbus.created (fire-and-forget)               │
//! │  4. Spawn job                                               │
//! │         ↓                                                   │
//! │     mark ──────────────────────────────────────► generating │
//! │     generate image ── error ───────────────────► failed     │
//! │         ↓                                                   │
//! │     sign image ── error ──► completed (unsigned)            │
//! │         ↓                                                   │
//! │     ───────────────────────────────────────────► completed  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use orchestrator::{Factory, PlumbusRequest, RarityRoller};
//!
//! let factory = Factory::new(db, Arc::new(generator), Arc::new(sig_store))
//!     .with_rarity(RarityRoller::new(0.05));
//!
//! let submission = factory.submit(&user, request).await?;
//! println!("queued {}", submission.plumbus.id);
//! submission.job.detach();
//! ```

mod error;
mod factory;
mod job;
mod ports;
mod rarity;
mod request;

pub use error::OrchestratorError;
pub use factory::{Factory, Submission, DEFAULT_EVENT_SOURCE};
pub use job::{JobHandle, JobOutcome};
pub use ports::{ArtifactSigner, ImageGenerator};
pub use rarity::{RarityRoller, DEFAULT_RARE_CHANCE};
pub use request::PlumbusRequest;

// Re-export for implementors of the seam traits
pub use async_trait::async_trait;
