//! The plumbus factory: submission and the per-plumbus job.

use std::path::Path;
use std::sync::Arc;

use database::{plumbus, Database, DatabaseError, Plumbus, PlumbusStatus, PlumbusUpdate, User};
use events::{EventPublisher, PlumbusCreatedData, PlumbusCreatedEvent};
use plumbus_generator::GenerationRequest;
use sig_store::Verification;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::error::OrchestratorError;
use crate::job::{JobHandle, JobOutcome};
use crate::ports::{ArtifactSigner, ImageGenerator};
use crate::rarity::RarityRoller;
use crate::request::PlumbusRequest;

/// Default `source` stamped on published events.
pub const DEFAULT_EVENT_SOURCE: &str = "factory";

/// Result of a successful submission.
#[derive(Debug)]
pub struct Submission {
    /// The record as stored, still `pending`.
    pub plumbus: Plumbus,
    /// The job that will generate and sign it.
    pub job: JobHandle,
}

/// Coordinates persistence, generation, signing and event publishing.
///
/// Cheap to clone; every spawned job owns a clone.
#[derive(Clone)]
pub struct Factory {
    /// Record store.
    db: Database,
    /// Image-generation service.
    generator: Arc<dyn ImageGenerator>,
    /// Signing service.
    signer: Arc<dyn ArtifactSigner>,
    /// Event sink, absent when the bus was unreachable at startup.
    publisher: Option<Arc<dyn EventPublisher>>,
    /// Shared rarity draw.
    rarity: Arc<RarityRoller>,
    /// `source` field of published events.
    event_source: String,
}

impl Factory {
    /// Create a factory without an event publisher and with the default rarity.
    pub fn new(
        db: Database,
        generator: Arc<dyn ImageGenerator>,
        signer: Arc<dyn ArtifactSigner>,
    ) -> Self {
        Self {
            db,
            generator,
            signer,
            publisher: None,
            rarity: Arc::new(RarityRoller::default()),
            event_source: DEFAULT_EVENT_SOURCE.to_string(),
        }
    }

    /// Publish `plumbus.created` events through `publisher`.
    pub fn with_publisher(mut self, publisher: Arc<dyn EventPublisher>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    /// Replace the rarity draw.
    pub fn with_rarity(mut self, rarity: RarityRoller) -> Self {
        self.rarity = Arc::new(rarity);
        self
    }

    /// Set the `source` of published events.
    pub fn with_event_source(mut self, source: impl Into<String>) -> Self {
        self.event_source = source.into();
        self
    }

    /// The underlying store.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Whether events are being published.
    pub fn has_publisher(&self) -> bool {
        self.publisher.is_some()
    }

    /// Accept a request from `user`.
    ///
    /// The `pending` record exists once this returns; the job that moves it
    /// forward is already running.
    pub async fn submit(
        &self,
        user: &User,
        request: PlumbusRequest,
    ) -> Result<Submission, OrchestratorError> {
        request.validate()?;

        let is_rare = self.rarity.roll();
        let plumbus =
            plumbus::create_plumbus(self.db.pool(), &request.to_new_plumbus(user.id, is_rare))
                .await?;

        if is_rare {
            info!(
                plumbus_id = %plumbus.id,
                user_id = %user.id,
                username = %user.username,
                "Rare plumbus created"
            );
        } else {
            info!(plumbus_id = %plumbus.id, user_id = %user.id, "Plumbus created");
        }

        self.publish_created(user, &plumbus, &request);
        let job = self.spawn_job(plumbus.id, request.to_generation_request());

        Ok(Submission { plumbus, job })
    }

    /// Run the job for `id` on its own task.
    pub fn spawn_job(&self, id: Uuid, request: GenerationRequest) -> JobHandle {
        let factory = self.clone();
        JobHandle::new(
            id,
            tokio::spawn(async move { factory.run_job(id, request).await }),
        )
    }

    /// Drive one plumbus from `pending` to a terminal state.
    ///
    /// A generation failure is recorded and reported as
    /// [`JobOutcome::Failed`]. A signing failure still completes the plumbus,
    /// just without a signature. Only persistence errors are returned as `Err`.
    pub async fn run_job(
        &self,
        id: Uuid,
        request: GenerationRequest,
    ) -> Result<JobOutcome, OrchestratorError> {
        let pool = self.db.pool();

        plumbus::update_plumbus(pool, id, &PlumbusUpdate::status(PlumbusStatus::Generating))
            .await?;
        debug!(plumbus_id = %id, status = %PlumbusStatus::Generating, "Plumbus job started");

        let image_path = match self.generator.generate(&request).await {
            Ok(path) => path,
            Err(e) => {
                let error = e.to_string();
                error!(
                    plumbus_id = %id,
                    size = %request.size,
                    color = %request.color,
                    shape = %request.shape,
                    weight = %request.weight,
                    wrapping = %request.wrapping,
                    error = %error,
                    "Plumbus generation failed"
                );
                plumbus::update_plumbus(pool, id, &PlumbusUpdate::failed(error.clone())).await?;
                return Ok(JobOutcome::Failed { error });
            }
        };

        let stored_path = image_path.to_string_lossy().into_owned();
        let update = match self.signer.sign(&image_path).await {
            Ok(registration) => {
                info!(
                    plumbus_id = %id,
                    serial_number = registration.serial_number,
                    "Plumbus image signed"
                );
                PlumbusUpdate::signed(stored_path, registration.signature, registration.created_at)
            }
            Err(e) => {
                warn!(
                    plumbus_id = %id,
                    error = %e,
                    "Signing failed, completing plumbus without signature"
                );
                PlumbusUpdate::completed(stored_path)
            }
        };

        let signed = update.signature.is_some();
        plumbus::update_plumbus(pool, id, &update).await?;
        info!(plumbus_id = %id, status = %PlumbusStatus::Completed, signed, "Plumbus job finished");

        Ok(JobOutcome::Completed { image_path, signed })
    }

    /// Fetch a plumbus owned by `user_id`.
    ///
    /// Someone else's plumbus is reported exactly like a missing one.
    pub async fn plumbus_for_user(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Plumbus, OrchestratorError> {
        let found = plumbus::get_plumbus(self.db.pool(), id).await?;
        if found.user_id != user_id {
            return Err(DatabaseError::NotFound {
                entity: "plumbus",
                id: id.to_string(),
            }
            .into());
        }
        Ok(found)
    }

    /// Re-check a signed plumbus image against sig-store.
    pub async fn verify(&self, plumbus: &Plumbus) -> Result<Verification, OrchestratorError> {
        let (Some(path), Some(signature)) =
            (plumbus.image_path.as_deref(), plumbus.signature.as_deref())
        else {
            return Err(OrchestratorError::NotSigned(plumbus.id));
        };

        let verification = self.signer.verify(Path::new(path), signature).await?;
        info!(plumbus_id = %plumbus.id, valid = verification.valid, "Plumbus signature checked");
        Ok(verification)
    }

    fn publish_created(&self, user: &User, plumbus: &Plumbus, request: &PlumbusRequest) {
        let Some(publisher) = self.publisher.clone() else {
            return;
        };

        let event = PlumbusCreatedEvent::new(
            self.event_source.clone(),
            PlumbusCreatedData {
                plumbus_id: plumbus.id,
                user_id: user.id,
                username: user.username.clone(),
                email: user.email.clone(),
                plumbus_data: request.to_event_data(),
                is_rare: plumbus.is_rare,
            },
        );

        tokio::spawn(async move {
            if let Err(e) = publisher.publish_plumbus_created(&event).await {
                warn!(
                    plumbus_id = %event.data.plumbus_id,
                    error = %e,
                    "Failed to publish plumbus.created event"
                );
            }
        });
    }
}

impl std::fmt::Debug for Factory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Factory")
            .field("rarity", &self.rarity)
            .field("has_publisher", &self.publisher.is_some())
            .field("event_source", &self.event_source)
            .finish()
    }
}
