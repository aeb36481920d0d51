//! Background job handles and outcomes.

use std::path::PathBuf;

use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::error::OrchestratorError;

/// How a generation job ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    /// Image stored; `signed` is false when sig-store refused or was down.
    Completed { image_path: PathBuf, signed: bool },
    /// Generation failed; the error text was recorded on the plumbus.
    Failed { error: String },
}

impl JobOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, JobOutcome::Completed { .. })
    }
}

/// Handle to the task running one plumbus job.
#[derive(Debug)]
pub struct JobHandle {
    plumbus_id: Uuid,
    handle: JoinHandle<Result<JobOutcome, OrchestratorError>>,
}

impl JobHandle {
    pub(crate) fn new(
        plumbus_id: Uuid,
        handle: JoinHandle<Result<JobOutcome, OrchestratorError>>,
    ) -> Self {
        Self { plumbus_id, handle }
    }

    /// Plumbus this job is working on.
    pub fn plumbus_id(&self) -> Uuid {
        self.plumbus_id
    }

    /// Wait for the job to finish.
    pub async fn wait(self) -> Result<JobOutcome, OrchestratorError> {
        match self.handle.await {
            Ok(result) => result,
            Err(e) => Err(OrchestratorError::JobAborted {
                id: self.plumbus_id,
                reason: e.to_string(),
            }),
        }
    }

    /// Let the job run on its own.
    ///
    /// A supervisor task logs how it ended, including persistence failures
    /// and panics that would otherwise vanish with the dropped handle.
    pub fn detach(self) {
        let plumbus_id = self.plumbus_id;
        tokio::spawn(async move {
            match self.wait().await {
                Ok(JobOutcome::Completed { signed, .. }) => {
                    info!(%plumbus_id, signed, "Plumbus job completed");
                }
                Ok(JobOutcome::Failed { error }) => {
                    warn!(%plumbus_id, %error, "Plumbus job failed");
                }
                Err(e) => {
                    error!(%plumbus_id, error = %e, "Plumbus job crashed");
                }
            }
        });
    }
}
