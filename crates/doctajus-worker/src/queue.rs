//! Bounded hand-off from request handlers to the indexing runner.

use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::debug;

use crate::job::{IndexFailure, IndexJob};

/// Producer side of the indexing pipeline. Cheap to clone.
#[derive(Debug, Clone)]
pub struct IndexQueue {
    jobs: mpsc::Sender<IndexJob>,
    failures: mpsc::UnboundedSender<IndexFailure>,
}

/// Create the job queue plus its job and failure receivers.
pub fn index_channel(
    capacity: usize,
) -> (
    IndexQueue,
    mpsc::Receiver<IndexJob>,
    mpsc::UnboundedReceiver<IndexFailure>,
) {
    let (jobs, job_rx) = mpsc::channel(capacity.max(1));
    let (failures, failure_rx) = mpsc::unbounded_channel();
    (IndexQueue { jobs, failures }, job_rx, failure_rx)
}

impl IndexQueue {
    /// Queue a job without waiting. A full or closed queue is reported on
    /// the failure channel; the caller never sees an error.
    pub fn enqueue(&self, job: IndexJob) {
        let documento_id = job.documento_id;
        match self.jobs.try_send(job) {
            Ok(()) => debug!(documento_id = %documento_id, "Queued indexing job"),
            Err(TrySendError::Full(_)) => {
                self.report(IndexFailure::new(documento_id, "indexing queue is full"))
            }
            Err(TrySendError::Closed(_)) => {
                self.report(IndexFailure::new(documento_id, "indexing queue is closed"))
            }
        }
    }

    /// Send a failure to the reporter.
    pub fn report(&self, failure: IndexFailure) {
        if self.failures.send(failure).is_err() {
            debug!("Failure reporter is gone; dropping failure");
        }
    }

    /// A sender for the failure channel, for the runner.
    pub fn failure_sender(&self) -> mpsc::UnboundedSender<IndexFailure> {
        self.failures.clone()
    }
}
