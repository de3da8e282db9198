//! Drains the indexing failure channel into the log.

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::job::IndexFailure;

/// Logs every indexing failure at `warn`.
#[derive(Debug)]
pub struct FailureReporter {
    failures: mpsc::UnboundedReceiver<IndexFailure>,
}

impl FailureReporter {
    pub fn new(failures: mpsc::UnboundedReceiver<IndexFailure>) -> Self {
        Self { failures }
    }

    /// Run until every sender is dropped. Returns the number of failures seen.
    pub async fn run(mut self) -> u64 {
        let mut reported = 0u64;
        while let Some(failure) = self.failures.recv().await {
            reported += 1;
            warn!(
                documento_id = %failure.documento_id,
                reason = %failure.reason,
                "Text extraction failed"
            );
        }
        info!(reported, "Indexing failure reporter stopped");
        reported
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[tokio::test]
    async fn test_counts_until_senders_drop() {
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(IndexFailure::new(Uuid::new_v4(), "queue full")).unwrap();
        tx.send(IndexFailure::new(Uuid::new_v4(), "read failed")).unwrap();
        drop(tx);

        assert_eq!(FailureReporter::new(rx).run().await, 2);
    }
}
