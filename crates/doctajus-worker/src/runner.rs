//! Indexing runner: consumes jobs until the queue closes or shutdown.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};
use uuid::Uuid;

use doctajus_core::result::AppResult;
use doctajus_core::traits::storage::StorageProvider;
use doctajus_database::repositories::documento::DocumentoRepository;

use crate::extractor;
use crate::job::{IndexFailure, IndexJob};

/// Where extracted text ends up.
#[async_trait]
pub trait IndexSink: Send + Sync + 'static {
    /// Record text for a document. Returns `false` when the document is
    /// gone or now points at a different file.
    async fn store_text(&self, documento_id: Uuid, archivo_url: &str, text: &str)
    -> AppResult<bool>;
}

#[async_trait]
impl IndexSink for DocumentoRepository {
    async fn store_text(
        &self,
        documento_id: Uuid,
        archivo_url: &str,
        text: &str,
    ) -> AppResult<bool> {
        self.mark_indexed(documento_id, archivo_url, text).await
    }
}

/// Reads stored files and records their text.
pub struct IndexingRunner {
    storage: Arc<dyn StorageProvider>,
    sink: Arc<dyn IndexSink>,
    failures: mpsc::UnboundedSender<IndexFailure>,
}

impl std::fmt::Debug for IndexingRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexingRunner")
            .field("storage", &self.storage)
            .finish()
    }
}

impl IndexingRunner {
    pub fn new(
        storage: Arc<dyn StorageProvider>,
        sink: Arc<dyn IndexSink>,
        failures: mpsc::UnboundedSender<IndexFailure>,
    ) -> Self {
        Self {
            storage,
            sink,
            failures,
        }
    }

    /// Process jobs one at a time until every producer is dropped or the
    /// cancel signal flips to `true`.
    pub async fn run(self, mut jobs: mpsc::Receiver<IndexJob>, mut cancel: watch::Receiver<bool>) {
        info!("Indexing worker started");

        loop {
            tokio::select! {
                changed = cancel.changed() => {
                    if changed.is_err() || *cancel.borrow() {
                        info!("Indexing worker received shutdown signal");
                        break;
                    }
                }
                job = jobs.recv() => {
                    match job {
                        Some(job) => self.process(job).await,
                        None => {
                            info!("Indexing queue closed");
                            break;
                        }
                    }
                }
            }
        }

        info!("Indexing worker shut down complete");
    }

    /// Handle a single job, routing any failure to the failure channel.
    pub async fn process(&self, job: IndexJob) {
        let documento_id = job.documento_id;
        if let Err(reason) = self.index(&job).await {
            if self
                .failures
                .send(IndexFailure::new(documento_id, reason))
                .is_err()
            {
                debug!(documento_id = %documento_id, "Failure reporter is gone");
            }
        }
    }

    async fn index(&self, job: &IndexJob) -> Result<(), String> {
        let mime = job.mime_type.as_deref();
        if !mime.is_some_and(extractor::is_supported) {
            debug!(
                documento_id = %job.documento_id,
                mime_type = mime.unwrap_or("unknown"),
                "Skipping text extraction for unsupported type"
            );
            return Ok(());
        }

        let data = self
            .storage
            .read_bytes(&job.storage_path)
            .await
            .map_err(|e| format!("read {}: {}", job.storage_path, e.message))?;

        let mime_type = job.mime_type.clone();
        let extracted = tokio::task::spawn_blocking(move || {
            extractor::extract_text(mime_type.as_deref(), &data)
        })
        .await
        .map_err(|e| format!("extraction task failed: {e}"))?;
        let Some(text) = extracted.map_err(|e| e.message)? else {
            return Ok(());
        };

        let stored = self
            .sink
            .store_text(job.documento_id, &job.archivo_url, &text)
            .await
            .map_err(|e| e.message)?;

        if stored {
            info!(documento_id = %job.documento_id, chars = text.chars().count(), "Documento indexado");
        } else {
            debug!(documento_id = %job.documento_id, "Document changed before indexing finished");
        }
        Ok(())
    }
}
