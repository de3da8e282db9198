//! Messages exchanged between the document service and the indexing worker.

use uuid::Uuid;

/// Request to extract searchable text from a stored file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexJob {
    pub documento_id: Uuid,
    /// Path relative to the upload root.
    pub storage_path: String,
    /// Public URL the document pointed at when the job was queued.
    pub archivo_url: String,
    pub mime_type: Option<String>,
}

/// An indexing job that could not be completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexFailure {
    pub documento_id: Uuid,
    pub reason: String,
}

impl IndexFailure {
    pub fn new(documento_id: Uuid, reason: impl Into<String>) -> Self {
        Self {
            documento_id,
            reason: reason.into(),
        }
    }
}
