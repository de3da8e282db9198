//! Upload storage configuration.

use serde::{Deserialize, Serialize};

/// Local upload storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory for uploaded files.
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
    /// Maximum accepted size of a single uploaded file (default 10 MB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
    /// Folder under `upload_dir` that holds document files.
    #[serde(default = "default_documents_folder")]
    pub documents_folder: String,
    /// Capacity of the text-indexing job queue.
    #[serde(default = "default_index_queue_capacity")]
    pub index_queue_capacity: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
            max_upload_size_bytes: default_max_upload(),
            documents_folder: default_documents_folder(),
            index_queue_capacity: default_index_queue_capacity(),
        }
    }
}

fn default_upload_dir() -> String {
    "uploads".to_string()
}

fn default_max_upload() -> u64 {
    10 * 1024 * 1024
}

fn default_documents_folder() -> String {
    "documentos".to_string()
}

fn default_index_queue_capacity() -> usize {
    64
}
