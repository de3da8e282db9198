//! Placement and naming of uploaded files.
//!
//! An upload is first written to `temp/<32 hex><ext>` and then moved to
//! `<folder>/<uuid><ext>`. The stored file is publicly reachable under
//! `/api/uploads/<folder>/<uuid><ext>`.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use doctajus_core::error::AppError;
use doctajus_core::result::AppResult;
use doctajus_core::traits::storage::{ByteStream, StorageObjectMeta, StorageProvider};

/// URL prefix under which stored uploads are served.
pub const PUBLIC_PREFIX: &str = "/api/uploads";

const TEMP_FOLDER: &str = "temp";
const MAX_EXTENSION_LEN: usize = 10;

/// A file placed in its final folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUpload {
    /// Path relative to the storage root, e.g. `documentos/<uuid>.pdf`.
    pub storage_path: String,
    /// Public URL, e.g. `/api/uploads/documentos/<uuid>.pdf`.
    pub url: String,
    /// Name the client sent.
    pub original_name: String,
    /// Size in bytes.
    pub size: i64,
}

/// Writes uploads into their folders and opens them for serving.
#[derive(Debug, Clone)]
pub struct UploadStore {
    provider: Arc<dyn StorageProvider>,
}

impl UploadStore {
    pub fn new(provider: Arc<dyn StorageProvider>) -> Self {
        Self { provider }
    }

    /// The underlying provider.
    pub fn provider(&self) -> &Arc<dyn StorageProvider> {
        &self.provider
    }

    /// Store `data` under `folder`, returning where it landed.
    pub async fn store(
        &self,
        folder: &str,
        original_name: &str,
        data: Bytes,
    ) -> AppResult<StoredUpload> {
        validate_segment(folder)?;
        let ext = safe_extension(original_name);
        let size = data.len() as i64;

        let temp_path = format!("{TEMP_FOLDER}/{}{ext}", Uuid::new_v4().simple());
        self.provider.write(&temp_path, data).await?;

        let storage_path = format!("{folder}/{}{ext}", Uuid::new_v4());
        if let Err(e) = self.provider.rename(&temp_path, &storage_path).await {
            if let Err(cleanup) = self.provider.delete(&temp_path).await {
                warn!(path = %temp_path, error = %cleanup, "Failed to remove temporary upload");
            }
            return Err(e);
        }

        info!(path = %storage_path, size, "Stored upload");
        Ok(StoredUpload {
            url: public_url(&storage_path),
            storage_path,
            original_name: original_name.to_string(),
            size,
        })
    }

    /// Open a stored file for streaming. `folder` is `None` for files at the
    /// storage root.
    pub async fn open(
        &self,
        folder: Option<&str>,
        file_name: &str,
    ) -> AppResult<(ByteStream, StorageObjectMeta)> {
        let path = match folder {
            Some(folder) => {
                validate_segment(folder)?;
                validate_segment(file_name)?;
                format!("{folder}/{file_name}")
            }
            None => {
                validate_segment(file_name)?;
                file_name.to_string()
            }
        };

        let meta = self.provider.metadata(&path).await?;
        let stream = self.provider.read(&path).await?;
        Ok((stream, meta))
    }
}

/// Public URL for a storage path.
pub fn public_url(storage_path: &str) -> String {
    format!("{PUBLIC_PREFIX}/{}", storage_path.trim_start_matches('/'))
}

/// Reject a single path segment that could leave its folder.
pub fn validate_segment(segment: &str) -> AppResult<()> {
    let invalid = segment.is_empty()
        || segment == "."
        || segment.contains("..")
        || segment.contains(['/', '\\', '\0']);
    if invalid {
        return Err(AppError::validation(format!("Invalid path segment: {segment}")));
    }
    Ok(())
}

/// `.ext` of the client file name, kept only when short and alphanumeric.
fn safe_extension(original_name: &str) -> String {
    std::path::Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| e.len() <= MAX_EXTENSION_LEN && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|e| format!(".{e}"))
        .unwrap_or_default()
}
