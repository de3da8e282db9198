//! # doctajus-storage
//!
//! Local filesystem storage for uploaded files: the provider that reads and
//! writes bytes, the upload store that names and places files, and MIME
//! lookup by extension.

pub mod mime;
pub mod providers;
pub mod upload;

pub use providers::LocalStorageProvider;
pub use upload::{StoredUpload, UploadStore};
