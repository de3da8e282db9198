//! Document management entities: the document itself, its version
//! snapshots, per-user permissions, and the audit trail.

pub mod historial;
pub mod model;
pub mod permiso;
pub mod version;

pub use historial::{CreateHistorial, DocumentoHistorial, TipoAccion};
pub use model::{
    ArchivoMetadata, CreateDocumento, DescargaArchivo, Documento, DocumentoChanges,
    DocumentoFilter, EstadoDocumento, TipoDocumento,
};
pub use permiso::{DocumentoPermiso, TipoPermiso};
pub use version::{CreateVersion, DocumentoVersion};
