//! Document management: storage, versions, permissions and audit trail.

pub mod access;
pub mod service;
pub mod types;

pub use service::DocumentoService;
pub use types::{
    ActualizacionDocumento, ArchivoSubido, DocumentoEliminado, NuevoDocumento, PermisoEliminado,
};
