//! Inputs and outputs of the document service.

use bytes::Bytes;
use serde::Serialize;
use uuid::Uuid;

use doctajus_entity::documento::{
    ArchivoMetadata, DocumentoChanges, EstadoDocumento, TipoDocumento,
};
use doctajus_storage::StoredUpload;

/// A file received from the client.
#[derive(Debug, Clone)]
pub struct ArchivoSubido {
    /// Name as sent by the client.
    pub nombre: String,
    pub mime_type: Option<String>,
    pub data: Bytes,
}

impl ArchivoSubido {
    /// File metadata as persisted once the upload is stored.
    pub fn metadata(&self, stored: &StoredUpload) -> ArchivoMetadata {
        ArchivoMetadata {
            url: stored.url.clone(),
            nombre: self.nombre.clone(),
            tamanio: stored.size,
            formato: ArchivoMetadata::formato_de(self.mime_type.as_deref(), &self.nombre),
        }
    }
}

/// Metadata for a new document.
#[derive(Debug, Clone, Default)]
pub struct NuevoDocumento {
    pub nombre: String,
    pub descripcion: Option<String>,
    pub tipo: Option<TipoDocumento>,
    pub estado: Option<EstadoDocumento>,
    pub expediente_id: Option<Uuid>,
    pub cliente_id: Option<Uuid>,
    pub etiquetas: Vec<String>,
    pub es_publico: bool,
    pub destacado: bool,
}

/// Metadata changes plus the note for a replacement file.
#[derive(Debug, Clone, Default)]
pub struct ActualizacionDocumento {
    pub cambios: DocumentoChanges,
    pub descripcion_cambios: Option<String>,
}

/// Result of deleting a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentoEliminado {
    pub id: Uuid,
    pub eliminado: bool,
}

/// Result of revoking a permission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermisoEliminado {
    pub eliminado: bool,
}
