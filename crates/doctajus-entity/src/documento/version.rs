//! Document version snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::model::{ArchivoMetadata, DescargaArchivo};

/// An immutable snapshot of a document's file at a given version number.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DocumentoVersion {
    pub id: Uuid,
    pub documento_id: Uuid,
    /// Starts at 1 and increases by one per file replacement.
    pub numero_version: i32,
    pub archivo_url: String,
    pub archivo_nombre: String,
    pub archivo_tamanio: i64,
    pub archivo_formato: String,
    pub descripcion_cambios: Option<String>,
    pub creado_por_id: Uuid,
    pub fecha_creacion: DateTime<Utc>,
}

impl DocumentoVersion {
    /// Download descriptor for this version's file.
    pub fn descarga(&self) -> DescargaArchivo {
        DescargaArchivo {
            url: self.archivo_url.clone(),
            nombre: self.archivo_nombre.clone(),
            tamano: self.archivo_tamanio,
            formato: self.archivo_formato.clone(),
            version: Some(self.numero_version),
        }
    }
}

/// Data required to append a version.
#[derive(Debug, Clone)]
pub struct CreateVersion {
    pub documento_id: Uuid,
    pub numero_version: i32,
    pub archivo: ArchivoMetadata,
    pub descripcion_cambios: Option<String>,
    pub creado_por_id: Uuid,
}
