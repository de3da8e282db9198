//! Documento entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

define_enum! {
    /// Legal category of a document.
    TipoDocumento, pg = "documento_tipo", default = Otro {
        Contrato => "contrato",
        Demanda => "demanda",
        Contestacion => "contestacion",
        Apelacion => "apelacion",
        Recurso => "recurso",
        Poder => "poder",
        Sentencia => "sentencia",
        Resolucion => "resolucion",
        Pericia => "pericia",
        Factura => "factura",
        Otro => "otro",
    }
}

define_enum! {
    /// Editorial state of a document.
    EstadoDocumento, pg = "documento_estado", default = Borrador {
        Borrador => "borrador",
        Finalizado => "finalizado",
        Archivado => "archivado",
        PendienteRevision => "pendiente_revision",
        Aprobado => "aprobado",
    }
}

/// A managed file, optionally attached to a case and a client.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Documento {
    pub id: Uuid,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub tipo: TipoDocumento,
    pub estado: EstadoDocumento,
    pub expediente_id: Option<Uuid>,
    pub cliente_id: Option<Uuid>,
    /// Public URL of the current file.
    pub archivo_url: String,
    /// Stored file name of the current file.
    pub archivo_nombre: String,
    /// Size of the current file in bytes.
    pub archivo_tamanio: i64,
    /// Short format label, e.g. `pdf`.
    pub archivo_formato: String,
    pub etiquetas: Vec<String>,
    pub destacado: bool,
    pub es_publico: bool,
    /// Equals the highest `numero_version` among this document's versions.
    pub version_actual: i32,
    pub indexado_para_busqueda: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contenido_indexado: Option<String>,
    pub creado_por_id: Uuid,
    pub modificado_por_id: Option<Uuid>,
    pub fecha_creacion: DateTime<Utc>,
    pub fecha_modificacion: DateTime<Utc>,
}

impl Documento {
    /// Whether `user_id` created this document.
    pub fn is_owner(&self, user_id: Uuid) -> bool {
        self.creado_por_id == user_id
    }

    /// Download descriptor for the current file.
    pub fn descarga(&self) -> DescargaArchivo {
        DescargaArchivo {
            url: self.archivo_url.clone(),
            nombre: self.archivo_nombre.clone(),
            tamano: self.archivo_tamanio,
            formato: self.archivo_formato.clone(),
            version: None,
        }
    }
}

/// Metadata of a stored file as recorded on documents and versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchivoMetadata {
    pub url: String,
    pub nombre: String,
    pub tamanio: i64,
    pub formato: String,
}

impl ArchivoMetadata {
    /// Derive the short format label: the MIME subtype when a MIME type is
    /// known, otherwise the file extension without the dot.
    pub fn formato_de(mime_type: Option<&str>, file_name: &str) -> String {
        if let Some(subtype) = mime_type
            .and_then(|m| m.split_once('/'))
            .map(|(_, sub)| sub.trim())
            .filter(|sub| !sub.is_empty())
        {
            return subtype.to_string();
        }

        std::path::Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default()
    }
}

/// What a download endpoint hands back to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescargaArchivo {
    pub url: String,
    pub nombre: String,
    pub tamano: i64,
    pub formato: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i32>,
}

/// Data required to create a new document.
#[derive(Debug, Clone)]
pub struct CreateDocumento {
    pub nombre: String,
    pub descripcion: Option<String>,
    pub tipo: TipoDocumento,
    pub estado: EstadoDocumento,
    pub expediente_id: Option<Uuid>,
    pub cliente_id: Option<Uuid>,
    pub etiquetas: Vec<String>,
    pub es_publico: bool,
    pub destacado: bool,
    pub archivo: ArchivoMetadata,
    pub creado_por_id: Uuid,
}

/// Partial metadata update. `None` leaves the column unchanged.
#[derive(Debug, Clone, Default)]
pub struct DocumentoChanges {
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    pub tipo: Option<TipoDocumento>,
    pub estado: Option<EstadoDocumento>,
    pub expediente_id: Option<Uuid>,
    pub cliente_id: Option<Uuid>,
    pub etiquetas: Option<Vec<String>>,
    pub es_publico: Option<bool>,
    pub destacado: Option<bool>,
}

impl DocumentoChanges {
    /// API names of the fields this update sets, in declaration order.
    pub fn changed_keys(&self) -> Vec<&'static str> {
        let mut keys = Vec::new();
        if self.nombre.is_some() {
            keys.push("nombre");
        }
        if self.descripcion.is_some() {
            keys.push("descripcion");
        }
        if self.tipo.is_some() {
            keys.push("tipo");
        }
        if self.estado.is_some() {
            keys.push("estado");
        }
        if self.expediente_id.is_some() {
            keys.push("expedienteId");
        }
        if self.cliente_id.is_some() {
            keys.push("clienteId");
        }
        if self.etiquetas.is_some() {
            keys.push("etiquetas");
        }
        if self.es_publico.is_some() {
            keys.push("esPublico");
        }
        if self.destacado.is_some() {
            keys.push("destacado");
        }
        keys
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.changed_keys().is_empty()
    }
}

/// Listing filter for documents. Every set field narrows the result.
#[derive(Debug, Clone, Default)]
pub struct DocumentoFilter {
    /// Substring that must appear in `nombre`.
    pub busqueda: Option<String>,
    pub tipo: Option<TipoDocumento>,
    pub estado: Option<EstadoDocumento>,
    pub expediente_id: Option<Uuid>,
    pub cliente_id: Option<Uuid>,
    /// Only featured documents.
    pub destacados: bool,
    /// Lower bound on `fecha_creacion`.
    pub fecha_desde: Option<DateTime<Utc>>,
    /// Upper bound on `fecha_creacion`.
    pub fecha_hasta: Option<DateTime<Utc>>,
    /// Match documents carrying any of these tags.
    pub etiquetas: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formato_prefers_mime_subtype() {
        assert_eq!(
            ArchivoMetadata::formato_de(Some("application/pdf"), "demanda.PDF"),
            "pdf"
        );
        assert_eq!(
            ArchivoMetadata::formato_de(Some("text/plain"), "notas.md"),
            "plain"
        );
    }

    #[test]
    fn test_formato_falls_back_to_extension() {
        assert_eq!(ArchivoMetadata::formato_de(None, "contrato.DOCX"), "docx");
        assert_eq!(ArchivoMetadata::formato_de(Some(""), "poder.odt"), "odt");
        assert_eq!(ArchivoMetadata::formato_de(None, "sin_extension"), "");
    }

    #[test]
    fn test_changed_keys_uses_api_names() {
        let changes = DocumentoChanges {
            nombre: Some("Contrato de arrendamiento".into()),
            es_publico: Some(true),
            expediente_id: Some(Uuid::new_v4()),
            ..Default::default()
        };
        assert_eq!(
            changes.changed_keys(),
            vec!["nombre", "expedienteId", "esPublico"]
        );
        assert!(DocumentoChanges::default().is_empty());
    }

    #[test]
    fn test_estado_pendiente_revision_wire_name() {
        let json = serde_json::to_string(&EstadoDocumento::PendienteRevision).unwrap();
        assert_eq!(json, "\"pendiente_revision\"");
        assert_eq!(TipoDocumento::ALL.len(), 11);
    }
}
