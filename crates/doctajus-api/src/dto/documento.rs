//! Document request shapes: multipart metadata, JSON bodies and the
//! listing query.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use doctajus_core::error::AppError;
use doctajus_core::result::AppResult;
use doctajus_entity::documento::{
    DocumentoChanges, DocumentoFilter, EstadoDocumento, TipoDocumento, TipoPermiso,
};
use doctajus_service::documento::{ActualizacionDocumento, NuevoDocumento};

use super::parse::{non_empty, parse_bool, parse_enum, parse_etiquetas, parse_fecha, parse_uuid};

/// Longest accepted document name.
pub const MAX_NOMBRE_LEN: usize = 255;

/// Text fields of a document multipart form. Unknown fields are ignored;
/// blank values count as absent.
#[derive(Debug, Clone, Default)]
pub struct DocumentoForm {
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    pub tipo: Option<TipoDocumento>,
    pub estado: Option<EstadoDocumento>,
    pub expediente_id: Option<Uuid>,
    pub cliente_id: Option<Uuid>,
    pub etiquetas: Option<Vec<String>>,
    pub es_publico: Option<bool>,
    pub destacado: Option<bool>,
    pub descripcion_cambios: Option<String>,
}

impl DocumentoForm {
    /// Record one text field.
    pub fn set_field(&mut self, name: &str, raw: &str) -> AppResult<()> {
        let Some(value) = non_empty(raw) else {
            return Ok(());
        };
        match name {
            "nombre" => {
                if value.chars().count() > MAX_NOMBRE_LEN {
                    return Err(AppError::validation(format!(
                        "nombre must be at most {MAX_NOMBRE_LEN} characters"
                    )));
                }
                self.nombre = Some(value.to_string());
            }
            "descripcion" => self.descripcion = Some(value.to_string()),
            "tipo" => self.tipo = Some(parse_enum(value)?),
            "estado" => self.estado = Some(parse_enum(value)?),
            "expedienteId" => self.expediente_id = Some(parse_uuid(name, value)?),
            "clienteId" => self.cliente_id = Some(parse_uuid(name, value)?),
            "etiquetas" => self.etiquetas = Some(parse_etiquetas(value)?),
            "esPublico" => self.es_publico = Some(parse_bool(name, value)?),
            "destacado" => self.destacado = Some(parse_bool(name, value)?),
            "descripcionCambios" => self.descripcion_cambios = Some(value.to_string()),
            _ => {}
        }
        Ok(())
    }

    /// Metadata for a new document. `nombre` is required.
    pub fn into_nuevo(self) -> AppResult<NuevoDocumento> {
        let nombre = self
            .nombre
            .ok_or_else(|| AppError::validation("nombre is required"))?;
        Ok(NuevoDocumento {
            nombre,
            descripcion: self.descripcion,
            tipo: self.tipo,
            estado: self.estado,
            expediente_id: self.expediente_id,
            cliente_id: self.cliente_id,
            etiquetas: self.etiquetas.unwrap_or_default(),
            es_publico: self.es_publico.unwrap_or(false),
            destacado: self.destacado.unwrap_or(false),
        })
    }

    /// Changes for an existing document.
    pub fn into_actualizacion(self) -> ActualizacionDocumento {
        ActualizacionDocumento {
            cambios: DocumentoChanges {
                nombre: self.nombre,
                descripcion: self.descripcion,
                tipo: self.tipo,
                estado: self.estado,
                expediente_id: self.expediente_id,
                cliente_id: self.cliente_id,
                etiquetas: self.etiquetas,
                es_publico: self.es_publico,
                destacado: self.destacado,
            },
            descripcion_cambios: self.descripcion_cambios,
        }
    }
}

/// `GET /documentos` query. Values arrive as raw strings and are parsed by
/// [`DocumentoQuery::into_filter`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentoQuery {
    pub busqueda: Option<String>,
    pub tipo: Option<String>,
    pub estado: Option<String>,
    pub expediente_id: Option<String>,
    pub cliente_id: Option<String>,
    pub destacados: Option<String>,
    pub fecha_desde: Option<String>,
    pub fecha_hasta: Option<String>,
    pub etiquetas: Option<String>,
}

impl DocumentoQuery {
    pub fn into_filter(self) -> AppResult<DocumentoFilter> {
        fn opt<T>(
            raw: Option<String>,
            parse: impl FnOnce(&str) -> AppResult<T>,
        ) -> AppResult<Option<T>> {
            raw.as_deref().and_then(non_empty).map(parse).transpose()
        }

        Ok(DocumentoFilter {
            busqueda: self.busqueda.filter(|b| !b.trim().is_empty()),
            tipo: opt(self.tipo, parse_enum)?,
            estado: opt(self.estado, parse_enum)?,
            expediente_id: opt(self.expediente_id, |v| parse_uuid("expedienteId", v))?,
            cliente_id: opt(self.cliente_id, |v| parse_uuid("clienteId", v))?,
            destacados: opt(self.destacados, |v| parse_bool("destacados", v))?.unwrap_or(false),
            fecha_desde: opt(self.fecha_desde, |v| parse_fecha("fechaDesde", v, false))?,
            fecha_hasta: opt(self.fecha_hasta, |v| parse_fecha("fechaHasta", v, true))?,
            etiquetas: opt(self.etiquetas, parse_etiquetas)?.unwrap_or_default(),
        })
    }
}

/// `POST /documentos/{id}/permissions` body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PermisoRequest {
    pub usuario_id: Uuid,
    #[serde(default)]
    pub tipo_permiso: TipoPermiso,
}

/// `PATCH /documentos/{id}/estado` body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EstadoRequest {
    pub estado: EstadoDocumento,
}

/// `PATCH /documentos/{id}/destacado` body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DestacadoRequest {
    pub destacado: bool,
}
