//! Document audit trail.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

define_enum! {
    /// Kind of action recorded in a document's history.
    TipoAccion, pg = "tipo_accion", default = Modificacion {
        Creacion => "creacion",
        Modificacion => "modificacion",
        CambioEstado => "cambio_estado",
        NuevaVersion => "nueva_version",
        Descarga => "descarga",
        CambioPermisos => "cambio_permisos",
        Eliminacion => "eliminacion",
        Restauracion => "restauracion",
        Visualizacion => "visualizacion",
    }
}

/// Maximum stored length of the client IP (fits IPv6 text form).
pub const MAX_IP_LEN: usize = 45;
/// Maximum stored length of the User-Agent header.
pub const MAX_USER_AGENT_LEN: usize = 255;

/// One append-only audit entry.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DocumentoHistorial {
    pub id: Uuid,
    pub documento_id: Uuid,
    pub tipo_accion: TipoAccion,
    pub detalles: Option<String>,
    pub metadatos: Option<serde_json::Value>,
    pub usuario_id: Uuid,
    pub ip_cliente: Option<String>,
    pub user_agent: Option<String>,
    pub fecha_accion: DateTime<Utc>,
}

/// Data required to append a history entry.
#[derive(Debug, Clone)]
pub struct CreateHistorial {
    pub documento_id: Uuid,
    pub tipo_accion: TipoAccion,
    pub detalles: Option<String>,
    pub metadatos: Option<serde_json::Value>,
    pub usuario_id: Uuid,
    pub ip_cliente: Option<String>,
    pub user_agent: Option<String>,
}

impl CreateHistorial {
    /// Start an entry for the given action.
    pub fn new(documento_id: Uuid, usuario_id: Uuid, tipo_accion: TipoAccion) -> Self {
        Self {
            documento_id,
            tipo_accion,
            detalles: None,
            metadatos: None,
            usuario_id,
            ip_cliente: None,
            user_agent: None,
        }
    }

    /// Set the human-readable description.
    pub fn detalles(mut self, detalles: impl Into<String>) -> Self {
        self.detalles = Some(detalles.into());
        self
    }

    /// Attach structured metadata.
    pub fn metadatos(mut self, metadatos: serde_json::Value) -> Self {
        self.metadatos = Some(metadatos);
        self
    }

    /// Record where the request came from. Values are cut to column width.
    pub fn origen(mut self, ip: Option<&str>, user_agent: Option<&str>) -> Self {
        self.ip_cliente = ip.map(|v| truncate_chars(v, MAX_IP_LEN));
        self.user_agent = user_agent.map(|v| truncate_chars(v, MAX_USER_AGENT_LEN));
        self
    }
}

fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}
