//! Per-user document permissions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

define_enum! {
    /// Level of access a user holds on a single document.
    ///
    /// Ordered by privilege: administrador > escritura > lectura.
    TipoPermiso, pg = "tipo_permiso", default = Lectura {
        /// View and download.
        Lectura => "lectura",
        /// Also edit metadata, upload versions, and change status.
        Escritura => "escritura",
        /// Also delete and manage permissions.
        Administrador => "administrador",
    }
}

impl TipoPermiso {
    /// Return the privilege level (higher = more privileged).
    pub fn privilege_level(&self) -> u8 {
        match self {
            Self::Administrador => 3,
            Self::Escritura => 2,
            Self::Lectura => 1,
        }
    }

    /// Check if this permission allows modifying the document.
    pub fn can_write(&self) -> bool {
        matches!(self, Self::Escritura | Self::Administrador)
    }

    /// Check if this permission allows deleting and managing permissions.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Administrador)
    }
}

/// A grant of access on one document to one user.
///
/// At most one row exists per (document, user).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DocumentoPermiso {
    pub id: Uuid,
    pub documento_id: Uuid,
    pub usuario_id: Uuid,
    pub tipo_permiso: TipoPermiso,
    /// The user who granted this permission.
    pub otorgado_por_id: Uuid,
    pub fecha_creacion: DateTime<Utc>,
    pub fecha_modificacion: DateTime<Utc>,
}
