//! Expediente entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

define_enum! {
    /// Procedural state of a case.
    EstadoExpediente, pg = "expediente_estado", default = Nuevo {
        Nuevo => "nuevo",
        EnProceso => "en_proceso",
        EnRevision => "en_revision",
        Cerrado => "cerrado",
        Archivado => "archivado",
    }
}

define_enum! {
    /// Area of law a case belongs to.
    TipoExpediente, pg = "expediente_tipo", default = Otro {
        Civil => "civil",
        Penal => "penal",
        Laboral => "laboral",
        Comercial => "comercial",
        Familiar => "familiar",
        Administrativo => "administrativo",
        Otro => "otro",
    }
}

/// A legal case file.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Expediente {
    pub id: Uuid,
    /// Court or internal case number.
    pub numero: String,
    pub titulo: String,
    pub descripcion: Option<String>,
    pub estado: EstadoExpediente,
    pub tipo: TipoExpediente,
    pub tribunal: Option<String>,
    pub numero_juzgado: Option<String>,
    pub jurisdiccion: Option<String>,
    pub fecha_inicio: Option<NaiveDate>,
    pub fecha_vencimiento: Option<NaiveDate>,
    /// Opposing party.
    pub contraparte: Option<String>,
    /// Amount claimed.
    pub valor_pretension: Option<f64>,
    /// Agreed fees.
    pub honorarios: Option<f64>,
    pub es_privado: bool,
    /// Responsible lawyer (user).
    pub abogado_id: Option<Uuid>,
    /// Client (user).
    pub cliente_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Expediente {
    /// Whether the case no longer accepts work.
    pub fn is_closed(&self) -> bool {
        matches!(
            self.estado,
            EstadoExpediente::Cerrado | EstadoExpediente::Archivado
        )
    }
}

/// Data required to create a new case.
#[derive(Debug, Clone, Default)]
pub struct CreateExpediente {
    pub numero: String,
    pub titulo: String,
    pub descripcion: Option<String>,
    pub estado: EstadoExpediente,
    pub tipo: TipoExpediente,
    pub tribunal: Option<String>,
    pub numero_juzgado: Option<String>,
    pub jurisdiccion: Option<String>,
    pub fecha_inicio: Option<NaiveDate>,
    pub fecha_vencimiento: Option<NaiveDate>,
    pub contraparte: Option<String>,
    pub valor_pretension: Option<f64>,
    pub honorarios: Option<f64>,
    pub es_privado: bool,
    pub abogado_id: Option<Uuid>,
    pub cliente_id: Option<Uuid>,
}

/// Partial case update. `None` leaves the column unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateExpediente {
    pub numero: Option<String>,
    pub titulo: Option<String>,
    pub descripcion: Option<String>,
    pub estado: Option<EstadoExpediente>,
    pub tipo: Option<TipoExpediente>,
    pub tribunal: Option<String>,
    pub numero_juzgado: Option<String>,
    pub jurisdiccion: Option<String>,
    pub fecha_inicio: Option<NaiveDate>,
    pub fecha_vencimiento: Option<NaiveDate>,
    pub contraparte: Option<String>,
    pub valor_pretension: Option<f64>,
    pub honorarios: Option<f64>,
    pub es_privado: Option<bool>,
    pub abogado_id: Option<Uuid>,
    pub cliente_id: Option<Uuid>,
}

/// Listing filter. The lawyer filter takes precedence over the client filter.
#[derive(Debug, Clone, Default)]
pub struct ExpedienteFilter {
    pub abogado_id: Option<Uuid>,
    pub cliente_id: Option<Uuid>,
}
