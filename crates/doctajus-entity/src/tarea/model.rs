//! Tarea entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

define_enum! {
    /// Task urgency.
    PrioridadTarea, pg = "tarea_prioridad", default = Media {
        Baja => "baja",
        Media => "media",
        Alta => "alta",
        Urgente => "urgente",
    }
}

define_enum! {
    /// Task progress state.
    EstadoTarea, pg = "tarea_estado", default = Pendiente {
        Pendiente => "pendiente",
        EnProgreso => "en_progreso",
        Completada => "completada",
        Cancelada => "cancelada",
    }
}

/// A to-do item, optionally tied to a case and an assignee.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Tarea {
    pub id: Uuid,
    pub titulo: String,
    pub descripcion: Option<String>,
    pub fecha_vencimiento: NaiveDate,
    pub prioridad: PrioridadTarea,
    pub estado: EstadoTarea,
    pub horas_estimadas: Option<i32>,
    pub horas_reales: Option<i32>,
    pub es_recurrente: bool,
    pub recurrencia_pattern: Option<String>,
    pub notificaciones: Option<String>,
    pub asignado_a_id: Option<Uuid>,
    pub creado_por_id: Option<Uuid>,
    pub expediente_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tarea {
    /// Pending and due on or before `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.estado == EstadoTarea::Pendiente && self.fecha_vencimiento <= today
    }

    /// Pending and due within `[today, today + dias]`.
    pub fn is_due_within(&self, today: NaiveDate, dias: i64) -> bool {
        let limit = today + chrono::Duration::days(dias);
        self.estado == EstadoTarea::Pendiente
            && self.fecha_vencimiento >= today
            && self.fecha_vencimiento <= limit
    }
}

/// Data required to create a new task.
#[derive(Debug, Clone)]
pub struct CreateTarea {
    pub titulo: String,
    pub descripcion: Option<String>,
    pub fecha_vencimiento: NaiveDate,
    pub prioridad: PrioridadTarea,
    pub estado: EstadoTarea,
    pub horas_estimadas: Option<i32>,
    pub horas_reales: Option<i32>,
    pub es_recurrente: bool,
    pub recurrencia_pattern: Option<String>,
    pub notificaciones: Option<String>,
    pub asignado_a_id: Option<Uuid>,
    pub creado_por_id: Option<Uuid>,
    pub expediente_id: Option<Uuid>,
}

/// Partial task update. `None` leaves the column unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateTarea {
    pub titulo: Option<String>,
    pub descripcion: Option<String>,
    pub fecha_vencimiento: Option<NaiveDate>,
    pub prioridad: Option<PrioridadTarea>,
    pub estado: Option<EstadoTarea>,
    pub horas_estimadas: Option<i32>,
    pub horas_reales: Option<i32>,
    pub es_recurrente: Option<bool>,
    pub recurrencia_pattern: Option<String>,
    pub notificaciones: Option<String>,
    pub asignado_a_id: Option<Uuid>,
    pub expediente_id: Option<Uuid>,
}

/// Which subset of tasks to list.
///
/// Variants are mutually exclusive, checked in this order by the listing
/// endpoint: assignee, case, overdue, due soon, everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TareaFilter {
    All,
    AsignadoA(Uuid),
    Expediente(Uuid),
    /// Pending tasks due on or before the given day.
    Vencidas { hoy: NaiveDate },
    /// Pending tasks due between the given day and `dias` days later.
    ProximasAVencer { hoy: NaiveDate, dias: i64 },
}
