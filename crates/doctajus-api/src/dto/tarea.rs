//! Task bodies and listing query.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use doctajus_entity::tarea::{EstadoTarea, PrioridadTarea, UpdateTarea};
use doctajus_service::tarea::{NuevaTarea, TareaQuery};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTareaRequest {
    #[validate(length(min = 3, max = 200))]
    pub titulo: String,
    pub descripcion: Option<String>,
    pub fecha_vencimiento: NaiveDate,
    pub prioridad: Option<PrioridadTarea>,
    pub estado: Option<EstadoTarea>,
    #[validate(range(min = 0))]
    pub horas_estimadas: Option<i32>,
    #[validate(range(min = 0))]
    pub horas_reales: Option<i32>,
    pub es_recurrente: Option<bool>,
    pub recurrencia_pattern: Option<String>,
    pub notificaciones: Option<String>,
    pub asignado_a_id: Option<Uuid>,
    pub expediente_id: Option<Uuid>,
}

impl From<CreateTareaRequest> for NuevaTarea {
    fn from(req: CreateTareaRequest) -> Self {
        Self {
            titulo: req.titulo,
            descripcion: req.descripcion,
            fecha_vencimiento: req.fecha_vencimiento,
            prioridad: req.prioridad,
            estado: req.estado,
            horas_estimadas: req.horas_estimadas,
            horas_reales: req.horas_reales,
            es_recurrente: req.es_recurrente,
            recurrencia_pattern: req.recurrencia_pattern,
            notificaciones: req.notificaciones,
            asignado_a_id: req.asignado_a_id,
            expediente_id: req.expediente_id,
        }
    }
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTareaRequest {
    #[validate(length(min = 3, max = 200))]
    pub titulo: Option<String>,
    pub descripcion: Option<String>,
    pub fecha_vencimiento: Option<NaiveDate>,
    pub prioridad: Option<PrioridadTarea>,
    pub estado: Option<EstadoTarea>,
    #[validate(range(min = 0))]
    pub horas_estimadas: Option<i32>,
    #[validate(range(min = 0))]
    pub horas_reales: Option<i32>,
    pub es_recurrente: Option<bool>,
    pub recurrencia_pattern: Option<String>,
    pub notificaciones: Option<String>,
    pub asignado_a_id: Option<Uuid>,
    pub expediente_id: Option<Uuid>,
}

impl From<UpdateTareaRequest> for UpdateTarea {
    fn from(req: UpdateTareaRequest) -> Self {
        Self {
            titulo: req.titulo,
            descripcion: req.descripcion,
            fecha_vencimiento: req.fecha_vencimiento,
            prioridad: req.prioridad,
            estado: req.estado,
            horas_estimadas: req.horas_estimadas,
            horas_reales: req.horas_reales,
            es_recurrente: req.es_recurrente,
            recurrencia_pattern: req.recurrencia_pattern,
            notificaciones: req.notificaciones,
            asignado_a_id: req.asignado_a_id,
            expediente_id: req.expediente_id,
        }
    }
}

/// `GET /tareas` query. `dias` is capped at ten years.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TareaQueryParams {
    pub asignado_a_id: Option<Uuid>,
    pub expediente_id: Option<Uuid>,
    pub vencidas: Option<bool>,
    pub proximas_a_vencer: Option<bool>,
    #[validate(range(min = 0, max = 3650))]
    pub dias: Option<i64>,
}

impl From<TareaQueryParams> for TareaQuery {
    fn from(q: TareaQueryParams) -> Self {
        Self {
            asignado_a_id: q.asignado_a_id,
            expediente_id: q.expediente_id,
            vencidas: q.vencidas.unwrap_or(false),
            proximas_a_vencer: q.proximas_a_vencer.unwrap_or(false),
            dias: q.dias,
        }
    }
}
