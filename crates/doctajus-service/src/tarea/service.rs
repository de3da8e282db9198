//! Tarea CRUD and due-date queries.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::info;
use uuid::Uuid;

use doctajus_core::error::AppError;
use doctajus_core::result::AppResult;
use doctajus_database::repositories::tarea::TareaRepository;
use doctajus_entity::tarea::{
    CreateTarea, EstadoTarea, PrioridadTarea, Tarea, TareaFilter, UpdateTarea,
};

use crate::context::RequestContext;

/// Default look-ahead window for tasks "about to expire".
pub const DEFAULT_DIAS_PROXIMOS: i64 = 7;

fn not_found(id: Uuid) -> AppError {
    AppError::not_found(format!("Tarea with ID \"{id}\" not found"))
}

/// Task input. The creator is taken from the request context.
#[derive(Debug, Clone)]
pub struct NuevaTarea {
    pub titulo: String,
    pub descripcion: Option<String>,
    pub fecha_vencimiento: NaiveDate,
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

/// Raw listing parameters as they arrive from the query string.
#[derive(Debug, Clone, Default)]
pub struct TareaQuery {
    pub asignado_a_id: Option<Uuid>,
    pub expediente_id: Option<Uuid>,
    pub vencidas: bool,
    pub proximas_a_vencer: bool,
    pub dias: Option<i64>,
}

impl TareaQuery {
    /// Pick the single filter to apply. Assignee wins over case, case over
    /// overdue, overdue over due soon.
    pub fn into_filter(self, hoy: NaiveDate) -> TareaFilter {
        if let Some(usuario_id) = self.asignado_a_id {
            TareaFilter::AsignadoA(usuario_id)
        } else if let Some(expediente_id) = self.expediente_id {
            TareaFilter::Expediente(expediente_id)
        } else if self.vencidas {
            TareaFilter::Vencidas { hoy }
        } else if self.proximas_a_vencer {
            TareaFilter::ProximasAVencer {
                hoy,
                dias: self.dias.unwrap_or(DEFAULT_DIAS_PROXIMOS),
            }
        } else {
            TareaFilter::All
        }
    }
}

/// Handles task operations.
#[derive(Debug, Clone)]
pub struct TareaService {
    repo: Arc<TareaRepository>,
}

impl TareaService {
    pub fn new(repo: Arc<TareaRepository>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, ctx: &RequestContext, input: NuevaTarea) -> AppResult<Tarea> {
        let tarea = self
            .repo
            .create(&CreateTarea {
                titulo: input.titulo,
                descripcion: input.descripcion,
                fecha_vencimiento: input.fecha_vencimiento,
                prioridad: input.prioridad.unwrap_or_default(),
                estado: input.estado.unwrap_or_default(),
                horas_estimadas: input.horas_estimadas,
                horas_reales: input.horas_reales,
                es_recurrente: input.es_recurrente.unwrap_or(false),
                recurrencia_pattern: input.recurrencia_pattern,
                notificaciones: input.notificaciones,
                asignado_a_id: input.asignado_a_id,
                creado_por_id: Some(ctx.user_id),
                expediente_id: input.expediente_id,
            })
            .await?;

        info!(user_id = %ctx.user_id, tarea_id = %tarea.id, "Tarea created");
        Ok(tarea)
    }

    /// List tasks for the query, evaluated against today's date (UTC).
    pub async fn find_all(&self, query: TareaQuery) -> AppResult<Vec<Tarea>> {
        let hoy = Utc::now().date_naive();
        self.repo.find_all(query.into_filter(hoy)).await
    }

    pub async fn find_one(&self, id: Uuid) -> AppResult<Tarea> {
        self.repo.find_by_id(id).await?.ok_or_else(|| not_found(id))
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        data: UpdateTarea,
    ) -> AppResult<Tarea> {
        let tarea = self
            .repo
            .update(id, &data)
            .await?
            .ok_or_else(|| not_found(id))?;
        info!(user_id = %ctx.user_id, tarea_id = %id, "Tarea updated");
        Ok(tarea)
    }

    /// Mark a task as completed.
    pub async fn completar(&self, ctx: &RequestContext, id: Uuid) -> AppResult<Tarea> {
        let tarea = self
            .repo
            .set_estado(id, EstadoTarea::Completada)
            .await?
            .ok_or_else(|| not_found(id))?;
        info!(user_id = %ctx.user_id, tarea_id = %id, "Tarea completed");
        Ok(tarea)
    }

    pub async fn remove(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        if !self.repo.delete(id).await? {
            return Err(not_found(id));
        }
        info!(user_id = %ctx.user_id, tarea_id = %id, "Tarea deleted");
        Ok(())
    }
}
