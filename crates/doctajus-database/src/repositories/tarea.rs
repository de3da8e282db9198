//! Tarea repository implementation.

use chrono::{Days, NaiveDate};
use sqlx::PgPool;
use uuid::Uuid;

use doctajus_core::error::{AppError, ErrorKind};
use doctajus_core::result::AppResult;
use doctajus_entity::tarea::{CreateTarea, EstadoTarea, Tarea, TareaFilter, UpdateTarea};

/// Repository for tasks.
#[derive(Debug, Clone)]
pub struct TareaRepository {
    pool: PgPool,
}

impl TareaRepository {
    /// Create a new tarea repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a task by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Tarea>> {
        sqlx::query_as::<_, Tarea>("SELECT * FROM tareas WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find tarea", e))
    }

    /// List tasks matching the filter, earliest due date first.
    pub async fn find_all(&self, filter: TareaFilter) -> AppResult<Vec<Tarea>> {
        let hasta = match filter {
            TareaFilter::ProximasAVencer { hoy, dias } => Some(fin_de_ventana(hoy, dias)?),
            _ => None,
        };
        let query = match filter {
            TareaFilter::All => {
                sqlx::query_as::<_, Tarea>("SELECT * FROM tareas ORDER BY fecha_vencimiento ASC")
            }
            TareaFilter::AsignadoA(usuario_id) => sqlx::query_as::<_, Tarea>(
                "SELECT * FROM tareas WHERE asignado_a_id = $1 ORDER BY fecha_vencimiento ASC",
            )
            .bind(usuario_id),
            TareaFilter::Expediente(expediente_id) => sqlx::query_as::<_, Tarea>(
                "SELECT * FROM tareas WHERE expediente_id = $1 ORDER BY fecha_vencimiento ASC",
            )
            .bind(expediente_id),
            TareaFilter::Vencidas { hoy } => sqlx::query_as::<_, Tarea>(
                "SELECT * FROM tareas WHERE fecha_vencimiento <= $1 AND estado = $2 \
                 ORDER BY fecha_vencimiento ASC",
            )
            .bind(hoy)
            .bind(EstadoTarea::Pendiente),
            TareaFilter::ProximasAVencer { hoy, .. } => sqlx::query_as::<_, Tarea>(
                "SELECT * FROM tareas WHERE fecha_vencimiento BETWEEN $1 AND $2 AND estado = $3 \
                 ORDER BY fecha_vencimiento ASC",
            )
            .bind(hoy)
            .bind(hasta)
            .bind(EstadoTarea::Pendiente),
        };

        query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list tareas", e))
    }

    /// Insert a new task.
    pub async fn create(&self, data: &CreateTarea) -> AppResult<Tarea> {
        sqlx::query_as::<_, Tarea>(
            "INSERT INTO tareas (titulo, descripcion, fecha_vencimiento, prioridad, estado, \
                horas_estimadas, horas_reales, es_recurrente, recurrencia_pattern, \
                notificaciones, asignado_a_id, creado_por_id, expediente_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) RETURNING *",
        )
        .bind(&data.titulo)
        .bind(&data.descripcion)
        .bind(data.fecha_vencimiento)
        .bind(data.prioridad)
        .bind(data.estado)
        .bind(data.horas_estimadas)
        .bind(data.horas_reales)
        .bind(data.es_recurrente)
        .bind(&data.recurrencia_pattern)
        .bind(&data.notificaciones)
        .bind(data.asignado_a_id)
        .bind(data.creado_por_id)
        .bind(data.expediente_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create tarea", e))
    }

    /// Apply a partial update and return the updated row.
    pub async fn update(&self, id: Uuid, data: &UpdateTarea) -> AppResult<Option<Tarea>> {
        sqlx::query_as::<_, Tarea>(
            "UPDATE tareas SET \
                titulo = COALESCE($2, titulo), \
                descripcion = COALESCE($3, descripcion), \
                fecha_vencimiento = COALESCE($4, fecha_vencimiento), \
                prioridad = COALESCE($5, prioridad), \
                estado = COALESCE($6, estado), \
                horas_estimadas = COALESCE($7, horas_estimadas), \
                horas_reales = COALESCE($8, horas_reales), \
                es_recurrente = COALESCE($9, es_recurrente), \
                recurrencia_pattern = COALESCE($10, recurrencia_pattern), \
                notificaciones = COALESCE($11, notificaciones), \
                asignado_a_id = COALESCE($12, asignado_a_id), \
                expediente_id = COALESCE($13, expediente_id), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.titulo)
        .bind(&data.descripcion)
        .bind(data.fecha_vencimiento)
        .bind(data.prioridad)
        .bind(data.estado)
        .bind(data.horas_estimadas)
        .bind(data.horas_reales)
        .bind(data.es_recurrente)
        .bind(&data.recurrencia_pattern)
        .bind(&data.notificaciones)
        .bind(data.asignado_a_id)
        .bind(data.expediente_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update tarea", e))
    }

    /// Set the task state.
    pub async fn set_estado(&self, id: Uuid, estado: EstadoTarea) -> AppResult<Option<Tarea>> {
        sqlx::query_as::<_, Tarea>(
            "UPDATE tareas SET estado = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(estado)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update tarea estado", e))
    }

    /// Delete a task. Returns `false` when no row matched.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM tareas WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete tarea", e))?;
        Ok(result.rows_affected() > 0)
    }
}

/// Last day of a due-soon window. Negative or unrepresentable spans are
/// rejected instead of wrapping.
fn fin_de_ventana(hoy: NaiveDate, dias: i64) -> AppResult<NaiveDate> {
    u64::try_from(dias)
        .ok()
        .and_then(|dias| hoy.checked_add_days(Days::new(dias)))
        .ok_or_else(|| AppError::validation(format!("dias is out of range: {dias}")))
}
