//! Expediente repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use doctajus_core::error::{AppError, ErrorKind};
use doctajus_core::result::AppResult;
use doctajus_entity::expediente::{
    CreateExpediente, Expediente, ExpedienteFilter, UpdateExpediente,
};

/// Repository for case files.
#[derive(Debug, Clone)]
pub struct ExpedienteRepository {
    pool: PgPool,
}

impl ExpedienteRepository {
    /// Create a new expediente repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a case by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Expediente>> {
        sqlx::query_as::<_, Expediente>("SELECT * FROM expedientes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find expediente", e)
            })
    }

    /// List cases, newest first. A lawyer filter wins over a client filter.
    pub async fn find_all(&self, filter: &ExpedienteFilter) -> AppResult<Vec<Expediente>> {
        let query = if let Some(abogado_id) = filter.abogado_id {
            sqlx::query_as::<_, Expediente>(
                "SELECT * FROM expedientes WHERE abogado_id = $1 ORDER BY created_at DESC",
            )
            .bind(abogado_id)
        } else if let Some(cliente_id) = filter.cliente_id {
            sqlx::query_as::<_, Expediente>(
                "SELECT * FROM expedientes WHERE cliente_id = $1 ORDER BY created_at DESC",
            )
            .bind(cliente_id)
        } else {
            sqlx::query_as::<_, Expediente>("SELECT * FROM expedientes ORDER BY created_at DESC")
        };

        query.fetch_all(&self.pool).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list expedientes", e)
        })
    }

    /// Insert a new case.
    pub async fn create(&self, data: &CreateExpediente) -> AppResult<Expediente> {
        sqlx::query_as::<_, Expediente>(
            "INSERT INTO expedientes (numero, titulo, descripcion, estado, tipo, tribunal, \
                numero_juzgado, jurisdiccion, fecha_inicio, fecha_vencimiento, contraparte, \
                valor_pretension, honorarios, es_privado, abogado_id, cliente_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16) \
             RETURNING *",
        )
        .bind(&data.numero)
        .bind(&data.titulo)
        .bind(&data.descripcion)
        .bind(data.estado)
        .bind(data.tipo)
        .bind(&data.tribunal)
        .bind(&data.numero_juzgado)
        .bind(&data.jurisdiccion)
        .bind(data.fecha_inicio)
        .bind(data.fecha_vencimiento)
        .bind(&data.contraparte)
        .bind(data.valor_pretension)
        .bind(data.honorarios)
        .bind(data.es_privado)
        .bind(data.abogado_id)
        .bind(data.cliente_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create expediente", e))
    }

    /// Apply a partial update and return the updated row.
    pub async fn update(&self, id: Uuid, data: &UpdateExpediente) -> AppResult<Option<Expediente>> {
        sqlx::query_as::<_, Expediente>(
            "UPDATE expedientes SET \
                numero = COALESCE($2, numero), \
                titulo = COALESCE($3, titulo), \
                descripcion = COALESCE($4, descripcion), \
                estado = COALESCE($5, estado), \
                tipo = COALESCE($6, tipo), \
                tribunal = COALESCE($7, tribunal), \
                numero_juzgado = COALESCE($8, numero_juzgado), \
                jurisdiccion = COALESCE($9, jurisdiccion), \
                fecha_inicio = COALESCE($10, fecha_inicio), \
                fecha_vencimiento = COALESCE($11, fecha_vencimiento), \
                contraparte = COALESCE($12, contraparte), \
                valor_pretension = COALESCE($13, valor_pretension), \
                honorarios = COALESCE($14, honorarios), \
                es_privado = COALESCE($15, es_privado), \
                abogado_id = COALESCE($16, abogado_id), \
                cliente_id = COALESCE($17, cliente_id), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.numero)
        .bind(&data.titulo)
        .bind(&data.descripcion)
        .bind(data.estado)
        .bind(data.tipo)
        .bind(&data.tribunal)
        .bind(&data.numero_juzgado)
        .bind(&data.jurisdiccion)
        .bind(data.fecha_inicio)
        .bind(data.fecha_vencimiento)
        .bind(&data.contraparte)
        .bind(data.valor_pretension)
        .bind(data.honorarios)
        .bind(data.es_privado)
        .bind(data.abogado_id)
        .bind(data.cliente_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update expediente", e))
    }

    /// Delete a case. Returns `false` when no row matched.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM expedientes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete expediente", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
