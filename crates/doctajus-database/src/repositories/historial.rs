//! Document audit trail repository.

use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use doctajus_core::error::{AppError, ErrorKind};
use doctajus_core::result::AppResult;
use doctajus_entity::documento::{CreateHistorial, DocumentoHistorial};

/// Repository for the append-only `documento_historial` table.
#[derive(Debug, Clone)]
pub struct HistorialRepository {
    pool: PgPool,
}

impl HistorialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append one entry.
    pub async fn create<'e, E>(&self, exec: E, entry: &CreateHistorial) -> AppResult<DocumentoHistorial>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, DocumentoHistorial>(
            "INSERT INTO documento_historial (documento_id, tipo_accion, detalles, metadatos, \
                usuario_id, ip_cliente, user_agent) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(entry.documento_id)
        .bind(entry.tipo_accion)
        .bind(&entry.detalles)
        .bind(&entry.metadatos)
        .bind(entry.usuario_id)
        .bind(&entry.ip_cliente)
        .bind(&entry.user_agent)
        .fetch_one(exec)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to record history", e))
    }

    /// All entries of a document, newest first.
    pub async fn find_by_documento(
        &self,
        documento_id: Uuid,
    ) -> AppResult<Vec<DocumentoHistorial>> {
        sqlx::query_as::<_, DocumentoHistorial>(
            "SELECT * FROM documento_historial WHERE documento_id = $1 \
             ORDER BY fecha_accion DESC",
        )
        .bind(documento_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list history", e))
    }

    /// Borrow the pool for non-transactional writes.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
