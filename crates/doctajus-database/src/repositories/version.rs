//! Document version repository.

use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use doctajus_core::error::{AppError, ErrorKind};
use doctajus_core::result::AppResult;
use doctajus_entity::documento::{CreateVersion, DocumentoVersion};

/// Repository for `documento_versiones`.
#[derive(Debug, Clone)]
pub struct VersionRepository {
    pool: PgPool,
}

impl VersionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Borrow the pool for non-transactional writes.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Insert a version row on the given executor (pool or open transaction).
    pub async fn create<'e, E>(&self, exec: E, data: &CreateVersion) -> AppResult<DocumentoVersion>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, DocumentoVersion>(
            "INSERT INTO documento_versiones (documento_id, numero_version, archivo_url, \
                archivo_nombre, archivo_tamanio, archivo_formato, descripcion_cambios, creado_por_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(data.documento_id)
        .bind(data.numero_version)
        .bind(&data.archivo.url)
        .bind(&data.archivo.nombre)
        .bind(data.archivo.tamanio)
        .bind(&data.archivo.formato)
        .bind(&data.descripcion_cambios)
        .bind(data.creado_por_id)
        .fetch_one(exec)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create version", e))
    }

    /// All versions of a document, newest first.
    pub async fn find_by_documento(&self, documento_id: Uuid) -> AppResult<Vec<DocumentoVersion>> {
        sqlx::query_as::<_, DocumentoVersion>(
            "SELECT * FROM documento_versiones WHERE documento_id = $1 \
             ORDER BY numero_version DESC",
        )
        .bind(documento_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list versions", e))
    }

    /// A single version, only if it belongs to the given document.
    pub async fn find_for_documento(
        &self,
        documento_id: Uuid,
        version_id: Uuid,
    ) -> AppResult<Option<DocumentoVersion>> {
        sqlx::query_as::<_, DocumentoVersion>(
            "SELECT * FROM documento_versiones WHERE id = $1 AND documento_id = $2",
        )
        .bind(version_id)
        .bind(documento_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find version", e))
    }
}
