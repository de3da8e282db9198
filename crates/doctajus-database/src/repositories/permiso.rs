//! Document permission repository.

use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use doctajus_core::error::{AppError, ErrorKind};
use doctajus_core::result::AppResult;
use doctajus_entity::documento::{DocumentoPermiso, TipoPermiso};

/// Repository for `documento_permisos`.
#[derive(Debug, Clone)]
pub struct PermisoRepository {
    pool: PgPool,
}

impl PermisoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Borrow the pool for non-transactional writes.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// The permission row for a (document, user) pair, if any.
    pub async fn find(
        &self,
        documento_id: Uuid,
        usuario_id: Uuid,
    ) -> AppResult<Option<DocumentoPermiso>> {
        sqlx::query_as::<_, DocumentoPermiso>(
            "SELECT * FROM documento_permisos WHERE documento_id = $1 AND usuario_id = $2",
        )
        .bind(documento_id)
        .bind(usuario_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find permission", e))
    }

    /// All permission rows of a document.
    pub async fn find_by_documento(&self, documento_id: Uuid) -> AppResult<Vec<DocumentoPermiso>> {
        sqlx::query_as::<_, DocumentoPermiso>(
            "SELECT * FROM documento_permisos WHERE documento_id = $1 ORDER BY fecha_creacion ASC",
        )
        .bind(documento_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list permissions", e))
    }

    /// Grant a permission, replacing the existing row for the pair.
    pub async fn upsert<'e, E>(
        &self,
        exec: E,
        documento_id: Uuid,
        usuario_id: Uuid,
        tipo_permiso: TipoPermiso,
        otorgado_por_id: Uuid,
    ) -> AppResult<DocumentoPermiso>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, DocumentoPermiso>(
            "INSERT INTO documento_permisos (documento_id, usuario_id, tipo_permiso, otorgado_por_id) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (documento_id, usuario_id) DO UPDATE SET \
                tipo_permiso = EXCLUDED.tipo_permiso, \
                otorgado_por_id = EXCLUDED.otorgado_por_id, \
                fecha_modificacion = NOW() \
             RETURNING *",
        )
        .bind(documento_id)
        .bind(usuario_id)
        .bind(tipo_permiso)
        .bind(otorgado_por_id)
        .fetch_one(exec)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to grant permission", e))
    }

    /// Remove the permission row for a pair. Returns `false` when none existed.
    pub async fn delete(&self, documento_id: Uuid, usuario_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "DELETE FROM documento_permisos WHERE documento_id = $1 AND usuario_id = $2",
        )
        .bind(documento_id)
        .bind(usuario_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to revoke permission", e))?;
        Ok(result.rows_affected() > 0)
    }
}
