//! Documento repository implementation.

use sqlx::{PgExecutor, PgPool, Postgres, Transaction};
use uuid::Uuid;

use doctajus_core::error::{AppError, ErrorKind};
use doctajus_core::result::AppResult;
use doctajus_entity::documento::{
    ArchivoMetadata, CreateDocumento, Documento, DocumentoChanges, DocumentoFilter,
    EstadoDocumento,
};

use super::escape_like;

/// Repository for `documentos` rows.
#[derive(Debug, Clone)]
pub struct DocumentoRepository {
    pool: PgPool,
}

impl DocumentoRepository {
    /// Create a new documento repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Borrow the pool for non-transactional writes.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Open a transaction for multi-step writes.
    pub async fn begin(&self) -> AppResult<Transaction<'static, Postgres>> {
        self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })
    }

    /// Commit a transaction opened with [`Self::begin`].
    pub async fn commit(tx: Transaction<'static, Postgres>) -> AppResult<()> {
        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })
    }

    /// Find a document by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Documento>> {
        sqlx::query_as::<_, Documento>("SELECT * FROM documentos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find documento", e))
    }

    /// Find a document and lock its row until the surrounding transaction ends.
    pub async fn find_for_update<'e, E>(&self, exec: E, id: Uuid) -> AppResult<Option<Documento>>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Documento>("SELECT * FROM documentos WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(exec)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock documento", e))
    }

    /// List documents matching the filter, most recently modified first.
    ///
    /// When `visible_para` is set, only documents that are public or on which
    /// that user holds a permission row are returned.
    pub async fn find_all(
        &self,
        filter: &DocumentoFilter,
        visible_para: Option<Uuid>,
    ) -> AppResult<Vec<Documento>> {
        let sql = build_list_sql(filter, visible_para.is_some());
        let mut query = sqlx::query_as::<_, Documento>(&sql);

        if let Some(estado) = filter.estado {
            query = query.bind(estado);
        }
        if let Some(tipo) = filter.tipo {
            query = query.bind(tipo);
        }
        if let Some(cliente_id) = filter.cliente_id {
            query = query.bind(cliente_id);
        }
        if let Some(expediente_id) = filter.expediente_id {
            query = query.bind(expediente_id);
        }
        if let Some(texto) = busqueda(filter) {
            query = query.bind(like_pattern(texto));
        }
        if let Some(desde) = filter.fecha_desde {
            query = query.bind(desde);
        }
        if let Some(hasta) = filter.fecha_hasta {
            query = query.bind(hasta);
        }
        if !filter.etiquetas.is_empty() {
            query = query.bind(&filter.etiquetas);
        }
        if let Some(usuario_id) = visible_para {
            query = query.bind(usuario_id);
        }

        query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list documentos", e))
    }

    /// Insert a new document at version 1.
    pub async fn create<'e, E>(&self, exec: E, data: &CreateDocumento) -> AppResult<Documento>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Documento>(
            "INSERT INTO documentos (nombre, descripcion, tipo, estado, expediente_id, cliente_id, \
                archivo_url, archivo_nombre, archivo_tamanio, archivo_formato, etiquetas, \
                destacado, es_publico, version_actual, creado_por_id, modificado_por_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, 1, $14, $14) \
             RETURNING *",
        )
        .bind(&data.nombre)
        .bind(&data.descripcion)
        .bind(data.tipo)
        .bind(data.estado)
        .bind(data.expediente_id)
        .bind(data.cliente_id)
        .bind(&data.archivo.url)
        .bind(&data.archivo.nombre)
        .bind(data.archivo.tamanio)
        .bind(&data.archivo.formato)
        .bind(&data.etiquetas)
        .bind(data.destacado)
        .bind(data.es_publico)
        .bind(data.creado_por_id)
        .fetch_one(exec)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create documento", e))
    }

    /// Apply metadata changes. Absent fields keep their value.
    pub async fn update_metadata<'e, E>(
        &self,
        exec: E,
        id: Uuid,
        changes: &DocumentoChanges,
        modificado_por_id: Uuid,
    ) -> AppResult<Documento>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Documento>(
            "UPDATE documentos SET \
                nombre = COALESCE($2, nombre), \
                descripcion = COALESCE($3, descripcion), \
                tipo = COALESCE($4, tipo), \
                estado = COALESCE($5, estado), \
                expediente_id = COALESCE($6, expediente_id), \
                cliente_id = COALESCE($7, cliente_id), \
                etiquetas = COALESCE($8, etiquetas), \
                es_publico = COALESCE($9, es_publico), \
                destacado = COALESCE($10, destacado), \
                modificado_por_id = $11, \
                fecha_modificacion = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&changes.nombre)
        .bind(&changes.descripcion)
        .bind(changes.tipo)
        .bind(changes.estado)
        .bind(changes.expediente_id)
        .bind(changes.cliente_id)
        .bind(&changes.etiquetas)
        .bind(changes.es_publico)
        .bind(changes.destacado)
        .bind(modificado_por_id)
        .fetch_one(exec)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update documento", e))
    }

    /// Point the document at a new stored file and bump its version.
    ///
    /// Clears the search index flag so the new file gets re-extracted.
    pub async fn replace_file<'e, E>(
        &self,
        exec: E,
        id: Uuid,
        archivo: &ArchivoMetadata,
        version_actual: i32,
        modificado_por_id: Uuid,
    ) -> AppResult<Documento>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Documento>(
            "UPDATE documentos SET \
                archivo_url = $2, \
                archivo_nombre = $3, \
                archivo_tamanio = $4, \
                archivo_formato = $5, \
                version_actual = $6, \
                indexado_para_busqueda = FALSE, \
                contenido_indexado = NULL, \
                modificado_por_id = $7, \
                fecha_modificacion = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&archivo.url)
        .bind(&archivo.nombre)
        .bind(archivo.tamanio)
        .bind(&archivo.formato)
        .bind(version_actual)
        .bind(modificado_por_id)
        .fetch_one(exec)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to replace documento file", e)
        })
    }

    /// Set the lifecycle state.
    pub async fn update_estado(
        &self,
        id: Uuid,
        estado: EstadoDocumento,
        modificado_por_id: Uuid,
    ) -> AppResult<Documento> {
        sqlx::query_as::<_, Documento>(
            "UPDATE documentos SET estado = $2, modificado_por_id = $3, \
                fecha_modificacion = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(estado)
        .bind(modificado_por_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update documento estado", e)
        })
    }

    /// Set or clear the featured flag.
    pub async fn set_destacado(
        &self,
        id: Uuid,
        destacado: bool,
        modificado_por_id: Uuid,
    ) -> AppResult<Documento> {
        sqlx::query_as::<_, Documento>(
            "UPDATE documentos SET destacado = $2, modificado_por_id = $3, \
                fecha_modificacion = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(destacado)
        .bind(modificado_por_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update documento destacado", e)
        })
    }

    /// Store extracted text. Only applies while the document still points at
    /// `archivo_url`, so a stale job cannot overwrite a newer file's index.
    pub async fn mark_indexed(
        &self,
        id: Uuid,
        archivo_url: &str,
        contenido: &str,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE documentos SET indexado_para_busqueda = TRUE, contenido_indexado = $3 \
             WHERE id = $1 AND archivo_url = $2",
        )
        .bind(id)
        .bind(archivo_url)
        .bind(contenido)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to store indexed content", e)
        })?;
        Ok(result.rows_affected() > 0)
    }

    /// Hard-delete a document. Versions and permissions go with it; the
    /// history rows are kept.
    pub async fn delete<'e, E>(&self, exec: E, id: Uuid) -> AppResult<bool>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM documentos WHERE id = $1")
            .bind(id)
            .execute(exec)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete documento", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}

/// The search text as typed. Blank input disables the filter but
/// surrounding spaces are otherwise significant.
fn busqueda(filter: &DocumentoFilter) -> Option<&str> {
    filter.busqueda.as_deref().filter(|v| !v.trim().is_empty())
}

fn like_pattern(busqueda: &str) -> String {
    format!("%{}%", escape_like(busqueda))
}

/// Build the listing statement. Placeholders are numbered in the same order
/// [`DocumentoRepository::find_all`] binds them.
fn build_list_sql(filter: &DocumentoFilter, restrict_visibility: bool) -> String {
    let mut conditions = Vec::new();
    let mut param_idx = 1u32;

    if filter.estado.is_some() {
        conditions.push(format!("d.estado = ${param_idx}"));
        param_idx += 1;
    }
    if filter.tipo.is_some() {
        conditions.push(format!("d.tipo = ${param_idx}"));
        param_idx += 1;
    }
    if filter.cliente_id.is_some() {
        conditions.push(format!("d.cliente_id = ${param_idx}"));
        param_idx += 1;
    }
    if filter.expediente_id.is_some() {
        conditions.push(format!("d.expediente_id = ${param_idx}"));
        param_idx += 1;
    }
    if busqueda(filter).is_some() {
        conditions.push(format!("d.nombre LIKE ${param_idx} ESCAPE '\\'"));
        param_idx += 1;
    }
    if filter.fecha_desde.is_some() {
        conditions.push(format!("d.fecha_creacion >= ${param_idx}"));
        param_idx += 1;
    }
    if filter.fecha_hasta.is_some() {
        conditions.push(format!("d.fecha_creacion <= ${param_idx}"));
        param_idx += 1;
    }
    if !filter.etiquetas.is_empty() {
        conditions.push(format!("d.etiquetas && ${param_idx}"));
        param_idx += 1;
    }
    if filter.destacados {
        conditions.push("d.destacado = TRUE".to_string());
    }
    if restrict_visibility {
        conditions.push(format!(
            "(d.es_publico = TRUE OR EXISTS (SELECT 1 FROM documento_permisos p \
             WHERE p.documento_id = d.id AND p.usuario_id = ${param_idx}))"
        ));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    };

    format!("SELECT d.* FROM documentos d{where_clause} ORDER BY d.fecha_modificacion DESC")
}
