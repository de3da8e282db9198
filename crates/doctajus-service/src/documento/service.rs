//! Document service. Every document use case goes through here.
//!
//! Mutations follow one sequence: load the document (404), check the
//! caller's permission (403), mutate, append exactly one historial row with
//! the request origin, return the refreshed entity. Create and update run
//! their writes inside one transaction.

use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use doctajus_core::error::AppError;
use doctajus_core::result::AppResult;
use doctajus_database::repositories::documento::DocumentoRepository;
use doctajus_database::repositories::historial::HistorialRepository;
use doctajus_database::repositories::permiso::PermisoRepository;
use doctajus_database::repositories::user::UserRepository;
use doctajus_database::repositories::version::VersionRepository;
use doctajus_entity::documento::{
    CreateDocumento, CreateHistorial, CreateVersion, DescargaArchivo, Documento,
    DocumentoFilter, DocumentoHistorial, DocumentoPermiso, DocumentoVersion, EstadoDocumento,
    TipoAccion, TipoPermiso,
};
use doctajus_storage::mime::{OCTET_STREAM, guess_from_name};
use doctajus_storage::{StoredUpload, UploadStore};
use doctajus_worker::{IndexJob, IndexQueue};

use super::access::{Acceso, permite, validar_permiso_otorgado};
use super::types::{
    ActualizacionDocumento, ArchivoSubido, DocumentoEliminado, NuevoDocumento, PermisoEliminado,
};
use crate::context::RequestContext;

const DESCRIPCION_VERSION_INICIAL: &str = "Versión inicial";
const DESCRIPCION_ACTUALIZACION: &str = "Actualización de documento";

fn not_found(id: Uuid) -> AppError {
    AppError::not_found(format!("Documento con ID {id} no encontrado"))
}

/// Orchestrates documents, their files, versions, permissions and history.
#[derive(Debug, Clone)]
pub struct DocumentoService {
    documentos: Arc<DocumentoRepository>,
    versiones: Arc<VersionRepository>,
    permisos: Arc<PermisoRepository>,
    historial: Arc<HistorialRepository>,
    usuarios: Arc<UserRepository>,
    uploads: UploadStore,
    index_queue: IndexQueue,
    /// Upload folder for document files.
    folder: String,
}

impl DocumentoService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        documentos: Arc<DocumentoRepository>,
        versiones: Arc<VersionRepository>,
        permisos: Arc<PermisoRepository>,
        historial: Arc<HistorialRepository>,
        usuarios: Arc<UserRepository>,
        uploads: UploadStore,
        index_queue: IndexQueue,
        folder: impl Into<String>,
    ) -> Self {
        Self {
            documentos,
            versiones,
            permisos,
            historial,
            usuarios,
            uploads,
            index_queue,
            folder: folder.into(),
        }
    }

    // ── Access ────────────────────────────────────────────────────

    async fn cargar(&self, id: Uuid) -> AppResult<Documento> {
        self.documentos
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// True when the user may read the document.
    pub async fn has_access(&self, documento: &Documento, usuario_id: Uuid) -> AppResult<bool> {
        self.tiene(Acceso::Lectura, documento, usuario_id).await
    }

    /// True when the user holds `escritura` or `administrador`.
    pub async fn has_write_access(
        &self,
        documento: &Documento,
        usuario_id: Uuid,
    ) -> AppResult<bool> {
        self.tiene(Acceso::Escritura, documento, usuario_id).await
    }

    /// True when the user holds `administrador`.
    pub async fn has_admin_access(
        &self,
        documento: &Documento,
        usuario_id: Uuid,
    ) -> AppResult<bool> {
        self.tiene(Acceso::Administracion, documento, usuario_id).await
    }

    async fn tiene(&self, acceso: Acceso, documento: &Documento, usuario_id: Uuid) -> AppResult<bool> {
        if acceso == Acceso::Lectura && documento.es_publico {
            return Ok(true);
        }
        let permiso = self.permisos.find(documento.id, usuario_id).await?;
        Ok(permite(acceso, documento, permiso.as_ref()))
    }

    async fn exigir(
        &self,
        ctx: &RequestContext,
        documento: &Documento,
        acceso: Acceso,
        mensaje: &str,
    ) -> AppResult<()> {
        if self.tiene(acceso, documento, ctx.user_id).await? {
            Ok(())
        } else {
            warn!(
                user_id = %ctx.user_id,
                documento_id = %documento.id,
                acceso = ?acceso,
                "Document access denied"
            );
            Err(AppError::forbidden(mensaje))
        }
    }

    // ── History ───────────────────────────────────────────────────

    fn entrada(&self, ctx: &RequestContext, documento_id: Uuid, tipo: TipoAccion) -> CreateHistorial {
        CreateHistorial::new(documento_id, ctx.user_id, tipo)
            .origen(ctx.ip_address.as_deref(), ctx.user_agent.as_deref())
    }

    async fn registrar(&self, entrada: CreateHistorial) -> AppResult<()> {
        self.historial.create(self.historial.pool(), &entrada).await?;
        Ok(())
    }

    // ── Files ─────────────────────────────────────────────────────

    async fn guardar_archivo(&self, archivo: &ArchivoSubido) -> AppResult<StoredUpload> {
        self.uploads
            .store(&self.folder, &archivo.nombre, archivo.data.clone())
            .await
    }

    /// Remove a stored file whose database rows were never committed.
    async fn descartar_archivo(&self, stored: &StoredUpload) {
        if let Err(e) = self.uploads.provider().delete(&stored.storage_path).await {
            warn!(path = %stored.storage_path, error = %e, "Failed to remove orphaned upload");
        }
    }

    fn encolar_indexado(&self, documento: &Documento, archivo: &ArchivoSubido, stored: &StoredUpload) {
        let mime_type = archivo
            .mime_type
            .clone()
            .filter(|m| m != OCTET_STREAM)
            .or_else(|| guess_from_name(&archivo.nombre).map(str::to_string));

        self.index_queue.enqueue(IndexJob {
            documento_id: documento.id,
            storage_path: stored.storage_path.clone(),
            archivo_url: stored.url.clone(),
            mime_type,
        });
    }

    // ── Queries ───────────────────────────────────────────────────

    /// List documents. When `visible_para` is set, documents that user
    /// cannot read are left out.
    pub async fn find_all(
        &self,
        filter: &DocumentoFilter,
        visible_para: Option<Uuid>,
    ) -> AppResult<Vec<Documento>> {
        self.documentos.find_all(filter, visible_para).await
    }

    /// Fetch one document and record the view.
    pub async fn find_one(&self, ctx: &RequestContext, id: Uuid) -> AppResult<Documento> {
        let documento = self.cargar(id).await?;
        self.exigir(
            ctx,
            &documento,
            Acceso::Lectura,
            "No tienes permiso para acceder a este documento",
        )
        .await?;

        self.registrar(
            self.entrada(ctx, id, TipoAccion::Visualizacion)
                .detalles("Documento visualizado"),
        )
        .await?;
        Ok(documento)
    }

    /// Download descriptor for the current file.
    pub async fn download(&self, ctx: &RequestContext, id: Uuid) -> AppResult<DescargaArchivo> {
        let documento = self.cargar(id).await?;
        self.exigir(
            ctx,
            &documento,
            Acceso::Lectura,
            "No tienes permiso para descargar este documento",
        )
        .await?;

        self.registrar(
            self.entrada(ctx, id, TipoAccion::Descarga)
                .detalles("Documento descargado"),
        )
        .await?;
        Ok(documento.descarga())
    }

    /// All versions, newest first.
    pub async fn versions(&self, ctx: &RequestContext, id: Uuid) -> AppResult<Vec<DocumentoVersion>> {
        let documento = self.cargar(id).await?;
        self.exigir(
            ctx,
            &documento,
            Acceso::Lectura,
            "No tienes permiso para ver las versiones de este documento",
        )
        .await?;
        self.versiones.find_by_documento(id).await
    }

    /// Download descriptor for a specific version.
    pub async fn version_file(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        version_id: Uuid,
    ) -> AppResult<DescargaArchivo> {
        let documento = self.cargar(id).await?;
        let version = self
            .versiones
            .find_for_documento(id, version_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Versión con ID {version_id} no encontrada"))
            })?;
        self.exigir(
            ctx,
            &documento,
            Acceso::Lectura,
            "No tienes permiso para descargar esta versión",
        )
        .await?;

        self.registrar(
            self.entrada(ctx, id, TipoAccion::Descarga)
                .detalles(format!("Versión {} descargada", version.numero_version))
                .metadatos(json!({ "versionId": version_id })),
        )
        .await?;
        Ok(version.descarga())
    }

    /// Permission rows. Admins only.
    pub async fn permissions(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> AppResult<Vec<DocumentoPermiso>> {
        let documento = self.cargar(id).await?;
        self.exigir(
            ctx,
            &documento,
            Acceso::Administracion,
            "No tienes permiso para ver los permisos de este documento",
        )
        .await?;
        self.permisos.find_by_documento(id).await
    }

    /// Audit trail, newest first.
    pub async fn history(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> AppResult<Vec<DocumentoHistorial>> {
        let documento = self.cargar(id).await?;
        self.exigir(
            ctx,
            &documento,
            Acceso::Lectura,
            "No tienes permiso para ver el historial de este documento",
        )
        .await?;
        self.historial.find_by_documento(id).await
    }

    // ── Mutations ─────────────────────────────────────────────────

    /// Store the file and create the document at version 1 with the creator
    /// as administrator.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: NuevoDocumento,
        archivo: ArchivoSubido,
    ) -> AppResult<Documento> {
        let stored = self.guardar_archivo(&archivo).await?;

        let data = CreateDocumento {
            nombre: input.nombre,
            descripcion: input.descripcion,
            tipo: input.tipo.unwrap_or_default(),
            estado: input.estado.unwrap_or_default(),
            expediente_id: input.expediente_id,
            cliente_id: input.cliente_id,
            etiquetas: input.etiquetas,
            es_publico: input.es_publico,
            destacado: input.destacado,
            archivo: archivo.metadata(&stored),
            creado_por_id: ctx.user_id,
        };

        let documento = match self.persistir_nuevo(ctx, &data).await {
            Ok(documento) => documento,
            Err(e) => {
                self.descartar_archivo(&stored).await;
                return Err(e);
            }
        };

        self.encolar_indexado(&documento, &archivo, &stored);
        info!(
            user_id = %ctx.user_id,
            documento_id = %documento.id,
            nombre = %documento.nombre,
            "Documento creado"
        );
        Ok(documento)
    }

    async fn persistir_nuevo(
        &self,
        ctx: &RequestContext,
        data: &CreateDocumento,
    ) -> AppResult<Documento> {
        let mut tx = self.documentos.begin().await?;

        let documento = self.documentos.create(&mut *tx, data).await?;
        self.versiones
            .create(
                &mut *tx,
                &CreateVersion {
                    documento_id: documento.id,
                    numero_version: 1,
                    archivo: data.archivo.clone(),
                    descripcion_cambios: Some(DESCRIPCION_VERSION_INICIAL.to_string()),
                    creado_por_id: ctx.user_id,
                },
            )
            .await?;
        self.permisos
            .upsert(
                &mut *tx,
                documento.id,
                ctx.user_id,
                TipoPermiso::Administrador,
                ctx.user_id,
            )
            .await?;
        self.historial
            .create(
                &mut *tx,
                &self
                    .entrada(ctx, documento.id, TipoAccion::Creacion)
                    .detalles("Documento creado"),
            )
            .await?;

        DocumentoRepository::commit(tx).await?;
        Ok(documento)
    }

    /// Update metadata and, when a file is given, add a new version.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        actualizacion: ActualizacionDocumento,
        archivo: Option<ArchivoSubido>,
    ) -> AppResult<Documento> {
        let documento = self.cargar(id).await?;
        self.exigir(
            ctx,
            &documento,
            Acceso::Escritura,
            "No tienes permiso para modificar este documento",
        )
        .await?;

        let nuevo_archivo = match archivo {
            Some(archivo) => {
                let stored = self.guardar_archivo(&archivo).await?;
                Some((archivo, stored))
            }
            None => None,
        };

        let resultado = self
            .persistir_actualizacion(
                ctx,
                id,
                &actualizacion,
                nuevo_archivo.as_ref().map(|(a, s)| (a, s)),
            )
            .await;

        match (resultado, nuevo_archivo) {
            (Ok(actualizado), Some((archivo, stored))) => {
                self.encolar_indexado(&actualizado, &archivo, &stored);
                info!(
                    user_id = %ctx.user_id,
                    documento_id = %id,
                    version = actualizado.version_actual,
                    "Nueva versión de documento"
                );
                Ok(actualizado)
            }
            (Ok(actualizado), None) => {
                info!(user_id = %ctx.user_id, documento_id = %id, "Documento modificado");
                Ok(actualizado)
            }
            (Err(e), Some((_, stored))) => {
                self.descartar_archivo(&stored).await;
                Err(e)
            }
            (Err(e), None) => Err(e),
        }
    }

    async fn persistir_actualizacion(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        actualizacion: &ActualizacionDocumento,
        archivo: Option<(&ArchivoSubido, &StoredUpload)>,
    ) -> AppResult<Documento> {
        let mut tx = self.documentos.begin().await?;

        // Lock the row so concurrent uploads cannot claim the same version number.
        let actual = self
            .documentos
            .find_for_update(&mut *tx, id)
            .await?
            .ok_or_else(|| not_found(id))?;

        let mut actualizado = self
            .documentos
            .update_metadata(&mut *tx, id, &actualizacion.cambios, ctx.user_id)
            .await?;

        let entrada = match archivo {
            Some((archivo, stored)) => {
                let nueva_version = actual.version_actual + 1;
                let metadata = archivo.metadata(stored);

                self.versiones
                    .create(
                        &mut *tx,
                        &CreateVersion {
                            documento_id: id,
                            numero_version: nueva_version,
                            archivo: metadata.clone(),
                            descripcion_cambios: Some(
                                actualizacion
                                    .descripcion_cambios
                                    .clone()
                                    .unwrap_or_else(|| DESCRIPCION_ACTUALIZACION.to_string()),
                            ),
                            creado_por_id: ctx.user_id,
                        },
                    )
                    .await?;
                actualizado = self
                    .documentos
                    .replace_file(&mut *tx, id, &metadata, nueva_version, ctx.user_id)
                    .await?;

                self.entrada(ctx, id, TipoAccion::NuevaVersion)
                    .detalles(format!("Nueva versión {nueva_version} creada"))
                    .metadatos(json!({
                        "versionAnterior": actual.version_actual,
                        "nuevaVersion": nueva_version,
                    }))
            }
            None => self
                .entrada(ctx, id, TipoAccion::Modificacion)
                .detalles("Documento modificado")
                .metadatos(json!({ "cambios": actualizacion.cambios.changed_keys() })),
        };

        self.historial.create(&mut *tx, &entrada).await?;
        DocumentoRepository::commit(tx).await?;
        Ok(actualizado)
    }

    /// Hard-delete a document. Stored files stay on disk.
    pub async fn remove(&self, ctx: &RequestContext, id: Uuid) -> AppResult<DocumentoEliminado> {
        let documento = self.cargar(id).await?;
        self.exigir(
            ctx,
            &documento,
            Acceso::Administracion,
            "No tienes permiso para eliminar este documento",
        )
        .await?;

        let entrada = self
            .entrada(ctx, id, TipoAccion::Eliminacion)
            .detalles("Documento eliminado")
            .metadatos(json!({ "nombre": documento.nombre }));

        let mut tx = self.documentos.begin().await?;
        self.historial.create(&mut *tx, &entrada).await?;
        self.documentos.delete(&mut *tx, id).await?;
        DocumentoRepository::commit(tx).await?;

        info!(user_id = %ctx.user_id, documento_id = %id, "Documento eliminado");
        Ok(DocumentoEliminado { id, eliminado: true })
    }

    /// Move the document to another lifecycle state.
    pub async fn cambiar_estado(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        estado: EstadoDocumento,
    ) -> AppResult<Documento> {
        let documento = self.cargar(id).await?;
        self.exigir(
            ctx,
            &documento,
            Acceso::Escritura,
            "No tienes permiso para cambiar el estado de este documento",
        )
        .await?;

        let actualizado = self
            .documentos
            .update_estado(id, estado, ctx.user_id)
            .await?;
        self.registrar(
            self.entrada(ctx, id, TipoAccion::CambioEstado)
                .detalles(format!("Estado cambiado a: {estado}"))
                .metadatos(json!({
                    "estadoAnterior": documento.estado,
                    "nuevoEstado": estado,
                })),
        )
        .await?;

        info!(
            user_id = %ctx.user_id,
            documento_id = %id,
            anterior = %documento.estado,
            nuevo = %estado,
            "Estado de documento cambiado"
        );
        Ok(actualizado)
    }

    /// Set or clear the featured flag. Read access is enough.
    pub async fn toggle_destacado(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        destacado: bool,
    ) -> AppResult<Documento> {
        let documento = self.cargar(id).await?;
        self.exigir(
            ctx,
            &documento,
            Acceso::Lectura,
            "No tienes permiso para acceder a este documento",
        )
        .await?;

        let actualizado = self
            .documentos
            .set_destacado(id, destacado, ctx.user_id)
            .await?;
        let detalles = if destacado {
            "Documento marcado como destacado"
        } else {
            "Documento desmarcado como destacado"
        };
        self.registrar(
            self.entrada(ctx, id, TipoAccion::Modificacion)
                .detalles(detalles)
                .metadatos(json!({ "destacado": destacado })),
        )
        .await?;
        Ok(actualizado)
    }

    /// Grant or change a user's permission.
    pub async fn add_permission(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        usuario_id: Uuid,
        tipo_permiso: TipoPermiso,
    ) -> AppResult<DocumentoPermiso> {
        let documento = self.cargar(id).await?;
        self.exigir(
            ctx,
            &documento,
            Acceso::Administracion,
            "No tienes permiso para modificar los permisos de este documento",
        )
        .await?;
        validar_permiso_otorgado(&documento, usuario_id, tipo_permiso)?;

        if self.usuarios.find_by_id(usuario_id).await?.is_none() {
            return Err(AppError::not_found(format!(
                "Usuario con ID {usuario_id} no encontrado"
            )));
        }

        let permiso = self
            .permisos
            .upsert(self.permisos.pool(), id, usuario_id, tipo_permiso, ctx.user_id)
            .await?;
        self.registrar(
            self.entrada(ctx, id, TipoAccion::CambioPermisos)
                .detalles(format!(
                    "Permiso {tipo_permiso} otorgado a usuario {usuario_id}"
                ))
                .metadatos(json!({
                    "usuarioId": usuario_id,
                    "tipoPermiso": tipo_permiso,
                })),
        )
        .await?;

        info!(
            user_id = %ctx.user_id,
            documento_id = %id,
            usuario_id = %usuario_id,
            tipo = %tipo_permiso,
            "Permiso otorgado"
        );
        Ok(permiso)
    }

    /// Revoke a user's permission. The creator's row is protected.
    pub async fn remove_permission(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        usuario_id: Uuid,
    ) -> AppResult<PermisoEliminado> {
        let documento = self.cargar(id).await?;
        self.exigir(
            ctx,
            &documento,
            Acceso::Administracion,
            "No tienes permiso para modificar los permisos de este documento",
        )
        .await?;

        if documento.is_owner(usuario_id) {
            return Err(AppError::validation(
                "No se puede eliminar el permiso del propietario del documento",
            ));
        }

        if !self.permisos.delete(id, usuario_id).await? {
            return Err(AppError::not_found(format!(
                "No existe permiso para el usuario con ID {usuario_id}"
            )));
        }

        self.registrar(
            self.entrada(ctx, id, TipoAccion::CambioPermisos)
                .detalles(format!("Permiso eliminado para usuario {usuario_id}"))
                .metadatos(json!({ "usuarioId": usuario_id })),
        )
        .await?;

        info!(
            user_id = %ctx.user_id,
            documento_id = %id,
            usuario_id = %usuario_id,
            "Permiso eliminado"
        );
        Ok(PermisoEliminado { eliminado: true })
    }
}
