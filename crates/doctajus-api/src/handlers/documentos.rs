//! Document handlers: CRUD over multipart, downloads, versions,
//! permissions, history, status and featured flag.

use axum::Json;
use axum::extract::multipart::Field;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use bytes::BytesMut;

use doctajus_core::error::AppError;
use doctajus_core::result::AppResult;
use doctajus_entity::documento::{
    DescargaArchivo, Documento, DocumentoHistorial, DocumentoPermiso, DocumentoVersion,
};
use doctajus_service::documento::{ArchivoSubido, DocumentoEliminado, PermisoEliminado};

use crate::dto::documento::{
    DestacadoRequest, DocumentoForm, DocumentoQuery, EstadoRequest, PermisoRequest,
};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, QueryParams, ValidatedJson, parse_uuid};
use crate::state::AppState;

/// Multipart field carrying the file.
const FILE_FIELD: &str = "archivo";

fn multipart_error(e: impl std::fmt::Display) -> AppError {
    AppError::validation(format!("Invalid multipart body: {e}"))
}

fn too_large(max_bytes: u64) -> AppError {
    AppError::validation(format!(
        "El archivo es demasiado grande. El tamaño máximo permitido es {} MB.",
        max_bytes / (1024 * 1024)
    ))
}

/// Read the file part chunk by chunk, failing as soon as it passes the limit.
async fn read_file(mut field: Field<'_>, max_bytes: u64) -> AppResult<ArchivoSubido> {
    let nombre = field
        .file_name()
        .map(String::from)
        .unwrap_or_else(|| FILE_FIELD.to_string());
    let mime_type = field.content_type().map(String::from);

    let mut data = BytesMut::new();
    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        if (data.len() + chunk.len()) as u64 > max_bytes {
            return Err(too_large(max_bytes));
        }
        data.extend_from_slice(&chunk);
    }

    Ok(ArchivoSubido {
        nombre,
        mime_type,
        data: data.freeze(),
    })
}

/// Split a document form into its metadata and the optional file.
async fn read_form(
    mut multipart: Multipart,
    max_bytes: u64,
) -> AppResult<(DocumentoForm, Option<ArchivoSubido>)> {
    let mut form = DocumentoForm::default();
    let mut archivo = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        if name == FILE_FIELD {
            archivo = Some(read_file(field, max_bytes).await?);
        } else {
            let value = field.text().await.map_err(multipart_error)?;
            form.set_field(&name, &value)?;
        }
    }

    Ok((form, archivo))
}

/// GET /api/documentos
pub async fn list_documentos(
    State(state): State<AppState>,
    auth: AuthUser,
    QueryParams(query): QueryParams<DocumentoQuery>,
) -> ApiResult<Json<Vec<Documento>>> {
    let filter = query.into_filter()?;
    let documentos = state
        .documento_service
        .find_all(&filter, Some(auth.user_id))
        .await?;
    Ok(Json(documentos))
}

/// GET /api/documentos/{id}
pub async fn get_documento(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Documento>> {
    let id = parse_uuid(&id)?;
    Ok(Json(state.documento_service.find_one(&auth, id).await?))
}

/// POST /api/documentos (multipart)
pub async fn create_documento(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Multipart,
) -> ApiResult<(StatusCode, Json<Documento>)> {
    let (form, archivo) = read_form(multipart, state.config.storage.max_upload_size_bytes).await?;
    let archivo =
        archivo.ok_or_else(|| AppError::validation("Se requiere un archivo para crear el documento"))?;
    let nuevo = form.into_nuevo()?;

    let documento = state
        .documento_service
        .create(&auth, nuevo, archivo)
        .await?;
    Ok((StatusCode::CREATED, Json(documento)))
}

/// PATCH /api/documentos/{id} (multipart, file optional)
pub async fn update_documento(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    multipart: Multipart,
) -> ApiResult<Json<Documento>> {
    let id = parse_uuid(&id)?;
    let (form, archivo) = read_form(multipart, state.config.storage.max_upload_size_bytes).await?;

    let documento = state
        .documento_service
        .update(&auth, id, form.into_actualizacion(), archivo)
        .await?;
    Ok(Json(documento))
}

/// DELETE /api/documentos/{id}
pub async fn delete_documento(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<DocumentoEliminado>> {
    let id = parse_uuid(&id)?;
    Ok(Json(state.documento_service.remove(&auth, id).await?))
}

/// GET /api/documentos/{id}/download
pub async fn download_documento(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<DescargaArchivo>> {
    let id = parse_uuid(&id)?;
    Ok(Json(state.documento_service.download(&auth, id).await?))
}

/// GET /api/documentos/{id}/versions
pub async fn list_versions(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<DocumentoVersion>>> {
    let id = parse_uuid(&id)?;
    Ok(Json(state.documento_service.versions(&auth, id).await?))
}

/// GET /api/documentos/{id}/versions/{versionId}
pub async fn get_version_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, version_id)): Path<(String, String)>,
) -> ApiResult<Json<DescargaArchivo>> {
    let id = parse_uuid(&id)?;
    let version_id = parse_uuid(&version_id)?;
    Ok(Json(
        state
            .documento_service
            .version_file(&auth, id, version_id)
            .await?,
    ))
}

/// GET /api/documentos/{id}/permissions
pub async fn list_permissions(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<DocumentoPermiso>>> {
    let id = parse_uuid(&id)?;
    Ok(Json(state.documento_service.permissions(&auth, id).await?))
}

/// POST /api/documentos/{id}/permissions
pub async fn add_permission(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<PermisoRequest>,
) -> ApiResult<(StatusCode, Json<DocumentoPermiso>)> {
    let id = parse_uuid(&id)?;
    let permiso = state
        .documento_service
        .add_permission(&auth, id, req.usuario_id, req.tipo_permiso)
        .await?;
    Ok((StatusCode::CREATED, Json(permiso)))
}

/// DELETE /api/documentos/{id}/permissions/{usuarioId}
pub async fn remove_permission(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, usuario_id)): Path<(String, String)>,
) -> ApiResult<Json<PermisoEliminado>> {
    let id = parse_uuid(&id)?;
    let usuario_id = parse_uuid(&usuario_id)?;
    Ok(Json(
        state
            .documento_service
            .remove_permission(&auth, id, usuario_id)
            .await?,
    ))
}

/// GET /api/documentos/{id}/history
pub async fn get_history(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<DocumentoHistorial>>> {
    let id = parse_uuid(&id)?;
    Ok(Json(state.documento_service.history(&auth, id).await?))
}

/// PATCH /api/documentos/{id}/estado
pub async fn cambiar_estado(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<EstadoRequest>,
) -> ApiResult<Json<Documento>> {
    let id = parse_uuid(&id)?;
    Ok(Json(
        state
            .documento_service
            .cambiar_estado(&auth, id, req.estado)
            .await?,
    ))
}

/// PATCH /api/documentos/{id}/destacado
pub async fn toggle_destacado(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<DestacadoRequest>,
) -> ApiResult<Json<Documento>> {
    let id = parse_uuid(&id)?;
    Ok(Json(
        state
            .documento_service
            .toggle_destacado(&auth, id, req.destacado)
            .await?,
    ))
}
