//! Task handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use doctajus_entity::tarea::Tarea;

use crate::dto::tarea::{CreateTareaRequest, TareaQueryParams, UpdateTareaRequest};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson, ValidatedQuery, parse_uuid};
use crate::state::AppState;

/// POST /api/tareas
pub async fn create_tarea(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateTareaRequest>,
) -> ApiResult<(StatusCode, Json<Tarea>)> {
    let tarea = state.tarea_service.create(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(tarea)))
}

/// GET /api/tareas
pub async fn list_tareas(
    State(state): State<AppState>,
    _auth: AuthUser,
    ValidatedQuery(query): ValidatedQuery<TareaQueryParams>,
) -> ApiResult<Json<Vec<Tarea>>> {
    Ok(Json(state.tarea_service.find_all(query.into()).await?))
}

/// GET /api/tareas/{id}
pub async fn get_tarea(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Tarea>> {
    let id = parse_uuid(&id)?;
    Ok(Json(state.tarea_service.find_one(id).await?))
}

/// PATCH /api/tareas/{id}
pub async fn update_tarea(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateTareaRequest>,
) -> ApiResult<Json<Tarea>> {
    let id = parse_uuid(&id)?;
    Ok(Json(state.tarea_service.update(&auth, id, req.into()).await?))
}

/// PATCH /api/tareas/{id}/completar
pub async fn completar_tarea(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Tarea>> {
    let id = parse_uuid(&id)?;
    Ok(Json(state.tarea_service.completar(&auth, id).await?))
}

/// DELETE /api/tareas/{id}
pub async fn delete_tarea(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_uuid(&id)?;
    state.tarea_service.remove(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
