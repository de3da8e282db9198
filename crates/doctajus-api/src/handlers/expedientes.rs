//! Case file handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use doctajus_entity::expediente::Expediente;

use crate::dto::expediente::{CreateExpedienteRequest, ExpedienteQuery, UpdateExpedienteRequest};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, QueryParams, ValidatedJson, parse_uuid};
use crate::state::AppState;

/// POST /api/expedientes
pub async fn create_expediente(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateExpedienteRequest>,
) -> ApiResult<(StatusCode, Json<Expediente>)> {
    let expediente = state.expediente_service.create(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(expediente)))
}

/// GET /api/expedientes?abogadoId=..&clienteId=..
pub async fn list_expedientes(
    State(state): State<AppState>,
    _auth: AuthUser,
    QueryParams(query): QueryParams<ExpedienteQuery>,
) -> ApiResult<Json<Vec<Expediente>>> {
    Ok(Json(state.expediente_service.find_all(query.into()).await?))
}

/// GET /api/expedientes/{id}
pub async fn get_expediente(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Expediente>> {
    let id = parse_uuid(&id)?;
    Ok(Json(state.expediente_service.find_one(id).await?))
}

/// PATCH /api/expedientes/{id}
pub async fn update_expediente(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateExpedienteRequest>,
) -> ApiResult<Json<Expediente>> {
    let id = parse_uuid(&id)?;
    Ok(Json(
        state.expediente_service.update(&auth, id, req.into()).await?,
    ))
}

/// DELETE /api/expedientes/{id}
pub async fn delete_expediente(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_uuid(&id)?;
    state.expediente_service.remove(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
