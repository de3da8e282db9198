//! User management handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use doctajus_entity::user::User;

use crate::dto::user::{CreateUserRequest, UpdateUserRequest};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson, parse_uuid};
use crate::state::AppState;

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let user = state.user_service.create(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/users
pub async fn list_users(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<Vec<User>>> {
    Ok(Json(state.user_service.find_all(&auth).await?))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<User>> {
    let id = parse_uuid(&id)?;
    Ok(Json(state.user_service.find_one(id).await?))
}

/// PATCH /api/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<User>> {
    let id = parse_uuid(&id)?;
    Ok(Json(state.user_service.update(&auth, id, req.into()).await?))
}

/// DELETE /api/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_uuid(&id)?;
    state.user_service.remove(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
