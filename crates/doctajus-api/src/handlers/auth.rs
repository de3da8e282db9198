//! Auth handlers: login, register, profile.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use doctajus_entity::user::User;
use doctajus_service::AuthSession;

use crate::dto::auth::{LoginRequest, RegisterRequest};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<AuthSession>> {
    let session = state.auth_service.login(&req.email, &req.password).await?;
    Ok(Json(session))
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthSession>)> {
    let session = state.auth_service.register(req.into()).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// GET /api/auth/profile
pub async fn profile(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<User>> {
    let user = state.auth_service.profile(&auth).await?;
    Ok(Json(user))
}
