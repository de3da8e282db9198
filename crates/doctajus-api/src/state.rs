//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use doctajus_auth::jwt::JwtDecoder;
use doctajus_core::config::AppConfig;
use doctajus_service::{
    AuthService, DocumentoService, ExpedienteService, TareaService, UserService,
};
use doctajus_storage::UploadStore;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool
    pub db_pool: PgPool,
    /// Upload storage, also used to serve `/api/uploads`
    pub uploads: UploadStore,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<UserService>,
    pub expediente_service: Arc<ExpedienteService>,
    pub tarea_service: Arc<TareaService>,
    pub documento_service: Arc<DocumentoService>,
}
