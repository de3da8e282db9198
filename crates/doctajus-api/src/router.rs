//! Route definitions for the DocTajus HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, patch, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Room for multipart boundaries and metadata fields on top of the file.
const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let body_limit = usize::try_from(state.config.storage.max_upload_size_bytes)
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(expediente_routes())
        .merge(tarea_routes())
        .merge(documento_routes())
        .merge(upload_routes())
        .merge(health_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Auth endpoints: login, register, profile
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/profile", get(handlers::auth::profile))
}

/// User management
fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            get(handlers::users::list_users).post(handlers::users::create_user),
        )
        .route(
            "/users/{id}",
            get(handlers::users::get_user)
                .patch(handlers::users::update_user)
                .delete(handlers::users::delete_user),
        )
}

/// Case files
fn expediente_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/expedientes",
            get(handlers::expedientes::list_expedientes)
                .post(handlers::expedientes::create_expediente),
        )
        .route(
            "/expedientes/{id}",
            get(handlers::expedientes::get_expediente)
                .patch(handlers::expedientes::update_expediente)
                .delete(handlers::expedientes::delete_expediente),
        )
}

/// Tasks
fn tarea_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/tareas",
            get(handlers::tareas::list_tareas).post(handlers::tareas::create_tarea),
        )
        .route(
            "/tareas/{id}",
            get(handlers::tareas::get_tarea)
                .patch(handlers::tareas::update_tarea)
                .delete(handlers::tareas::delete_tarea),
        )
        .route(
            "/tareas/{id}/completar",
            patch(handlers::tareas::completar_tarea),
        )
}

/// Documents, versions, permissions and history
fn documento_routes() -> Router<AppState> {
    use handlers::documentos as d;

    Router::new()
        .route(
            "/documentos",
            get(d::list_documentos).post(d::create_documento),
        )
        .route(
            "/documentos/{id}",
            get(d::get_documento)
                .patch(d::update_documento)
                .delete(d::delete_documento),
        )
        .route("/documentos/{id}/download", get(d::download_documento))
        .route("/documentos/{id}/versions", get(d::list_versions))
        .route(
            "/documentos/{id}/versions/{version_id}",
            get(d::get_version_file),
        )
        .route(
            "/documentos/{id}/permissions",
            get(d::list_permissions).post(d::add_permission),
        )
        .route(
            "/documentos/{id}/permissions/{usuario_id}",
            axum::routing::delete(d::remove_permission),
        )
        .route("/documentos/{id}/history", get(d::get_history))
        .route("/documentos/{id}/estado", patch(d::cambiar_estado))
        .route("/documentos/{id}/destacado", patch(d::toggle_destacado))
}

/// Public static files
fn upload_routes() -> Router<AppState> {
    Router::new()
        .route("/uploads/{filename}", get(handlers::uploads::serve_root))
        .route(
            "/uploads/{folder}/{filename}",
            get(handlers::uploads::serve_in_folder),
        )
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
