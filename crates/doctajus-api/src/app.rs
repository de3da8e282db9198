//! Application wiring: repositories, auth components and services into an
//! [`AppState`].

use std::sync::Arc;

use sqlx::PgPool;

use doctajus_auth::jwt::{JwtDecoder, JwtEncoder};
use doctajus_auth::password::{PasswordHasher, PasswordValidator};
use doctajus_core::config::AppConfig;
use doctajus_database::repositories::{
    documento, expediente, historial, permiso, tarea, user, version,
};
use doctajus_service::{
    AuthService, DocumentoService, ExpedienteService, TareaService, UserService,
};
use doctajus_storage::UploadStore;
use doctajus_worker::IndexQueue;

use crate::state::AppState;

/// Build the shared state from its infrastructure pieces.
///
/// The pool may be lazily connected; nothing here touches the database.
pub fn build_state(
    config: AppConfig,
    db_pool: PgPool,
    uploads: UploadStore,
    index_queue: IndexQueue,
) -> AppState {
    // ── Repositories ─────────────────────────────────────────────
    let user_repo = Arc::new(user::UserRepository::new(db_pool.clone()));
    let expediente_repo = Arc::new(expediente::ExpedienteRepository::new(db_pool.clone()));
    let tarea_repo = Arc::new(tarea::TareaRepository::new(db_pool.clone()));
    let documento_repo = Arc::new(documento::DocumentoRepository::new(db_pool.clone()));
    let version_repo = Arc::new(version::VersionRepository::new(db_pool.clone()));
    let permiso_repo = Arc::new(permiso::PermisoRepository::new(db_pool.clone()));
    let historial_repo = Arc::new(historial::HistorialRepository::new(db_pool.clone()));

    // ── Auth ─────────────────────────────────────────────────────
    let password_hasher = Arc::new(PasswordHasher::new());
    let password_validator = Arc::new(PasswordValidator::new(&config.auth));
    let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

    // ── Services ─────────────────────────────────────────────────
    let user_service = Arc::new(UserService::new(
        Arc::clone(&user_repo),
        password_hasher,
        password_validator,
    ));
    let auth_service = Arc::new(AuthService::new(Arc::clone(&user_service), jwt_encoder));
    let expediente_service = Arc::new(ExpedienteService::new(expediente_repo));
    let tarea_service = Arc::new(TareaService::new(tarea_repo));
    let documento_service = Arc::new(DocumentoService::new(
        documento_repo,
        version_repo,
        permiso_repo,
        historial_repo,
        user_repo,
        uploads.clone(),
        index_queue,
        config.storage.documents_folder.clone(),
    ));

    AppState {
        config: Arc::new(config),
        db_pool,
        uploads,
        jwt_decoder,
        auth_service,
        user_service,
        expediente_service,
        tarea_service,
        documento_service,
    }
}
