//! # doctajus-service
//!
//! Business logic service layer for DocTajus. Each service orchestrates
//! repositories, upload storage, authentication and the indexing queue to
//! implement application-level use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod auth;
pub mod context;
pub mod documento;
pub mod expediente;
pub mod tarea;
pub mod user;

pub use auth::{AuthService, AuthSession};
pub use context::RequestContext;
pub use documento::DocumentoService;
pub use expediente::ExpedienteService;
pub use tarea::TareaService;
pub use user::UserService;
