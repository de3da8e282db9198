//! # doctajus-api
//!
//! HTTP API layer for DocTajus built on Axum.
//!
//! Provides the REST endpoints under `/api`, the bearer-token extractor,
//! request DTOs with validation, CORS and request logging middleware, and
//! the mapping from [`AppError`](doctajus_core::AppError) to JSON error
//! responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_state;
pub use router::build_router;
pub use state::AppState;
