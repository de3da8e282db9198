//! Case file management.

pub mod service;

pub use service::ExpedienteService;
