//! Task management.

pub mod service;

pub use service::{NuevaTarea, TareaQuery, TareaService};
