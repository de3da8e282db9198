//! Route handlers, one module per resource.

pub mod auth;
pub mod documentos;
pub mod expedientes;
pub mod health;
pub mod tareas;
pub mod uploads;
pub mod users;
