//! # doctajus-entity
//!
//! Domain entity models for DocTajus. Every struct in this crate
//! represents a database table row or a domain value object. Row types
//! derive `sqlx::FromRow` and serialize with camelCase field names, which
//! is the shape the HTTP API exposes.

#[macro_use]
mod macros;

pub mod documento;
pub mod expediente;
pub mod tarea;
pub mod user;
