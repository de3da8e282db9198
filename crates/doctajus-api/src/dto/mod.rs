//! Request DTOs and the parsing of raw form and query values.

pub mod auth;
pub mod documento;
pub mod expediente;
pub mod parse;
pub mod tarea;
pub mod user;
