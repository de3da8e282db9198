//! Task ("tarea") entities.

pub mod model;

pub use model::{CreateTarea, EstadoTarea, PrioridadTarea, Tarea, TareaFilter, UpdateTarea};
