//! Case file ("expediente") entities.

pub mod model;

pub use model::{
    CreateExpediente, EstadoExpediente, Expediente, ExpedienteFilter, TipoExpediente,
    UpdateExpediente,
};
