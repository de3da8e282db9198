//! Case file bodies and listing query.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use doctajus_entity::expediente::{
    CreateExpediente, EstadoExpediente, ExpedienteFilter, TipoExpediente, UpdateExpediente,
};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpedienteRequest {
    #[validate(length(min = 3, max = 100))]
    pub numero: String,
    #[validate(length(min = 5, max = 200))]
    pub titulo: String,
    pub descripcion: Option<String>,
    pub estado: Option<EstadoExpediente>,
    pub tipo: Option<TipoExpediente>,
    pub fecha_inicio: Option<NaiveDate>,
    pub fecha_vencimiento: Option<NaiveDate>,
    pub tribunal: Option<String>,
    pub numero_juzgado: Option<String>,
    pub jurisdiccion: Option<String>,
    pub contraparte: Option<String>,
    #[validate(range(min = 0.0))]
    pub valor_pretension: Option<f64>,
    #[validate(range(min = 0.0))]
    pub honorarios: Option<f64>,
    pub es_privado: Option<bool>,
    pub abogado_id: Option<Uuid>,
    pub cliente_id: Option<Uuid>,
}

impl From<CreateExpedienteRequest> for CreateExpediente {
    fn from(req: CreateExpedienteRequest) -> Self {
        Self {
            numero: req.numero,
            titulo: req.titulo,
            descripcion: req.descripcion,
            estado: req.estado.unwrap_or_default(),
            tipo: req.tipo.unwrap_or_default(),
            tribunal: req.tribunal,
            numero_juzgado: req.numero_juzgado,
            jurisdiccion: req.jurisdiccion,
            fecha_inicio: req.fecha_inicio,
            fecha_vencimiento: req.fecha_vencimiento,
            contraparte: req.contraparte,
            valor_pretension: req.valor_pretension,
            honorarios: req.honorarios,
            es_privado: req.es_privado.unwrap_or(false),
            abogado_id: req.abogado_id,
            cliente_id: req.cliente_id,
        }
    }
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExpedienteRequest {
    #[validate(length(min = 3, max = 100))]
    pub numero: Option<String>,
    #[validate(length(min = 5, max = 200))]
    pub titulo: Option<String>,
    pub descripcion: Option<String>,
    pub estado: Option<EstadoExpediente>,
    pub tipo: Option<TipoExpediente>,
    pub fecha_inicio: Option<NaiveDate>,
    pub fecha_vencimiento: Option<NaiveDate>,
    pub tribunal: Option<String>,
    pub numero_juzgado: Option<String>,
    pub jurisdiccion: Option<String>,
    pub contraparte: Option<String>,
    #[validate(range(min = 0.0))]
    pub valor_pretension: Option<f64>,
    #[validate(range(min = 0.0))]
    pub honorarios: Option<f64>,
    pub es_privado: Option<bool>,
    pub abogado_id: Option<Uuid>,
    pub cliente_id: Option<Uuid>,
}

impl From<UpdateExpedienteRequest> for UpdateExpediente {
    fn from(req: UpdateExpedienteRequest) -> Self {
        Self {
            numero: req.numero,
            titulo: req.titulo,
            descripcion: req.descripcion,
            estado: req.estado,
            tipo: req.tipo,
            tribunal: req.tribunal,
            numero_juzgado: req.numero_juzgado,
            jurisdiccion: req.jurisdiccion,
            fecha_inicio: req.fecha_inicio,
            fecha_vencimiento: req.fecha_vencimiento,
            contraparte: req.contraparte,
            valor_pretension: req.valor_pretension,
            honorarios: req.honorarios,
            es_privado: req.es_privado,
            abogado_id: req.abogado_id,
            cliente_id: req.cliente_id,
        }
    }
}

/// `GET /expedientes` query.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpedienteQuery {
    pub abogado_id: Option<Uuid>,
    pub cliente_id: Option<Uuid>,
}

impl From<ExpedienteQuery> for ExpedienteFilter {
    fn from(q: ExpedienteQuery) -> Self {
        Self {
            abogado_id: q.abogado_id,
            cliente_id: q.cliente_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_defaults() {
        let req: CreateExpedienteRequest = serde_json::from_value(serde_json::json!({
            "numero": "EXP-2024-001",
            "titulo": "Desalojo por ocupación precaria",
            "fechaInicio": "2024-03-01",
        }))
        .unwrap();
        assert!(req.validate().is_ok());

        let data = CreateExpediente::from(req);
        assert_eq!(data.estado, EstadoExpediente::Nuevo);
        assert_eq!(data.tipo, TipoExpediente::Otro);
        assert!(!data.es_privado);
        assert_eq!(data.fecha_inicio, NaiveDate::from_ymd_opt(2024, 3, 1));
    }

    #[test]
    fn test_title_too_short() {
        let req: CreateExpedienteRequest = serde_json::from_value(serde_json::json!({
            "numero": "E-1",
            "titulo": "Caso",
        }))
        .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_negative_fees_rejected() {
        let req: UpdateExpedienteRequest =
            serde_json::from_value(serde_json::json!({ "honorarios": -1.0 })).unwrap();
        assert!(req.validate().is_err());
    }
}
