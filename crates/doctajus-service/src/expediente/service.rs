//! Expediente CRUD.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use doctajus_core::error::AppError;
use doctajus_core::result::AppResult;
use doctajus_database::repositories::expediente::ExpedienteRepository;
use doctajus_entity::expediente::{
    CreateExpediente, Expediente, ExpedienteFilter, UpdateExpediente,
};

use crate::context::RequestContext;

fn not_found(id: Uuid) -> AppError {
    AppError::not_found(format!("Expediente with ID \"{id}\" not found"))
}

/// Handles case file operations.
#[derive(Debug, Clone)]
pub struct ExpedienteService {
    repo: Arc<ExpedienteRepository>,
}

impl ExpedienteService {
    pub fn new(repo: Arc<ExpedienteRepository>) -> Self {
        Self { repo }
    }

    pub async fn create(
        &self,
        ctx: &RequestContext,
        data: CreateExpediente,
    ) -> AppResult<Expediente> {
        let expediente = self.repo.create(&data).await?;
        info!(
            user_id = %ctx.user_id,
            expediente_id = %expediente.id,
            numero = %expediente.numero,
            "Expediente created"
        );
        Ok(expediente)
    }

    /// List cases, optionally narrowed to a lawyer or a client.
    pub async fn find_all(&self, filter: ExpedienteFilter) -> AppResult<Vec<Expediente>> {
        self.repo.find_all(&filter).await
    }

    pub async fn find_one(&self, id: Uuid) -> AppResult<Expediente> {
        self.repo.find_by_id(id).await?.ok_or_else(|| not_found(id))
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        data: UpdateExpediente,
    ) -> AppResult<Expediente> {
        let expediente = self
            .repo
            .update(id, &data)
            .await?
            .ok_or_else(|| not_found(id))?;
        info!(user_id = %ctx.user_id, expediente_id = %id, "Expediente updated");
        Ok(expediente)
    }

    pub async fn remove(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        if !self.repo.delete(id).await? {
            return Err(not_found(id));
        }
        info!(user_id = %ctx.user_id, expediente_id = %id, "Expediente deleted");
        Ok(())
    }
}
