// src/services/cliente_service.rs

use crate::{
    common::error::AppError,
    forms::ClienteDraft,
    models::cliente::Cliente,
    services::{logged, ApiClient},
};

#[derive(Clone)]
pub struct ClienteService {
    api: ApiClient,
}

impl ClienteService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    // GET /cliente
    pub async fn list(&self) -> Result<Vec<Cliente>, AppError> {
        self.api.get("/cliente").await.map_err(logged("listar clientes"))
    }

    // GET /cliente/:id
    pub async fn get(&self, id: i64) -> Result<Cliente, AppError> {
        self.api
            .get(&format!("/cliente/{}", id))
            .await
            .map_err(logged("buscar cliente"))
    }

    // POST /cliente
    pub async fn create(&self, draft: &ClienteDraft) -> Result<Cliente, AppError> {
        let payload = draft.to_payload();
        let cliente: Cliente = self
            .api
            .post("/cliente", &payload)
            .await
            .map_err(logged("cadastrar cliente"))?;

        tracing::info!("✅ Cliente '{}' cadastrado", payload.pessoa.nome);
        Ok(cliente)
    }

    // PATCH /cliente/:id
    pub async fn update(&self, id: i64, draft: &ClienteDraft) -> Result<Cliente, AppError> {
        self.api
            .patch(&format!("/cliente/{}", id), &draft.to_payload())
            .await
            .map_err(logged("atualizar cliente"))
    }

    // DELETE /cliente/:id
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.api
            .delete(&format!("/cliente/{}", id))
            .await
            .map_err(logged("excluir cliente"))?;

        tracing::info!("🗑️ Cliente {} excluído", id);
        Ok(())
    }
}
