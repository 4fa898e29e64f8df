// src/services/usuario_service.rs

use crate::{
    common::error::AppError,
    forms::UsuarioDraft,
    models::usuario::{ReplicateUsuarioPayload, Usuario},
    services::{logged, ApiClient},
};

#[derive(Clone)]
pub struct UsuarioService {
    api: ApiClient,
}

impl UsuarioService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    // GET /usuario
    pub async fn list(&self) -> Result<Vec<Usuario>, AppError> {
        self.api.get("/usuario").await.map_err(logged("listar usuários"))
    }

    // GET /usuario/entidade/:id
    pub async fn list_by_entidade(&self, entidade_id: i64) -> Result<Vec<Usuario>, AppError> {
        self.api
            .get(&format!("/usuario/entidade/{}", entidade_id))
            .await
            .map_err(logged("listar usuários da entidade"))
    }

    // GET /usuario/:id
    pub async fn get(&self, id: i64) -> Result<Usuario, AppError> {
        self.api
            .get(&format!("/usuario/{}", id))
            .await
            .map_err(logged("buscar usuário"))
    }

    // POST /usuario
    pub async fn create(&self, draft: &UsuarioDraft, entidade_id: i64) -> Result<Usuario, AppError> {
        let payload = draft.to_payload(Some(entidade_id))?;
        let usuario: Usuario = self
            .api
            .post("/usuario", &payload)
            .await
            .map_err(logged("cadastrar usuário"))?;

        tracing::info!("✅ Usuário {} cadastrado na entidade {}", payload.email, entidade_id);
        Ok(usuario)
    }

    // PATCH /usuario/:id
    pub async fn update(&self, id: i64, draft: &UsuarioDraft, entidade_id: i64) -> Result<Usuario, AppError> {
        let payload = draft.to_payload(Some(entidade_id))?;
        self.api
            .patch(&format!("/usuario/{}", id), &payload)
            .await
            .map_err(logged("atualizar usuário"))
    }

    // DELETE /usuario/:id
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.api
            .delete(&format!("/usuario/{}", id))
            .await
            .map_err(logged("excluir usuário"))?;

        tracing::info!("🗑️ Usuário {} excluído", id);
        Ok(())
    }

    /// Usuários com o mesmo e-mail em outras entidades.
    // GET /usuario/email/:email/other-entities
    pub async fn find_in_other_entities(&self, email: &str) -> Result<Vec<Usuario>, AppError> {
        self.api
            .get(&format!(
                "/usuario/email/{}/other-entities",
                urlencoding::encode(email.trim())
            ))
            .await
            .map_err(logged("buscar e-mail em outras entidades"))
    }

    /// Vincula um usuário (e sua pessoa) já existente a mais uma entidade.
    // POST /usuario/:id/replicate
    pub async fn replicate(&self, id: i64, entidade_id: i64) -> Result<Usuario, AppError> {
        let usuario: Usuario = self
            .api
            .post(
                &format!("/usuario/{}/replicate", id),
                &ReplicateUsuarioPayload { entidade_id },
            )
            .await
            .map_err(logged("replicar usuário"))?;

        tracing::info!("🔁 Usuário {} replicado para a entidade {}", id, entidade_id);
        Ok(usuario)
    }
}
