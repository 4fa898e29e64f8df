// src/services/entidade_service.rs

use crate::{
    common::error::AppError,
    models::entidade::Entidade,
    services::{logged, ApiClient},
};

// Fonte do seletor de entidade (tenant)
#[derive(Clone)]
pub struct EntidadeService {
    api: ApiClient,
}

impl EntidadeService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Entidade>, AppError> {
        self.api
            .get("/entidade")
            .await
            .map_err(logged("listar entidades"))
    }
}
