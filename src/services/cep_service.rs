// src/services/cep_service.rs

use async_trait::async_trait;
use reqwest::Client;

use crate::{
    common::{
        error::{AppError, AppResult},
        mask::only_digits,
    },
    models::cep::{CepAddress, ViaCepResponse},
    services::api_client::map_send_error,
};

pub const VIACEP_URL: &str = "https://viacep.com.br/ws";

/// Consulta de endereço por CEP. `Ok(None)` quando o CEP não existe.
#[async_trait]
pub trait CepLookup: Send + Sync {
    async fn lookup(&self, cep: &str) -> AppResult<Option<CepAddress>>;
}

// Cliente do serviço público ViaCEP (somente leitura, sem token)
#[derive(Debug, Clone)]
pub struct ViaCepClient {
    client: Client,
    base_url: String,
}

impl ViaCepClient {
    pub fn new(base_url: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            client: Client::builder().build()?,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl CepLookup for ViaCepClient {
    async fn lookup(&self, cep: &str) -> AppResult<Option<CepAddress>> {
        let digits = only_digits(cep);
        if digits.len() != 8 {
            return Err(AppError::InvalidCep);
        }

        let url = format!("{}/{}/json/", self.base_url.trim_end_matches('/'), digits);
        let response = self.client.get(&url).send().await.map_err(map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::Http {
                status: status.as_u16(),
                body: serde_json::Value::String(text),
            });
        }

        let body: ViaCepResponse = response.json().await?;
        if body.is_not_found() {
            tracing::warn!("CEP {} não encontrado no ViaCEP", digits);
            return Ok(None);
        }

        Ok(Some(body.into()))
    }
}
