// src/services/api_client.rs

use std::{sync::Arc, time::Duration};

use reqwest::{Client, Method, Response};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::{
    common::error::{AppError, AppResult},
    models::Envelope,
    storage::{session_store::TOKEN_KEY, SessionStore},
};

/// Ponto único de saída para o backend REST.
/// O token é lido do armazenamento a cada chamada, então login/logout
/// valem imediatamente para todos os serviços que compartilham o cliente.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    store: Arc<dyn SessionStore>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, store: Arc<dyn SessionStore>) -> AppResult<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            store,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        self.request(Method::GET, path, None).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> AppResult<T> {
        self.request(Method::POST, path, Some(serde_json::to_value(body)?)).await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> AppResult<T> {
        self.request(Method::PATCH, path, Some(serde_json::to_value(body)?)).await
    }

    pub async fn delete(&self, path: &str) -> AppResult<()> {
        // O corpo da resposta do DELETE não interessa
        self.request::<Value>(Method::DELETE, path, None).await?;
        Ok(())
    }

    /// POST que é abortado depois de `timeout` (usado no login).
    pub async fn post_with_timeout<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        timeout: Duration,
    ) -> AppResult<T> {
        let body = serde_json::to_value(body)?;
        tokio::time::timeout(timeout, self.request(Method::POST, path, Some(body)))
            .await
            .map_err(|_| {
                tracing::warn!("⏱️ POST {} abortado após {:?}", path, timeout);
                AppError::Timeout
            })?
    }

    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> AppResult<T> {
        let url = self.url(path);
        let mut request = self.client.request(method.clone(), &url);

        if let Some(token) = self.store.get(TOKEN_KEY) {
            request = request.bearer_auth(token);
        }
        if let Some(body) = &body {
            request = request.json(body);
        }

        tracing::debug!("{} {}", method, url);
        let response = request.send().await.map_err(map_send_error)?;
        handle_response(response).await
    }
}

// Distingue conexão recusada de timeout e de outros erros de rede
pub(crate) fn map_send_error(err: reqwest::Error) -> AppError {
    if err.is_connect() {
        AppError::ConnectionRefused(err.to_string())
    } else if err.is_timeout() {
        AppError::Timeout
    } else {
        AppError::NetworkError(err)
    }
}

async fn handle_response<T: DeserializeOwned>(response: Response) -> AppResult<T> {
    let status = response.status();
    let bytes = response.bytes().await?;

    if !status.is_success() {
        // Corpo de erro em JSON quando possível, texto cru caso contrário
        let body = serde_json::from_slice::<Value>(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        return Err(AppError::Http {
            status: status.as_u16(),
            body,
        });
    }

    // 204 / corpo vazio viram `null`
    let raw: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        &bytes
    };
    let envelope: Envelope<T> = serde_json::from_slice(raw)?;
    Ok(envelope.into_inner())
}
