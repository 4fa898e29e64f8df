// src/services/auth.rs

use std::time::Duration;

use crate::{
    common::error::AppError,
    models::auth::{ChangePasswordPayload, LoginResponse, LoginUserPayload},
    services::{logged, ApiClient},
};

#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
    login_timeout: Duration,
}

impl AuthService {
    pub fn new(api: ApiClient, login_timeout: Duration) -> Self {
        Self { api, login_timeout }
    }

    /// POST /login. Única chamada com timeout: se estourar vira `AppError::Timeout`.
    pub async fn login_user(&self, payload: &LoginUserPayload) -> Result<LoginResponse, AppError> {
        let response: LoginResponse = self
            .api
            .post_with_timeout("/login", payload, self.login_timeout)
            .await
            .map_err(logged("fazer login"))?;

        if response.must_change_password {
            tracing::info!("🔑 Troca de senha obrigatória para {}", payload.email);
        }
        Ok(response)
    }

    // POST /login/change-password
    pub async fn change_password(&self, payload: &ChangePasswordPayload) -> Result<(), AppError> {
        self.api
            .post::<serde_json::Value, _>("/login/change-password", payload)
            .await
            .map_err(logged("trocar a senha"))?;
        Ok(())
    }
}
