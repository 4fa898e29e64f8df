// src/models/auth.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::models::usuario::Usuario;

// Dados para login
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct LoginUserPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 1, message = "Informe a senha."))]
    pub senha: String,
}

// Resposta do POST /login
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(alias = "access_token", alias = "accessToken")]
    pub token: String,

    // O backend exige troca de senha no primeiro acesso
    #[serde(default, alias = "trocarSenha")]
    pub must_change_password: bool,

    #[serde(default)]
    pub usuario: Option<Usuario>,
}

// Dados para a troca obrigatória de senha
#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 1, message = "Informe a senha atual."))]
    pub senha_atual: String,
    #[validate(length(min = 6, message = "A nova senha deve ter no mínimo 6 caracteres."))]
    pub nova_senha: String,
}

// Estrutura de dados ("claims") dentro do JWT.
// Tudo opcional: o helper nunca falha por claim ausente.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenClaims {
    pub sub: Option<Value>,
    pub email: Option<String>,
    #[serde(alias = "entidade_id")]
    pub entidade_id: Option<i64>,
    pub exp: Option<i64>,
    pub iat: Option<i64>,
}

// Identidade guardada no armazenamento da sessão
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredUser {
    pub email: String,
    pub entidade_id: Option<i64>,
    pub usuario_id: Option<i64>,
}
