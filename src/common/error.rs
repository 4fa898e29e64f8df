// src/common/error.rs

use serde_json::Value;
use thiserror::Error;

// Nosso tipo de erro do lado do cliente, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // O login tem timeout fixo; o abort vira este erro
    #[error("A requisição excedeu o tempo limite")]
    Timeout,

    #[error("Servidor recusou a conexão: {0}")]
    ConnectionRefused(String),

    #[error("Erro de rede: {0}")]
    NetworkError(#[from] reqwest::Error),

    // Qualquer resposta fora de 2xx do backend
    #[error("Erro HTTP {status}: {body}")]
    Http { status: u16, body: Value },

    #[error("CEP inválido")]
    InvalidCep,

    #[error("CEP não encontrado")]
    CepNotFound,

    #[error("Usuário não autenticado")]
    NotAuthenticated,

    #[error("Já existe um envio em andamento")]
    AlreadySubmitting,

    #[error("Registro não encontrado: {0}")]
    NotFound(String),

    #[error("Erro de serialização: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Erro de armazenamento: {0}")]
    StorageError(#[from] std::io::Error),
}

impl AppError {
    /// Texto curto para a notificação mostrada ao usuário.
    pub fn user_message(&self) -> String {
        match self {
            AppError::ValidationError(errors) => {
                // Mostra a primeira mensagem que o validator nos deu
                errors
                    .field_errors()
                    .values()
                    .flat_map(|errs| errs.iter())
                    .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| "Um ou mais campos são inválidos.".to_string())
            }
            AppError::Timeout => {
                "O servidor demorou demais para responder. Tente novamente.".to_string()
            }
            AppError::ConnectionRefused(_) => {
                "Não foi possível conectar ao servidor. Verifique se ele está no ar.".to_string()
            }
            AppError::Http { status: 401, .. } => "E-mail ou senha inválidos.".to_string(),
            AppError::Http { body, .. } => body
                .get("message")
                .or_else(|| body.get("error"))
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| "Ocorreu um erro inesperado.".to_string()),
            AppError::InvalidCep => "Informe um CEP com 8 dígitos.".to_string(),
            AppError::CepNotFound => "CEP não encontrado.".to_string(),
            AppError::NotAuthenticated => "Sua sessão expirou. Faça login novamente.".to_string(),
            AppError::AlreadySubmitting => "Aguarde o envio em andamento.".to_string(),
            AppError::NotFound(what) => format!("{} não encontrado.", what),
            e => {
                tracing::error!("Erro inesperado: {}", e);
                "Ocorreu um erro inesperado.".to_string()
            }
        }
    }
}

// Helper para criar erro de validação de um único campo
pub fn validation_error(field: &'static str, message: &str) -> AppError {
    let mut errors = validator::ValidationErrors::new();
    let mut err = validator::ValidationError::new("required");
    err.message = Some(message.to_string().into());
    errors.add(field, err);
    AppError::ValidationError(errors)
}

pub type AppResult<T> = Result<T, AppError>;
