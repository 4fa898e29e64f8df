// src/models/pessoa.rs

use serde::{Deserialize, Serialize};

// --- ENUMS ---

// "PF" (pessoa física) ou "PJ" (pessoa jurídica), como o backend espera
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum TipoPessoa {
    #[default]
    #[serde(rename = "PF")]
    Fisica,
    #[serde(rename = "PJ")]
    Juridica,
}

impl TipoPessoa {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoPessoa::Fisica => "PF",
            TipoPessoa::Juridica => "PJ",
        }
    }

    // Razão social e inscrições só existem para PJ
    pub fn shows_company_fields(&self) -> bool {
        matches!(self, TipoPessoa::Juridica)
    }
}

// --- PESSOA ---

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Pessoa {
    pub id: Option<i64>,
    pub nome: String,
    pub razao_social: Option<String>,
    pub documento: String,
    pub tipo: TipoPessoa,
    pub inscricao_estadual: Option<String>,
    pub inscricao_municipal: Option<String>,
    pub entidade_id: Option<i64>,
}

// --- ENDEREÇO ---

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Endereco {
    pub id: Option<i64>,
    pub cep: Option<String>,
    pub logradouro: Option<String>,
    pub numero: Option<String>,
    pub complemento: Option<String>,
    pub bairro: Option<String>,
    pub cidade: Option<String>,
    pub codigo_cidade: Option<String>,
    pub estado: Option<String>,
    pub codigo_estado: Option<String>,
    pub telefone: Option<String>,
    pub email: Option<String>,
}

// --- PAYLOADS (o formato de envio) ---
// Campos opcionais vazios não vão para o fio.

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PessoaPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub nome: String,
    pub documento: String,
    pub tipo: TipoPessoa,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub razao_social: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inscricao_estadual: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inscricao_municipal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entidade_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnderecoPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub cep: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logradouro: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numero: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complemento: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bairro: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cidade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codigo_cidade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estado: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codigo_estado: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// `""` e só-espaços viram `None`.
pub fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
