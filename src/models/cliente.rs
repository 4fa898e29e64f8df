// src/models/cliente.rs

use serde::{Deserialize, Serialize};

use crate::models::pessoa::{Endereco, EnderecoPayload, Pessoa, PessoaPayload};

// --- CLIENTE (como vem do backend) ---

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Cliente {
    pub id: i64,
    pub pessoa: Pessoa,
    pub endereco: Option<Endereco>,
    pub responsavel: Option<Responsavel>,
}

// O responsável é uma pessoa com endereço próprio (opcional)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Responsavel {
    #[serde(flatten)]
    pub pessoa: Pessoa,
    #[serde(default)]
    pub endereco: Option<Endereco>,
}

// --- PAYLOAD (POST /cliente e PATCH /cliente/:id) ---

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClientePayload {
    pub pessoa: PessoaPayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endereco: Option<EnderecoPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsavel: Option<ResponsavelPayload>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResponsavelPayload {
    #[serde(flatten)]
    pub pessoa: PessoaPayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endereco: Option<EnderecoPayload>,
}
