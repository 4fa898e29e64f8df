// src/models/usuario.rs

use serde::{Deserialize, Serialize};

use crate::models::{
    entidade::Entidade,
    pessoa::{Pessoa, PessoaPayload},
};

// Representa um usuário vindo do backend (nunca traz a senha)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Usuario {
    pub id: i64,
    pub email: String,
    pub ativo: bool,
    pub admin: bool,
    pub pessoa_id: Option<i64>,
    pub pessoa: Option<Pessoa>,
    pub entidade_id: Option<i64>,
    pub entidade: Option<Entidade>,
}

impl Usuario {
    pub fn nome(&self) -> &str {
        self.pessoa.as_ref().map(|p| p.nome.as_str()).unwrap_or("")
    }

    pub fn entidade_nome(&self) -> &str {
        self.entidade.as_ref().map(|e| e.nome.as_str()).unwrap_or("")
    }
}

// O usuário aponta para exatamente UMA pessoa:
// uma já existente (pelo id) ou uma nova, criada junto.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum PessoaRef {
    Existente {
        #[serde(rename = "pessoaId")]
        pessoa_id: i64,
    },
    Nova {
        pessoa: PessoaPayload,
    },
}

// --- PAYLOAD (POST /usuario e PATCH /usuario/:id) ---

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UsuarioPayload {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub senha: Option<String>,
    pub ativo: bool,
    pub admin: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entidade_id: Option<i64>,
    #[serde(flatten)]
    pub pessoa: PessoaRef,
}

// POST /usuario/:id/replicate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReplicateUsuarioPayload {
    pub entidade_id: i64,
}
