// src/models/entidade.rs

use serde::{Deserialize, Serialize};

// A "Entidade" (tenant): só é referenciada por esta interface, nunca gerida
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Entidade {
    pub id: i64,
    pub nome: String,
    pub documento: Option<String>,
}
