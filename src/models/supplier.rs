// src/models/supplier.rs

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SupplierStatus {
    #[default]
    Active,
    Inactive,
}

impl SupplierStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SupplierStatus::Active => "Ativo",
            SupplierStatus::Inactive => "Inativo",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: i64,
    pub code: String,
    pub company_name: String,
    pub document: String,
    pub status: SupplierStatus,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub notes: String,
}

// Dados de criação/edição (sem o id, que é do repositório)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SupplierPayload {
    pub code: String,
    pub company_name: String,
    pub document: String,
    pub status: SupplierStatus,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub notes: String,
}

impl SupplierPayload {
    pub fn into_supplier(self, id: i64) -> Supplier {
        Supplier {
            id,
            code: self.code,
            company_name: self.company_name,
            document: self.document,
            status: self.status,
            address: self.address,
            phone: self.phone,
            email: self.email,
            notes: self.notes,
        }
    }
}
