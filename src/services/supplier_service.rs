// src/services/supplier_service.rs

use crate::{
    common::error::AppError,
    forms::SupplierDraft,
    models::supplier::Supplier,
    services::logged,
    storage::SupplierRepository,
};

// Mesma cara dos outros serviços, mas sobre o repositório em memória
#[derive(Clone)]
pub struct SupplierService {
    repo: SupplierRepository,
}

impl SupplierService {
    pub fn new(repo: SupplierRepository) -> Self {
        Self { repo }
    }

    pub fn list(&self) -> Vec<Supplier> {
        self.repo.list()
    }

    pub fn get(&self, id: i64) -> Result<Supplier, AppError> {
        self.repo
            .find_by_id(id)
            .ok_or_else(|| AppError::NotFound("Fornecedor".to_string()))
    }

    pub fn create(&self, draft: &SupplierDraft) -> Supplier {
        let supplier = self.repo.create(draft.to_payload());
        tracing::info!("✅ Fornecedor '{}' cadastrado", supplier.company_name);
        supplier
    }

    pub fn update(&self, id: i64, draft: &SupplierDraft) -> Result<Supplier, AppError> {
        self.repo
            .update(id, draft.to_payload())
            .map_err(logged("atualizar fornecedor"))
    }

    pub fn delete(&self, id: i64) -> Result<(), AppError> {
        self.repo.delete(id).map_err(logged("excluir fornecedor"))
    }
}
