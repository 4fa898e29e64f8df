// src/storage/supplier_repo.rs

use std::sync::{Arc, Mutex, MutexGuard};

use crate::{
    common::error::{AppError, AppResult},
    models::supplier::{Supplier, SupplierPayload, SupplierStatus},
};

// Fornecedores ainda não têm endpoint no backend: ficam em memória.
#[derive(Debug, Default)]
struct Inner {
    suppliers: Vec<Supplier>,
    next_id: i64,
}

#[derive(Debug, Clone)]
pub struct SupplierRepository {
    inner: Arc<Mutex<Inner>>,
}

impl Default for SupplierRepository {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl SupplierRepository {
    pub fn new(seed: Vec<Supplier>) -> Self {
        let next_id = seed.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        Self {
            inner: Arc::new(Mutex::new(Inner { suppliers: seed, next_id })),
        }
    }

    /// Repositório com os fornecedores de demonstração (ids únicos).
    pub fn with_seed_data() -> Self {
        Self::new(seed_suppliers())
    }

    fn inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn list(&self) -> Vec<Supplier> {
        self.inner().suppliers.clone()
    }

    pub fn find_by_id(&self, id: i64) -> Option<Supplier> {
        self.inner().suppliers.iter().find(|s| s.id == id).cloned()
    }

    pub fn create(&self, payload: SupplierPayload) -> Supplier {
        let mut inner = self.inner();
        let supplier = payload.into_supplier(inner.next_id);
        inner.next_id += 1;
        inner.suppliers.push(supplier.clone());
        supplier
    }

    pub fn update(&self, id: i64, payload: SupplierPayload) -> AppResult<Supplier> {
        let mut inner = self.inner();
        let slot = inner
            .suppliers
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| AppError::NotFound("Fornecedor".to_string()))?;
        *slot = payload.into_supplier(id);
        Ok(slot.clone())
    }

    pub fn delete(&self, id: i64) -> AppResult<()> {
        let mut inner = self.inner();
        let before = inner.suppliers.len();
        inner.suppliers.retain(|s| s.id != id);
        if inner.suppliers.len() == before {
            return Err(AppError::NotFound("Fornecedor".to_string()));
        }
        Ok(())
    }
}

fn seed_suppliers() -> Vec<Supplier> {
    vec![
        Supplier {
            id: 1,
            code: "FOR-001".into(),
            company_name: "Distribuidora Aurora Ltda".into(),
            document: "12.345.678/0001-99".into(),
            status: SupplierStatus::Active,
            address: "Rua das Indústrias, 450 - Campinas/SP".into(),
            phone: "(19) 3232-1000".into(),
            email: "vendas@aurora.com.br".into(),
            notes: "Entrega às terças e quintas.".into(),
        },
        Supplier {
            id: 2,
            code: "FOR-002".into(),
            company_name: "Atacado Bom Preço S/A".into(),
            document: "98.765.432/0001-10".into(),
            status: SupplierStatus::Active,
            address: "Av. Brasil, 1200 - Rio de Janeiro/RJ".into(),
            phone: "(21) 99876-5432".into(),
            email: "contato@bompreco.com.br".into(),
            notes: String::new(),
        },
        Supplier {
            id: 3,
            code: "FOR-003".into(),
            company_name: "Embalagens Sul Ltda".into(),
            document: "11.222.333/0001-44".into(),
            status: SupplierStatus::Inactive,
            address: "Rua XV de Novembro, 88 - Curitiba/PR".into(),
            phone: "(41) 3030-4040".into(),
            email: "comercial@embalagenssul.com.br".into(),
            notes: "Contrato suspenso.".into(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_ids_are_unique() {
        let repo = SupplierRepository::with_seed_data();
        let ids: HashSet<i64> = repo.list().iter().map(|s| s.id).collect();
        assert_eq!(ids.len(), repo.list().len());
    }

    #[test]
    fn test_crud() {
        let repo = SupplierRepository::with_seed_data();
        let created = repo.create(SupplierPayload {
            code: "FOR-004".into(),
            company_name: "Nova Ltda".into(),
            ..Default::default()
        });
        assert_eq!(created.id, 4);
        assert_eq!(repo.find_by_id(4).unwrap().company_name, "Nova Ltda");

        let updated = repo
            .update(4, SupplierPayload { company_name: "Nova S/A".into(), ..Default::default() })
            .unwrap();
        assert_eq!(updated.company_name, "Nova S/A");

        repo.delete(4).unwrap();
        assert!(repo.find_by_id(4).is_none());
        assert!(matches!(repo.delete(4), Err(AppError::NotFound(_))));
        assert!(matches!(repo.update(99, SupplierPayload::default()), Err(AppError::NotFound(_))));
    }
}
