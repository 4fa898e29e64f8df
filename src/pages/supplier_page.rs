// src/pages/supplier_page.rs

use crate::{
    common::{notice::Notice, search::Searchable},
    forms::SupplierForm,
    models::supplier::Supplier,
    pages::ListState,
    services::SupplierService,
};

impl Searchable for Supplier {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.code.as_str(),
            self.company_name.as_str(),
            self.document.as_str(),
            self.email.as_str(),
        ]
    }
}

pub struct SupplierPage {
    service: SupplierService,
    list: ListState<Supplier>,
}

impl SupplierPage {
    pub fn new(service: SupplierService) -> Self {
        Self {
            service,
            list: ListState::default(),
        }
    }

    pub fn load(&mut self) -> bool {
        let suppliers = self.service.list();
        self.list.replace(Ok(suppliers))
    }

    pub fn suppliers(&self) -> &[Supplier] {
        self.list.items()
    }

    pub fn set_search(&mut self, term: &str) {
        self.list.set_search(term);
    }

    pub fn filtered(&self) -> Vec<&Supplier> {
        self.list.filtered()
    }

    pub fn request_delete(&mut self, id: i64) {
        self.list.request_delete(id);
    }

    pub fn cancel_delete(&mut self) {
        self.list.cancel_delete();
    }

    pub fn pending_delete(&self) -> Option<i64> {
        self.list.pending_delete()
    }

    pub fn confirm_delete(&mut self) -> bool {
        let Some(id) = self.list.take_pending_delete() else {
            return false;
        };
        if let Err(err) = self.service.delete(id) {
            self.list.push(Notice::from(&err));
            return false;
        }
        self.list.push(Notice::success("Fornecedor excluído com sucesso!"));
        self.load()
    }

    pub fn open_create(&self) -> SupplierForm {
        SupplierForm::new()
    }

    pub fn open_edit(&self, id: i64) -> Option<SupplierForm> {
        self.list
            .items()
            .iter()
            .find(|s| s.id == id)
            .map(SupplierForm::edit)
    }

    pub fn service(&self) -> &SupplierService {
        &self.service
    }

    pub fn notices(&self) -> &[Notice] {
        self.list.notices()
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.list.take_notices()
    }
}
