// src/forms/supplier_form.rs

use validator::ValidateEmail;

use crate::{
    common::{
        error::{validation_error, AppResult},
        mask::{mask_cnpj, mask_telefone, only_digits},
        notice::Notice,
    },
    forms::{FormMode, FormPhase, SubmitState},
    models::supplier::{Supplier, SupplierPayload, SupplierStatus},
    services::SupplierService,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SupplierDraft {
    pub code: String,
    pub company_name: String,
    pub document: String,
    pub status: SupplierStatus,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SupplierAction {
    Code(String),
    CompanyName(String),
    Document(String),
    Status(SupplierStatus),
    Address(String),
    Phone(String),
    Email(String),
    Notes(String),
}

impl SupplierDraft {
    pub fn from_supplier(supplier: &Supplier) -> Self {
        Self {
            code: supplier.code.clone(),
            company_name: supplier.company_name.clone(),
            document: mask_cnpj(&supplier.document),
            status: supplier.status,
            address: supplier.address.clone(),
            phone: mask_telefone(&supplier.phone),
            email: supplier.email.clone(),
            notes: supplier.notes.clone(),
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.company_name.trim().is_empty() {
            return Err(validation_error("companyName", "A razão social é obrigatória."));
        }
        if only_digits(&self.document).len() != 14 {
            return Err(validation_error("document", "Informe um CNPJ completo."));
        }
        let email = self.email.trim().to_string();
        if !email.is_empty() && !email.validate_email() {
            return Err(validation_error("email", "O e-mail fornecido é inválido."));
        }
        Ok(())
    }

    pub fn to_payload(&self) -> SupplierPayload {
        SupplierPayload {
            code: self.code.trim().to_string(),
            company_name: self.company_name.trim().to_string(),
            document: self.document.clone(),
            status: self.status,
            address: self.address.trim().to_string(),
            phone: self.phone.clone(),
            email: self.email.trim().to_string(),
            notes: self.notes.clone(),
        }
    }
}

pub fn reduce(draft: &SupplierDraft, action: SupplierAction) -> SupplierDraft {
    let mut next = draft.clone();
    match action {
        SupplierAction::Code(v) => next.code = v,
        SupplierAction::CompanyName(v) => next.company_name = v,
        SupplierAction::Document(v) => next.document = mask_cnpj(&v),
        SupplierAction::Status(v) => next.status = v,
        SupplierAction::Address(v) => next.address = v,
        SupplierAction::Phone(v) => next.phone = mask_telefone(&v),
        SupplierAction::Email(v) => next.email = v,
        SupplierAction::Notes(v) => next.notes = v,
    }
    next
}

pub struct SupplierForm {
    mode: FormMode,
    draft: SupplierDraft,
    state: SubmitState,
}

impl SupplierForm {
    pub fn new() -> Self {
        Self {
            mode: FormMode::Create,
            draft: SupplierDraft::default(),
            state: SubmitState::default(),
        }
    }

    pub fn edit(supplier: &Supplier) -> Self {
        Self {
            mode: FormMode::Edit(supplier.id),
            draft: SupplierDraft::from_supplier(supplier),
            state: SubmitState::default(),
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn draft(&self) -> &SupplierDraft {
        &self.draft
    }

    pub fn phase(&self) -> FormPhase {
        self.state.phase()
    }

    pub fn notices(&self) -> &[Notice] {
        self.state.notices()
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.state.take_notices()
    }

    pub fn dispatch(&mut self, action: SupplierAction) {
        self.draft = reduce(&self.draft, action);
    }

    pub fn submit(&mut self, service: &SupplierService) -> Option<Supplier> {
        let validation = self.draft.validate();
        if self.state.begin(validation).is_err() {
            return None;
        }
        let (result, message) = match self.mode {
            FormMode::Create => (Ok(service.create(&self.draft)), "Fornecedor cadastrado com sucesso!"),
            FormMode::Edit(id) => (service.update(id, &self.draft), "Fornecedor atualizado com sucesso!"),
        };
        self.state.finish(result, message)
    }
}

impl Default for SupplierForm {
    fn default() -> Self {
        Self::new()
    }
}
