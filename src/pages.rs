// src/pages.rs

pub mod cliente_page;
pub use cliente_page::ClientePage;
pub mod login_page;
pub use login_page::{LoginPage, LoginStep};
pub mod supplier_page;
pub use supplier_page::SupplierPage;
pub mod usuario_page;
pub use usuario_page::UsuarioPage;

use crate::common::{
    error::AppResult,
    notice::Notice,
    search::{filter_items, Searchable},
};

// Estado comum das listagens: coleção carregada, busca local,
// exclusão em dois passos e notificações.
#[derive(Debug)]
pub struct ListState<T> {
    items: Vec<T>,
    search: String,
    pending_delete: Option<i64>,
    notices: Vec<Notice>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            search: String::new(),
            pending_delete: None,
            notices: Vec::new(),
        }
    }
}

impl<T: Searchable> ListState<T> {
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn filtered(&self) -> Vec<&T> {
        filter_items(&self.items, &self.search)
    }

    /// Substitui a coleção. Em caso de erro os dados anteriores ficam.
    pub fn replace(&mut self, result: AppResult<Vec<T>>) -> bool {
        match result {
            Ok(items) => {
                self.items = items;
                true
            }
            Err(err) => {
                self.notices.push(Notice::from(&err));
                false
            }
        }
    }

    pub fn request_delete(&mut self, id: i64) {
        self.pending_delete = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn pending_delete(&self) -> Option<i64> {
        self.pending_delete
    }

    pub fn take_pending_delete(&mut self) -> Option<i64> {
        self.pending_delete.take()
    }

    pub fn push(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}
