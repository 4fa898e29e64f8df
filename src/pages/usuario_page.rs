// src/pages/usuario_page.rs

use crate::{
    common::{notice::Notice, search::Searchable},
    forms::UsuarioForm,
    models::usuario::Usuario,
    pages::ListState,
    services::UsuarioService,
};

impl Searchable for Usuario {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.email.as_str(), self.nome(), self.entidade_nome()]
    }
}

/// Usuários da entidade corrente.
pub struct UsuarioPage {
    service: UsuarioService,
    entidade_id: i64,
    list: ListState<Usuario>,
}

impl UsuarioPage {
    pub fn new(service: UsuarioService, entidade_id: i64) -> Self {
        Self {
            service,
            entidade_id,
            list: ListState::default(),
        }
    }

    pub fn entidade_id(&self) -> i64 {
        self.entidade_id
    }

    pub async fn load(&mut self) -> bool {
        let result = self.service.list_by_entidade(self.entidade_id).await;
        self.list.replace(result)
    }

    pub fn usuarios(&self) -> &[Usuario] {
        self.list.items()
    }

    pub fn set_search(&mut self, term: &str) {
        self.list.set_search(term);
    }

    pub fn filtered(&self) -> Vec<&Usuario> {
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

    pub async fn confirm_delete(&mut self) -> bool {
        let Some(id) = self.list.take_pending_delete() else {
            return false;
        };
        if let Err(err) = self.service.delete(id).await {
            self.list.push(Notice::from(&err));
            return false;
        }
        self.list.push(Notice::success("Usuário excluído com sucesso!"));
        self.load().await
    }

    pub fn open_create(&self) -> UsuarioForm {
        UsuarioForm::new(self.entidade_id)
    }

    pub fn open_edit(&self, id: i64) -> Option<UsuarioForm> {
        self.list
            .items()
            .iter()
            .find(|u| u.id == id)
            .map(|u| UsuarioForm::edit(u, self.entidade_id))
    }

    pub fn notices(&self) -> &[Notice] {
        self.list.notices()
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.list.take_notices()
    }
}
