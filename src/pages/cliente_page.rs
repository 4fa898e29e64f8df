// src/pages/cliente_page.rs

use crate::{
    common::{notice::Notice, search::Searchable},
    forms::ClienteForm,
    models::cliente::Cliente,
    pages::ListState,
    services::ClienteService,
};

impl Searchable for Cliente {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.pessoa.nome.as_str(), self.pessoa.documento.as_str()];
        if let Some(razao) = self.pessoa.razao_social.as_deref() {
            fields.push(razao);
        }
        fields
    }
}

/// Tela de clientes: lista completa, busca local e exclusão com confirmação.
pub struct ClientePage {
    service: ClienteService,
    list: ListState<Cliente>,
}

impl ClientePage {
    pub fn new(service: ClienteService) -> Self {
        Self {
            service,
            list: ListState::default(),
        }
    }

    pub async fn load(&mut self) -> bool {
        let result = self.service.list().await;
        self.list.replace(result)
    }

    pub fn clientes(&self) -> &[Cliente] {
        self.list.items()
    }

    pub fn set_search(&mut self, term: &str) {
        self.list.set_search(term);
    }

    pub fn filtered(&self) -> Vec<&Cliente> {
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

    /// Exclui o cliente pendente e recarrega a coleção.
    pub async fn confirm_delete(&mut self) -> bool {
        let Some(id) = self.list.take_pending_delete() else {
            return false;
        };
        if let Err(err) = self.service.delete(id).await {
            self.list.push(Notice::from(&err));
            return false;
        }
        self.list.push(Notice::success("Cliente excluído com sucesso!"));
        self.load().await
    }

    pub fn open_create(&self, entidade_id: Option<i64>) -> ClienteForm {
        ClienteForm::new(entidade_id)
    }

    pub fn open_edit(&self, id: i64) -> Option<ClienteForm> {
        self.list
            .items()
            .iter()
            .find(|c| c.id == id)
            .map(ClienteForm::edit)
    }

    pub fn notices(&self) -> &[Notice] {
        self.list.notices()
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.list.take_notices()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        forms::{FormMode, PessoaField},
        models::pessoa::{Pessoa, TipoPessoa},
    };

    #[test]
    fn test_search_covers_razao_social() {
        let cliente = Cliente {
            id: 1,
            pessoa: Pessoa {
                nome: "Mercado".into(),
                razao_social: Some("Mercado Central Ltda".into()),
                documento: "12.345.678/0001-99".into(),
                tipo: TipoPessoa::Juridica,
                ..Default::default()
            },
            ..Default::default()
        };
        let fields = cliente.search_fields();
        assert!(fields.contains(&"Mercado Central Ltda"));
        assert!(fields.contains(&"12.345.678/0001-99"));
    }

    #[test]
    fn test_open_edit_maps_selected_row() {
        let mut list = ListState::default();
        list.replace(Ok(vec![Cliente {
            id: 8,
            pessoa: Pessoa { nome: "Ana".into(), ..Default::default() },
            ..Default::default()
        }]));
        let page = ClientePage {
            service: ClienteService::new(
                crate::services::ApiClient::new(
                    "http://localhost:1",
                    std::sync::Arc::new(crate::storage::MemoryStore::new()),
                )
                .unwrap(),
            ),
            list,
        };

        let form = page.open_edit(8).expect("cliente carregado");
        assert_eq!(form.mode(), FormMode::Edit(8));
        assert_eq!(form.draft().pessoa.get(PessoaField::Nome), "Ana");
        assert!(page.open_edit(99).is_none());
    }
}
