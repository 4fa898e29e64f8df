// src/forms/cliente_form.rs

use crate::{
    common::{
        error::{validation_error, AppError, AppResult},
        mask::only_digits,
        notice::Notice,
    },
    forms::{
        drafts::{EnderecoDraft, EnderecoField, PessoaDraft, PessoaField},
        FormMode, FormPhase, SubmitState,
    },
    models::{
        cep::CepAddress,
        cliente::{Cliente, ClientePayload, ResponsavelPayload},
        pessoa::TipoPessoa,
    },
    services::{CepLookup, ClienteService},
};

// O formulário tem duas "abas" com pessoa + endereço: cliente e responsável
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClienteSection {
    Cliente,
    Responsavel,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClienteAction {
    Pessoa(ClienteSection, PessoaField, String),
    Tipo(ClienteSection, TipoPessoa),
    Endereco(ClienteSection, EnderecoField, String),
    CepFound(ClienteSection, CepAddress),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClienteFocus {
    Numero(ClienteSection),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClienteDraft {
    pub entidade_id: Option<i64>,
    pub pessoa: PessoaDraft,
    pub endereco: EnderecoDraft,
    pub responsavel: PessoaDraft,
    pub responsavel_endereco: EnderecoDraft,
}

impl ClienteDraft {
    /// Achata o cliente aninhado no formato do rascunho (abrir edição).
    pub fn from_cliente(cliente: &Cliente) -> Self {
        let responsavel = cliente.responsavel.as_ref();
        Self {
            entidade_id: cliente.pessoa.entidade_id,
            pessoa: PessoaDraft::from_pessoa(&cliente.pessoa),
            endereco: cliente
                .endereco
                .as_ref()
                .map(EnderecoDraft::from_endereco)
                .unwrap_or_default(),
            responsavel: responsavel
                .map(|r| PessoaDraft::from_pessoa(&r.pessoa))
                .unwrap_or_default(),
            responsavel_endereco: responsavel
                .and_then(|r| r.endereco.as_ref())
                .map(EnderecoDraft::from_endereco)
                .unwrap_or_default(),
        }
    }

    pub fn pessoa(&self, section: ClienteSection) -> &PessoaDraft {
        match section {
            ClienteSection::Cliente => &self.pessoa,
            ClienteSection::Responsavel => &self.responsavel,
        }
    }

    pub fn endereco(&self, section: ClienteSection) -> &EnderecoDraft {
        match section {
            ClienteSection::Cliente => &self.endereco,
            ClienteSection::Responsavel => &self.responsavel_endereco,
        }
    }

    fn with_pessoa(&self, section: ClienteSection, pessoa: PessoaDraft) -> Self {
        match section {
            ClienteSection::Cliente => Self { pessoa, ..self.clone() },
            ClienteSection::Responsavel => Self { responsavel: pessoa, ..self.clone() },
        }
    }

    fn with_endereco(&self, section: ClienteSection, endereco: EnderecoDraft) -> Self {
        match section {
            ClienteSection::Cliente => Self { endereco, ..self.clone() },
            ClienteSection::Responsavel => Self {
                responsavel_endereco: endereco,
                ..self.clone()
            },
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        self.pessoa.validate_required("pessoa.nome", "pessoa.documento")?;

        if !self.endereco.is_blank() {
            self.endereco.validate_required("endereco.cep")?;
        }

        let has_responsavel = !self.responsavel.is_blank();
        if has_responsavel {
            self.responsavel
                .validate_required("responsavel.nome", "responsavel.documento")?;
        }

        if !self.responsavel_endereco.is_blank() {
            if !has_responsavel {
                return Err(validation_error(
                    "responsavel.nome",
                    "Informe o responsável antes do endereço dele.",
                ));
            }
            self.responsavel_endereco
                .validate_required("responsavel.endereco.cep")?;
        }

        Ok(())
    }

    // Seções opcionais em branco ficam fora do payload
    pub fn to_payload(&self) -> ClientePayload {
        let responsavel = (!self.responsavel.is_blank()).then(|| ResponsavelPayload {
            pessoa: self.responsavel.to_payload(self.entidade_id),
            endereco: self.responsavel_endereco.to_optional_payload(),
        });

        ClientePayload {
            pessoa: self.pessoa.to_payload(self.entidade_id),
            endereco: self.endereco.to_optional_payload(),
            responsavel,
        }
    }
}

/// Redutor puro: cada ação devolve um rascunho novo.
pub fn reduce(draft: &ClienteDraft, action: ClienteAction) -> ClienteDraft {
    match action {
        ClienteAction::Pessoa(section, field, value) => {
            let pessoa = draft.pessoa(section).with_field(field, &value);
            draft.with_pessoa(section, pessoa)
        }
        ClienteAction::Tipo(section, tipo) => {
            let pessoa = draft.pessoa(section).with_tipo(tipo);
            draft.with_pessoa(section, pessoa)
        }
        ClienteAction::Endereco(section, field, value) => {
            let endereco = draft.endereco(section).with_field(field, &value);
            draft.with_endereco(section, endereco)
        }
        ClienteAction::CepFound(section, address) => {
            let endereco = draft.endereco(section).with_cep_address(&address);
            draft.with_endereco(section, endereco)
        }
    }
}

pub struct ClienteForm {
    mode: FormMode,
    draft: ClienteDraft,
    state: SubmitState,
    focus: Option<ClienteFocus>,
}

impl ClienteForm {
    pub fn new(entidade_id: Option<i64>) -> Self {
        Self {
            mode: FormMode::Create,
            draft: ClienteDraft { entidade_id, ..Default::default() },
            state: SubmitState::default(),
            focus: None,
        }
    }

    pub fn edit(cliente: &Cliente) -> Self {
        Self {
            mode: FormMode::Edit(cliente.id),
            draft: ClienteDraft::from_cliente(cliente),
            state: SubmitState::default(),
            focus: None,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn draft(&self) -> &ClienteDraft {
        &self.draft
    }

    pub fn phase(&self) -> FormPhase {
        self.state.phase()
    }

    pub fn focus(&self) -> Option<ClienteFocus> {
        self.focus
    }

    pub fn notices(&self) -> &[Notice] {
        self.state.notices()
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.state.take_notices()
    }

    pub fn dispatch(&mut self, action: ClienteAction) {
        self.draft = reduce(&self.draft, action);
    }

    pub fn visible_pessoa_fields(&self, section: ClienteSection) -> Vec<PessoaField> {
        self.draft.pessoa(section).visible_fields()
    }

    /// Busca o endereço pelo CEP da seção. Falhas viram notificação e
    /// não mexem nos campos.
    pub async fn lookup_cep(&mut self, section: ClienteSection, lookup: &dyn CepLookup) -> bool {
        let cep = self.draft.endereco(section).cep.clone();
        if only_digits(&cep).len() < 8 {
            self.state.push(Notice::from(&AppError::InvalidCep));
            return false;
        }

        match lookup.lookup(&cep).await {
            Ok(Some(address)) => {
                self.dispatch(ClienteAction::CepFound(section, address));
                self.focus = Some(ClienteFocus::Numero(section));
                true
            }
            Ok(None) => {
                self.state.push(Notice::from(&AppError::CepNotFound));
                false
            }
            Err(err) => {
                tracing::warn!("Falha na consulta do CEP {}: {}", cep, err);
                self.state.push(Notice::from(&err));
                false
            }
        }
    }

    pub fn begin_submit(&mut self) -> AppResult<()> {
        let validation = self.draft.validate();
        self.state.begin(validation)
    }

    pub fn finish_submit(&mut self, result: AppResult<Cliente>) -> Option<Cliente> {
        let message = match self.mode {
            FormMode::Create => "Cliente cadastrado com sucesso!",
            FormMode::Edit(_) => "Cliente atualizado com sucesso!",
        };
        self.state.finish(result, message)
    }

    /// `Some` quando salvou (o diálogo fecha); `None` mantém o formulário aberto.
    pub async fn submit(&mut self, service: &ClienteService) -> Option<Cliente> {
        if self.begin_submit().is_err() {
            return None;
        }
        let result = match self.mode {
            FormMode::Create => service.create(&self.draft).await,
            FormMode::Edit(id) => service.update(id, &self.draft).await,
        };
        self.finish_submit(result)
    }
}
