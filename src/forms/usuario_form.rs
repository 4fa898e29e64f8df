// src/forms/usuario_form.rs

use validator::Validate;

use crate::{
    common::{
        error::{validation_error, AppError, AppResult},
        notice::Notice,
    },
    forms::{
        drafts::{PessoaDraft, PessoaField},
        CloseRequest, FormMode, FormPhase, SubmitState,
    },
    models::{
        pessoa::{non_empty, TipoPessoa},
        usuario::{PessoaRef, Usuario, UsuarioPayload},
    },
    services::UsuarioService,
};

const MIN_SENHA: usize = 6;

// Pessoa vinculada: uma já cadastrada (pelo id) ou uma nova, criada junto
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PessoaModo {
    #[default]
    Nova,
    Existente,
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct UsuarioDraft {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    pub senha: String,
    pub ativo: bool,
    pub admin: bool,
    pub pessoa_modo: PessoaModo,
    pub pessoa_id: Option<i64>,
    pub pessoa: PessoaDraft,
}

impl Default for UsuarioDraft {
    fn default() -> Self {
        Self {
            email: String::new(),
            senha: String::new(),
            ativo: true,
            admin: false,
            pessoa_modo: PessoaModo::default(),
            pessoa_id: None,
            pessoa: PessoaDraft::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UsuarioAction {
    Email(String),
    Senha(String),
    Ativo(bool),
    Admin(bool),
    PessoaModo(PessoaModo),
    PessoaId(Option<i64>),
    Pessoa(PessoaField, String),
    PessoaTipo(TipoPessoa),
}

impl UsuarioDraft {
    pub fn from_usuario(usuario: &Usuario) -> Self {
        let pessoa_id = usuario.pessoa.as_ref().and_then(|p| p.id).or(usuario.pessoa_id);
        Self {
            email: usuario.email.clone(),
            senha: String::new(),
            ativo: usuario.ativo,
            admin: usuario.admin,
            pessoa_modo: if pessoa_id.is_some() { PessoaModo::Existente } else { PessoaModo::Nova },
            pessoa_id,
            pessoa: usuario
                .pessoa
                .as_ref()
                .map(PessoaDraft::from_pessoa)
                .unwrap_or_default(),
        }
    }

    pub fn validate_for(&self, mode: FormMode) -> AppResult<()> {
        self.validate()?;

        let senha_len = self.senha.chars().count();
        let senha_required = mode == FormMode::Create;
        if (senha_required || senha_len > 0) && senha_len < MIN_SENHA {
            return Err(validation_error(
                "senha",
                "A senha deve ter no mínimo 6 caracteres.",
            ));
        }

        match self.pessoa_modo {
            PessoaModo::Existente if self.pessoa_id.is_none() => {
                Err(validation_error("pessoaId", "Selecione a pessoa vinculada."))
            }
            PessoaModo::Existente => Ok(()),
            PessoaModo::Nova => self.pessoa.validate_required("pessoa.nome", "pessoa.documento"),
        }
    }

    pub fn to_payload(&self, entidade_id: Option<i64>) -> AppResult<UsuarioPayload> {
        let pessoa = match self.pessoa_modo {
            PessoaModo::Existente => PessoaRef::Existente {
                pessoa_id: self
                    .pessoa_id
                    .ok_or_else(|| validation_error("pessoaId", "Selecione a pessoa vinculada."))?,
            },
            PessoaModo::Nova => PessoaRef::Nova {
                pessoa: self.pessoa.to_payload(entidade_id),
            },
        };

        Ok(UsuarioPayload {
            email: self.email.trim().to_string(),
            senha: non_empty(&self.senha),
            ativo: self.ativo,
            admin: self.admin,
            entidade_id,
            pessoa,
        })
    }
}

pub fn reduce(draft: &UsuarioDraft, action: UsuarioAction) -> UsuarioDraft {
    let mut next = draft.clone();
    match action {
        UsuarioAction::Email(email) => next.email = email,
        UsuarioAction::Senha(senha) => next.senha = senha,
        UsuarioAction::Ativo(ativo) => next.ativo = ativo,
        UsuarioAction::Admin(admin) => next.admin = admin,
        UsuarioAction::PessoaModo(modo) => next.pessoa_modo = modo,
        UsuarioAction::PessoaId(id) => next.pessoa_id = id,
        UsuarioAction::Pessoa(field, value) => next.pessoa = draft.pessoa.with_field(field, &value),
        UsuarioAction::PessoaTipo(tipo) => next.pessoa = draft.pessoa.with_tipo(tipo),
    }
    next
}

// O "assistente" de replicação quando o e-mail já existe em outra entidade
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ReplicationState {
    #[default]
    Idle,
    CollisionDetected {
        matches: Vec<Usuario>,
    },
    Replicating {
        source: Usuario,
        matches: Vec<Usuario>,
    },
}

pub struct UsuarioForm {
    mode: FormMode,
    entidade_id: i64,
    initial: UsuarioDraft,
    draft: UsuarioDraft,
    state: SubmitState,
    replication: ReplicationState,
    confirming_discard: bool,
}

impl UsuarioForm {
    pub fn new(entidade_id: i64) -> Self {
        Self::with_draft(FormMode::Create, entidade_id, UsuarioDraft::default())
    }

    pub fn edit(usuario: &Usuario, entidade_id: i64) -> Self {
        Self::with_draft(FormMode::Edit(usuario.id), entidade_id, UsuarioDraft::from_usuario(usuario))
    }

    fn with_draft(mode: FormMode, entidade_id: i64, draft: UsuarioDraft) -> Self {
        Self {
            mode,
            entidade_id,
            initial: draft.clone(),
            draft,
            state: SubmitState::default(),
            replication: ReplicationState::Idle,
            confirming_discard: false,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn draft(&self) -> &UsuarioDraft {
        &self.draft
    }

    pub fn phase(&self) -> FormPhase {
        self.state.phase()
    }

    pub fn replication(&self) -> &ReplicationState {
        &self.replication
    }

    pub fn notices(&self) -> &[Notice] {
        self.state.notices()
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.state.take_notices()
    }

    pub fn dispatch(&mut self, action: UsuarioAction) {
        self.draft = reduce(&self.draft, action);
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.draft != self.initial
    }

    // ---
    // Fechar o diálogo
    // ---

    pub fn request_close(&mut self) -> CloseRequest {
        if self.phase() != FormPhase::Success && self.has_unsaved_changes() {
            self.confirming_discard = true;
            return CloseRequest::NeedsConfirmation;
        }
        CloseRequest::Closed
    }

    pub fn is_confirming_discard(&self) -> bool {
        self.confirming_discard
    }

    pub fn confirm_discard(&mut self) -> CloseRequest {
        self.draft = self.initial.clone();
        self.replication = ReplicationState::Idle;
        self.confirming_discard = false;
        CloseRequest::Closed
    }

    pub fn cancel_discard(&mut self) {
        self.confirming_discard = false;
    }

    // ---
    // Envio
    // ---

    pub fn begin_submit(&mut self) -> AppResult<()> {
        let validation = self.draft.validate_for(self.mode);
        self.state.begin(validation)
    }

    pub fn finish_submit(&mut self, result: AppResult<Usuario>) -> Option<Usuario> {
        let message = match self.mode {
            FormMode::Create => "Usuário cadastrado com sucesso!",
            FormMode::Edit(_) => "Usuário atualizado com sucesso!",
        };
        self.state.finish(result, message)
    }

    /// O e-mail já existe em outras entidades: oferece a replicação.
    pub fn detect_collision(&mut self, matches: Vec<Usuario>) {
        tracing::info!(
            "E-mail {} já usado em {} outra(s) entidade(s)",
            self.draft.email,
            matches.len()
        );
        self.state.reset();
        self.state.push(Notice::info(
            "Este e-mail já está cadastrado em outra entidade. Deseja replicar o usuário?",
        ));
        self.replication = ReplicationState::CollisionDetected { matches };
    }

    pub async fn submit(&mut self, service: &UsuarioService) -> Option<Usuario> {
        if self.begin_submit().is_err() {
            return None;
        }

        if self.mode == FormMode::Create {
            match service.find_in_other_entities(&self.draft.email).await {
                Ok(matches) if !matches.is_empty() => {
                    self.detect_collision(matches);
                    return None;
                }
                Ok(_) => {}
                Err(err) => return self.finish_submit(Err(err)),
            }
        }

        let result = match self.mode {
            FormMode::Create => service.create(&self.draft, self.entidade_id).await,
            FormMode::Edit(id) => service.update(id, &self.draft, self.entidade_id).await,
        };
        self.finish_submit(result)
    }

    // ---
    // Replicação
    // ---

    pub fn begin_replicate(&mut self, index: usize) -> AppResult<Usuario> {
        let source = match &self.replication {
            ReplicationState::CollisionDetected { matches } => matches
                .get(index)
                .cloned()
                .ok_or_else(|| AppError::NotFound("Usuário para replicar".to_string()))?,
            _ => return Err(AppError::NotFound("Usuário para replicar".to_string())),
        };

        self.state.begin(Ok(()))?;
        if let ReplicationState::CollisionDetected { matches } = std::mem::take(&mut self.replication) {
            self.replication = ReplicationState::Replicating { source: source.clone(), matches };
        }
        Ok(source)
    }

    pub fn finish_replicate(&mut self, result: AppResult<Usuario>) -> Option<Usuario> {
        let previous = std::mem::take(&mut self.replication);
        if result.is_err() {
            // Falhou: volta a oferecer as mesmas opções
            if let ReplicationState::Replicating { matches, .. } = previous {
                self.replication = ReplicationState::CollisionDetected { matches };
            }
        }
        self.state.finish(result, "Usuário replicado para esta entidade!")
    }

    pub async fn replicate(&mut self, index: usize, service: &UsuarioService) -> Option<Usuario> {
        let source = match self.begin_replicate(index) {
            Ok(source) => source,
            Err(err) => {
                self.state.push(Notice::from(&err));
                return None;
            }
        };
        let result = service.replicate(source.id, self.entidade_id).await;
        self.finish_replicate(result)
    }

    pub fn dismiss_collision(&mut self) {
        if matches!(self.replication, ReplicationState::CollisionDetected { .. }) {
            self.replication = ReplicationState::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::pessoa::Pessoa;
    use serde_json::json;

    fn preenchido() -> UsuarioForm {
        let mut form = UsuarioForm::new(3);
        form.dispatch(UsuarioAction::Email("ana@maestro.com".into()));
        form.dispatch(UsuarioAction::Senha("segredo1".into()));
        form.dispatch(UsuarioAction::Pessoa(PessoaField::Nome, "Ana".into()));
        form.dispatch(UsuarioAction::Pessoa(PessoaField::Documento, "11122233344".into()));
        form
    }

    fn outro_usuario(id: i64, entidade: i64) -> Usuario {
        Usuario {
            id,
            email: "ana@maestro.com".into(),
            ativo: true,
            entidade_id: Some(entidade),
            ..Default::default()
        }
    }

    #[test]
    fn test_unsaved_changes_tracking() {
        let mut form = UsuarioForm::new(3);
        assert!(!form.has_unsaved_changes());
        assert_eq!(form.request_close(), CloseRequest::Closed);

        form.dispatch(UsuarioAction::Admin(true));
        assert!(form.has_unsaved_changes());

        // Voltar ao valor inicial deixa de ser alteração
        form.dispatch(UsuarioAction::Admin(false));
        assert!(!form.has_unsaved_changes());
    }

    #[test]
    fn test_close_with_changes_needs_confirmation() {
        let mut form = preenchido();
        assert_eq!(form.request_close(), CloseRequest::NeedsConfirmation);
        assert!(form.is_confirming_discard());

        form.cancel_discard();
        assert!(!form.is_confirming_discard());
        assert_eq!(form.draft().email, "ana@maestro.com");

        form.request_close();
        assert_eq!(form.confirm_discard(), CloseRequest::Closed);
        assert!(!form.has_unsaved_changes());
        assert_eq!(form.draft(), &UsuarioDraft::default());
    }

    #[test]
    fn test_validation_rules() {
        let mut form = UsuarioForm::new(3);
        form.dispatch(UsuarioAction::Email("nao-e-email".into()));
        assert!(form.begin_submit().is_err());

        let mut form = preenchido();
        form.dispatch(UsuarioAction::Senha("123".into()));
        assert!(form.begin_submit().is_err());

        let mut form = preenchido();
        form.dispatch(UsuarioAction::PessoaModo(PessoaModo::Existente));
        assert!(form.begin_submit().is_err());
        form.dispatch(UsuarioAction::PessoaId(Some(9)));
        assert!(form.begin_submit().is_ok());
    }

    #[test]
    fn test_edit_allows_blank_password() {
        let usuario = Usuario {
            id: 5,
            email: "bia@maestro.com".into(),
            ativo: true,
            pessoa: Some(Pessoa { id: Some(8), nome: "Bia".into(), documento: "1".into(), ..Default::default() }),
            ..Default::default()
        };
        let mut form = UsuarioForm::edit(&usuario, 3);
        assert_eq!(form.draft().pessoa_modo, PessoaModo::Existente);
        assert_eq!(form.draft().pessoa_id, Some(8));
        assert!(!form.has_unsaved_changes());
        assert!(form.begin_submit().is_ok());

        let payload = form.draft().to_payload(Some(3)).unwrap();
        assert_eq!(
            serde_json::to_value(payload).unwrap(),
            json!({ "email": "bia@maestro.com", "ativo": true, "admin": false, "entidadeId": 3, "pessoaId": 8 })
        );
    }

    #[test]
    fn test_collision_then_replicate_flow() {
        let mut form = preenchido();
        form.begin_submit().unwrap();
        form.detect_collision(vec![outro_usuario(10, 1), outro_usuario(11, 2)]);

        assert_eq!(form.phase(), FormPhase::Editing);
        assert!(matches!(form.replication(), ReplicationState::CollisionDetected { matches } if matches.len() == 2));

        assert!(form.begin_replicate(5).is_err());
        let source = form.begin_replicate(1).unwrap();
        assert_eq!(source.id, 11);
        assert!(matches!(form.replication(), ReplicationState::Replicating { source, .. } if source.id == 11));
        assert_eq!(form.phase(), FormPhase::Submitting);

        // Falha: volta às opções, com a mesma lista
        assert!(form.finish_replicate(Err(AppError::Timeout)).is_none());
        assert!(matches!(form.replication(), ReplicationState::CollisionDetected { matches } if matches.len() == 2));

        form.begin_replicate(0).unwrap();
        let replicated = form.finish_replicate(Ok(outro_usuario(10, 3)));
        assert_eq!(replicated.map(|u| u.id), Some(10));
        assert_eq!(form.replication(), &ReplicationState::Idle);
        assert_eq!(form.phase(), FormPhase::Success);
    }

    #[test]
    fn test_dismiss_collision() {
        let mut form = preenchido();
        form.detect_collision(vec![outro_usuario(10, 1)]);
        form.dismiss_collision();
        assert_eq!(form.replication(), &ReplicationState::Idle);
        assert_eq!(form.draft().email, "ana@maestro.com");
        assert!(form.begin_replicate(0).is_err());
    }
}
