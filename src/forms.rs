pub mod cliente_form;
pub use cliente_form::{ClienteAction, ClienteDraft, ClienteFocus, ClienteForm, ClienteSection};
pub mod drafts;
pub use drafts::{EnderecoDraft, EnderecoField, PessoaDraft, PessoaField};
pub mod supplier_form;
pub use supplier_form::{SupplierAction, SupplierDraft, SupplierForm};
pub mod usuario_form;
pub use usuario_form::{PessoaModo, ReplicationState, UsuarioAction, UsuarioDraft, UsuarioForm};

use crate::common::{
    error::{AppError, AppResult},
    notice::Notice,
};

// editing -> submitting -> success | (erro) editing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormPhase {
    #[default]
    Editing,
    Submitting,
    Success,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

// Pedido de fechar o diálogo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseRequest {
    Closed,
    NeedsConfirmation,
}

// Estado comum a todos os formulários: fase de envio e notificações
#[derive(Debug, Default)]
pub struct SubmitState {
    phase: FormPhase,
    notices: Vec<Notice>,
}

impl SubmitState {
    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    /// Trava contra duplo envio e roda a validação antes de qualquer chamada.
    pub fn begin(&mut self, validation: AppResult<()>) -> AppResult<()> {
        if self.is_submitting() {
            return Err(AppError::AlreadySubmitting);
        }
        if let Err(err) = validation {
            self.notices.push(Notice::from(&err));
            self.phase = FormPhase::Editing;
            return Err(err);
        }
        self.phase = FormPhase::Submitting;
        Ok(())
    }

    pub fn finish<T>(&mut self, result: AppResult<T>, success_message: &str) -> Option<T> {
        match result {
            Ok(value) => {
                self.phase = FormPhase::Success;
                self.notices.push(Notice::success(success_message));
                Some(value)
            }
            Err(err) => {
                self.phase = FormPhase::Editing;
                self.notices.push(Notice::from(&err));
                None
            }
        }
    }

    // Volta para edição sem concluir (ex.: colisão de e-mail detectada)
    pub fn reset(&mut self) {
        self.phase = FormPhase::Editing;
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{error::validation_error, notice::NoticeKind};

    #[test]
    fn test_double_submit_is_blocked() {
        let mut state = SubmitState::default();
        state.begin(Ok(())).unwrap();
        assert!(state.is_submitting());
        assert!(matches!(state.begin(Ok(())), Err(AppError::AlreadySubmitting)));
    }

    #[test]
    fn test_validation_failure_stays_editing() {
        let mut state = SubmitState::default();
        let result = state.begin(Err(validation_error("nome", "O nome é obrigatório.")));
        assert!(result.is_err());
        assert_eq!(state.phase(), FormPhase::Editing);
        assert_eq!(state.notices()[0].kind, NoticeKind::Warning);
    }

    #[test]
    fn test_finish_transitions() {
        let mut state = SubmitState::default();
        state.begin(Ok(())).unwrap();
        assert_eq!(state.finish::<()>(Err(AppError::Timeout), "ok"), None);
        assert_eq!(state.phase(), FormPhase::Editing);

        state.begin(Ok(())).unwrap();
        assert_eq!(state.finish(Ok(5), "Salvo!"), Some(5));
        assert_eq!(state.phase(), FormPhase::Success);
        let notices = state.take_notices();
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[1], Notice::success("Salvo!"));
        assert!(state.notices().is_empty());
    }
}
