// src/pages/login_page.rs

use validator::Validate;

use crate::{
    common::{error::AppError, notice::Notice},
    forms::{FormPhase, SubmitState},
    models::auth::{ChangePasswordPayload, LoginUserPayload},
    routes::Route,
    services::AuthService,
    session::Session,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStep {
    Credentials,
    // O backend exige troca de senha antes de liberar o acesso
    ChangePassword,
    Done,
}

pub struct LoginPage {
    auth: AuthService,
    credentials: LoginUserPayload,
    change: ChangePasswordPayload,
    step: LoginStep,
    state: SubmitState,
}

impl LoginPage {
    pub fn new(auth: AuthService) -> Self {
        Self {
            auth,
            credentials: LoginUserPayload::default(),
            change: ChangePasswordPayload::default(),
            step: LoginStep::Credentials,
            state: SubmitState::default(),
        }
    }

    pub fn step(&self) -> LoginStep {
        self.step
    }

    pub fn phase(&self) -> FormPhase {
        self.state.phase()
    }

    pub fn set_email(&mut self, email: &str) {
        self.credentials.email = email.trim().to_string();
    }

    pub fn set_senha(&mut self, senha: &str) {
        self.credentials.senha = senha.to_string();
    }

    pub fn set_nova_senha(&mut self, nova_senha: &str) {
        self.change.nova_senha = nova_senha.to_string();
    }

    pub fn notices(&self) -> &[Notice] {
        self.state.notices()
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.state.take_notices()
    }

    /// Envia as credenciais. `Some(rota)` quando a sessão foi iniciada.
    pub async fn submit(&mut self, session: &mut Session) -> Option<Route> {
        let validation = self.credentials.validate().map_err(AppError::from);
        if self.state.begin(validation).is_err() {
            return None;
        }

        // Nada de sessão antiga sobrevivendo a uma nova tentativa
        if let Err(err) = session.begin_login() {
            return self.state.finish(Err(err), "");
        }

        let response = match self.auth.login_user(&self.credentials).await {
            Ok(response) => response,
            Err(err) => return self.state.finish(Err(err), ""),
        };

        if response.must_change_password {
            self.change = ChangePasswordPayload {
                email: self.credentials.email.clone(),
                senha_atual: self.credentials.senha.clone(),
                nova_senha: String::new(),
            };
            self.step = LoginStep::ChangePassword;
            self.state.reset();
            self.state.push(Notice::info("Defina uma nova senha para continuar."));
            return None;
        }

        let result = session.login(response.token, response.usuario.as_ref());
        let route = self.state.finish(result, "Login realizado com sucesso!")?;
        self.step = LoginStep::Done;
        Some(route)
    }

    /// Troca obrigatória de senha. Volta para as credenciais com a senha nova.
    pub async fn submit_change_password(&mut self) -> bool {
        if self.step != LoginStep::ChangePassword {
            return false;
        }
        let validation = self.change.validate().map_err(AppError::from);
        if self.state.begin(validation).is_err() {
            return false;
        }

        let result = self.auth.change_password(&self.change).await;
        if self.state.finish(result, "Senha alterada! Entre com a nova senha.").is_none() {
            return false;
        }

        self.credentials.senha = std::mem::take(&mut self.change.nova_senha);
        self.change = ChangePasswordPayload::default();
        self.step = LoginStep::Credentials;
        self.state.reset();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        common::notice::NoticeKind,
        services::ApiClient,
        storage::{MemoryStore, SessionStore},
    };
    use std::{sync::Arc, time::Duration};

    fn page_and_session() -> (LoginPage, Session) {
        let store: Arc<dyn SessionStore> = Arc::new(MemoryStore::new());
        let api = ApiClient::new("http://127.0.0.1:9", store.clone()).unwrap();
        (
            LoginPage::new(AuthService::new(api, Duration::from_secs(1))),
            Session::new(store),
        )
    }

    #[tokio::test]
    async fn test_invalid_email_never_calls_backend() {
        let (mut page, mut session) = page_and_session();
        page.set_email("nao-e-email");
        page.set_senha("123456");

        assert!(page.submit(&mut session).await.is_none());
        assert_eq!(page.phase(), FormPhase::Editing);
        assert_eq!(page.notices()[0].kind, NoticeKind::Warning);
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_change_password_only_from_its_step() {
        let (mut page, _) = page_and_session();
        assert!(!page.submit_change_password().await);
        assert_eq!(page.step(), LoginStep::Credentials);
    }
}
