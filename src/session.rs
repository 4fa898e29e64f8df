// src/session.rs

use std::sync::Arc;

use crate::{
    common::{
        error::{AppError, AppResult},
        jwt::{get_email_from_token, get_entidade_id_from_token, is_token_expired},
    },
    models::{auth::StoredUser, usuario::Usuario},
    routes::{MainTab, Route},
    storage::{
        session_store::{TOKEN_KEY, USER_KEY},
        SessionStore,
    },
};

/// Estado de autenticação da aplicação.
/// É passado explicitamente para quem precisa (guarda de rotas, páginas).
pub struct Session {
    store: Arc<dyn SessionStore>,
    authenticated: bool,
    user: Option<StoredUser>,
    token: Option<String>,
}

impl Session {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            authenticated: false,
            user: None,
            token: None,
        }
    }

    /// Reconstrói a sessão a partir do armazenamento.
    /// Token ausente ou expirado resulta em sessão deslogada.
    pub fn restore(store: Arc<dyn SessionStore>) -> Self {
        let mut session = Self::new(store);

        let Some(token) = session.store.get(TOKEN_KEY) else {
            return session;
        };
        if is_token_expired(&token) {
            tracing::info!("Token armazenado expirado, sessão descartada");
            return session;
        }

        let user = session
            .store
            .get(USER_KEY)
            .and_then(|raw| serde_json::from_str::<StoredUser>(&raw).ok())
            .or_else(|| user_from_token(&token, None));

        session.authenticated = true;
        session.user = user;
        session.token = Some(token);
        session
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn email(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.email.as_str())
    }

    pub fn entidade_id(&self) -> Option<i64> {
        self.user.as_ref().and_then(|u| u.entidade_id)
    }

    pub fn usuario_id(&self) -> Option<i64> {
        self.user.as_ref().and_then(|u| u.usuario_id)
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Início de toda tentativa de login: descarta a sessão em memória
    /// e o que estiver guardado.
    pub fn begin_login(&mut self) -> AppResult<()> {
        self.authenticated = false;
        self.user = None;
        self.token = None;
        self.store.clear()
    }

    /// Marca a sessão como autenticada e devolve a rota principal.
    /// E-mail e entidade vêm do usuário retornado ou, na falta dele, do próprio token.
    pub fn login(&mut self, token: String, usuario: Option<&Usuario>) -> AppResult<Route> {
        let Some(user) = user_from_token(&token, usuario) else {
            tracing::warn!("Login recusado: nenhum e-mail no usuário nem no token");
            return Err(AppError::NotAuthenticated);
        };

        self.store.set(TOKEN_KEY, &token)?;
        self.store.set(USER_KEY, &serde_json::to_string(&user)?)?;

        tracing::info!("✅ Sessão iniciada para {}", user.email);
        self.authenticated = true;
        self.user = Some(user);
        self.token = Some(token);

        Ok(Route::Main(MainTab::Overview))
    }

    pub fn logout(&mut self) -> AppResult<Route> {
        self.authenticated = false;
        self.user = None;
        self.token = None;
        self.store.clear()?;

        tracing::info!("Sessão encerrada");
        Ok(Route::Login)
    }

    /// Troca a entidade corrente (seletor de entidades).
    pub fn select_entidade(&mut self, entidade_id: i64) -> AppResult<()> {
        let Some(user) = self.user.as_mut() else {
            return Ok(());
        };
        user.entidade_id = Some(entidade_id);
        self.store.set(USER_KEY, &serde_json::to_string(user)?)?;
        tracing::info!("Entidade selecionada: {}", entidade_id);
        Ok(())
    }
}

fn user_from_token(token: &str, usuario: Option<&Usuario>) -> Option<StoredUser> {
    let email = usuario
        .map(|u| u.email.clone())
        .filter(|e| !e.is_empty())
        .or_else(|| get_email_from_token(token))?;

    Some(StoredUser {
        email,
        entidade_id: usuario
            .and_then(|u| u.entidade_id.or(u.entidade.as_ref().map(|e| e.id)))
            .or_else(|| get_entidade_id_from_token(token)),
        usuario_id: usuario.map(|u| u.id),
    })
}
