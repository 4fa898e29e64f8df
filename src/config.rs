// src/config.rs

use std::{env, path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context;

use crate::{
    services::{
        cep_service::VIACEP_URL, ApiClient, AuthService, CepLookup, ClienteService,
        EntidadeService, SupplierService, UsuarioService, ViaCepClient,
    },
    session::Session,
    storage::{FileStore, SessionStore, SupplierRepository},
};

pub const DEFAULT_API_URL: &str = "http://localhost:3000";
pub const DEFAULT_LOGIN_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_SESSION_FILE: &str = ".maestro-session.json";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_url: String,
    pub viacep_url: String,
    pub login_timeout: Duration,
    pub session_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            viacep_url: VIACEP_URL.to_string(),
            login_timeout: Duration::from_secs(DEFAULT_LOGIN_TIMEOUT_SECS),
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
        }
    }
}

impl AppConfig {
    /// Lê o `.env` (se existir) e as variáveis de ambiente. Tudo tem padrão.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let login_timeout = match env::var("LOGIN_TIMEOUT_SECS") {
            Ok(raw) => Duration::from_secs(
                raw.trim()
                    .parse::<u64>()
                    .with_context(|| format!("LOGIN_TIMEOUT_SECS inválido: {raw}"))?,
            ),
            Err(_) => defaults.login_timeout,
        };

        Ok(Self {
            api_url: env::var("API_URL").unwrap_or(defaults.api_url),
            viacep_url: env::var("VIACEP_URL").unwrap_or(defaults.viacep_url),
            login_timeout,
            session_file: env::var("SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.session_file),
        })
    }
}

// Todas as dependências montadas uma única vez
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<dyn SessionStore>,
    pub api: ApiClient,
    pub auth_service: AuthService,
    pub entidade_service: EntidadeService,
    pub cliente_service: ClienteService,
    pub usuario_service: UsuarioService,
    pub supplier_service: SupplierService,
    pub cep_lookup: Arc<dyn CepLookup>,
}

impl AppState {
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let store: Arc<dyn SessionStore> = Arc::new(FileStore::new(config.session_file.clone()));
        Self::with_store(config, store)
    }

    pub fn with_store(config: AppConfig, store: Arc<dyn SessionStore>) -> anyhow::Result<Self> {
        let api = ApiClient::new(config.api_url.clone(), store.clone())
            .context("Falha ao criar o cliente HTTP")?;
        let cep_lookup: Arc<dyn CepLookup> = Arc::new(
            ViaCepClient::new(config.viacep_url.clone()).context("Falha ao criar o cliente do ViaCEP")?,
        );

        tracing::debug!("Backend em {}", api.base_url());

        Ok(Self {
            auth_service: AuthService::new(api.clone(), config.login_timeout),
            entidade_service: EntidadeService::new(api.clone()),
            cliente_service: ClienteService::new(api.clone()),
            usuario_service: UsuarioService::new(api.clone()),
            supplier_service: SupplierService::new(SupplierRepository::with_seed_data()),
            cep_lookup,
            api,
            store,
            config,
        })
    }

    /// Sessão reconstruída a partir do que estiver armazenado.
    pub fn session(&self) -> Session {
        Session::restore(self.store.clone())
    }
}
