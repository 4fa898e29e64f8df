pub mod api_client;
pub use api_client::ApiClient;
pub mod auth;
pub use auth::AuthService;
pub mod cep_service;
pub use cep_service::{CepLookup, ViaCepClient};
pub mod cliente_service;
pub use cliente_service::ClienteService;
pub mod entidade_service;
pub use entidade_service::EntidadeService;
pub mod supplier_service;
pub use supplier_service::SupplierService;
pub mod usuario_service;
pub use usuario_service::UsuarioService;

use crate::common::error::AppError;

// Os serviços registram a falha e repassam o erro para quem chamou
pub(crate) fn logged(action: &'static str) -> impl FnOnce(AppError) -> AppError {
    move |err| {
        tracing::error!("❌ Falha ao {}: {}", action, err);
        err
    }
}
