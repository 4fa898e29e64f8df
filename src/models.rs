pub mod auth;
pub mod cep;
pub mod cliente;
pub mod entidade;
pub mod pessoa;
pub mod supplier;
pub mod usuario;

use serde::Deserialize;

// O backend às vezes embrulha a resposta em { "data": ... } e às vezes não.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    pub fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(value) => value,
        }
    }
}
