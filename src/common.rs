pub mod error;
pub mod jwt;
pub mod mask;
pub mod notice;
pub mod search;
