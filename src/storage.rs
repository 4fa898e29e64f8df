pub mod session_store;
pub use session_store::{FileStore, MemoryStore, SessionStore};
pub mod supplier_repo;
pub use supplier_repo::SupplierRepository;
