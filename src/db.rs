// src/db.rs

pub mod cliente_repo;
pub mod saque_repo;
pub mod user_repo;

pub use cliente_repo::ClienteRepository;
pub use saque_repo::SaqueRepository;
pub use user_repo::UserRepository;
