// src/models.rs

pub mod auth;
pub mod cliente;
pub mod comissao;
pub mod saque;
