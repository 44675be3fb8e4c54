// src/handlers.rs

pub mod auth;
pub mod clientes;
pub mod comissoes;
pub mod saques;
