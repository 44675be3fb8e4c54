// src/services.rs

pub mod auth;
pub mod cliente_service;
pub mod comissao_service;
pub mod event_bus;
pub mod periodo_service;
pub mod saque_service;
