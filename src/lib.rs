// src/lib.rs
//
// Backend do painel de comissões: classifica clientes por dia de criação
// (no fuso America/Sao_Paulo), resolve a tabela dupla de comissões do fluxo
// "Cliente Novo", particiona a carteira em pendente / disponível / recebida
// e orquestra o ciclo de vida das solicitações de saque.

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
