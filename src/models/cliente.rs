// src/models/cliente.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

// Valores de `status_campanha` que o motor de comissões precisa reconhecer.
// A coluna é texto livre no banco legado; o restante dos status só importa
// para a UI.
pub mod status {
    pub const CLIENTE_NOVO: &str = "Cliente Novo";
    pub const OTIMIZACAO: &str = "Otimização";
    pub const OFF: &str = "Off";
    pub const REEMBOLSO: &str = "Reembolso";
    pub const NO_AR: &str = "No Ar";
    pub const CAMPANHA_NO_AR: &str = "Campanha no Ar";
    pub const PROBLEMA: &str = "Problema";
}

// Registro da tabela legada `todos_clientes`. As colunas ficam em pt-BR e
// snake_case porque este é o formato que o front já consome.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Cliente {
    pub id: i64,

    #[schema(example = "Maria da Silva")]
    pub nome_cliente: String,

    #[schema(example = "maria@email.com")]
    pub email_cliente: Option<String>,

    #[schema(example = "+55 11 91234-5678")]
    pub telefone: Option<String>,

    #[schema(example = "joao.vendedor@trafegoporcents.com")]
    pub vendedor: Option<String>,

    #[schema(example = "ana.gestora@trafegoporcents.com")]
    pub email_gestor: Option<String>,

    #[schema(example = "Cliente Novo")]
    pub status_campanha: Option<String>,

    // Pode vir NULL em registros antigos; um cliente sem data de criação
    // não entra em nenhum balde de data.
    pub created_at: Option<DateTime<Utc>>,

    #[schema(example = "60.00")]
    pub valor_comissao: Option<Decimal>,

    // Marcador textual legado ("Pendente" / "Pago")
    #[schema(example = "Pendente")]
    pub comissao: Option<String>,

    pub comissao_paga: bool,
    pub eh_ultimo_pago: bool,
    pub saque_solicitado: bool,

    // Só 350 e 500 têm regra de comissão fixa; qualquer outro valor é
    // tratado como "sem tier".
    #[schema(example = "500.00")]
    pub valor_venda_inicial: Option<Decimal>,
}

impl Cliente {
    pub fn status(&self) -> &str {
        self.status_campanha.as_deref().unwrap_or("")
    }
}

// Payload de cadastro de cliente (aba "Adicionar Cliente")
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateClientePayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres"))]
    #[schema(example = "Maria da Silva")]
    pub nome_cliente: String,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    #[schema(example = "maria@email.com")]
    pub email_cliente: Option<String>,

    #[schema(example = "+55 11 91234-5678")]
    pub telefone: Option<String>,

    #[schema(example = "joao.vendedor@trafegoporcents.com")]
    pub vendedor: Option<String>,

    #[schema(example = "ana.gestora@trafegoporcents.com")]
    pub email_gestor: Option<String>,

    // Se omitido, o cliente entra no fluxo "Cliente Novo"
    #[schema(example = "Cliente Novo")]
    pub status_campanha: Option<String>,

    #[schema(example = "500.00")]
    pub valor_venda_inicial: Option<Decimal>,
}
