// src/models/saque.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "status_saque", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StatusSaque {
    Pendente,  // Aguardando o admin
    Aprovado,  // Liberado, mas ainda não pago
    Rejeitado, // Devolve a comissão para "disponível"
    Pago,      // Dinheiro saiu; cliente vira "já recebida"
}

impl StatusSaque {
    // Estados terminais não aceitam nova transição
    pub fn is_terminal(&self) -> bool {
        matches!(self, StatusSaque::Rejeitado | StatusSaque::Pago)
    }
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SolicitacaoSaque {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,

    pub cliente_id: i64,

    #[schema(example = "ana.gestora@trafegoporcents.com")]
    pub email_gestor: String,

    #[schema(example = "Ana Gestora")]
    pub nome_gestor: String,

    #[schema(example = "100.00")]
    pub valor_comissao: Decimal,

    pub status_saque: StatusSaque,

    pub data_solicitacao: DateTime<Utc>,
    pub processado_em: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Payload de criação (o valor é derivado no servidor, nunca confiado ao front)
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSaquePayload {
    pub cliente_id: i64,
}

// Payload de transição de status (admin)
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateSaquePayload {
    #[schema(example = "aprovado")]
    pub status_saque: StatusSaque,
}
