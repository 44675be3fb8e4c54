// src/models/comissao.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::cliente::Cliente;

// Quem recebe a comissão. O gestor e o admin compartilham a mesma tabela.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PapelComissao {
    Vendedor,
    Gestor,
}

// Uma linha da tabela fechada de comissões do fluxo "Cliente Novo".
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RegraComissao {
    #[schema(example = "500.00")]
    pub valor_venda: Decimal,
    #[schema(example = "40.00")]
    pub comissao_vendedor: Decimal,
    #[schema(example = "100.00")]
    pub comissao_gestor: Decimal,
}

// --- Filtro de período (o "active filter" da UI) ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodoFiltro {
    Todos,
    Hoje,
    Ontem,
    Ultimos7Dias,
    EsteMes,
    EsteAno,
    Personalizado { inicio: NaiveDate, fim: NaiveDate },
}

// --- Baldes de data (cards lado a lado na UI) ---

#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct ClientesPorData {
    pub hoje: Vec<Cliente>,
    pub ontem: Vec<Cliente>,
    pub ultimos_sete_dias: Vec<Cliente>,
    pub anteriores: Vec<Cliente>,
}

// Resposta do painel de clientes: a lista filtrada + os baldes de data.
#[derive(Debug, Serialize, ToSchema)]
pub struct PainelClientes {
    pub total: usize,
    pub filtrados: Vec<Cliente>,
    pub organizados: ClientesPorData,
}

// --- Baldes de elegibilidade ---

// Atenção: "pendentes" e "disponiveis" NÃO são uma partição estrita.
// Um cliente em Otimização sem saque aparece nos dois: são duas perguntas
// diferentes ("o que está em aberto" vs. "o que dá para sacar agora") e a
// UI os mostra em cards separados.
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct CarteiraComissoes {
    pub pendentes: Vec<Cliente>,
    pub disponiveis: Vec<Cliente>,
    pub recebidas: Vec<Cliente>,
}

// Um cliente da carteira com o valor de comissão já resolvido pela tabela
// para o papel consultado (vendedor ou gestor/admin).
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ItemCarteira {
    pub cliente: Cliente,
    #[schema(example = "100.00")]
    pub valor_exibicao: Decimal,
}

#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct CarteiraView {
    pub pendentes: Vec<ItemCarteira>,
    pub disponiveis: Vec<ItemCarteira>,
    pub recebidas: Vec<ItemCarteira>,
}

// --- Métricas agregadas ---

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct TotalBucket {
    pub quantidade: u64,
    #[schema(example = "180.00")]
    pub valor_total: Decimal,
}

#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct ResumoComissoes {
    pub pendentes: TotalBucket,
    pub disponiveis: TotalBucket,
    pub recebidas: TotalBucket,
}
