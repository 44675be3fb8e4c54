// src/services/comissao_service.rs
//
// O motor de comissões: a tabela fechada do fluxo "Cliente Novo", os três
// baldes de elegibilidade e o agregado para os cards do painel.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::RwLock;

use crate::{
    common::error::AppError,
    db::{ClienteRepository, SaqueRepository},
    models::{
        cliente::{status, Cliente},
        comissao::{
            CarteiraComissoes, CarteiraView, ItemCarteira, PapelComissao, RegraComissao,
            ResumoComissoes, TotalBucket,
        },
    },
};

// -----------------------------------------------------------------------------
// Tabela de comissões duplas do Cliente Novo
// Vendedor: R$ 500 → R$ 40 | R$ 350 → R$ 30
// Gestor/Admin: R$ 500 → R$ 100 | R$ 350 → R$ 80
// -----------------------------------------------------------------------------

// (valor_venda, comissão_vendedor, comissão_gestor). A tabela é fechada de
// propósito: o produto só é vendido nesses dois preços.
const TABELA_CLIENTE_NOVO: [(u32, u32, u32); 2] = [(500, 40, 100), (350, 30, 80)];

// Quando o Cliente Novo não tem valor de venda válido registrado, assumimos
// R$ 500 (o caso dominante). É uma heurística de qualidade de dados, não uma
// garantia: o valor real da venda pode ter sido outro.
const VALOR_VENDA_ASSUMIDO: u32 = 500;

/// Comissão padrão do banco legado para registros fora do fluxo Cliente Novo.
pub fn comissao_padrao() -> Decimal {
    Decimal::from(60)
}

/// A tabela de regras, no formato consumido pela UI.
pub fn regras_cliente_novo() -> Vec<RegraComissao> {
    TABELA_CLIENTE_NOVO
        .iter()
        .map(|&(venda, vendedor, gestor)| RegraComissao {
            valor_venda: Decimal::from(venda),
            comissao_vendedor: Decimal::from(vendedor),
            comissao_gestor: Decimal::from(gestor),
        })
        .collect()
}

/// Busca exata na tabela. Sem interpolação, sem arredondamento: valor de
/// venda fora da tabela rende comissão zero.
pub fn dual_commission(valor_venda: Decimal, papel: PapelComissao) -> Decimal {
    for (venda, vendedor, gestor) in TABELA_CLIENTE_NOVO {
        if valor_venda == Decimal::from(venda) {
            return match papel {
                PapelComissao::Vendedor => Decimal::from(vendedor),
                PapelComissao::Gestor => Decimal::from(gestor),
            };
        }
    }
    Decimal::ZERO
}

pub fn is_cliente_novo(cliente: &Cliente) -> bool {
    cliente.status() == status::CLIENTE_NOVO
}

/// Um valor de venda só é "válido" se bate exatamente com um tier da tabela.
pub fn has_valid_sale_value(valor_venda: Option<Decimal>) -> bool {
    match valor_venda {
        Some(v) => TABELA_CLIENTE_NOVO.iter().any(|&(venda, _, _)| v == Decimal::from(venda)),
        None => false,
    }
}

/// O valor de comissão exibido para um cliente:
/// 1. Cliente Novo com valor de venda válido → tabela dupla;
/// 2. Cliente Novo sem valor válido → assume venda de R$ 500;
/// 3. qualquer outro fluxo → `valor_comissao` do banco, ou o padrão de R$ 60.
pub fn commission_for_display(cliente: &Cliente, papel: PapelComissao) -> Decimal {
    if is_cliente_novo(cliente) {
        if has_valid_sale_value(cliente.valor_venda_inicial) {
            // unwrap é seguro: has_valid_sale_value exige Some
            return dual_commission(cliente.valor_venda_inicial.unwrap(), papel);
        }
        return dual_commission(Decimal::from(VALOR_VENDA_ASSUMIDO), papel);
    }

    cliente.valor_comissao.unwrap_or_else(comissao_padrao)
}

// -----------------------------------------------------------------------------
// Elegibilidade
// -----------------------------------------------------------------------------

/// Comissão em aberto: campanha não encerrada, ainda não paga e sem saque
/// solicitado.
pub fn is_comissao_pendente(cliente: &Cliente) -> bool {
    let st = cliente.status();
    st != status::OFF
        && st != status::REEMBOLSO
        && !cliente.comissao_paga
        && !cliente.saque_solicitado
}

/// Comissão que o gestor pode sacar agora: campanha em Otimização, nada
/// solicitado nem pago, e sem solicitação de saque já paga para o cliente.
pub fn is_disponivel_para_saque(cliente: &Cliente, pagas: &HashSet<i64>) -> bool {
    cliente.status() == status::OTIMIZACAO
        && !cliente.saque_solicitado
        && !cliente.comissao_paga
        && !pagas.contains(&cliente.id)
}

/// Comissão que já virou dinheiro: saque pago ou marcada como paga no banco.
pub fn is_ja_recebida(cliente: &Cliente, pagas: &HashSet<i64>) -> bool {
    pagas.contains(&cliente.id) || cliente.comissao_paga
}

/// Particiona a carteira nos três baldes. "pendentes" e "disponiveis" não
/// são mutuamente exclusivos; ver o comentário em `CarteiraComissoes`.
pub fn partition_carteira(clientes: &[Cliente], pagas: &HashSet<i64>) -> CarteiraComissoes {
    let mut carteira = CarteiraComissoes::default();

    for cliente in clientes {
        if is_comissao_pendente(cliente) {
            carteira.pendentes.push(cliente.clone());
        }
        if is_disponivel_para_saque(cliente, pagas) {
            carteira.disponiveis.push(cliente.clone());
        }
        if is_ja_recebida(cliente, pagas) {
            carteira.recebidas.push(cliente.clone());
        }
    }

    carteira
}

// -----------------------------------------------------------------------------
// Agregação
// -----------------------------------------------------------------------------

fn total_bucket(clientes: &[Cliente]) -> TotalBucket {
    TotalBucket {
        quantidade: clientes.len() as u64,
        // Comissão ausente vale o padrão de R$ 60, nunca zero, senão os
        // registros antigos (antes da coluna existir) somem do total.
        valor_total: clientes
            .iter()
            .map(|c| c.valor_comissao.unwrap_or_else(comissao_padrao))
            .sum(),
    }
}

/// Redução pura dos três baldes para os cards do painel. Lista vazia vira
/// resumo zerado, sem erro.
pub fn summarize(carteira: &CarteiraComissoes) -> ResumoComissoes {
    ResumoComissoes {
        pendentes: total_bucket(&carteira.pendentes),
        disponiveis: total_bucket(&carteira.disponiveis),
        recebidas: total_bucket(&carteira.recebidas),
    }
}

// -----------------------------------------------------------------------------
// Orquestração (busca → classifica → agrega)
// -----------------------------------------------------------------------------

#[derive(Default)]
struct EstadoCache {
    // Incrementada a cada invalidação; um resumo computado antes de uma
    // invalidação nunca pode ser gravado depois dela, senão dados velhos
    // ficam servidos até a próxima mutação.
    geracao: u64,
    por_gestor: HashMap<String, ResumoComissoes>,
}

/// Cache do resumo por gestor, com contador de geração para não gravar
/// resultado velho por cima de uma invalidação concorrente.
#[derive(Clone, Default)]
pub struct CacheResumo {
    estado: Arc<RwLock<EstadoCache>>,
}

impl CacheResumo {
    pub async fn get(&self, chave: &str) -> Option<ResumoComissoes> {
        self.estado.read().await.por_gestor.get(chave).cloned()
    }

    /// Geração vigente; capture ANTES de buscar os dados que vão alimentar
    /// o `guardar`.
    pub async fn geracao(&self) -> u64 {
        self.estado.read().await.geracao
    }

    /// Grava o resumo só se nenhuma invalidação aconteceu desde `geracao`.
    /// Devolve se gravou.
    pub async fn guardar(&self, geracao: u64, chave: String, resumo: ResumoComissoes) -> bool {
        let mut estado = self.estado.write().await;
        if estado.geracao != geracao {
            return false;
        }
        estado.por_gestor.insert(chave, resumo);
        true
    }

    pub async fn invalidar(&self) {
        let mut estado = self.estado.write().await;
        estado.geracao += 1;
        estado.por_gestor.clear();
    }
}

#[derive(Clone)]
pub struct ComissaoService {
    cliente_repo: ClienteRepository,
    saque_repo: SaqueRepository,
    // Cache por gestor, invalidado pelo barramento de eventos. Otimização
    // apenas: a reclassificação é pura e barata perto do round-trip de rede.
    cache_resumo: CacheResumo,
}

impl ComissaoService {
    pub fn new(cliente_repo: ClienteRepository, saque_repo: SaqueRepository) -> Self {
        Self {
            cliente_repo,
            saque_repo,
            cache_resumo: CacheResumo::default(),
        }
    }

    async fn carregar(
        &self,
        gestor: Option<&str>,
    ) -> Result<(Vec<Cliente>, HashSet<i64>), AppError> {
        let clientes = match gestor {
            Some(email) => self.cliente_repo.list_by_gestor(email).await?,
            None => self.cliente_repo.list_all().await?,
        };
        let pagas: HashSet<i64> = self
            .saque_repo
            .clientes_com_saque_pago(gestor)
            .await?
            .into_iter()
            .collect();
        Ok((clientes, pagas))
    }

    /// Os três baldes da carteira, cada cliente já com o valor de exibição
    /// resolvido pela tabela para o papel pedido.
    pub async fn carteira(
        &self,
        gestor: Option<&str>,
        papel: PapelComissao,
    ) -> Result<CarteiraView, AppError> {
        let (clientes, pagas) = self.carregar(gestor).await?;
        let carteira = partition_carteira(&clientes, &pagas);

        let com_valor = |bucket: Vec<Cliente>| -> Vec<ItemCarteira> {
            bucket
                .into_iter()
                .map(|cliente| {
                    let valor_exibicao = commission_for_display(&cliente, papel);
                    ItemCarteira { cliente, valor_exibicao }
                })
                .collect()
        };

        Ok(CarteiraView {
            pendentes: com_valor(carteira.pendentes),
            disponiveis: com_valor(carteira.disponiveis),
            recebidas: com_valor(carteira.recebidas),
        })
    }

    /// Resumo agregado (com cache por gestor).
    pub async fn resumo(&self, gestor: Option<&str>) -> Result<ResumoComissoes, AppError> {
        let chave = gestor.unwrap_or("").to_string();

        if let Some(resumo) = self.cache_resumo.get(&chave).await {
            return Ok(resumo);
        }

        // A geração é capturada antes da busca: se uma escrita invalidar o
        // cache enquanto computamos, este resultado não é gravado.
        let geracao = self.cache_resumo.geracao().await;

        let (clientes, pagas) = self.carregar(gestor).await?;
        let resumo = summarize(&partition_carteira(&clientes, &pagas));

        self.cache_resumo
            .guardar(geracao, chave, resumo.clone())
            .await;

        Ok(resumo)
    }

    /// Derruba o cache inteiro; o próximo pedido re-busca e reclassifica.
    /// Chamado pela task que escuta o barramento de mudanças.
    pub async fn invalidar_cache(&self) {
        self.cache_resumo.invalidar().await;
    }
}
