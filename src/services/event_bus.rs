// src/services/event_bus.rs
//
// Barramento de mudanças em processo, apoiado em `tokio::sync::broadcast`.
// Os repositórios publicam um evento por tabela depois de cada escrita; quem
// assina só usa o evento como gatilho para re-buscar e reclassificar. O
// payload não carrega dados de linha e nenhuma ordem de entrega é garantida
// além de "eventualmente dispara a recomputação".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

pub const TABELA_CLIENTES: &str = "todos_clientes";
pub const TABELA_SAQUES: &str = "solicitacoes_saque";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MudancaTabela {
    pub tabela: String,
    pub quando: DateTime<Utc>,
}

impl MudancaTabela {
    pub fn new(tabela: impl Into<String>) -> Self {
        Self {
            tabela: tabela.into(),
            quando: Utc::now(),
        }
    }
}

const CAPACIDADE_PADRAO: usize = 256;

#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<MudancaTabela>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CAPACIDADE_PADRAO);
        Self { sender }
    }

    /// Publica uma mudança. Sem assinantes o envio falha silenciosamente;
    /// não há nada a recomputar.
    pub fn publish(&self, evento: MudancaTabela) {
        if let Err(e) = self.sender.send(evento) {
            tracing::debug!("Evento descartado (sem assinantes): {}", e.0.tabela);
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<MudancaTabela> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
