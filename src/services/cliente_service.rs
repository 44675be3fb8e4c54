// src/services/cliente_service.rs

use crate::{
    common::error::AppError,
    db::ClienteRepository,
    models::{
        cliente::{Cliente, CreateClientePayload},
        comissao::{PainelClientes, PeriodoFiltro},
    },
    services::periodo_service,
};

#[derive(Clone)]
pub struct ClienteService {
    repo: ClienteRepository,
}

impl ClienteService {
    pub fn new(repo: ClienteRepository) -> Self {
        Self { repo }
    }

    pub async fn create(&self, payload: &CreateClientePayload) -> Result<Cliente, AppError> {
        self.repo.create(payload).await
    }

    /// O painel de clientes: lista filtrada pelo seletor de período + os
    /// quatro baldes de data para os cards.
    pub async fn painel(
        &self,
        gestor: Option<&str>,
        vendedor: Option<&str>,
        filtro: &PeriodoFiltro,
    ) -> Result<PainelClientes, AppError> {
        let clientes = match (gestor, vendedor) {
            (Some(email), _) => self.repo.list_by_gestor(email).await?,
            (None, Some(email)) => self.repo.list_by_vendedor(email).await?,
            (None, None) => self.repo.list_all().await?,
        };

        let hoje = periodo_service::hoje_negocio();
        let filtrados = periodo_service::filter_by_periodo(&clientes, filtro, hoje);
        let organizados = periodo_service::organize_by_date(&filtrados, hoje);

        Ok(PainelClientes {
            total: clientes.len(),
            filtrados,
            organizados,
        })
    }
}
