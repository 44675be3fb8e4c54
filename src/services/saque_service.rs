// src/services/saque_service.rs

use std::collections::HashSet;

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ClienteRepository, SaqueRepository},
    models::{
        auth::User,
        comissao::PapelComissao,
        saque::{SolicitacaoSaque, StatusSaque},
    },
    services::comissao_service,
};

/// Transições aceitas pelo ciclo de vida do saque:
/// pendente → aprovado | rejeitado | pago, aprovado → pago.
pub fn transicao_valida(de: StatusSaque, para: StatusSaque) -> bool {
    matches!(
        (de, para),
        (StatusSaque::Pendente, StatusSaque::Aprovado)
            | (StatusSaque::Pendente, StatusSaque::Rejeitado)
            | (StatusSaque::Pendente, StatusSaque::Pago)
            | (StatusSaque::Aprovado, StatusSaque::Pago)
    )
}

/// O que cada transição faz com o cliente da solicitação.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EfeitoNoCliente {
    Nenhum,
    /// Rejeitar limpa `saque_solicitado`: a comissão volta para "disponível"
    LiberarComissao,
    /// Pagar marca `comissao_paga` e move o destaque `eh_ultimo_pago`
    MarcarPaga,
}

pub fn efeito_no_cliente(novo_status: StatusSaque) -> EfeitoNoCliente {
    match novo_status {
        StatusSaque::Rejeitado => EfeitoNoCliente::LiberarComissao,
        StatusSaque::Pago => EfeitoNoCliente::MarcarPaga,
        StatusSaque::Pendente | StatusSaque::Aprovado => EfeitoNoCliente::Nenhum,
    }
}

#[derive(Clone)]
pub struct SaqueService {
    pool: PgPool,
    cliente_repo: ClienteRepository,
    saque_repo: SaqueRepository,
}

impl SaqueService {
    pub fn new(pool: PgPool, cliente_repo: ClienteRepository, saque_repo: SaqueRepository) -> Self {
        Self { pool, cliente_repo, saque_repo }
    }

    /// Gestor solicita o saque da comissão de um cliente. Só passa se o
    /// cliente estiver no balde "disponível para saque"; o valor é derivado
    /// pela tabela no servidor, nunca aceito do front.
    pub async fn solicitar(
        &self,
        cliente_id: i64,
        gestor: &User,
    ) -> Result<SolicitacaoSaque, AppError> {
        // --- INÍCIO DA TRANSAÇÃO ---
        // A elegibilidade é checada com a linha do cliente travada: duas
        // solicitações concorrentes serializam no FOR UPDATE e a segunda
        // enxerga `saque_solicitado = true`. O índice parcial em
        // `solicitacoes_saque` cobre o que escapar por outro caminho.
        let mut tx = self.pool.begin().await?;

        let cliente = self
            .cliente_repo
            .find_by_id_for_update(&mut tx, cliente_id)
            .await?
            .ok_or(AppError::ClienteNotFound)?;

        let pagas: HashSet<i64> = self
            .saque_repo
            .clientes_com_saque_pago(cliente.email_gestor.as_deref())
            .await?
            .into_iter()
            .collect();

        if !comissao_service::is_disponivel_para_saque(&cliente, &pagas) {
            return Err(AppError::ComissaoIndisponivel);
        }

        let valor = comissao_service::commission_for_display(&cliente, PapelComissao::Gestor);

        let saque = self
            .saque_repo
            .create(&mut tx, cliente_id, &gestor.email, &gestor.nome, valor)
            .await?;

        self.cliente_repo
            .set_saque_solicitado(&mut *tx, cliente_id, true)
            .await?;

        tx.commit().await?;
        // --- FIM DA TRANSAÇÃO ---

        tracing::info!(
            "💸 Saque solicitado: cliente {} | gestor {} | R$ {}",
            cliente_id,
            gestor.email,
            valor
        );

        // Eventos só depois do commit: nada de invalidar cache para um
        // estado que pode sofrer rollback.
        self.saque_repo.notify_changed();
        self.cliente_repo.notify_changed();

        Ok(saque)
    }

    pub async fn list(
        &self,
        status: Option<StatusSaque>,
    ) -> Result<Vec<SolicitacaoSaque>, AppError> {
        self.saque_repo.list(status).await
    }

    /// Admin processa uma solicitação. A leitura inicial valida a transição
    /// para devolver o erro certo; quem decide de verdade é o UPDATE
    /// condicionado ao status atual, dentro da transação.
    pub async fn processar(
        &self,
        id: Uuid,
        novo_status: StatusSaque,
    ) -> Result<SolicitacaoSaque, AppError> {
        let saque = self
            .saque_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::SaqueNotFound)?;

        if saque.status_saque.is_terminal() {
            return Err(AppError::SaqueJaProcessado);
        }

        if !transicao_valida(saque.status_saque, novo_status) {
            return Err(AppError::TransicaoSaqueInvalida);
        }

        // --- INÍCIO DA TRANSAÇÃO ---
        let mut tx = self.pool.begin().await?;

        // Zero linhas = outro admin processou entre a leitura e o UPDATE
        let atualizado = self
            .saque_repo
            .update_status(&mut tx, id, saque.status_saque, novo_status)
            .await?
            .ok_or(AppError::SaqueJaProcessado)?;

        match efeito_no_cliente(novo_status) {
            EfeitoNoCliente::LiberarComissao => {
                self.cliente_repo
                    .set_saque_solicitado(&mut *tx, saque.cliente_id, false)
                    .await?;
            }
            EfeitoNoCliente::MarcarPaga => {
                self.cliente_repo
                    .marcar_comissao_paga(
                        &mut tx,
                        saque.cliente_id,
                        &saque.email_gestor,
                        saque.valor_comissao,
                    )
                    .await?;
            }
            EfeitoNoCliente::Nenhum => {}
        }

        tx.commit().await?;
        // --- FIM DA TRANSAÇÃO ---

        tracing::info!(
            "✅ Saque {} processado: {:?} -> {:?}",
            id,
            saque.status_saque,
            novo_status
        );

        self.saque_repo.notify_changed();
        self.cliente_repo.notify_changed();

        Ok(atualizado)
    }
}
