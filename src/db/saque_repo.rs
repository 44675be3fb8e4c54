// src/db/saque_repo.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::Postgres;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::saque::{SolicitacaoSaque, StatusSaque},
    services::event_bus::{EventBus, MudancaTabela, TABELA_SAQUES},
};

#[derive(Clone)]
pub struct SaqueRepository {
    pool: PgPool,
    bus: EventBus,
}

impl SaqueRepository {
    pub fn new(pool: PgPool, bus: EventBus) -> Self {
        Self { pool, bus }
    }

    pub async fn create(
        &self,
        tx: &mut sqlx::Transaction<'_, Postgres>,
        cliente_id: i64,
        email_gestor: &str,
        nome_gestor: &str,
        valor_comissao: Decimal,
    ) -> Result<SolicitacaoSaque, AppError> {
        let saque = sqlx::query_as::<_, SolicitacaoSaque>(
            r#"
            INSERT INTO solicitacoes_saque
                (cliente_id, email_gestor, nome_gestor, valor_comissao)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(cliente_id)
        .bind(email_gestor)
        .bind(nome_gestor)
        .bind(valor_comissao)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| {
            // O índice parcial garante no máximo uma solicitação em aberto
            // por cliente; a segunda de duas concorrentes cai aqui.
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::ComissaoIndisponivel;
                }
            }
            AppError::DatabaseError(e)
        })?;

        Ok(saque)
    }

    pub async fn list(
        &self,
        status: Option<StatusSaque>,
    ) -> Result<Vec<SolicitacaoSaque>, AppError> {
        let saques = match status {
            Some(status) => {
                sqlx::query_as::<_, SolicitacaoSaque>(
                    r#"
                    SELECT * FROM solicitacoes_saque
                    WHERE status_saque = $1
                    ORDER BY created_at DESC
                    "#,
                )
                .bind(status)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, SolicitacaoSaque>(
                    "SELECT * FROM solicitacoes_saque ORDER BY created_at DESC",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(saques)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<SolicitacaoSaque>, AppError> {
        let saque =
            sqlx::query_as::<_, SolicitacaoSaque>("SELECT * FROM solicitacoes_saque WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(saque)
    }

    /// Transiciona o status só se a solicitação ainda estiver em `de`.
    /// `None` significa que outro processamento chegou primeiro; a checagem
    /// fora da transação é apenas para mensagens de erro melhores.
    pub async fn update_status(
        &self,
        tx: &mut sqlx::Transaction<'_, Postgres>,
        id: Uuid,
        de: StatusSaque,
        para: StatusSaque,
    ) -> Result<Option<SolicitacaoSaque>, AppError> {
        let saque = sqlx::query_as::<_, SolicitacaoSaque>(
            r#"
            UPDATE solicitacoes_saque
            SET status_saque = $3,
                processado_em = now(),
                updated_at = now()
            WHERE id = $1 AND status_saque = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(de)
        .bind(para)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(saque)
    }

    /// Ids de clientes com saque já pago, o conjunto "solicitações pagas"
    /// que alimenta a classificação de elegibilidade. `aprovado` sozinho não
    /// entra: só conta quando o dinheiro de fato saiu.
    pub async fn clientes_com_saque_pago(
        &self,
        email_gestor: Option<&str>,
    ) -> Result<Vec<i64>, AppError> {
        let ids: Vec<(i64,)> = match email_gestor {
            Some(email) => {
                sqlx::query_as(
                    r#"
                    SELECT DISTINCT cliente_id FROM solicitacoes_saque
                    WHERE status_saque = 'pago' AND email_gestor = $1
                    "#,
                )
                .bind(email)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as(
                    "SELECT DISTINCT cliente_id FROM solicitacoes_saque WHERE status_saque = 'pago'",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(ids.into_iter().map(|(id,)| id).collect())
    }

    pub fn notify_changed(&self) {
        self.bus.publish(MudancaTabela::new(TABELA_SAQUES));
    }
}
