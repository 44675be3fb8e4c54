// src/db/cliente_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::cliente::{status, Cliente, CreateClientePayload},
    services::event_bus::{EventBus, MudancaTabela, TABELA_CLIENTES},
};

#[derive(Clone)]
pub struct ClienteRepository {
    pool: PgPool,
    bus: EventBus,
}

impl ClienteRepository {
    pub fn new(pool: PgPool, bus: EventBus) -> Self {
        Self { pool, bus }
    }

    pub async fn create(&self, payload: &CreateClientePayload) -> Result<Cliente, AppError> {
        let status_campanha = payload
            .status_campanha
            .clone()
            .unwrap_or_else(|| status::CLIENTE_NOVO.to_string());

        let cliente = sqlx::query_as::<_, Cliente>(
            r#"
            INSERT INTO todos_clientes
                (nome_cliente, email_cliente, telefone, vendedor, email_gestor,
                 status_campanha, valor_venda_inicial)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&payload.nome_cliente)
        .bind(&payload.email_cliente)
        .bind(&payload.telefone)
        .bind(&payload.vendedor)
        .bind(&payload.email_gestor)
        .bind(&status_campanha)
        .bind(payload.valor_venda_inicial)
        .fetch_one(&self.pool)
        .await?;

        self.bus.publish(MudancaTabela::new(TABELA_CLIENTES));

        Ok(cliente)
    }

    pub async fn list_all(&self) -> Result<Vec<Cliente>, AppError> {
        let clientes = sqlx::query_as::<_, Cliente>(
            "SELECT * FROM todos_clientes ORDER BY created_at DESC NULLS LAST",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(clientes)
    }

    pub async fn list_by_gestor(&self, email_gestor: &str) -> Result<Vec<Cliente>, AppError> {
        let clientes = sqlx::query_as::<_, Cliente>(
            r#"
            SELECT * FROM todos_clientes
            WHERE email_gestor = $1
            ORDER BY created_at DESC NULLS LAST
            "#,
        )
        .bind(email_gestor)
        .fetch_all(&self.pool)
        .await?;

        Ok(clientes)
    }

    pub async fn list_by_vendedor(&self, vendedor: &str) -> Result<Vec<Cliente>, AppError> {
        let clientes = sqlx::query_as::<_, Cliente>(
            r#"
            SELECT * FROM todos_clientes
            WHERE vendedor = $1
            ORDER BY created_at DESC NULLS LAST
            "#,
        )
        .bind(vendedor)
        .fetch_all(&self.pool)
        .await?;

        Ok(clientes)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Cliente>, AppError> {
        let cliente = sqlx::query_as::<_, Cliente>("SELECT * FROM todos_clientes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(cliente)
    }

    /// Lê o cliente travando a linha (`FOR UPDATE`) até o fim da transação.
    /// É a leitura usada nas checagens de elegibilidade: duas solicitações
    /// concorrentes para o mesmo cliente serializam aqui.
    pub async fn find_by_id_for_update(
        &self,
        tx: &mut sqlx::Transaction<'_, Postgres>,
        id: i64,
    ) -> Result<Option<Cliente>, AppError> {
        let cliente = sqlx::query_as::<_, Cliente>(
            "SELECT * FROM todos_clientes WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(cliente)
    }

    // Usado dentro da transação de saque; quem publica o evento é o serviço,
    // depois do commit.
    pub async fn set_saque_solicitado<'e, E>(
        &self,
        executor: E,
        id: i64,
        solicitado: bool,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE todos_clientes SET saque_solicitado = $2 WHERE id = $1")
            .bind(id)
            .bind(solicitado)
            .execute(executor)
            .await?;

        Ok(())
    }

    /// Marca a comissão como paga e move o destaque `eh_ultimo_pago` para
    /// este cliente (limpando os demais do mesmo gestor). Roda dentro da
    /// transação de pagamento do saque.
    pub async fn marcar_comissao_paga(
        &self,
        tx: &mut sqlx::Transaction<'_, Postgres>,
        id: i64,
        email_gestor: &str,
        valor_pago: Decimal,
    ) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE todos_clientes SET eh_ultimo_pago = false WHERE email_gestor = $1",
        )
        .bind(email_gestor)
        .execute(&mut **tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE todos_clientes
            SET comissao_paga = true,
                comissao = 'Pago',
                eh_ultimo_pago = true,
                valor_comissao = $2
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(valor_pago)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    pub fn notify_changed(&self) {
        self.bus.publish(MudancaTabela::new(TABELA_CLIENTES));
    }
}
