/// Testes de concorrência do caminho de saque, contra um Postgres real.
/// Marcados como ignorados para não rodar sem banco; defina TEST_DATABASE_URL
/// (ou DATABASE_URL) para executá-los.
use std::env;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use cents_backend::common::error::AppError;
use cents_backend::db::{ClienteRepository, SaqueRepository};
use cents_backend::models::auth::{PerfilUsuario, User};
use cents_backend::models::cliente::status;
use cents_backend::models::saque::StatusSaque;
use cents_backend::services::event_bus::EventBus;
use cents_backend::services::saque_service::SaqueService;

async fn conectar() -> anyhow::Result<PgPool> {
    let db_url = env::var("TEST_DATABASE_URL")
        .or_else(|_| env::var("DATABASE_URL"))
        .map_err(|_| anyhow::anyhow!("Defina TEST_DATABASE_URL ou DATABASE_URL"))?;

    let pool = PgPoolOptions::new().max_connections(5).connect(&db_url).await?;
    sqlx::migrate!().run(&pool).await?;
    Ok(pool)
}

fn montar_service(pool: &PgPool) -> SaqueService {
    let bus = EventBus::new();
    let cliente_repo = ClienteRepository::new(pool.clone(), bus.clone());
    let saque_repo = SaqueRepository::new(pool.clone(), bus);
    SaqueService::new(pool.clone(), cliente_repo, saque_repo)
}

fn gestora(email: &str) -> User {
    User {
        id: Uuid::new_v4(),
        email: email.to_string(),
        nome: "Ana Gestora".to_string(),
        perfil: PerfilUsuario::Gestor,
        password_hash: String::new(),
        created_at: chrono::Utc::now(),
        updated_at: chrono::Utc::now(),
    }
}

// Cliente em Otimização, elegível para saque, com gestora única por teste
// para não colidir entre execuções.
async fn criar_cliente_disponivel(pool: &PgPool, email_gestor: &str) -> anyhow::Result<i64> {
    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO todos_clientes (nome_cliente, email_gestor, status_campanha)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind("Cliente Concorrente")
    .bind(email_gestor)
    .bind(status::OTIMIZACAO)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

#[tokio::test]
#[ignore]
async fn duas_solicitacoes_concorrentes_so_uma_passa() -> anyhow::Result<()> {
    let pool = conectar().await?;
    let service = montar_service(&pool);

    let email = format!("gestora+{}@trafegoporcents.com", Uuid::new_v4());
    let user = gestora(&email);
    let cliente_id = criar_cliente_disponivel(&pool, &email).await?;

    let a = {
        let service = service.clone();
        let user = user.clone();
        tokio::spawn(async move { service.solicitar(cliente_id, &user).await })
    };
    let b = {
        let service = service.clone();
        let user = user.clone();
        tokio::spawn(async move { service.solicitar(cliente_id, &user).await })
    };

    let resultados = [a.await?, b.await?];
    let sucessos = resultados.iter().filter(|r| r.is_ok()).count();
    assert_eq!(sucessos, 1, "exatamente uma solicitação deve passar");

    let recusada = resultados.into_iter().find(|r| r.is_err()).unwrap();
    assert!(matches!(recusada, Err(AppError::ComissaoIndisponivel)));

    // E o banco só tem uma solicitação em aberto para o cliente
    let (abertas,): (i64,) = sqlx::query_as(
        r#"
        SELECT count(*) FROM solicitacoes_saque
        WHERE cliente_id = $1 AND status_saque IN ('pendente', 'aprovado')
        "#,
    )
    .bind(cliente_id)
    .fetch_one(&pool)
    .await?;
    assert_eq!(abertas, 1);

    Ok(())
}

#[tokio::test]
#[ignore]
async fn dois_admins_processando_o_mesmo_saque_so_um_passa() -> anyhow::Result<()> {
    let pool = conectar().await?;
    let service = montar_service(&pool);

    let email = format!("gestora+{}@trafegoporcents.com", Uuid::new_v4());
    let user = gestora(&email);
    let cliente_id = criar_cliente_disponivel(&pool, &email).await?;
    let saque = service.solicitar(cliente_id, &user).await?;

    let pagar = {
        let service = service.clone();
        let id = saque.id;
        tokio::spawn(async move { service.processar(id, StatusSaque::Pago).await })
    };
    let rejeitar = {
        let service = service.clone();
        let id = saque.id;
        tokio::spawn(async move { service.processar(id, StatusSaque::Rejeitado).await })
    };

    let resultados = [pagar.await?, rejeitar.await?];
    let sucessos = resultados.iter().filter(|r| r.is_ok()).count();
    assert_eq!(sucessos, 1, "só um processamento deve vencer");

    let perdedor = resultados.into_iter().find(|r| r.is_err()).unwrap();
    assert!(matches!(perdedor, Err(AppError::SaqueJaProcessado)));

    // O cliente reflete exatamente o vencedor, nunca uma mistura dos dois
    let (comissao_paga, saque_solicitado): (bool, bool) = sqlx::query_as(
        "SELECT comissao_paga, saque_solicitado FROM todos_clientes WHERE id = $1",
    )
    .bind(cliente_id)
    .fetch_one(&pool)
    .await?;
    let (status_final,): (StatusSaque,) =
        sqlx::query_as("SELECT status_saque FROM solicitacoes_saque WHERE id = $1")
            .bind(saque.id)
            .fetch_one(&pool)
            .await?;

    match status_final {
        StatusSaque::Pago => assert!(comissao_paga),
        StatusSaque::Rejeitado => {
            assert!(!comissao_paga);
            assert!(!saque_solicitado);
        }
        outro => panic!("status final inesperado: {outro:?}"),
    }

    Ok(())
}
