// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{ClienteRepository, SaqueRepository, UserRepository},
    services::{
        auth::AuthService, cliente_service::ClienteService, comissao_service::ComissaoService,
        event_bus::EventBus, saque_service::SaqueService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_secret: String,
    pub event_bus: EventBus,
    pub auth_service: AuthService,
    pub cliente_service: ClienteService,
    pub comissao_service: ComissaoService,
    pub saque_service: SaqueService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let event_bus = EventBus::new();

        let user_repo = UserRepository::new(db_pool.clone());
        let cliente_repo = ClienteRepository::new(db_pool.clone(), event_bus.clone());
        let saque_repo = SaqueRepository::new(db_pool.clone(), event_bus.clone());

        let auth_service = AuthService::new(user_repo, jwt_secret.clone());
        let cliente_service = ClienteService::new(cliente_repo.clone());
        let comissao_service = ComissaoService::new(cliente_repo.clone(), saque_repo.clone());
        let saque_service = SaqueService::new(db_pool.clone(), cliente_repo, saque_repo);

        Ok(Self {
            db_pool,
            jwt_secret,
            event_bus,
            auth_service,
            cliente_service,
            comissao_service,
            saque_service,
        })
    }
}
