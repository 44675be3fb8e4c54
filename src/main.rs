//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, patch, post},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use cents_backend::config::AppState;
use cents_backend::docs::ApiDoc;
use cents_backend::handlers;
use cents_backend::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Task que escuta o barramento de mudanças e derruba o cache de resumo.
    // Qualquer escrita em clientes ou saques pode mudar a classificação.
    {
        let comissao_service = app_state.comissao_service.clone();
        let mut mudancas = app_state.event_bus.subscribe();
        tokio::spawn(async move {
            loop {
                match mudancas.recv().await {
                    Ok(evento) => {
                        tracing::debug!("Mudança em `{}`, invalidando cache de resumo", evento.tabela);
                        comissao_service.invalidar_cache().await;
                    }
                    // Lagged: perdemos eventos, mas invalidar é idempotente
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => {
                        comissao_service.invalidar_cache().await;
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                }
            }
        });
    }

    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Rotas de usuário (protegidas pelo middleware)
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let cliente_routes = Router::new()
        .route(
            "/",
            post(handlers::clientes::create_cliente).get(handlers::clientes::get_painel),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let comissao_routes = Router::new()
        .route("/regras", get(handlers::comissoes::get_regras))
        .route("/carteira", get(handlers::comissoes::get_carteira))
        .route("/resumo", get(handlers::comissoes::get_resumo))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let saque_routes = Router::new()
        .route(
            "/",
            post(handlers::saques::create_saque).get(handlers::saques::list_saques),
        )
        .route("/{id}", patch(handlers::saques::process_saque))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/clientes", cliente_routes)
        .nest("/api/comissoes", comissao_routes)
        .nest("/api/saques", saque_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
