// src/handlers/comissoes.rs

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::{
        auth::PerfilUsuario,
        comissao::{CarteiraView, PapelComissao, RegraComissao, ResumoComissoes},
    },
    services::comissao_service,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct CarteiraQuery {
    // Admin pode consultar a carteira de qualquer gestor
    pub gestor: Option<String>,
    // Papel usado para resolver o valor de exibição; omitido = gestor
    pub papel: Option<PapelComissao>,
}

// Escopo e papel efetivos, segundo o perfil de quem pergunta.
fn resolver_escopo(
    perfil: PerfilUsuario,
    email: &str,
    query: &CarteiraQuery,
) -> (Option<String>, PapelComissao) {
    match perfil {
        PerfilUsuario::Admin => (
            query.gestor.clone(),
            query.papel.unwrap_or(PapelComissao::Gestor),
        ),
        PerfilUsuario::Gestor => (Some(email.to_string()), PapelComissao::Gestor),
        PerfilUsuario::Vendedor => (None, PapelComissao::Vendedor),
    }
}

// GET /api/comissoes/regras
#[utoipa::path(
    get,
    path = "/api/comissoes/regras",
    tag = "Comissões",
    responses(
        (status = 200, description = "Tabela fixa de comissões do fluxo Cliente Novo", body = Vec<RegraComissao>)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_regras() -> Json<Vec<RegraComissao>> {
    Json(comissao_service::regras_cliente_novo())
}

// GET /api/comissoes/carteira
#[utoipa::path(
    get,
    path = "/api/comissoes/carteira",
    tag = "Comissões",
    params(CarteiraQuery),
    responses(
        (status = 200, description = "Baldes pendente / disponível / recebida", body = CarteiraView),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_carteira(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<CarteiraQuery>,
) -> Result<Json<CarteiraView>, AppError> {
    let (gestor, papel) = resolver_escopo(user.perfil, &user.email, &query);

    let carteira = app_state
        .comissao_service
        .carteira(gestor.as_deref(), papel)
        .await?;

    Ok(Json(carteira))
}

// GET /api/comissoes/resumo
#[utoipa::path(
    get,
    path = "/api/comissoes/resumo",
    tag = "Comissões",
    params(CarteiraQuery),
    responses(
        (status = 200, description = "Totais por balde para os cards do painel", body = ResumoComissoes),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_resumo(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<CarteiraQuery>,
) -> Result<Json<ResumoComissoes>, AppError> {
    let (gestor, _) = resolver_escopo(user.perfil, &user.email, &query);

    let resumo = app_state.comissao_service.resumo(gestor.as_deref()).await?;

    Ok(Json(resumo))
}
