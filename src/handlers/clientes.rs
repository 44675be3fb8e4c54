// src/handlers/clientes.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::{
        auth::PerfilUsuario,
        cliente::{Cliente, CreateClientePayload},
        comissao::{PainelClientes, PeriodoFiltro},
    },
};

// Os presets do seletor de período, como chegam na query string.
#[derive(Debug, Clone, Copy, Default, Deserialize, utoipa::ToSchema)]
pub enum PeriodoParam {
    #[default]
    #[serde(rename = "todos")]
    Todos,
    #[serde(rename = "hoje")]
    Hoje,
    #[serde(rename = "ontem")]
    Ontem,
    #[serde(rename = "ultimos7dias")]
    Ultimos7Dias,
    #[serde(rename = "este_mes")]
    EsteMes,
    #[serde(rename = "este_ano")]
    EsteAno,
    #[serde(rename = "personalizado")]
    Personalizado,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct PainelQuery {
    // Preset do filtro; omitido = "todos"
    pub periodo: Option<PeriodoParam>,
    // Só fazem sentido com periodo=personalizado (formato AAAA-MM-DD)
    pub inicio: Option<NaiveDate>,
    pub fim: Option<NaiveDate>,
    // Filtros de escopo; o admin pode consultar qualquer carteira
    pub gestor: Option<String>,
    pub vendedor: Option<String>,
}

impl PainelQuery {
    pub fn filtro(&self) -> Result<PeriodoFiltro, AppError> {
        Ok(match self.periodo.unwrap_or_default() {
            PeriodoParam::Todos => PeriodoFiltro::Todos,
            PeriodoParam::Hoje => PeriodoFiltro::Hoje,
            PeriodoParam::Ontem => PeriodoFiltro::Ontem,
            PeriodoParam::Ultimos7Dias => PeriodoFiltro::Ultimos7Dias,
            PeriodoParam::EsteMes => PeriodoFiltro::EsteMes,
            PeriodoParam::EsteAno => PeriodoFiltro::EsteAno,
            PeriodoParam::Personalizado => {
                let (Some(inicio), Some(fim)) = (self.inicio, self.fim) else {
                    return Err(AppError::PeriodoInvalido);
                };
                PeriodoFiltro::Personalizado { inicio, fim }
            }
        })
    }
}

// POST /api/clientes
#[utoipa::path(
    post,
    path = "/api/clientes",
    tag = "Clientes",
    request_body = CreateClientePayload,
    responses(
        (status = 201, description = "Cliente cadastrado", body = Cliente),
        (status = 400, description = "Payload inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_cliente(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(mut payload): Json<CreateClientePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    // Vendedor cadastrando cliente fica registrado como o vendedor da venda
    if user.perfil == PerfilUsuario::Vendedor && payload.vendedor.is_none() {
        payload.vendedor = Some(user.email.clone());
    }

    let cliente = app_state.cliente_service.create(&payload).await?;

    Ok((StatusCode::CREATED, Json(cliente)))
}

// GET /api/clientes
#[utoipa::path(
    get,
    path = "/api/clientes",
    tag = "Clientes",
    params(PainelQuery),
    responses(
        (status = 200, description = "Lista filtrada + baldes de data", body = PainelClientes),
        (status = 400, description = "Parâmetros de período inválidos"),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_painel(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<PainelQuery>,
) -> Result<Json<PainelClientes>, AppError> {
    let filtro = query.filtro()?;

    // Cada perfil enxerga a própria carteira; só o admin escolhe o escopo.
    let (gestor, vendedor) = match user.perfil {
        PerfilUsuario::Admin => (query.gestor.as_deref(), query.vendedor.as_deref()),
        PerfilUsuario::Gestor => (Some(user.email.as_str()), None),
        PerfilUsuario::Vendedor => (None, Some(user.email.as_str())),
    };

    let painel = app_state
        .cliente_service
        .painel(gestor, vendedor, &filtro)
        .await?;

    Ok(Json(painel))
}
