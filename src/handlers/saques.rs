// src/handlers/saques.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{auth::AuthenticatedUser, perfil::RequireAdmin},
    models::saque::{CreateSaquePayload, SolicitacaoSaque, StatusSaque, UpdateSaquePayload},
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListSaquesQuery {
    pub status: Option<StatusSaque>,
}

// POST /api/saques
#[utoipa::path(
    post,
    path = "/api/saques",
    tag = "Saques",
    request_body = CreateSaquePayload,
    responses(
        (status = 201, description = "Solicitação de saque registrada", body = SolicitacaoSaque),
        (status = 404, description = "Cliente não encontrado"),
        (status = 409, description = "Comissão não disponível para saque")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_saque(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateSaquePayload>,
) -> Result<impl IntoResponse, AppError> {
    let saque = app_state
        .saque_service
        .solicitar(payload.cliente_id, &user)
        .await?;

    Ok((StatusCode::CREATED, Json(saque)))
}

// GET /api/saques (admin)
#[utoipa::path(
    get,
    path = "/api/saques",
    tag = "Saques",
    params(ListSaquesQuery),
    responses(
        (status = 200, description = "Solicitações de saque", body = Vec<SolicitacaoSaque>),
        (status = 403, description = "Apenas admin")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_saques(
    State(app_state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<ListSaquesQuery>,
) -> Result<Json<Vec<SolicitacaoSaque>>, AppError> {
    let saques = app_state.saque_service.list(query.status).await?;

    Ok(Json(saques))
}

// PATCH /api/saques/{id} (admin)
#[utoipa::path(
    patch,
    path = "/api/saques/{id}",
    tag = "Saques",
    request_body = UpdateSaquePayload,
    params(("id" = Uuid, Path, description = "ID da solicitação de saque")),
    responses(
        (status = 200, description = "Solicitação processada", body = SolicitacaoSaque),
        (status = 403, description = "Apenas admin"),
        (status = 404, description = "Solicitação não encontrada"),
        (status = 409, description = "Solicitação já processada"),
        (status = 422, description = "Transição de status inválida")
    ),
    security(("api_jwt" = []))
)]
pub async fn process_saque(
    State(app_state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSaquePayload>,
) -> Result<Json<SolicitacaoSaque>, AppError> {
    let saque = app_state
        .saque_service
        .processar(id, payload.status_saque)
        .await?;

    Ok(Json(saque))
}
