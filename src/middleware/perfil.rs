// src/middleware/perfil.rs
//
// Guardião de perfil no estilo extrator: o produto tem três perfis fixos
// (admin, gestor, vendedor), então não há tabela de permissões: o perfil
// vem no próprio usuário autenticado.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{
    common::error::AppError,
    models::auth::{PerfilUsuario, User},
};

/// Exige perfil admin. Usado nas rotas de administração de saques.
pub struct RequireAdmin(pub User);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<User>()
            .cloned()
            .ok_or(AppError::InvalidToken)?;

        if user.perfil != PerfilUsuario::Admin {
            return Err(AppError::Forbidden);
        }

        Ok(RequireAdmin(user))
    }
}
