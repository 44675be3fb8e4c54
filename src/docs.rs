// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,

        // --- Users ---
        handlers::auth::get_me,

        // --- Clientes ---
        handlers::clientes::create_cliente,
        handlers::clientes::get_painel,

        // --- Comissões ---
        handlers::comissoes::get_regras,
        handlers::comissoes::get_carteira,
        handlers::comissoes::get_resumo,

        // --- Saques ---
        handlers::saques::create_saque,
        handlers::saques::list_saques,
        handlers::saques::process_saque,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::PerfilUsuario,
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Clientes ---
            models::cliente::Cliente,
            models::cliente::CreateClientePayload,
            models::comissao::ClientesPorData,
            models::comissao::PainelClientes,
            handlers::clientes::PeriodoParam,

            // --- Comissões ---
            models::comissao::PapelComissao,
            models::comissao::RegraComissao,
            models::comissao::CarteiraComissoes,
            models::comissao::ItemCarteira,
            models::comissao::CarteiraView,
            models::comissao::TotalBucket,
            models::comissao::ResumoComissoes,

            // --- Saques ---
            models::saque::StatusSaque,
            models::saque::SolicitacaoSaque,
            models::saque::CreateSaquePayload,
            models::saque::UpdateSaquePayload,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Users", description = "Dados do Usuário e Perfil"),
        (name = "Clientes", description = "Cadastro e Painel de Clientes"),
        (name = "Comissões", description = "Regras, Carteira e Resumo de Comissões"),
        (name = "Saques", description = "Solicitações de Saque de Comissão")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
