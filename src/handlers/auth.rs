// src/handlers/auth.rs

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{access::CurrentScope, auth::AuthenticatedUser, i18n::Locale},
    models::{
        auth::{AuthResponse, LoginPayload, UsuarioCompleto},
        cargo::{Cargo, TipoEquipe},
        organizacao::{BuscaQuery, EquipeDetalhe, UnidadeOpcao},
    },
};

// Handler de login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Login realizado", body = AuthResponse),
        (status = 401, description = "E-mail ou senha inválidos"),
        (status = 403, description = "Usuário inativo")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let response = app_state
        .auth_service
        .login(&payload.email, &payload.password)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(response))
}

// Handler da rota protegida /me
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Users",
    responses(
        (status = 200, description = "Perfil completo do usuário logado", body = UsuarioCompleto),
        (status = 401, description = "Token ausente ou inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_me(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(usuario): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let perfil = app_state
        .escopo_service
        .perfil(usuario)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(perfil))
}

#[utoipa::path(
    get,
    path = "/api/users/me/equipes",
    tag = "Users",
    responses(
        (status = 200, description = "Equipes que o usuário pode usar numa venda", body = Vec<EquipeDetalhe>)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_my_equipes(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: CurrentScope,
) -> Result<impl IntoResponse, ApiError> {
    let equipes = app_state
        .escopo_service
        .equipes_permitidas(&ctx.scope, &ctx.hierarquia)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(equipes))
}

#[utoipa::path(
    get,
    path = "/api/users/me/unidades",
    tag = "Users",
    params(BuscaQuery),
    responses(
        (status = 200, description = "Unidades onde o usuário pode lançar vendas", body = Vec<UnidadeOpcao>)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_my_unidades(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: CurrentScope,
    Query(query): Query<BuscaQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let unidades = app_state
        .escopo_service
        .unidades_permitidas(&ctx.scope, &ctx.hierarquia, query.busca.as_deref())
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(unidades))
}

#[utoipa::path(
    get,
    path = "/api/cargos",
    tag = "Users",
    responses(
        (status = 200, description = "Cargos por nível de acesso", body = Vec<Cargo>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_cargos(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let cargos = app_state
        .usuario_service
        .list_cargos()
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(cargos))
}

#[utoipa::path(
    get,
    path = "/api/tipos-equipe",
    tag = "Users",
    responses(
        (status = 200, description = "Tipos de equipe ativos", body = Vec<TipoEquipe>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_tipos_equipe(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let tipos = app_state
        .organizacao_service
        .list_tipos_equipe()
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(tipos))
}
