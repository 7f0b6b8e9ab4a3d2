// src/handlers/vendas.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{access::CurrentScope, i18n::Locale},
    models::vendas::{FiltroVendas, NovaVendaPayload, Venda, VendaDetalhe, VendaListagem},
};

#[utoipa::path(
    post,
    path = "/api/vendas",
    tag = "Vendas",
    request_body = NovaVendaPayload,
    responses(
        (status = 201, description = "Venda registrada com os itens", body = Venda),
        (status = 400, description = "Dados inválidos, equipe de outra unidade ou produto não vinculado"),
        (status = 403, description = "Unidade ou equipe fora do escopo")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_venda(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: CurrentScope,
    Json(payload): Json<NovaVendaPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let venda = app_state
        .venda_service
        .registrar(&ctx.scope, &ctx.hierarquia, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(venda)))
}

#[utoipa::path(
    get,
    path = "/api/vendas",
    tag = "Vendas",
    params(FiltroVendas),
    responses(
        (status = 200, description = "Vendas visíveis, mais recentes primeiro", body = Vec<VendaListagem>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_vendas(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: CurrentScope,
    Query(filtro): Query<FiltroVendas>,
) -> Result<impl IntoResponse, ApiError> {
    filtro.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let vendas = app_state
        .venda_service
        .listar(&ctx.scope, &ctx.hierarquia, &filtro)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(vendas))
}

#[utoipa::path(
    get,
    path = "/api/vendas/{id}",
    tag = "Vendas",
    params(("id" = Uuid, Path, description = "ID da venda")),
    responses(
        (status = 200, description = "Venda com os itens", body = VendaDetalhe),
        (status = 404, description = "Venda não encontrada ou fora do escopo")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_venda(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: CurrentScope,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let venda = app_state
        .venda_service
        .detalhe(&ctx.scope, &ctx.hierarquia, id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(venda))
}
