// src/handlers/catalogo.rs

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
    middleware::{
        access::{CurrentScope, NivelAdmin, RequireNivel},
        i18n::Locale,
    },
    models::{
        catalogo::{Produto, ProdutoOpcao, ProdutoPayload, ProdutoUnidade, ProdutoUnidadeDetalhe, ProdutoUnidadePayload},
        organizacao::{BuscaQuery, ListagemQuery},
    },
};

// ---
// Produtos (painel admin)
// ---
#[utoipa::path(
    get,
    path = "/api/admin/produtos",
    tag = "Catálogo",
    params(ListagemQuery),
    responses(
        (status = 200, description = "Produtos ordenados por referência", body = Vec<Produto>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_produtos(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireNivel<NivelAdmin>,
    Query(query): Query<ListagemQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let produtos = app_state
        .catalogo_service
        .list_produtos(query.busca.as_deref(), query.ativo)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(produtos))
}

#[utoipa::path(
    post,
    path = "/api/admin/produtos",
    tag = "Catálogo",
    request_body = ProdutoPayload,
    responses(
        (status = 201, description = "Produto criado", body = Produto),
        (status = 409, description = "Referência já cadastrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_produto(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireNivel<NivelAdmin>,
    Json(payload): Json<ProdutoPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let produto = app_state
        .catalogo_service
        .create_produto(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(produto)))
}

#[utoipa::path(
    put,
    path = "/api/admin/produtos/{id}",
    tag = "Catálogo",
    request_body = ProdutoPayload,
    params(("id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Produto atualizado", body = Produto),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_produto(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireNivel<NivelAdmin>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProdutoPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let produto = app_state
        .catalogo_service
        .update_produto(id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(produto))
}

#[utoipa::path(
    delete,
    path = "/api/admin/produtos/{id}",
    tag = "Catálogo",
    params(("id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 204, description = "Produto inativado"),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_produto(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireNivel<NivelAdmin>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .catalogo_service
        .deactivate_produto(id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}

// ---
// Produtos x Unidades (painel admin)
// ---
#[utoipa::path(
    get,
    path = "/api/admin/produtos-unidades",
    tag = "Catálogo",
    params(BuscaQuery),
    responses(
        (status = 200, description = "Vínculos, mais recentes primeiro", body = Vec<ProdutoUnidadeDetalhe>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_produtos_unidades(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireNivel<NivelAdmin>,
    Query(query): Query<BuscaQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let vinculos = app_state
        .catalogo_service
        .list_vinculos(query.busca.as_deref())
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(vinculos))
}

#[utoipa::path(
    post,
    path = "/api/admin/produtos-unidades",
    tag = "Catálogo",
    request_body = ProdutoUnidadePayload,
    responses(
        (status = 201, description = "Produto vinculado à unidade", body = ProdutoUnidade),
        (status = 409, description = "Vínculo já existe")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_produto_unidade(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireNivel<NivelAdmin>,
    Json(payload): Json<ProdutoUnidadePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let vinculo = app_state
        .catalogo_service
        .create_vinculo(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(vinculo)))
}

#[utoipa::path(
    put,
    path = "/api/admin/produtos-unidades/{id}",
    tag = "Catálogo",
    request_body = ProdutoUnidadePayload,
    params(("id" = i64, Path, description = "ID do vínculo")),
    responses(
        (status = 200, description = "Vínculo atualizado", body = ProdutoUnidade),
        (status = 404, description = "Vínculo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_produto_unidade(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireNivel<NivelAdmin>,
    Path(id): Path<i64>,
    Json(payload): Json<ProdutoUnidadePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let vinculo = app_state
        .catalogo_service
        .update_vinculo(id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(vinculo))
}

#[utoipa::path(
    delete,
    path = "/api/admin/produtos-unidades/{id}",
    tag = "Catálogo",
    params(("id" = i64, Path, description = "ID do vínculo")),
    responses(
        (status = 204, description = "Vínculo removido"),
        (status = 404, description = "Vínculo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_produto_unidade(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireNivel<NivelAdmin>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .catalogo_service
        .delete_vinculo(id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}

// ---
// Produtos da unidade (Nova Venda)
// ---
#[utoipa::path(
    get,
    path = "/api/catalogo/unidades/{unidade_id}/produtos",
    tag = "Catálogo",
    params(
        ("unidade_id" = Uuid, Path, description = "ID da unidade"),
        BuscaQuery
    ),
    responses(
        (status = 200, description = "Produtos vinculados à unidade", body = Vec<ProdutoOpcao>),
        (status = 403, description = "Unidade fora do escopo do usuário")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_produtos_da_unidade(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: CurrentScope,
    Path(unidade_id): Path<Uuid>,
    Query(query): Query<BuscaQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let opcoes = app_state
        .catalogo_service
        .opcoes_da_unidade(&ctx.scope, &ctx.hierarquia, unidade_id, query.busca.as_deref())
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(opcoes))
}
