// src/handlers/organizacao.rs
// Painel administrativo: conglomerados, grupos, marcas, unidades e equipes.

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
    db::organizacao_repo::Inativavel,
    middleware::{
        access::{NivelAdmin, RequireNivel},
        i18n::Locale,
    },
    models::organizacao::{
        Conglomerado, ConglomeradoPayload, Equipe, EquipeDetalhe, EquipePayload, Grupo, GrupoDetalhe,
        GrupoPayload, ListagemQuery, Marca, MarcaPayload, Unidade, UnidadeDetalhe, UnidadePayload,
    },
};

// ---
// Conglomerados
// ---
#[utoipa::path(
    get,
    path = "/api/admin/conglomerados",
    tag = "Organização",
    params(ListagemQuery),
    responses(
        (status = 200, description = "Conglomerados ordenados por nome", body = Vec<Conglomerado>),
        (status = 403, description = "Nível de acesso insuficiente")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_conglomerados(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireNivel<NivelAdmin>,
    Query(query): Query<ListagemQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let lista = app_state
        .organizacao_service
        .list_conglomerados(&query)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(lista))
}

#[utoipa::path(
    post,
    path = "/api/admin/conglomerados",
    tag = "Organização",
    request_body = ConglomeradoPayload,
    responses(
        (status = 201, description = "Conglomerado criado", body = Conglomerado),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_conglomerado(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireNivel<NivelAdmin>,
    Json(payload): Json<ConglomeradoPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let criado = app_state
        .organizacao_service
        .create_conglomerado(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(criado)))
}

#[utoipa::path(
    put,
    path = "/api/admin/conglomerados/{id}",
    tag = "Organização",
    request_body = ConglomeradoPayload,
    params(("id" = Uuid, Path, description = "ID do registro")),
    responses(
        (status = 200, description = "Conglomerado atualizado", body = Conglomerado),
        (status = 404, description = "Conglomerado não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_conglomerado(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireNivel<NivelAdmin>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ConglomeradoPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let atualizado = app_state
        .organizacao_service
        .update_conglomerado(id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(atualizado))
}

#[utoipa::path(
    delete,
    path = "/api/admin/conglomerados/{id}",
    tag = "Organização",
    params(("id" = Uuid, Path, description = "ID do registro")),
    responses(
        (status = 204, description = "Conglomerado inativado"),
        (status = 404, description = "Conglomerado não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_conglomerado(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireNivel<NivelAdmin>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .organizacao_service
        .deactivate(Inativavel::Conglomerado, id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}

// ---
// Grupos
// ---
#[utoipa::path(
    get,
    path = "/api/admin/grupos",
    tag = "Organização",
    params(ListagemQuery),
    responses(
        (status = 200, description = "Grupos ordenados por nome", body = Vec<GrupoDetalhe>),
        (status = 403, description = "Nível de acesso insuficiente")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_grupos(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireNivel<NivelAdmin>,
    Query(query): Query<ListagemQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let lista = app_state
        .organizacao_service
        .list_grupos(&query)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(lista))
}

#[utoipa::path(
    post,
    path = "/api/admin/grupos",
    tag = "Organização",
    request_body = GrupoPayload,
    responses(
        (status = 201, description = "Grupo criado", body = Grupo),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_grupo(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireNivel<NivelAdmin>,
    Json(payload): Json<GrupoPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let criado = app_state
        .organizacao_service
        .create_grupo(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(criado)))
}

#[utoipa::path(
    put,
    path = "/api/admin/grupos/{id}",
    tag = "Organização",
    request_body = GrupoPayload,
    params(("id" = Uuid, Path, description = "ID do registro")),
    responses(
        (status = 200, description = "Grupo atualizado", body = Grupo),
        (status = 404, description = "Grupo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_grupo(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireNivel<NivelAdmin>,
    Path(id): Path<Uuid>,
    Json(payload): Json<GrupoPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let atualizado = app_state
        .organizacao_service
        .update_grupo(id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(atualizado))
}

#[utoipa::path(
    delete,
    path = "/api/admin/grupos/{id}",
    tag = "Organização",
    params(("id" = Uuid, Path, description = "ID do registro")),
    responses(
        (status = 204, description = "Grupo inativado"),
        (status = 404, description = "Grupo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_grupo(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireNivel<NivelAdmin>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .organizacao_service
        .deactivate(Inativavel::Grupo, id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}

// ---
// Marcas
// ---
#[utoipa::path(
    get,
    path = "/api/admin/marcas",
    tag = "Organização",
    params(ListagemQuery),
    responses(
        (status = 200, description = "Marcas ordenados por nome", body = Vec<Marca>),
        (status = 403, description = "Nível de acesso insuficiente")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_marcas(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireNivel<NivelAdmin>,
    Query(query): Query<ListagemQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let lista = app_state
        .organizacao_service
        .list_marcas(&query)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(lista))
}

#[utoipa::path(
    post,
    path = "/api/admin/marcas",
    tag = "Organização",
    request_body = MarcaPayload,
    responses(
        (status = 201, description = "Marca criada", body = Marca),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_marca(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireNivel<NivelAdmin>,
    Json(payload): Json<MarcaPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let criado = app_state
        .organizacao_service
        .create_marca(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(criado)))
}

#[utoipa::path(
    put,
    path = "/api/admin/marcas/{id}",
    tag = "Organização",
    request_body = MarcaPayload,
    params(("id" = Uuid, Path, description = "ID do registro")),
    responses(
        (status = 200, description = "Marca atualizada", body = Marca),
        (status = 404, description = "Marca não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_marca(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireNivel<NivelAdmin>,
    Path(id): Path<Uuid>,
    Json(payload): Json<MarcaPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let atualizado = app_state
        .organizacao_service
        .update_marca(id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(atualizado))
}

// Marcas não têm `ativo`: a exclusão é definitiva (falha se houver unidade usando)
#[utoipa::path(
    delete,
    path = "/api/admin/marcas/{id}",
    tag = "Organização",
    params(("id" = Uuid, Path, description = "ID do registro")),
    responses(
        (status = 204, description = "Marca excluída"),
        (status = 404, description = "Marca não encontrada"),
        (status = 409, description = "Marca em uso por alguma unidade")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_marca(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireNivel<NivelAdmin>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .organizacao_service
        .delete_marca(id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}

// ---
// Unidades
// ---
#[utoipa::path(
    get,
    path = "/api/admin/unidades",
    tag = "Organização",
    params(ListagemQuery),
    responses(
        (status = 200, description = "Unidades ordenados por nome", body = Vec<UnidadeDetalhe>),
        (status = 403, description = "Nível de acesso insuficiente")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_unidades(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireNivel<NivelAdmin>,
    Query(query): Query<ListagemQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let lista = app_state
        .organizacao_service
        .list_unidades(&query)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(lista))
}

#[utoipa::path(
    post,
    path = "/api/admin/unidades",
    tag = "Organização",
    request_body = UnidadePayload,
    responses(
        (status = 201, description = "Unidade criada", body = Unidade),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_unidade(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireNivel<NivelAdmin>,
    Json(payload): Json<UnidadePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let criado = app_state
        .organizacao_service
        .create_unidade(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(criado)))
}

#[utoipa::path(
    put,
    path = "/api/admin/unidades/{id}",
    tag = "Organização",
    request_body = UnidadePayload,
    params(("id" = Uuid, Path, description = "ID do registro")),
    responses(
        (status = 200, description = "Unidade atualizada", body = Unidade),
        (status = 404, description = "Unidade não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_unidade(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireNivel<NivelAdmin>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UnidadePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let atualizado = app_state
        .organizacao_service
        .update_unidade(id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(atualizado))
}

#[utoipa::path(
    delete,
    path = "/api/admin/unidades/{id}",
    tag = "Organização",
    params(("id" = Uuid, Path, description = "ID do registro")),
    responses(
        (status = 204, description = "Unidade inativada"),
        (status = 404, description = "Unidade não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_unidade(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireNivel<NivelAdmin>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .organizacao_service
        .deactivate(Inativavel::Unidade, id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}

// ---
// Equipes
// ---
#[utoipa::path(
    get,
    path = "/api/admin/equipes",
    tag = "Organização",
    params(ListagemQuery),
    responses(
        (status = 200, description = "Equipes ordenados por nome", body = Vec<EquipeDetalhe>),
        (status = 403, description = "Nível de acesso insuficiente")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_equipes(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireNivel<NivelAdmin>,
    Query(query): Query<ListagemQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let lista = app_state
        .organizacao_service
        .list_equipes(&query)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(lista))
}

#[utoipa::path(
    post,
    path = "/api/admin/equipes",
    tag = "Organização",
    request_body = EquipePayload,
    responses(
        (status = 201, description = "Equipe criada", body = Equipe),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_equipe(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireNivel<NivelAdmin>,
    Json(payload): Json<EquipePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let criado = app_state
        .organizacao_service
        .create_equipe(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(criado)))
}

#[utoipa::path(
    put,
    path = "/api/admin/equipes/{id}",
    tag = "Organização",
    request_body = EquipePayload,
    params(("id" = Uuid, Path, description = "ID do registro")),
    responses(
        (status = 200, description = "Equipe atualizada", body = Equipe),
        (status = 404, description = "Equipe não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_equipe(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireNivel<NivelAdmin>,
    Path(id): Path<Uuid>,
    Json(payload): Json<EquipePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let atualizado = app_state
        .organizacao_service
        .update_equipe(id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(atualizado))
}

#[utoipa::path(
    delete,
    path = "/api/admin/equipes/{id}",
    tag = "Organização",
    params(("id" = Uuid, Path, description = "ID do registro")),
    responses(
        (status = 204, description = "Equipe inativada"),
        (status = 404, description = "Equipe não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_equipe(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireNivel<NivelAdmin>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .organizacao_service
        .deactivate(Inativavel::Equipe, id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}
