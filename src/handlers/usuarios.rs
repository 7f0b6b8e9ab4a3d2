// src/handlers/usuarios.rs

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
        access::{NivelAdmin, RequireNivel},
        i18n::Locale,
    },
    models::{
        auth::{
            AdicionarEquipesPayload, AtualizarUsuarioPayload, CriarUsuarioPayload, EquipesAdicionadas,
            RedefinirSenhaPayload, Usuario, UsuarioComEquipes, UsuarioCompleto, UsuarioResumo,
        },
        organizacao::BuscaQuery,
    },
};

#[utoipa::path(
    get,
    path = "/api/admin/usuarios",
    tag = "Usuários",
    params(BuscaQuery),
    responses(
        (status = 200, description = "Usuários com o nome do cargo", body = Vec<UsuarioResumo>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_usuarios(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireNivel<NivelAdmin>,
    Query(query): Query<BuscaQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let usuarios = app_state
        .usuario_service
        .listar(query.busca.as_deref())
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(usuarios))
}

#[utoipa::path(
    get,
    path = "/api/admin/usuarios/{id}",
    tag = "Usuários",
    params(("id" = Uuid, Path, description = "ID do usuário")),
    responses(
        (status = 200, description = "Perfil com cargo e vínculos", body = UsuarioCompleto),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_usuario(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireNivel<NivelAdmin>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let usuario = app_state
        .usuario_service
        .detalhe(id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(usuario))
}

// Cadastro feito pelo administrador (não existe auto-registro)
#[utoipa::path(
    post,
    path = "/api/admin/usuarios",
    tag = "Usuários",
    request_body = CriarUsuarioPayload,
    responses(
        (status = 201, description = "Usuário criado com os vínculos", body = Usuario),
        (status = 400, description = "Dados inválidos ou vínculo principal ausente"),
        (status = 409, description = "E-mail já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_usuario(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireNivel<NivelAdmin>,
    Json(payload): Json<CriarUsuarioPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let usuario = app_state
        .usuario_service
        .criar(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(usuario)))
}

#[utoipa::path(
    put,
    path = "/api/admin/usuarios/{id}",
    tag = "Usuários",
    request_body = AtualizarUsuarioPayload,
    params(("id" = Uuid, Path, description = "ID do usuário")),
    responses(
        (status = 200, description = "Usuário atualizado e vínculos substituídos", body = Usuario),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_usuario(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireNivel<NivelAdmin>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AtualizarUsuarioPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let usuario = app_state
        .usuario_service
        .atualizar(id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(usuario))
}

#[utoipa::path(
    post,
    path = "/api/admin/usuarios/{id}/senha",
    tag = "Usuários",
    request_body = RedefinirSenhaPayload,
    params(("id" = Uuid, Path, description = "ID do usuário")),
    responses(
        (status = 204, description = "Senha redefinida"),
        (status = 400, description = "Senha curta ou confirmação diferente")
    ),
    security(("api_jwt" = []))
)]
pub async fn reset_password(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireNivel<NivelAdmin>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RedefinirSenhaPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    app_state
        .usuario_service
        .redefinir_senha(id, &payload.password)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/admin/usuarios/{id}",
    tag = "Usuários",
    params(("id" = Uuid, Path, description = "ID do usuário")),
    responses(
        (status = 204, description = "Usuário desativado"),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_usuario(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireNivel<NivelAdmin>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .usuario_service
        .desativar(id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}

// ---
// Usuários x Equipes
// ---
#[utoipa::path(
    get,
    path = "/api/admin/usuarios-equipes",
    tag = "Usuários",
    responses(
        (status = 200, description = "Vínculos agrupados por usuário", body = Vec<UsuarioComEquipes>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_usuarios_equipes(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireNivel<NivelAdmin>,
) -> Result<impl IntoResponse, ApiError> {
    let vinculos = app_state
        .usuario_service
        .list_vinculos_equipe()
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(vinculos))
}

#[utoipa::path(
    post,
    path = "/api/admin/usuarios-equipes",
    tag = "Usuários",
    request_body = AdicionarEquipesPayload,
    responses(
        (status = 201, description = "Vínculos novos criados", body = EquipesAdicionadas),
        (status = 400, description = "Nenhuma equipe selecionada"),
        (status = 409, description = "Usuário já está em todas as equipes")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_usuario_equipes(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireNivel<NivelAdmin>,
    Json(payload): Json<AdicionarEquipesPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let adicionadas = app_state
        .usuario_service
        .adicionar_equipes(payload.usuario_id, &payload.equipe_ids)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(EquipesAdicionadas { adicionadas })))
}

#[utoipa::path(
    delete,
    path = "/api/admin/usuarios-equipes/{id}",
    tag = "Usuários",
    params(("id" = Uuid, Path, description = "ID do vínculo")),
    responses(
        (status = 204, description = "Vínculo removido"),
        (status = 404, description = "Vínculo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_usuario_equipe(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireNivel<NivelAdmin>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .usuario_service
        .remover_vinculo_equipe(id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}
