// src/handlers/dashboard.rs

use axum::{extract::State, response::IntoResponse, Json};

use crate::{
    common::{error::ApiError, validation::hoje},
    config::AppState,
    middleware::{
        access::{CurrentScope, NivelAdmin, RequireNivel},
        i18n::Locale,
    },
    models::dashboard::{ResumoAdmin, ResumoVendas},
};

#[utoipa::path(
    get,
    path = "/api/dashboard/resumo",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Vendas visíveis hoje e no mês", body = ResumoVendas)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_resumo(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: CurrentScope,
) -> Result<impl IntoResponse, ApiError> {
    let resumo = app_state
        .dashboard_service
        .resumo_vendas(&ctx.scope, &ctx.hierarquia, hoje())
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(resumo))
}

#[utoipa::path(
    get,
    path = "/api/admin/resumo",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Contadores do painel administrativo", body = ResumoAdmin),
        (status = 403, description = "Nível de acesso insuficiente")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_resumo_admin(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireNivel<NivelAdmin>,
) -> Result<impl IntoResponse, ApiError> {
    let resumo = app_state
        .dashboard_service
        .resumo_admin()
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(resumo))
}
