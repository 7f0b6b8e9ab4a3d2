// src/handlers/relatorios.rs

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::{
        error::{ApiError, AppError},
        validation::hoje,
    },
    config::AppState,
    middleware::{access::CurrentScope, i18n::Locale},
    models::vendas::{FiltroVendas, RelatorioVendas},
    services::relatorio_service::{exportar_csv, nome_arquivo},
};

#[utoipa::path(
    get,
    path = "/api/relatorios/vendas",
    tag = "Relatórios",
    params(FiltroVendas),
    responses(
        (status = 200, description = "Vendas do período com quantidade e total", body = RelatorioVendas),
        (status = 400, description = "Data inicial depois da final")
    ),
    security(("api_jwt" = []))
)]
pub async fn relatorio_vendas(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: CurrentScope,
    Query(filtro): Query<FiltroVendas>,
) -> Result<impl IntoResponse, ApiError> {
    filtro.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let relatorio = app_state
        .relatorio_service
        .relatorio(&ctx.scope, &ctx.hierarquia, ctx.cargo, &filtro)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(relatorio))
}

#[utoipa::path(
    get,
    path = "/api/relatorios/vendas/csv",
    tag = "Relatórios",
    params(FiltroVendas),
    responses(
        (status = 200, description = "Arquivo vendas_<data>.csv", content_type = "text/csv", body = String)
    ),
    security(("api_jwt" = []))
)]
pub async fn exportar_vendas_csv(
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

    let conteudo = exportar_csv(&vendas).map_err(|e| e.to_api_error(&locale))?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        nome_arquivo(hoje())
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        conteudo,
    ))
}
