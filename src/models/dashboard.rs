// src/models/dashboard.rs

use serde::Serialize;
use utoipa::ToSchema;

// 1. Cards do dashboard de vendas (respeitam o escopo do usuário)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumoVendas {
    pub vendas_hoje: i64,
    pub vendas_mes: i64,
}

// 2. Contadores do painel administrativo
#[derive(Debug, Default, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumoAdmin {
    pub conglomerados: i64,
    pub grupos: i64,
    pub marcas: i64,
    pub unidades: i64,
    pub equipes: i64,
    pub usuarios: i64,
    pub produtos: i64,
}
