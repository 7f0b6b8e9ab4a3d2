// src/db/dashboard_repo.rs

use sqlx::PgPool;

use crate::{common::error::AppError, models::dashboard::ResumoAdmin};

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Contadores do painel administrativo (uma ida ao banco)
    pub async fn resumo_admin(&self) -> Result<ResumoAdmin, AppError> {
        let resumo = sqlx::query_as::<_, ResumoAdmin>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM conglomerados) AS conglomerados,
                (SELECT COUNT(*) FROM grupos)        AS grupos,
                (SELECT COUNT(*) FROM marcas)        AS marcas,
                (SELECT COUNT(*) FROM unidades)      AS unidades,
                (SELECT COUNT(*) FROM equipes)       AS equipes,
                (SELECT COUNT(*) FROM usuarios)      AS usuarios,
                (SELECT COUNT(*) FROM produtos)      AS produtos
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(resumo)
    }
}
