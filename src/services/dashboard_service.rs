// src/services/dashboard_service.rs

use chrono::{Datelike, NaiveDate};

use crate::{
    common::error::AppError,
    db::{DashboardRepository, VendasRepository},
    models::{
        dashboard::{ResumoAdmin, ResumoVendas},
        escopo::{AccessScope, Hierarquia},
    },
};

#[derive(Clone)]
pub struct DashboardService {
    repo: DashboardRepository,
    vendas_repo: VendasRepository,
}

impl DashboardService {
    pub fn new(repo: DashboardRepository, vendas_repo: VendasRepository) -> Self {
        Self { repo, vendas_repo }
    }

    /// Cards "vendas hoje" e "vendas no mês", respeitando o escopo.
    pub async fn resumo_vendas(
        &self,
        scope: &AccessScope,
        hierarquia: &Hierarquia,
        hoje: NaiveDate,
    ) -> Result<ResumoVendas, AppError> {
        let filtro = scope.visibilidade(hierarquia).as_filtro();

        let vendas_hoje = self.vendas_repo.count_visiveis(&filtro, hoje, hoje).await?;
        let vendas_mes = self
            .vendas_repo
            .count_visiveis(&filtro, inicio_do_mes(hoje), hoje)
            .await?;

        Ok(ResumoVendas { vendas_hoje, vendas_mes })
    }

    pub async fn resumo_admin(&self) -> Result<ResumoAdmin, AppError> {
        self.repo.resumo_admin().await
    }
}

fn inicio_do_mes(data: NaiveDate) -> NaiveDate {
    data.with_day(1).unwrap_or(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mes_comeca_no_dia_primeiro() {
        let data = NaiveDate::from_ymd_opt(2025, 2, 28).unwrap();
        assert_eq!(inicio_do_mes(data), NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
    }
}
