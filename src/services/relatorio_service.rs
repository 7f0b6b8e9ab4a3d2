// src/services/relatorio_service.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    models::{
        cargo::Cargo,
        escopo::{AccessScope, Hierarquia},
        vendas::{FiltroVendas, RelatorioVendas, VendaListagem},
    },
    services::venda_service::VendaService,
};

const CABECALHO_CSV: [&str; 4] = ["Data", "Número", "Valor", "Observações"];

#[derive(Clone)]
pub struct RelatorioService {
    venda_service: VendaService,
}

impl RelatorioService {
    pub fn new(venda_service: VendaService) -> Self {
        Self { venda_service }
    }

    pub async fn relatorio(
        &self,
        scope: &AccessScope,
        hierarquia: &Hierarquia,
        cargo: Option<Cargo>,
        filtro: &FiltroVendas,
    ) -> Result<RelatorioVendas, AppError> {
        let vendas = self.venda_service.listar(scope, hierarquia, filtro).await?;
        Ok(montar_relatorio(cargo, vendas))
    }
}

pub fn montar_relatorio(cargo: Option<Cargo>, vendas: Vec<VendaListagem>) -> RelatorioVendas {
    let total_periodo: Decimal = vendas.iter().map(|v| v.venda.valor_total).sum();
    RelatorioVendas {
        cargo,
        quantidade: vendas.len(),
        total_periodo,
        vendas,
    }
}

/// Gera o CSV do relatório (datas em dd/MM/yyyy, valores com duas casas).
pub fn exportar_csv(vendas: &[VendaListagem]) -> Result<String, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CABECALHO_CSV)?;

    for item in vendas {
        let venda = &item.venda;
        writer.write_record([
            venda.data_venda.format("%d/%m/%Y").to_string(),
            venda.numero_identificacao.clone(),
            format!("{:.2}", venda.valor_total),
            venda.observacoes.clone().unwrap_or_default(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Falha ao finalizar o CSV: {}", e))?;
    let conteudo = String::from_utf8(bytes).map_err(anyhow::Error::from)?;
    Ok(conteudo)
}

pub fn nome_arquivo(data: NaiveDate) -> String {
    format!("vendas_{}.csv", data.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vendas::Venda;
    use chrono::Utc;
    use std::str::FromStr;
    use uuid::Uuid;

    fn listagem(data: &str, numero: &str, valor: &str, observacoes: Option<&str>) -> VendaListagem {
        let now = Utc::now();
        VendaListagem {
            venda: Venda {
                id: Uuid::new_v4(),
                usuario_id: Uuid::new_v4(),
                unidade_id: Uuid::new_v4(),
                equipe_id: None,
                data_venda: data.parse().unwrap(),
                numero_identificacao: numero.into(),
                valor_total: Decimal::from_str(valor).unwrap(),
                observacoes: observacoes.map(Into::into),
                created_at: now,
                updated_at: now,
            },
            usuario_nome: "Fulano".into(),
            unidade_nome: "Sinal Centro".into(),
            equipe_nome: None,
        }
    }

    #[test]
    fn csv_tem_cabecalho_e_datas_brasileiras() {
        let vendas = vec![
            listagem("2025-03-10", "OS-1", "150.5", Some("Cliente, retorno em 30 dias")),
            listagem("2025-03-02", "OS-2", "80", None),
        ];

        let csv = exportar_csv(&vendas).expect("csv");
        let linhas: Vec<&str> = csv.lines().collect();

        assert_eq!(linhas[0], "Data,Número,Valor,Observações");
        assert_eq!(linhas[1], "10/03/2025,OS-1,150.50,\"Cliente, retorno em 30 dias\"");
        assert_eq!(linhas[2], "02/03/2025,OS-2,80.00,");
        assert_eq!(linhas.len(), 3);
    }

    #[test]
    fn csv_vazio_so_tem_cabecalho() {
        let csv = exportar_csv(&[]).expect("csv");
        assert_eq!(csv.trim_end(), "Data,Número,Valor,Observações");
    }

    #[test]
    fn nome_do_arquivo_usa_a_data() {
        let data = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert_eq!(nome_arquivo(data), "vendas_2025-03-09.csv");
    }

    #[test]
    fn relatorio_soma_o_periodo() {
        let relatorio = montar_relatorio(
            None,
            vec![
                listagem("2025-03-10", "OS-1", "100.25", None),
                listagem("2025-03-11", "OS-2", "49.75", None),
            ],
        );

        assert_eq!(relatorio.quantidade, 2);
        assert_eq!(relatorio.total_periodo, Decimal::from(150));
    }
}
