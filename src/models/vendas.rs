// src/models/vendas.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::common::validation::{data_nao_futura, nao_vazio, preco_valido, valor_maximo};

use crate::models::cargo::Cargo;
use crate::models::escopo::VendaRef;

// --- 1. Venda (cabeçalho) ---
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Venda {
    pub id: Uuid,
    pub usuario_id: Uuid,
    pub unidade_id: Uuid,
    pub equipe_id: Option<Uuid>,
    pub data_venda: NaiveDate,
    #[schema(example = "OS-2025-0042")]
    pub numero_identificacao: String,
    pub valor_total: Decimal,
    pub observacoes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Venda {
    pub fn referencia(&self) -> VendaRef {
        VendaRef {
            usuario_id: self.usuario_id,
            unidade_id: self.unidade_id,
            equipe_id: self.equipe_id,
        }
    }
}

// --- 2. Item da venda ---
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VendaItem {
    pub id: Uuid,
    pub venda_id: Uuid,
    pub produto_id: Uuid,
    pub quantidade: i32,
    pub preco_unitario: Decimal,
    pub subtotal: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VendaItemDetalhe {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub item: VendaItem,
    pub produto_referencia: String,
    pub produto_nome_sintetico: String,
}

/// Venda com os nomes usados nas telas de listagem e relatório.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VendaListagem {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub venda: Venda,
    pub usuario_nome: String,
    pub unidade_nome: String,
    pub equipe_nome: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VendaDetalhe {
    #[serde(flatten)]
    pub venda: VendaListagem,
    pub itens: Vec<VendaItemDetalhe>,
}

/// Item já validado e com subtotal calculado, pronto para o INSERT.
#[derive(Debug, Clone, PartialEq)]
pub struct NovoItem {
    pub produto_id: Uuid,
    pub quantidade: i32,
    pub preco_unitario: Decimal,
    pub subtotal: Decimal,
}

impl NovoItem {
    /// `None` quando o subtotal não cabe na coluna monetária.
    pub fn new(produto_id: Uuid, quantidade: i32, preco_unitario: Decimal) -> Option<Self> {
        let subtotal = Decimal::from(quantidade)
            .checked_mul(preco_unitario)
            .filter(|s| *s <= valor_maximo())?;

        Some(Self { produto_id, quantidade, preco_unitario, subtotal })
    }
}

/// Soma dos subtotais, ou `None` se passar do limite da coluna.
pub fn valor_total(itens: &[NovoItem]) -> Option<Decimal> {
    itens
        .iter()
        .try_fold(Decimal::ZERO, |total, item| total.checked_add(item.subtotal))
        .filter(|t| *t <= valor_maximo())
}

fn erro_total_excedido() -> ValidationError {
    let mut err = ValidationError::new("range");
    err.message = Some("validation.valor_maximo".into());
    err
}

// ---
// Payload da Nova Venda
// ---
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NovoItemPayload {
    pub produto_id: Uuid,
    #[validate(range(min = 1, max = 100_000, message = "validation.quantidade"))]
    #[schema(example = 1)]
    pub quantidade: i32,
    /// Opcional; quando ausente o item entra com preço zero.
    #[validate(custom(function = "preco_valido"))]
    pub preco_unitario: Option<Decimal>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "totais_validos"))]
pub struct NovaVendaPayload {
    #[validate(custom(function = "data_nao_futura"))]
    #[schema(example = "2025-03-10")]
    pub data_venda: NaiveDate,
    #[validate(custom(function = "nao_vazio"))]
    #[schema(example = "OS-2025-0042")]
    pub numero_identificacao: String,
    pub unidade_id: Uuid,
    pub equipe_id: Option<Uuid>,
    pub observacoes: Option<String>,
    #[validate(length(min = 1, message = "validation.itens_obrigatorios"), nested)]
    pub itens: Vec<NovoItemPayload>,
}

fn totais_validos(payload: &NovaVendaPayload) -> Result<(), ValidationError> {
    payload.novos_itens().map(|_| ())
}

impl NovaVendaPayload {
    /// Itens com subtotal calculado e o total da venda.
    pub fn novos_itens(&self) -> Result<(Vec<NovoItem>, Decimal), ValidationError> {
        let itens = self
            .itens
            .iter()
            .map(|i| NovoItem::new(i.produto_id, i.quantidade, i.preco_unitario.unwrap_or_default()))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(erro_total_excedido)?;

        let total = valor_total(&itens).ok_or_else(erro_total_excedido)?;
        Ok((itens, total))
    }

    /// Produtos distintos da venda, para conferir o vínculo com a unidade.
    pub fn produto_ids(&self) -> Vec<Uuid> {
        let mut ids: Vec<Uuid> = self.itens.iter().map(|i| i.produto_id).collect();
        ids.sort();
        ids.dedup();
        ids
    }
}

// ---
// Filtros do relatório
// ---
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
#[validate(schema(function = "periodo_valido"))]
pub struct FiltroVendas {
    /// Data inicial (inclusive), formato YYYY-MM-DD
    pub data_inicio: Option<NaiveDate>,
    /// Data final (inclusive), formato YYYY-MM-DD
    pub data_fim: Option<NaiveDate>,
    /// Busca no número de identificação e nas observações
    pub busca: Option<String>,
}

fn periodo_valido(filtro: &FiltroVendas) -> Result<(), ValidationError> {
    if let (Some(inicio), Some(fim)) = (filtro.data_inicio, filtro.data_fim) {
        if inicio > fim {
            let mut err = ValidationError::new("periodo");
            err.message = Some("validation.periodo_invalido".into());
            return Err(err);
        }
    }
    Ok(())
}

impl FiltroVendas {
    pub fn aplica(&self, venda: &Venda) -> bool {
        if self.data_inicio.is_some_and(|inicio| venda.data_venda < inicio) {
            return false;
        }
        if self.data_fim.is_some_and(|fim| venda.data_venda > fim) {
            return false;
        }

        match self.busca.as_deref().map(str::trim).filter(|b| !b.is_empty()) {
            Some(busca) => {
                let busca = busca.to_lowercase();
                venda.numero_identificacao.to_lowercase().contains(&busca)
                    || venda
                        .observacoes
                        .as_deref()
                        .is_some_and(|o| o.to_lowercase().contains(&busca))
            }
            None => true,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RelatorioVendas {
    /// Cargo com que o relatório foi gerado ("Visualizando como")
    pub cargo: Option<Cargo>,
    pub vendas: Vec<VendaListagem>,
    pub quantidade: usize,
    pub total_periodo: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::FromPrimitive;

    fn venda(data: &str, numero: &str, observacoes: Option<&str>) -> Venda {
        let now = Utc::now();
        Venda {
            id: Uuid::new_v4(),
            usuario_id: Uuid::new_v4(),
            unidade_id: Uuid::new_v4(),
            equipe_id: None,
            data_venda: data.parse().unwrap(),
            numero_identificacao: numero.into(),
            valor_total: Decimal::ZERO,
            observacoes: observacoes.map(Into::into),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn intervalo_de_datas_e_inclusivo() {
        let filtro = FiltroVendas {
            data_inicio: Some("2025-03-01".parse().unwrap()),
            data_fim: Some("2025-03-31".parse().unwrap()),
            busca: None,
        };

        assert!(filtro.aplica(&venda("2025-03-01", "A", None)));
        assert!(filtro.aplica(&venda("2025-03-31", "B", None)));
        assert!(!filtro.aplica(&venda("2025-02-28", "C", None)));
        assert!(!filtro.aplica(&venda("2025-04-01", "D", None)));
    }

    #[test]
    fn busca_olha_numero_e_observacoes() {
        let filtro = FiltroVendas { busca: Some("revisão".into()), ..Default::default() };

        assert!(filtro.aplica(&venda("2025-03-10", "OS-1", Some("Cliente pediu REVISÃO completa"))));
        assert!(!filtro.aplica(&venda("2025-03-10", "OS-2", None)));

        let por_numero = FiltroVendas { busca: Some("os-2".into()), ..Default::default() };
        assert!(por_numero.aplica(&venda("2025-03-10", "OS-2", None)));
    }

    #[test]
    fn filtro_vazio_aceita_tudo() {
        let filtro = FiltroVendas { busca: Some("  ".into()), ..Default::default() };
        assert!(filtro.aplica(&venda("2020-01-01", "X", None)));
    }

    #[test]
    fn subtotal_e_total_sao_calculados_pelos_itens() {
        let preco = Decimal::from_f64(12.5).unwrap();
        let itens = vec![
            NovoItem::new(Uuid::new_v4(), 2, preco).unwrap(),
            NovoItem::new(Uuid::new_v4(), 1, Decimal::ZERO).unwrap(),
        ];

        assert_eq!(itens[0].subtotal, Decimal::from(25));
        assert_eq!(valor_total(&itens), Some(Decimal::from(25)));
    }

    fn payload(itens: Vec<NovoItemPayload>) -> NovaVendaPayload {
        NovaVendaPayload {
            data_venda: crate::common::validation::hoje(),
            numero_identificacao: "OS-1".into(),
            unidade_id: Uuid::new_v4(),
            equipe_id: None,
            observacoes: None,
            itens,
        }
    }

    #[test]
    fn venda_sem_itens_e_invalida() {
        let errors = payload(vec![]).validate().expect_err("sem itens");
        assert!(errors.errors().contains_key("itens"));
    }

    #[test]
    fn quantidade_zero_e_invalida() {
        let item = NovoItemPayload { produto_id: Uuid::new_v4(), quantidade: 0, preco_unitario: None };
        assert!(payload(vec![item]).validate().is_err());
    }

    #[test]
    fn preco_ausente_vale_zero() {
        let produto = Uuid::new_v4();
        let venda = payload(vec![
            NovoItemPayload { produto_id: produto, quantidade: 3, preco_unitario: None },
            NovoItemPayload { produto_id: produto, quantidade: 1, preco_unitario: Some(Decimal::from(40)) },
        ]);
        assert!(venda.validate().is_ok());

        let (itens, total) = venda.novos_itens().unwrap();
        assert_eq!(itens[0].subtotal, Decimal::ZERO);
        assert_eq!(total, Decimal::from(40));
        assert_eq!(venda.produto_ids(), vec![produto]);
    }

    #[test]
    fn periodo_invertido_e_rejeitado() {
        let filtro = FiltroVendas {
            data_inicio: Some("2025-03-31".parse().unwrap()),
            data_fim: Some("2025-03-01".parse().unwrap()),
            busca: None,
        };
        assert!(filtro.validate().is_err());
        assert!(FiltroVendas::default().validate().is_ok());
    }

    #[test]
    fn preco_fora_da_coluna_e_rejeitado_sem_estourar() {
        let json = format!(
            r#"{{"dataVenda":"{}","numeroIdentificacao":"OS-9","unidadeId":"{}",
                "itens":[{{"produtoId":"{}","quantidade":1000,"precoUnitario":70000000000000000000000000000}}]}}"#,
            crate::common::validation::hoje(),
            Uuid::new_v4(),
            Uuid::new_v4(),
        );
        let venda: NovaVendaPayload = serde_json::from_str(&json).expect("payload");

        assert!(venda.validate().is_err());
        assert!(venda.novos_itens().is_err());
    }

    #[test]
    fn total_acima_do_limite_e_rejeitado() {
        let item = |quantidade| NovoItemPayload {
            produto_id: Uuid::new_v4(),
            quantidade,
            preco_unitario: Some(Decimal::new(999_999_999_999, 2)),
        };

        assert!(payload(vec![item(1)]).validate().is_ok());

        let errors = payload(vec![item(1), item(1)]).validate().expect_err("total excedido");
        assert!(errors.errors().contains_key("__all__"));

        assert!(payload(vec![item(100_001)]).validate().is_err());
    }
}
