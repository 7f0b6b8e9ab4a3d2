// src/models/catalogo.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::nao_vazio;

// --- 1. Produto TUNAP ---
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Produto {
    pub id: Uuid,
    #[schema(example = "9155")]
    pub referencia: String,
    #[schema(example = "micrologic PREMIUM 155 - Limpeza do sistema de combustível")]
    pub nome: String,
    #[schema(example = "Limpeza de Bicos")]
    pub nome_sintetico: String,
    #[schema(example = "155")]
    pub numero: String,
    /// URL da imagem
    pub imagem: Option<String>,
    pub ativo: bool,
    pub created_at: DateTime<Utc>,
}

// --- 2. Vínculo Produto x Unidade ---
// Cada unidade pode ter o seu próprio código para o produto.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProdutoUnidade {
    pub id: i64,
    pub produto_id: Uuid,
    pub unidade_id: Uuid,
    #[schema(example = "OF-0042")]
    pub referencia_local: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProdutoUnidadeDetalhe {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub vinculo: ProdutoUnidade,
    pub produto_referencia: String,
    pub produto_nome_sintetico: String,
    pub unidade_nome: String,
    pub unidade_cnpj: String,
}

/// Linha crua usada para montar as opções de produto de uma unidade.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProdutoDaUnidade {
    pub produto_id: Uuid,
    pub referencia_local: Option<String>,
    pub nome_sintetico: String,
}

/// Produto pronto para um campo de seleção na Nova Venda.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProdutoOpcao {
    pub id: Uuid,
    pub referencia_local: String,
    pub nome_sintetico: String,
    #[schema(example = "OF-0042 - Limpeza de Bicos")]
    pub label: String,
}

impl From<ProdutoDaUnidade> for ProdutoOpcao {
    fn from(row: ProdutoDaUnidade) -> Self {
        let referencia_local = row
            .referencia_local
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| "S/REF".to_string());
        let label = format!("{} - {}", referencia_local, row.nome_sintetico);

        Self {
            id: row.produto_id,
            referencia_local,
            nome_sintetico: row.nome_sintetico,
            label,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProdutoPayload {
    #[validate(custom(function = "nao_vazio"))]
    pub referencia: String,
    #[validate(custom(function = "nao_vazio"))]
    pub nome: String,
    #[validate(custom(function = "nao_vazio"))]
    pub nome_sintetico: String,
    #[validate(custom(function = "nao_vazio"))]
    pub numero: String,
    pub imagem: Option<String>,
    pub ativo: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProdutoUnidadePayload {
    pub produto_id: Uuid,
    pub unidade_id: Uuid,
    pub referencia_local: Option<String>,
}

impl ProdutoUnidadePayload {
    /// Referência local em branco é gravada como NULL.
    pub fn referencia_local(&self) -> Option<&str> {
        self.referencia_local
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
    }
}

/// Filtro de texto das caixas de seleção (contém, sem diferenciar maiúsculas).
pub fn label_contem(label: &str, busca: Option<&str>) -> bool {
    match busca.map(str::trim).filter(|b| !b.is_empty()) {
        Some(b) => label.to_lowercase().contains(&b.to_lowercase()),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produto_sem_referencia_local_recebe_s_ref() {
        let opcao = ProdutoOpcao::from(ProdutoDaUnidade {
            produto_id: Uuid::new_v4(),
            referencia_local: None,
            nome_sintetico: "Limpeza de Bicos".into(),
        });
        assert_eq!(opcao.label, "S/REF - Limpeza de Bicos");

        let com_ref = ProdutoOpcao::from(ProdutoDaUnidade {
            produto_id: Uuid::new_v4(),
            referencia_local: Some("OF-0042".into()),
            nome_sintetico: "Limpeza de Bicos".into(),
        });
        assert_eq!(com_ref.label, "OF-0042 - Limpeza de Bicos");
    }

    #[test]
    fn busca_de_label_ignora_maiusculas() {
        assert!(label_contem("OF-0042 - Limpeza de Bicos", Some("bicos")));
        assert!(label_contem("OF-0042 - Limpeza de Bicos", Some("  ")));
        assert!(label_contem("OF-0042 - Limpeza de Bicos", None));
        assert!(!label_contem("OF-0042 - Limpeza de Bicos", Some("arrefecimento")));
    }

    #[test]
    fn referencia_local_em_branco_vira_nula() {
        let payload = ProdutoUnidadePayload {
            produto_id: Uuid::new_v4(),
            unidade_id: Uuid::new_v4(),
            referencia_local: Some("  ".into()),
        };
        assert_eq!(payload.referencia_local(), None);
    }
}
