// src/models/organizacao.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use validator::Validate;

use crate::common::db_utils::like_pattern;
use crate::common::validation::{cnpj_valido, nao_vazio};

// ---
// 1. Conglomerado (topo da hierarquia)
// ---
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Conglomerado {
    pub id: Uuid,
    #[schema(example = "Grupo Sinal")]
    pub nome: String,
    pub ativo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---
// 2. Grupo (pertence a um conglomerado)
// ---
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Grupo {
    pub id: Uuid,
    pub conglomerado_id: Uuid,
    pub nome: String,
    pub ativo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GrupoDetalhe {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub grupo: Grupo,
    pub conglomerado_nome: String,
}

// ---
// 3. Marca (catálogo independente)
// ---
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Marca {
    pub id: Uuid,
    #[schema(example = "Volkswagen")]
    pub nome: String,
    #[schema(example = "Automóveis")]
    pub categoria: String,
    pub created_at: DateTime<Utc>,
}

// ---
// 4. Unidade (a concessionária / loja)
// ---
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Unidade {
    pub id: Uuid,
    pub grupo_id: Uuid,
    pub marca_id: Option<Uuid>,
    pub nome: String,
    /// Apenas dígitos.
    #[schema(example = "12345678000199")]
    pub cnpj: String,
    pub ativo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnidadeDetalhe {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub unidade: Unidade,
    pub grupo_nome: Option<String>,
    pub conglomerado_nome: Option<String>,
    pub marca_nome: Option<String>,
}

/// Unidade pronta para um campo de seleção.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnidadeOpcao {
    pub id: Uuid,
    pub nome: String,
    pub cnpj: String,
    pub grupo_nome: String,
    pub marca_nome: String,
    #[schema(example = "Grupo Sinal Volkswagen Sinal Centro - 12.345.678/0001-99")]
    pub label: String,
}

impl From<UnidadeDetalhe> for UnidadeOpcao {
    fn from(detalhe: UnidadeDetalhe) -> Self {
        let grupo_nome = detalhe.grupo_nome.unwrap_or_else(|| "Sem Grupo".to_string());
        let marca_nome = detalhe.marca_nome.unwrap_or_else(|| "Sem Marca".to_string());
        let cnpj = format_cnpj(&detalhe.unidade.cnpj);
        let label = format!("{} {} {} - {}", grupo_nome, marca_nome, detalhe.unidade.nome, cnpj);

        Self {
            id: detalhe.unidade.id,
            nome: detalhe.unidade.nome,
            cnpj,
            grupo_nome,
            marca_nome,
            label,
        }
    }
}

// ---
// 5. Equipe (pertence a uma unidade)
// ---
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Equipe {
    pub id: Uuid,
    pub unidade_id: Uuid,
    pub tipo_equipe_id: Option<Uuid>,
    #[schema(example = "Oficina Centro")]
    pub nome: String,
    pub ativo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EquipeDetalhe {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub equipe: Equipe,
    pub unidade_nome: String,
    pub grupo_nome: String,
    pub tipo_equipe_nome: Option<String>,
}

// ---
// Payloads do painel administrativo
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConglomeradoPayload {
    #[validate(custom(function = "nao_vazio"))]
    #[schema(example = "Grupo Sinal")]
    pub nome: String,
    pub ativo: Option<bool>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GrupoPayload {
    pub conglomerado_id: Uuid,
    #[validate(custom(function = "nao_vazio"))]
    pub nome: String,
    pub ativo: Option<bool>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarcaPayload {
    #[validate(custom(function = "nao_vazio"))]
    pub nome: String,
    #[validate(custom(function = "nao_vazio"))]
    pub categoria: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnidadePayload {
    pub grupo_id: Uuid,
    pub marca_id: Option<Uuid>,
    #[validate(custom(function = "nao_vazio"))]
    pub nome: String,
    /// Aceita com ou sem pontuação; é gravado só com os dígitos.
    #[validate(custom(function = "cnpj_valido"))]
    #[schema(example = "12.345.678/0001-99")]
    pub cnpj: String,
    pub ativo: Option<bool>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EquipePayload {
    pub unidade_id: Uuid,
    pub tipo_equipe_id: Option<Uuid>,
    #[validate(custom(function = "nao_vazio"))]
    pub nome: String,
    pub ativo: Option<bool>,
}

// ---
// Filtros comuns das listagens
// ---
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListagemQuery {
    /// Busca por nome (contém, sem diferenciar maiúsculas)
    pub busca: Option<String>,
    /// Filtra por situação
    pub ativo: Option<bool>,
}

/// Só o texto de busca (caixas de seleção e listagens sem filtro de situação).
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BuscaQuery {
    pub busca: Option<String>,
}

impl ListagemQuery {
    /// Padrão para `ILIKE`, ou `None` quando a busca está vazia.
    pub fn padrao_busca(&self) -> Option<String> {
        like_pattern(self.busca.as_deref())
    }
}

// ---
// CNPJ
// ---

/// Remove a pontuação do CNPJ, mantendo apenas os dígitos.
pub fn normalize_cnpj(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Formata `12345678000199` como `12.345.678/0001-99`. Valores incompletos são devolvidos como estão.
pub fn format_cnpj(value: &str) -> String {
    let digits = normalize_cnpj(value);
    if digits.len() != 14 {
        return value.to_string();
    }
    format!(
        "{}.{}.{}/{}-{}",
        &digits[0..2],
        &digits[2..5],
        &digits[5..8],
        &digits[8..12],
        &digits[12..14]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cnpj_e_normalizado_e_formatado() {
        assert_eq!(normalize_cnpj("12.345.678/0001-99"), "12345678000199");
        assert_eq!(format_cnpj("12345678000199"), "12.345.678/0001-99");
        assert_eq!(format_cnpj("123"), "123");
    }

    #[test]
    fn opcao_de_unidade_usa_padroes_quando_falta_grupo_ou_marca() {
        let now = Utc::now();
        let detalhe = UnidadeDetalhe {
            unidade: Unidade {
                id: Uuid::new_v4(),
                grupo_id: Uuid::new_v4(),
                marca_id: None,
                nome: "Centro".into(),
                cnpj: "12345678000199".into(),
                ativo: true,
                created_at: now,
                updated_at: now,
            },
            grupo_nome: None,
            conglomerado_nome: None,
            marca_nome: None,
        };

        let opcao = UnidadeOpcao::from(detalhe);
        assert_eq!(opcao.label, "Sem Grupo Sem Marca Centro - 12.345.678/0001-99");
    }

    #[test]
    fn busca_vazia_nao_gera_padrao() {
        let vazia = ListagemQuery { busca: Some("   ".into()), ativo: None };
        assert!(vazia.padrao_busca().is_none());

        let preenchida = ListagemQuery { busca: Some(" sinal ".into()), ativo: None };
        assert_eq!(preenchida.padrao_busca().as_deref(), Some("%sinal%"));
    }

    #[test]
    fn payload_de_unidade_exige_cnpj_completo() {
        let payload = UnidadePayload {
            grupo_id: Uuid::new_v4(),
            marca_id: None,
            nome: "Centro".into(),
            cnpj: "12.345.678/0001".into(),
            ativo: None,
        };
        let errors = payload.validate().expect_err("cnpj incompleto");
        assert!(errors.field_errors().contains_key("cnpj"));
    }

    #[test]
    fn nome_em_branco_e_rejeitado() {
        let payload = ConglomeradoPayload { nome: "   ".into(), ativo: None };
        assert!(payload.validate().is_err());
    }
}
