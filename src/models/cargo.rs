// src/models/cargo.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::escopo::Escopo;

// O que sai do banco (Tabela cargos)
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Cargo {
    pub id: Uuid,

    #[schema(example = "Gerente")]
    pub nome: String,

    #[schema(example = "unidade")]
    pub escopo: Escopo,

    #[schema(example = 50)]
    pub nivel_acesso: i32,

    #[schema(example = "Gestão")]
    pub categoria: String,

    #[schema(example = "#eab308")]
    pub cor: String,

    pub created_at: DateTime<Utc>,
}

// Categoria de equipe (Mecânica, Funilaria...)
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TipoEquipe {
    pub id: Uuid,
    #[schema(example = "Mecânica")]
    pub nome: String,
    pub descricao: Option<String>,
    pub ativo: bool,
    pub created_at: DateTime<Utc>,
}
