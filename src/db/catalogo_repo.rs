// src/db/catalogo_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{db_utils::map_constraint_error, error::AppError},
    models::catalogo::{
        Produto, ProdutoDaUnidade, ProdutoPayload, ProdutoUnidade, ProdutoUnidadeDetalhe,
        ProdutoUnidadePayload,
    },
};

#[derive(Clone)]
pub struct CatalogoRepository {
    pool: PgPool,
}

impl CatalogoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Produtos TUNAP
    // ---

    pub async fn list_produtos(&self, busca: Option<&str>, ativo: Option<bool>) -> Result<Vec<Produto>, AppError> {
        let produtos = sqlx::query_as::<_, Produto>(
            r#"
            SELECT * FROM produtos
            WHERE ($1::text IS NULL
                   OR referencia ILIKE $1 ESCAPE '\' OR nome ILIKE $1 ESCAPE '\'
                   OR nome_sintetico ILIKE $1 ESCAPE '\' OR numero ILIKE $1 ESCAPE '\')
              AND ($2::boolean IS NULL OR ativo = $2)
            ORDER BY referencia ASC
            "#,
        )
        .bind(busca)
        .bind(ativo)
        .fetch_all(&self.pool)
        .await?;
        Ok(produtos)
    }

    pub async fn create_produto<'e, E>(&self, executor: E, payload: &ProdutoPayload) -> Result<Produto, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Produto>(
            r#"
            INSERT INTO produtos (referencia, nome, nome_sintetico, numero, imagem, ativo)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(payload.referencia.trim())
        .bind(payload.nome.trim())
        .bind(payload.nome_sintetico.trim())
        .bind(payload.numero.trim())
        .bind(payload.imagem.as_deref())
        .bind(payload.ativo.unwrap_or(true))
        .fetch_one(executor)
        .await
        .map_err(|e| map_constraint_error(e, "produto"))
    }

    pub async fn update_produto<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        payload: &ProdutoPayload,
    ) -> Result<Option<Produto>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Produto>(
            r#"
            UPDATE produtos
            SET referencia = $2, nome = $3, nome_sintetico = $4, numero = $5, imagem = $6,
                ativo = COALESCE($7, ativo)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.referencia.trim())
        .bind(payload.nome.trim())
        .bind(payload.nome_sintetico.trim())
        .bind(payload.numero.trim())
        .bind(payload.imagem.as_deref())
        .bind(payload.ativo)
        .fetch_optional(executor)
        .await
        .map_err(|e| map_constraint_error(e, "produto"))
    }

    pub async fn deactivate_produto<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("UPDATE produtos SET ativo = FALSE WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // ---
    // Vínculos Produto x Unidade
    // ---

    pub async fn list_vinculos(&self, busca: Option<&str>) -> Result<Vec<ProdutoUnidadeDetalhe>, AppError> {
        let vinculos = sqlx::query_as::<_, ProdutoUnidadeDetalhe>(
            r#"
            SELECT
                pu.*,
                p.referencia AS produto_referencia,
                p.nome_sintetico AS produto_nome_sintetico,
                u.nome AS unidade_nome,
                u.cnpj AS unidade_cnpj
            FROM produtos_unidades pu
            JOIN produtos p ON p.id = pu.produto_id
            JOIN unidades u ON u.id = pu.unidade_id
            WHERE ($1::text IS NULL
                   OR p.referencia ILIKE $1 ESCAPE '\' OR p.nome_sintetico ILIKE $1 ESCAPE '\'
                   OR u.nome ILIKE $1 ESCAPE '\' OR pu.referencia_local ILIKE $1 ESCAPE '\')
            ORDER BY pu.created_at DESC, pu.id DESC
            "#,
        )
        .bind(busca)
        .fetch_all(&self.pool)
        .await?;
        Ok(vinculos)
    }

    pub async fn create_vinculo<'e, E>(
        &self,
        executor: E,
        payload: &ProdutoUnidadePayload,
    ) -> Result<ProdutoUnidade, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, ProdutoUnidade>(
            r#"
            INSERT INTO produtos_unidades (produto_id, unidade_id, referencia_local)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(payload.produto_id)
        .bind(payload.unidade_id)
        .bind(payload.referencia_local())
        .fetch_one(executor)
        .await
        .map_err(|e| map_constraint_error(e, "produto_unidade"))
    }

    pub async fn update_vinculo<'e, E>(
        &self,
        executor: E,
        id: i64,
        payload: &ProdutoUnidadePayload,
    ) -> Result<Option<ProdutoUnidade>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, ProdutoUnidade>(
            r#"
            UPDATE produtos_unidades
            SET produto_id = $2, unidade_id = $3, referencia_local = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.produto_id)
        .bind(payload.unidade_id)
        .bind(payload.referencia_local())
        .fetch_optional(executor)
        .await
        .map_err(|e| map_constraint_error(e, "produto_unidade"))
    }

    pub async fn delete_vinculo<'e, E>(&self, executor: E, id: i64) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM produtos_unidades WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Produtos ativos vinculados à unidade, para a Nova Venda.
    pub async fn produtos_da_unidade(&self, unidade_id: Uuid) -> Result<Vec<ProdutoDaUnidade>, AppError> {
        let produtos = sqlx::query_as::<_, ProdutoDaUnidade>(
            r#"
            SELECT p.id AS produto_id, pu.referencia_local, p.nome_sintetico
            FROM produtos_unidades pu
            JOIN produtos p ON p.id = pu.produto_id
            WHERE pu.unidade_id = $1 AND p.ativo
            ORDER BY pu.referencia_local ASC NULLS LAST, p.nome_sintetico ASC
            "#,
        )
        .bind(unidade_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(produtos)
    }

    /// Quantos dos produtos informados estão vinculados (e ativos) na unidade.
    pub async fn contar_vinculados<'e, E>(
        &self,
        executor: E,
        unidade_id: Uuid,
        produto_ids: &[Uuid],
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(DISTINCT pu.produto_id)
            FROM produtos_unidades pu
            JOIN produtos p ON p.id = pu.produto_id
            WHERE pu.unidade_id = $1 AND pu.produto_id = ANY($2) AND p.ativo
            "#,
        )
        .bind(unidade_id)
        .bind(produto_ids)
        .fetch_one(executor)
        .await?;
        Ok(total)
    }
}
