// src/db/vendas_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{db_utils::map_constraint_error, error::AppError},
    models::{
        escopo::FiltroVisibilidade,
        vendas::{NovaVendaPayload, NovoItem, Venda, VendaItemDetalhe, VendaListagem},
    },
};

const VENDA_LISTAGEM_SELECT: &str = r#"
    SELECT
        v.*,
        u.nome_completo AS usuario_nome,
        un.nome AS unidade_nome,
        e.nome AS equipe_nome
    FROM vendas v
    JOIN usuarios u ON u.id = v.usuario_id
    JOIN unidades un ON un.id = v.unidade_id
    LEFT JOIN equipes e ON e.id = v.equipe_id
"#;

// Mesmo predicado de `Visibilidade::permite`, em SQL ($1..$4)
const VISIBILIDADE_WHERE: &str = r#"
    ($1 OR v.usuario_id = $2 OR v.equipe_id = ANY($3) OR v.unidade_id = ANY($4))
"#;

#[derive(Clone)]
pub struct VendasRepository {
    pool: PgPool,
}

impl VendasRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_venda<'e, E>(
        &self,
        executor: E,
        usuario_id: Uuid,
        payload: &NovaVendaPayload,
        valor_total: Decimal,
    ) -> Result<Venda, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let observacoes = payload
            .observacoes
            .as_deref()
            .map(str::trim)
            .filter(|o| !o.is_empty());

        sqlx::query_as::<_, Venda>(
            r#"
            INSERT INTO vendas (
                usuario_id, unidade_id, equipe_id, data_venda,
                numero_identificacao, valor_total, observacoes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(usuario_id)
        .bind(payload.unidade_id)
        .bind(payload.equipe_id)
        .bind(payload.data_venda)
        .bind(payload.numero_identificacao.trim())
        .bind(valor_total)
        .bind(observacoes)
        .fetch_one(executor)
        .await
        .map_err(|e| map_constraint_error(e, "venda"))
    }

    pub async fn insert_itens<'e, E>(
        &self,
        executor: E,
        venda_id: Uuid,
        itens: &[NovoItem],
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let produto_ids: Vec<Uuid> = itens.iter().map(|i| i.produto_id).collect();
        let quantidades: Vec<i32> = itens.iter().map(|i| i.quantidade).collect();
        let precos: Vec<Decimal> = itens.iter().map(|i| i.preco_unitario).collect();
        let subtotais: Vec<Decimal> = itens.iter().map(|i| i.subtotal).collect();

        let result = sqlx::query(
            r#"
            INSERT INTO venda_itens (venda_id, produto_id, quantidade, preco_unitario, subtotal)
            SELECT $1::uuid, *
            FROM UNNEST($2::uuid[], $3::int4[], $4::numeric[], $5::numeric[])
            "#,
        )
        .bind(venda_id)
        .bind(&produto_ids)
        .bind(&quantidades)
        .bind(&precos)
        .bind(&subtotais)
        .execute(executor)
        .await
        .map_err(|e| map_constraint_error(e, "produto"))?;

        Ok(result.rows_affected())
    }

    /// Vendas visíveis no período (datas inclusivas), mais recentes primeiro.
    pub async fn list_visiveis(
        &self,
        filtro: &FiltroVisibilidade,
        data_inicio: Option<NaiveDate>,
        data_fim: Option<NaiveDate>,
    ) -> Result<Vec<VendaListagem>, AppError> {
        let sql = format!(
            r#"{}
            WHERE {}
              AND ($5::date IS NULL OR v.data_venda >= $5)
              AND ($6::date IS NULL OR v.data_venda <= $6)
            ORDER BY v.data_venda DESC, v.created_at DESC
            "#,
            VENDA_LISTAGEM_SELECT, VISIBILIDADE_WHERE
        );

        let vendas = sqlx::query_as::<_, VendaListagem>(&sql)
            .bind(filtro.todas)
            .bind(filtro.usuario_id)
            .bind(&filtro.equipe_ids)
            .bind(&filtro.unidade_ids)
            .bind(data_inicio)
            .bind(data_fim)
            .fetch_all(&self.pool)
            .await?;
        Ok(vendas)
    }

    pub async fn find_listagem(&self, id: Uuid) -> Result<Option<VendaListagem>, AppError> {
        let sql = format!("{} WHERE v.id = $1", VENDA_LISTAGEM_SELECT);
        let venda = sqlx::query_as::<_, VendaListagem>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(venda)
    }

    pub async fn list_itens(&self, venda_id: Uuid) -> Result<Vec<VendaItemDetalhe>, AppError> {
        let itens = sqlx::query_as::<_, VendaItemDetalhe>(
            r#"
            SELECT
                vi.*,
                p.referencia AS produto_referencia,
                p.nome_sintetico AS produto_nome_sintetico
            FROM venda_itens vi
            JOIN produtos p ON p.id = vi.produto_id
            WHERE vi.venda_id = $1
            ORDER BY vi.created_at ASC, p.nome_sintetico ASC
            "#,
        )
        .bind(venda_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(itens)
    }

    /// Quantidade de vendas visíveis entre duas datas (inclusivas).
    pub async fn count_visiveis(
        &self,
        filtro: &FiltroVisibilidade,
        desde: NaiveDate,
        ate: NaiveDate,
    ) -> Result<i64, AppError> {
        let sql = format!(
            "SELECT COUNT(*) FROM vendas v WHERE {} AND v.data_venda BETWEEN $5 AND $6",
            VISIBILIDADE_WHERE
        );
        let total: i64 = sqlx::query_scalar(&sql)
            .bind(filtro.todas)
            .bind(filtro.usuario_id)
            .bind(&filtro.equipe_ids)
            .bind(&filtro.unidade_ids)
            .bind(desde)
            .bind(ate)
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }
}
