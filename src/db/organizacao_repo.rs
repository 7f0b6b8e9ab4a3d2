// src/db/organizacao_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{db_utils::map_constraint_error, error::AppError},
    models::{
        cargo::TipoEquipe,
        organizacao::{
            normalize_cnpj, Conglomerado, ConglomeradoPayload, Equipe, EquipeDetalhe, EquipePayload,
            Grupo, GrupoDetalhe, GrupoPayload, ListagemQuery, Marca, MarcaPayload, Unidade,
            UnidadeDetalhe, UnidadePayload,
        },
    },
};

/// Cadastros que são inativados (ativo = false) em vez de apagados.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inativavel {
    Conglomerado,
    Grupo,
    Unidade,
    Equipe,
}

impl Inativavel {
    fn tabela(self) -> &'static str {
        match self {
            Inativavel::Conglomerado => "conglomerados",
            Inativavel::Grupo => "grupos",
            Inativavel::Unidade => "unidades",
            Inativavel::Equipe => "equipes",
        }
    }

    pub fn recurso(self) -> &'static str {
        match self {
            Inativavel::Conglomerado => "conglomerado",
            Inativavel::Grupo => "grupo",
            Inativavel::Unidade => "unidade",
            Inativavel::Equipe => "equipe",
        }
    }
}

const UNIDADE_DETALHE_SELECT: &str = r#"
    SELECT
        u.*,
        g.nome AS grupo_nome,
        c.nome AS conglomerado_nome,
        m.nome AS marca_nome
    FROM unidades u
    LEFT JOIN grupos g ON g.id = u.grupo_id
    LEFT JOIN conglomerados c ON c.id = g.conglomerado_id
    LEFT JOIN marcas m ON m.id = u.marca_id
"#;

const EQUIPE_DETALHE_SELECT: &str = r#"
    SELECT
        e.*,
        u.nome AS unidade_nome,
        g.nome AS grupo_nome,
        t.nome AS tipo_equipe_nome
    FROM equipes e
    JOIN unidades u ON u.id = e.unidade_id
    JOIN grupos g ON g.id = u.grupo_id
    LEFT JOIN tipos_equipe t ON t.id = e.tipo_equipe_id
"#;

#[derive(Clone)]
pub struct OrganizacaoRepository {
    pool: PgPool,
}

impl OrganizacaoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Funções de "Leitura" (Getters)
    // ---
    // Funções de leitura são simples e podem usar a pool principal.

    pub async fn list_conglomerados(&self, query: &ListagemQuery) -> Result<Vec<Conglomerado>, AppError> {
        let conglomerados = sqlx::query_as::<_, Conglomerado>(
            r#"
            SELECT * FROM conglomerados
            WHERE ($1::text IS NULL OR nome ILIKE $1 ESCAPE '\')
              AND ($2::boolean IS NULL OR ativo = $2)
            ORDER BY nome ASC
            "#,
        )
        .bind(query.padrao_busca())
        .bind(query.ativo)
        .fetch_all(&self.pool)
        .await?;
        Ok(conglomerados)
    }

    pub async fn list_grupos(&self, query: &ListagemQuery) -> Result<Vec<GrupoDetalhe>, AppError> {
        let grupos = sqlx::query_as::<_, GrupoDetalhe>(
            r#"
            SELECT g.*, c.nome AS conglomerado_nome
            FROM grupos g
            JOIN conglomerados c ON c.id = g.conglomerado_id
            WHERE ($1::text IS NULL OR g.nome ILIKE $1 ESCAPE '\' OR c.nome ILIKE $1 ESCAPE '\')
              AND ($2::boolean IS NULL OR g.ativo = $2)
            ORDER BY g.nome ASC
            "#,
        )
        .bind(query.padrao_busca())
        .bind(query.ativo)
        .fetch_all(&self.pool)
        .await?;
        Ok(grupos)
    }

    pub async fn list_marcas(&self, query: &ListagemQuery) -> Result<Vec<Marca>, AppError> {
        let marcas = sqlx::query_as::<_, Marca>(
            r#"
            SELECT * FROM marcas
            WHERE ($1::text IS NULL OR nome ILIKE $1 ESCAPE '\' OR categoria ILIKE $1 ESCAPE '\')
            ORDER BY nome ASC
            "#,
        )
        .bind(query.padrao_busca())
        .fetch_all(&self.pool)
        .await?;
        Ok(marcas)
    }

    pub async fn list_unidades(&self, query: &ListagemQuery) -> Result<Vec<UnidadeDetalhe>, AppError> {
        let sql = format!(
            r#"{}
            WHERE ($1::text IS NULL OR u.nome ILIKE $1 ESCAPE '\' OR u.cnpj LIKE $2 OR g.nome ILIKE $1 ESCAPE '\')
              AND ($3::boolean IS NULL OR u.ativo = $3)
            ORDER BY u.nome ASC
            "#,
            UNIDADE_DETALHE_SELECT
        );

        // A busca por CNPJ compara só os dígitos
        let busca_cnpj = query
            .busca
            .as_deref()
            .map(normalize_cnpj)
            .filter(|d| !d.is_empty())
            .map(|d| format!("%{}%", d));

        let unidades = sqlx::query_as::<_, UnidadeDetalhe>(&sql)
            .bind(query.padrao_busca())
            .bind(busca_cnpj)
            .bind(query.ativo)
            .fetch_all(&self.pool)
            .await?;
        Ok(unidades)
    }

    /// Unidades ativas com nomes de grupo e marca (base das caixas de seleção).
    pub async fn list_unidades_ativas(&self) -> Result<Vec<UnidadeDetalhe>, AppError> {
        let sql = format!("{} WHERE u.ativo ORDER BY g.nome ASC, u.nome ASC", UNIDADE_DETALHE_SELECT);
        let unidades = sqlx::query_as::<_, UnidadeDetalhe>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(unidades)
    }

    pub async fn list_equipes(&self, query: &ListagemQuery) -> Result<Vec<EquipeDetalhe>, AppError> {
        let sql = format!(
            r#"{}
            WHERE ($1::text IS NULL OR e.nome ILIKE $1 ESCAPE '\' OR u.nome ILIKE $1 ESCAPE '\')
              AND ($2::boolean IS NULL OR e.ativo = $2)
            ORDER BY u.nome ASC, e.nome ASC
            "#,
            EQUIPE_DETALHE_SELECT
        );
        let equipes = sqlx::query_as::<_, EquipeDetalhe>(&sql)
            .bind(query.padrao_busca())
            .bind(query.ativo)
            .fetch_all(&self.pool)
            .await?;
        Ok(equipes)
    }

    pub async fn list_equipes_ativas(&self) -> Result<Vec<EquipeDetalhe>, AppError> {
        let sql = format!("{} WHERE e.ativo ORDER BY u.nome ASC, e.nome ASC", EQUIPE_DETALHE_SELECT);
        let equipes = sqlx::query_as::<_, EquipeDetalhe>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(equipes)
    }

    pub async fn find_equipe<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Equipe>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let equipe = sqlx::query_as::<_, Equipe>("SELECT * FROM equipes WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(equipe)
    }

    pub async fn list_tipos_equipe(&self) -> Result<Vec<TipoEquipe>, AppError> {
        let tipos = sqlx::query_as::<_, TipoEquipe>(
            "SELECT * FROM tipos_equipe WHERE ativo ORDER BY nome ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(tipos)
    }

    // ---
    // Funções de "Escrita"
    // ---

    pub async fn create_conglomerado<'e, E>(
        &self,
        executor: E,
        payload: &ConglomeradoPayload,
    ) -> Result<Conglomerado, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Conglomerado>(
            "INSERT INTO conglomerados (nome, ativo) VALUES ($1, $2) RETURNING *",
        )
        .bind(payload.nome.trim())
        .bind(payload.ativo.unwrap_or(true))
        .fetch_one(executor)
        .await
        .map_err(|e| map_constraint_error(e, "conglomerado"))
    }

    pub async fn update_conglomerado<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        payload: &ConglomeradoPayload,
    ) -> Result<Option<Conglomerado>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Conglomerado>(
            r#"
            UPDATE conglomerados
            SET nome = $2, ativo = COALESCE($3, ativo), updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.nome.trim())
        .bind(payload.ativo)
        .fetch_optional(executor)
        .await
        .map_err(|e| map_constraint_error(e, "conglomerado"))
    }

    pub async fn create_grupo<'e, E>(&self, executor: E, payload: &GrupoPayload) -> Result<Grupo, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Grupo>(
            "INSERT INTO grupos (conglomerado_id, nome, ativo) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(payload.conglomerado_id)
        .bind(payload.nome.trim())
        .bind(payload.ativo.unwrap_or(true))
        .fetch_one(executor)
        .await
        .map_err(|e| map_constraint_error(e, "grupo"))
    }

    pub async fn update_grupo<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        payload: &GrupoPayload,
    ) -> Result<Option<Grupo>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Grupo>(
            r#"
            UPDATE grupos
            SET conglomerado_id = $2, nome = $3, ativo = COALESCE($4, ativo), updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.conglomerado_id)
        .bind(payload.nome.trim())
        .bind(payload.ativo)
        .fetch_optional(executor)
        .await
        .map_err(|e| map_constraint_error(e, "grupo"))
    }

    pub async fn create_marca<'e, E>(&self, executor: E, payload: &MarcaPayload) -> Result<Marca, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Marca>("INSERT INTO marcas (nome, categoria) VALUES ($1, $2) RETURNING *")
            .bind(payload.nome.trim())
            .bind(payload.categoria.trim())
            .fetch_one(executor)
            .await
            .map_err(|e| map_constraint_error(e, "marca"))
    }

    pub async fn update_marca<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        payload: &MarcaPayload,
    ) -> Result<Option<Marca>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Marca>(
            "UPDATE marcas SET nome = $2, categoria = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(payload.nome.trim())
        .bind(payload.categoria.trim())
        .fetch_optional(executor)
        .await
        .map_err(|e| map_constraint_error(e, "marca"))
    }

    // Marcas são apagadas de fato; unidades que usam a marca bloqueiam a exclusão (409)
    pub async fn delete_marca<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM marcas WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await
            .map_err(|e| map_constraint_error(e, "marca"))?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn create_unidade<'e, E>(&self, executor: E, payload: &UnidadePayload) -> Result<Unidade, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Unidade>(
            r#"
            INSERT INTO unidades (grupo_id, marca_id, nome, cnpj, ativo)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(payload.grupo_id)
        .bind(payload.marca_id)
        .bind(payload.nome.trim())
        .bind(normalize_cnpj(&payload.cnpj))
        .bind(payload.ativo.unwrap_or(true))
        .fetch_one(executor)
        .await
        .map_err(|e| map_constraint_error(e, "unidade"))
    }

    pub async fn update_unidade<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        payload: &UnidadePayload,
    ) -> Result<Option<Unidade>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Unidade>(
            r#"
            UPDATE unidades
            SET grupo_id = $2, marca_id = $3, nome = $4, cnpj = $5,
                ativo = COALESCE($6, ativo), updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.grupo_id)
        .bind(payload.marca_id)
        .bind(payload.nome.trim())
        .bind(normalize_cnpj(&payload.cnpj))
        .bind(payload.ativo)
        .fetch_optional(executor)
        .await
        .map_err(|e| map_constraint_error(e, "unidade"))
    }

    pub async fn create_equipe<'e, E>(&self, executor: E, payload: &EquipePayload) -> Result<Equipe, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Equipe>(
            r#"
            INSERT INTO equipes (unidade_id, tipo_equipe_id, nome, ativo)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(payload.unidade_id)
        .bind(payload.tipo_equipe_id)
        .bind(payload.nome.trim())
        .bind(payload.ativo.unwrap_or(true))
        .fetch_one(executor)
        .await
        .map_err(|e| map_constraint_error(e, "equipe"))
    }

    pub async fn update_equipe<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        payload: &EquipePayload,
    ) -> Result<Option<Equipe>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Equipe>(
            r#"
            UPDATE equipes
            SET unidade_id = $2, tipo_equipe_id = $3, nome = $4,
                ativo = COALESCE($5, ativo), updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.unidade_id)
        .bind(payload.tipo_equipe_id)
        .bind(payload.nome.trim())
        .bind(payload.ativo)
        .fetch_optional(executor)
        .await
        .map_err(|e| map_constraint_error(e, "equipe"))
    }

    /// Exclusão lógica: o registro continua no banco com `ativo = false`.
    pub async fn deactivate<'e, E>(&self, executor: E, entidade: Inativavel, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // O nome da tabela vem do enum, nunca do cliente
        let sql = format!(
            "UPDATE {} SET ativo = FALSE, updated_at = NOW() WHERE id = $1",
            entidade.tabela()
        );
        let result = sqlx::query(&sql).bind(id).execute(executor).await?;
        Ok(result.rows_affected() > 0)
    }
}
