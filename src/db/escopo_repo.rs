// src/db/escopo_repo.rs

use sqlx::{Acquire, Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{db_utils::map_constraint_error, error::AppError},
    models::{
        auth::VinculoEquipeLinha,
        cargo::TipoEquipe,
        escopo::{EquipeNo, Hierarquia, UnidadeNo, Vinculos},
        organizacao::{Conglomerado, Equipe, Grupo, Unidade},
    },
};

/// Uma linha de `usuario_escopos` (só um dos três preenchido).
#[derive(Debug, Clone, Copy, sqlx::FromRow)]
struct EscopoLinha {
    unidade_id: Option<Uuid>,
    grupo_id: Option<Uuid>,
    conglomerado_id: Option<Uuid>,
}

/// Repositório dos vínculos que definem o escopo de um usuário.
#[derive(Clone)]
pub struct EscopoRepository {
    pool: PgPool,
}

impl EscopoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Todos os vínculos gravados do usuário.
    pub async fn vinculos(&self, usuario_id: Uuid) -> Result<Vinculos, AppError> {
        let equipe_ids: Vec<Uuid> = sqlx::query_scalar(
            "SELECT equipe_id FROM usuario_equipes WHERE usuario_id = $1",
        )
        .bind(usuario_id)
        .fetch_all(&self.pool)
        .await?;

        let tipo_equipe_ids: Vec<Uuid> = sqlx::query_scalar(
            "SELECT tipo_equipe_id FROM usuario_tipos_equipe WHERE usuario_id = $1",
        )
        .bind(usuario_id)
        .fetch_all(&self.pool)
        .await?;

        let escopos = sqlx::query_as::<_, EscopoLinha>(
            "SELECT unidade_id, grupo_id, conglomerado_id FROM usuario_escopos WHERE usuario_id = $1",
        )
        .bind(usuario_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Vinculos {
            equipe_ids,
            tipo_equipe_ids,
            unidade_ids: escopos.iter().filter_map(|e| e.unidade_id).collect(),
            grupo_ids: escopos.iter().filter_map(|e| e.grupo_id).collect(),
            conglomerado_ids: escopos.iter().filter_map(|e| e.conglomerado_id).collect(),
        })
    }

    /// Snapshot das unidades e equipes ativas.
    pub async fn hierarquia(&self) -> Result<Hierarquia, AppError> {
        let unidades = sqlx::query_as::<_, UnidadeNo>(
            r#"
            SELECT u.id AS unidade_id, u.grupo_id, g.conglomerado_id
            FROM unidades u
            JOIN grupos g ON g.id = u.grupo_id
            WHERE u.ativo
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let equipes = sqlx::query_as::<_, EquipeNo>(
            "SELECT id AS equipe_id, unidade_id, tipo_equipe_id FROM equipes WHERE ativo",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(Hierarquia::new(unidades, equipes))
    }

    /// Troca todos os vínculos do usuário pelos informados.
    // Recebe uma conexão (normalmente a transação do cadastro) e abre um savepoint.
    pub async fn substituir_vinculos<'e, E>(
        &self,
        executor: E,
        usuario_id: Uuid,
        vinculos: &Vinculos,
    ) -> Result<(), AppError>
    where
        E: Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        sqlx::query("DELETE FROM usuario_equipes WHERE usuario_id = $1")
            .bind(usuario_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM usuario_tipos_equipe WHERE usuario_id = $1")
            .bind(usuario_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM usuario_escopos WHERE usuario_id = $1")
            .bind(usuario_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO usuario_equipes (usuario_id, equipe_id) SELECT $1, UNNEST($2::uuid[])",
        )
        .bind(usuario_id)
        .bind(&vinculos.equipe_ids)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_constraint_error(e, "equipe"))?;

        sqlx::query(
            "INSERT INTO usuario_tipos_equipe (usuario_id, tipo_equipe_id) SELECT $1, UNNEST($2::uuid[])",
        )
        .bind(usuario_id)
        .bind(&vinculos.tipo_equipe_ids)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_constraint_error(e, "tipo_equipe"))?;

        sqlx::query(
            r#"
            INSERT INTO usuario_escopos (usuario_id, unidade_id)
            SELECT $1, UNNEST($2::uuid[])
            "#,
        )
        .bind(usuario_id)
        .bind(&vinculos.unidade_ids)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_constraint_error(e, "unidade"))?;

        sqlx::query(
            r#"
            INSERT INTO usuario_escopos (usuario_id, grupo_id)
            SELECT $1, UNNEST($2::uuid[])
            "#,
        )
        .bind(usuario_id)
        .bind(&vinculos.grupo_ids)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_constraint_error(e, "grupo"))?;

        sqlx::query(
            r#"
            INSERT INTO usuario_escopos (usuario_id, conglomerado_id)
            SELECT $1, UNNEST($2::uuid[])
            "#,
        )
        .bind(usuario_id)
        .bind(&vinculos.conglomerado_ids)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_constraint_error(e, "conglomerado"))?;

        tx.commit().await?;
        Ok(())
    }

    // ---
    // Perfil (UsuarioCompleto)
    // ---

    pub async fn tipos_equipe_do_usuario(&self, usuario_id: Uuid) -> Result<Vec<TipoEquipe>, AppError> {
        let tipos = sqlx::query_as::<_, TipoEquipe>(
            r#"
            SELECT t.* FROM tipos_equipe t
            JOIN usuario_tipos_equipe ut ON ut.tipo_equipe_id = t.id
            WHERE ut.usuario_id = $1
            ORDER BY t.nome ASC
            "#,
        )
        .bind(usuario_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(tipos)
    }

    pub async fn equipes_do_usuario(&self, usuario_id: Uuid) -> Result<Vec<Equipe>, AppError> {
        let equipes = sqlx::query_as::<_, Equipe>(
            r#"
            SELECT e.* FROM equipes e
            JOIN usuario_equipes ue ON ue.equipe_id = e.id
            WHERE ue.usuario_id = $1
            ORDER BY e.nome ASC
            "#,
        )
        .bind(usuario_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(equipes)
    }

    pub async fn unidades_do_usuario(&self, usuario_id: Uuid) -> Result<Vec<Unidade>, AppError> {
        let unidades = sqlx::query_as::<_, Unidade>(
            r#"
            SELECT u.* FROM unidades u
            JOIN usuario_escopos ue ON ue.unidade_id = u.id
            WHERE ue.usuario_id = $1
            ORDER BY u.nome ASC
            "#,
        )
        .bind(usuario_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(unidades)
    }

    pub async fn grupos_do_usuario(&self, usuario_id: Uuid) -> Result<Vec<Grupo>, AppError> {
        let grupos = sqlx::query_as::<_, Grupo>(
            r#"
            SELECT g.* FROM grupos g
            JOIN usuario_escopos ue ON ue.grupo_id = g.id
            WHERE ue.usuario_id = $1
            ORDER BY g.nome ASC
            "#,
        )
        .bind(usuario_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(grupos)
    }

    pub async fn conglomerados_do_usuario(&self, usuario_id: Uuid) -> Result<Vec<Conglomerado>, AppError> {
        let conglomerados = sqlx::query_as::<_, Conglomerado>(
            r#"
            SELECT c.* FROM conglomerados c
            JOIN usuario_escopos ue ON ue.conglomerado_id = c.id
            WHERE ue.usuario_id = $1
            ORDER BY c.nome ASC
            "#,
        )
        .bind(usuario_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(conglomerados)
    }

    // ---
    // Vínculos usuário x equipe (tela própria no painel admin)
    // ---

    pub async fn list_vinculos_equipe(&self) -> Result<Vec<VinculoEquipeLinha>, AppError> {
        let linhas = sqlx::query_as::<_, VinculoEquipeLinha>(
            r#"
            SELECT
                ue.id, ue.usuario_id, u.nome_completo, u.email,
                ue.equipe_id, e.nome AS equipe_nome, un.nome AS unidade_nome
            FROM usuario_equipes ue
            JOIN usuarios u ON u.id = ue.usuario_id
            JOIN equipes e ON e.id = ue.equipe_id
            JOIN unidades un ON un.id = e.unidade_id
            ORDER BY u.nome_completo ASC, e.nome ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(linhas)
    }

    /// Insere só os pares que ainda não existem. Retorna quantos foram criados.
    pub async fn adicionar_equipes<'e, E>(
        &self,
        executor: E,
        usuario_id: Uuid,
        equipe_ids: &[Uuid],
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            INSERT INTO usuario_equipes (usuario_id, equipe_id)
            SELECT $1, UNNEST($2::uuid[])
            ON CONFLICT ON CONSTRAINT usuario_equipes_par_key DO NOTHING
            "#,
        )
        .bind(usuario_id)
        .bind(equipe_ids)
        .execute(executor)
        .await
        .map_err(|e| map_constraint_error(e, "usuario_equipe"))?;
        Ok(result.rows_affected())
    }

    pub async fn remover_vinculo_equipe<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM usuario_equipes WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
