// src/db/user_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{db_utils::map_constraint_error, error::AppError},
    models::auth::{normalizar_email, TipoEmpresa, Usuario, UsuarioResumo},
};

/// Campos de perfil gravados no cadastro e na edição.
#[derive(Debug, Clone)]
pub struct DadosUsuario<'a> {
    pub nome_completo: &'a str,
    pub cargo_id: Option<Uuid>,
    pub cargo_label: Option<&'a str>,
    pub cargo_descricao: Option<&'a str>,
    pub tipo_empresa: TipoEmpresa,
    pub ativo: bool,
}

// O repositório de usuários, responsável por todas as interações com a tabela 'usuarios'
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Busca um usuário pelo seu e-mail (sem diferenciar maiúsculas)
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Usuario>, AppError> {
        let maybe_user = sqlx::query_as::<_, Usuario>(
            "SELECT * FROM usuarios WHERE lower(email) = $1",
        )
        .bind(normalizar_email(email))
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_user)
    }

    // Busca um usuário pelo seu ID
    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Usuario>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let maybe_user = sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(maybe_user)
    }

    pub async fn list_resumo<'e, E>(
        &self,
        executor: E,
        busca: Option<&str>,
    ) -> Result<Vec<UsuarioResumo>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let usuarios = sqlx::query_as::<_, UsuarioResumo>(
            r#"
            SELECT
                u.id, u.nome_completo, u.email, u.tipo_empresa, u.ativo,
                u.cargo_id, c.nome AS cargo_nome, u.cargo_label, c.nivel_acesso,
                u.created_at
            FROM usuarios u
            LEFT JOIN cargos c ON c.id = u.cargo_id
            WHERE ($1::text IS NULL OR u.nome_completo ILIKE $1 ESCAPE '\' OR u.email ILIKE $1 ESCAPE '\')
            ORDER BY u.nome_completo ASC
            "#,
        )
        .bind(busca)
        .fetch_all(executor)
        .await?;
        Ok(usuarios)
    }

    pub async fn count<'e, E>(&self, executor: E) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM usuarios")
            .fetch_one(executor)
            .await?;
        Ok(total)
    }

    // Cria um novo usuário no banco de dados
    // Com tratamento de erro específico para e-mails duplicados.
    pub async fn create_user<'e, E>(
        &self,
        executor: E,
        email: &str,
        password_hash: &str,
        dados: &DadosUsuario<'_>,
    ) -> Result<Usuario, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let user = sqlx::query_as::<_, Usuario>(
            r#"
            INSERT INTO usuarios (
                email, password_hash, nome_completo,
                cargo_id, cargo_label, cargo_descricao, tipo_empresa, ativo
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(normalizar_email(email))
        .bind(password_hash)
        .bind(dados.nome_completo.trim())
        .bind(dados.cargo_id)
        .bind(dados.cargo_label)
        .bind(dados.cargo_descricao)
        .bind(dados.tipo_empresa)
        .bind(dados.ativo)
        .fetch_one(executor)
        .await
        .map_err(|e| map_constraint_error(e, "usuario"))?;

        Ok(user)
    }

    pub async fn update_user<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        dados: &DadosUsuario<'_>,
    ) -> Result<Option<Usuario>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let user = sqlx::query_as::<_, Usuario>(
            r#"
            UPDATE usuarios
            SET nome_completo = $2, cargo_id = $3, cargo_label = $4, cargo_descricao = $5,
                tipo_empresa = $6, ativo = $7, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(dados.nome_completo.trim())
        .bind(dados.cargo_id)
        .bind(dados.cargo_label)
        .bind(dados.cargo_descricao)
        .bind(dados.tipo_empresa)
        .bind(dados.ativo)
        .fetch_optional(executor)
        .await
        .map_err(|e| map_constraint_error(e, "usuario"))?;

        Ok(user)
    }

    pub async fn update_password<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        password_hash: &str,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            "UPDATE usuarios SET password_hash = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(password_hash)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn deactivate<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            "UPDATE usuarios SET ativo = FALSE, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
