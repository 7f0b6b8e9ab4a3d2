// src/db/cargo_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::cargo::Cargo};

#[derive(Clone)]
pub struct CargoRepository {
    pool: PgPool,
}

impl CargoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_all(&self) -> Result<Vec<Cargo>, AppError> {
        let cargos = sqlx::query_as::<_, Cargo>(
            "SELECT * FROM cargos ORDER BY nivel_acesso ASC, nome ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(cargos)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Cargo>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let cargo = sqlx::query_as::<_, Cargo>("SELECT * FROM cargos WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(cargo)
    }

    /// Cargo de maior nível com escopo `todos` (o "Admin TUNAP" das seeds).
    pub async fn find_admin<'e, E>(&self, executor: E) -> Result<Option<Cargo>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let cargo = sqlx::query_as::<_, Cargo>(
            "SELECT * FROM cargos WHERE escopo = 'todos' ORDER BY nivel_acesso DESC LIMIT 1",
        )
        .fetch_optional(executor)
        .await?;
        Ok(cargo)
    }
}
