// src/services/organizacao_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{organizacao_repo::Inativavel, OrganizacaoRepository},
    models::{
        cargo::TipoEquipe,
        organizacao::{
            Conglomerado, ConglomeradoPayload, Equipe, EquipeDetalhe, EquipePayload, Grupo,
            GrupoDetalhe, GrupoPayload, ListagemQuery, Marca, MarcaPayload, Unidade, UnidadeDetalhe,
            UnidadePayload,
        },
    },
};

#[derive(Clone)]
pub struct OrganizacaoService {
    repo: OrganizacaoRepository,
    pool: PgPool,
}

impl OrganizacaoService {
    pub fn new(repo: OrganizacaoRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    // --- Conglomerados ---
    pub async fn list_conglomerados(&self, query: &ListagemQuery) -> Result<Vec<Conglomerado>, AppError> {
        self.repo.list_conglomerados(query).await
    }

    pub async fn create_conglomerado(&self, payload: &ConglomeradoPayload) -> Result<Conglomerado, AppError> {
        self.repo.create_conglomerado(&self.pool, payload).await
    }

    pub async fn update_conglomerado(
        &self,
        id: Uuid,
        payload: &ConglomeradoPayload,
    ) -> Result<Conglomerado, AppError> {
        self.repo
            .update_conglomerado(&self.pool, id, payload)
            .await?
            .ok_or(AppError::NotFound("conglomerado"))
    }

    // --- Grupos ---
    pub async fn list_grupos(&self, query: &ListagemQuery) -> Result<Vec<GrupoDetalhe>, AppError> {
        self.repo.list_grupos(query).await
    }

    pub async fn create_grupo(&self, payload: &GrupoPayload) -> Result<Grupo, AppError> {
        self.repo.create_grupo(&self.pool, payload).await
    }

    pub async fn update_grupo(&self, id: Uuid, payload: &GrupoPayload) -> Result<Grupo, AppError> {
        self.repo
            .update_grupo(&self.pool, id, payload)
            .await?
            .ok_or(AppError::NotFound("grupo"))
    }

    // --- Marcas ---
    pub async fn list_marcas(&self, query: &ListagemQuery) -> Result<Vec<Marca>, AppError> {
        self.repo.list_marcas(query).await
    }

    pub async fn create_marca(&self, payload: &MarcaPayload) -> Result<Marca, AppError> {
        self.repo.create_marca(&self.pool, payload).await
    }

    pub async fn update_marca(&self, id: Uuid, payload: &MarcaPayload) -> Result<Marca, AppError> {
        self.repo
            .update_marca(&self.pool, id, payload)
            .await?
            .ok_or(AppError::NotFound("marca"))
    }

    pub async fn delete_marca(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete_marca(&self.pool, id).await? {
            return Err(AppError::NotFound("marca"));
        }
        Ok(())
    }

    // --- Unidades ---
    pub async fn list_unidades(&self, query: &ListagemQuery) -> Result<Vec<UnidadeDetalhe>, AppError> {
        self.repo.list_unidades(query).await
    }

    pub async fn create_unidade(&self, payload: &UnidadePayload) -> Result<Unidade, AppError> {
        self.repo.create_unidade(&self.pool, payload).await
    }

    pub async fn update_unidade(&self, id: Uuid, payload: &UnidadePayload) -> Result<Unidade, AppError> {
        self.repo
            .update_unidade(&self.pool, id, payload)
            .await?
            .ok_or(AppError::NotFound("unidade"))
    }

    // --- Equipes ---
    pub async fn list_equipes(&self, query: &ListagemQuery) -> Result<Vec<EquipeDetalhe>, AppError> {
        self.repo.list_equipes(query).await
    }

    pub async fn create_equipe(&self, payload: &EquipePayload) -> Result<Equipe, AppError> {
        self.repo.create_equipe(&self.pool, payload).await
    }

    pub async fn update_equipe(&self, id: Uuid, payload: &EquipePayload) -> Result<Equipe, AppError> {
        self.repo
            .update_equipe(&self.pool, id, payload)
            .await?
            .ok_or(AppError::NotFound("equipe"))
    }

    pub async fn list_tipos_equipe(&self) -> Result<Vec<TipoEquipe>, AppError> {
        self.repo.list_tipos_equipe().await
    }

    /// DELETE dos cadastros com `ativo`: só inativa.
    pub async fn deactivate(&self, entidade: Inativavel, id: Uuid) -> Result<(), AppError> {
        if !self.repo.deactivate(&self.pool, entidade, id).await? {
            return Err(AppError::NotFound(entidade.recurso()));
        }
        tracing::info!(id = %id, recurso = entidade.recurso(), "Cadastro inativado");
        Ok(())
    }
}
