// src/services/catalogo_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{db_utils::like_pattern, error::AppError},
    db::CatalogoRepository,
    models::{
        catalogo::{
            label_contem, Produto, ProdutoOpcao, ProdutoPayload, ProdutoUnidade, ProdutoUnidadeDetalhe,
            ProdutoUnidadePayload,
        },
        escopo::{AccessScope, Hierarquia},
    },
};

#[derive(Clone)]
pub struct CatalogoService {
    repo: CatalogoRepository,
    pool: PgPool,
}

impl CatalogoService {
    pub fn new(repo: CatalogoRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    // --- Produtos ---
    pub async fn list_produtos(&self, busca: Option<&str>, ativo: Option<bool>) -> Result<Vec<Produto>, AppError> {
        let padrao = like_pattern(busca);
        self.repo.list_produtos(padrao.as_deref(), ativo).await
    }

    pub async fn create_produto(&self, payload: &ProdutoPayload) -> Result<Produto, AppError> {
        self.repo.create_produto(&self.pool, payload).await
    }

    pub async fn update_produto(&self, id: Uuid, payload: &ProdutoPayload) -> Result<Produto, AppError> {
        self.repo
            .update_produto(&self.pool, id, payload)
            .await?
            .ok_or(AppError::NotFound("produto"))
    }

    pub async fn deactivate_produto(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.deactivate_produto(&self.pool, id).await? {
            return Err(AppError::NotFound("produto"));
        }
        Ok(())
    }

    // --- Vínculos Produto x Unidade ---
    pub async fn list_vinculos(&self, busca: Option<&str>) -> Result<Vec<ProdutoUnidadeDetalhe>, AppError> {
        let padrao = like_pattern(busca);
        self.repo.list_vinculos(padrao.as_deref()).await
    }

    pub async fn create_vinculo(&self, payload: &ProdutoUnidadePayload) -> Result<ProdutoUnidade, AppError> {
        self.repo.create_vinculo(&self.pool, payload).await
    }

    pub async fn update_vinculo(&self, id: i64, payload: &ProdutoUnidadePayload) -> Result<ProdutoUnidade, AppError> {
        self.repo
            .update_vinculo(&self.pool, id, payload)
            .await?
            .ok_or(AppError::NotFound("produto_unidade"))
    }

    pub async fn delete_vinculo(&self, id: i64) -> Result<(), AppError> {
        if !self.repo.delete_vinculo(&self.pool, id).await? {
            return Err(AppError::NotFound("produto_unidade"));
        }
        Ok(())
    }

    /// Opções de produto da Nova Venda; a unidade precisa estar no escopo do usuário.
    pub async fn opcoes_da_unidade(
        &self,
        scope: &AccessScope,
        hierarquia: &Hierarquia,
        unidade_id: Uuid,
        busca: Option<&str>,
    ) -> Result<Vec<ProdutoOpcao>, AppError> {
        if !scope.pode_usar_unidade(hierarquia, unidade_id) {
            return Err(AppError::UnidadeNaoPermitida);
        }

        let opcoes = self
            .repo
            .produtos_da_unidade(unidade_id)
            .await?
            .into_iter()
            .map(ProdutoOpcao::from)
            .filter(|opcao| label_contem(&opcao.label, busca))
            .collect();

        Ok(opcoes)
    }
}
