// src/services/venda_service.rs

use sqlx::PgPool;
use uuid::Uuid;
use validator::ValidationErrors;

use crate::{
    common::error::AppError,
    db::{CatalogoRepository, OrganizacaoRepository, VendasRepository},
    models::{
        escopo::{AccessScope, Hierarquia},
        vendas::{FiltroVendas, NovaVendaPayload, Venda, VendaDetalhe, VendaListagem},
    },
};

#[derive(Clone)]
pub struct VendaService {
    vendas_repo: VendasRepository,
    catalogo_repo: CatalogoRepository,
    organizacao_repo: OrganizacaoRepository,
    pool: PgPool,
}

impl VendaService {
    pub fn new(
        vendas_repo: VendasRepository,
        catalogo_repo: CatalogoRepository,
        organizacao_repo: OrganizacaoRepository,
        pool: PgPool,
    ) -> Self {
        Self { vendas_repo, catalogo_repo, organizacao_repo, pool }
    }

    /// LÓGICA DE NEGÓCIO: registra a venda e os itens numa única transação.
    pub async fn registrar(
        &self,
        scope: &AccessScope,
        hierarquia: &Hierarquia,
        payload: &NovaVendaPayload,
    ) -> Result<Venda, AppError> {
        if !scope.pode_usar_unidade(hierarquia, payload.unidade_id) {
            return Err(AppError::UnidadeNaoPermitida);
        }

        let (itens, total) = payload.novos_itens().map_err(|e| {
            let mut errors = ValidationErrors::new();
            errors.add("itens", e);
            AppError::ValidationError(errors)
        })?;
        let produto_ids = payload.produto_ids();

        // --- INÍCIO DA TRANSAÇÃO ---
        let mut tx = self.pool.begin().await?;

        if let Some(equipe_id) = payload.equipe_id {
            let equipe = self
                .organizacao_repo
                .find_equipe(&mut *tx, equipe_id)
                .await?
                .filter(|e| e.ativo)
                .ok_or(AppError::NotFound("equipe"))?;

            if !scope.pode_usar_equipe(hierarquia, equipe.id) {
                return Err(AppError::EquipeNaoPermitida);
            }
            if equipe.unidade_id != payload.unidade_id {
                return Err(AppError::EquipeForaDaUnidade);
            }
        }

        // Todo produto da venda precisa estar vinculado à unidade
        let vinculados = self
            .catalogo_repo
            .contar_vinculados(&mut *tx, payload.unidade_id, &produto_ids)
            .await?;
        if vinculados != produto_ids.len() as i64 {
            return Err(AppError::ProdutoNaoVinculado);
        }

        let venda = self
            .vendas_repo
            .create_venda(&mut *tx, scope.usuario_id, payload, total)
            .await?;

        self.vendas_repo
            .insert_itens(&mut *tx, venda.id, &itens)
            .await?;

        tx.commit().await?;
        // --- FIM DA TRANSAÇÃO ---

        tracing::info!(
            venda_id = %venda.id,
            usuario_id = %scope.usuario_id,
            itens = itens.len(),
            valor_total = %venda.valor_total,
            "🧾 Venda registrada"
        );
        Ok(venda)
    }

    /// Vendas visíveis para o escopo, já com datas e busca aplicadas.
    pub async fn listar(
        &self,
        scope: &AccessScope,
        hierarquia: &Hierarquia,
        filtro: &FiltroVendas,
    ) -> Result<Vec<VendaListagem>, AppError> {
        let visibilidade = scope.visibilidade(hierarquia).as_filtro();

        let mut vendas = self
            .vendas_repo
            .list_visiveis(&visibilidade, filtro.data_inicio, filtro.data_fim)
            .await?;

        vendas.retain(|v| filtro.aplica(&v.venda));
        Ok(vendas)
    }

    pub async fn detalhe(
        &self,
        scope: &AccessScope,
        hierarquia: &Hierarquia,
        id: Uuid,
    ) -> Result<VendaDetalhe, AppError> {
        let visibilidade = scope.visibilidade(hierarquia);

        // Venda fora do escopo responde igual a venda inexistente
        let venda = self
            .vendas_repo
            .find_listagem(id)
            .await?
            .filter(|v| visibilidade.permite(&v.venda.referencia()))
            .ok_or(AppError::NotFound("venda"))?;

        let itens = self.vendas_repo.list_itens(id).await?;
        Ok(VendaDetalhe { venda, itens })
    }
}
