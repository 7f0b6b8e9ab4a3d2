// src/services/escopo_service.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{CargoRepository, EscopoRepository, OrganizacaoRepository},
    models::{
        auth::{Usuario, UsuarioCompleto},
        cargo::Cargo,
        catalogo::label_contem,
        escopo::{AccessScope, Hierarquia},
        organizacao::{EquipeDetalhe, UnidadeOpcao},
    },
};

/// Resolve cargo + vínculos no escopo de acesso de cada requisição.
#[derive(Clone)]
pub struct EscopoService {
    escopo_repo: EscopoRepository,
    cargo_repo: CargoRepository,
    organizacao_repo: OrganizacaoRepository,
    pool: PgPool,
}

impl EscopoService {
    pub fn new(
        escopo_repo: EscopoRepository,
        cargo_repo: CargoRepository,
        organizacao_repo: OrganizacaoRepository,
        pool: PgPool,
    ) -> Self {
        Self { escopo_repo, cargo_repo, organizacao_repo, pool }
    }

    async fn cargo_de(&self, usuario: &Usuario) -> Result<Option<Cargo>, AppError> {
        match usuario.cargo_id {
            Some(cargo_id) => self.cargo_repo.find_by_id(&self.pool, cargo_id).await,
            None => Ok(None),
        }
    }

    /// Nível de acesso do cargo atual; usuário sem cargo tem nível 0.
    pub async fn nivel_acesso(&self, usuario: &Usuario) -> Result<i32, AppError> {
        Ok(self
            .cargo_de(usuario)
            .await?
            .map(|c| c.nivel_acesso)
            .unwrap_or(0))
    }

    pub async fn resolver(&self, usuario: &Usuario) -> Result<(AccessScope, Option<Cargo>), AppError> {
        let Some(cargo) = self.cargo_de(usuario).await? else {
            // Sem cargo: só enxerga o que ele mesmo registrou
            return Ok((AccessScope::somente_proprio(usuario.id), None));
        };

        // Cargo com escopo acima do próprio nível é reduzido ao que o nível alcança
        let escopo = cargo.escopo.limitado_ao_nivel(cargo.nivel_acesso);
        if escopo != cargo.escopo {
            tracing::warn!(
                cargo = %cargo.nome,
                nivel_acesso = cargo.nivel_acesso,
                escopo = ?cargo.escopo,
                efetivo = ?escopo,
                "Nível de acesso insuficiente para o escopo do cargo"
            );
        }

        let vinculos = self
            .escopo_repo
            .vinculos(usuario.id)
            .await?
            .para_escopo(escopo);

        let scope = AccessScope {
            usuario_id: usuario.id,
            escopo,
            nivel_acesso: cargo.nivel_acesso,
            equipe_ids: vinculos.equipe_ids,
            tipo_equipe_ids: vinculos.tipo_equipe_ids,
            unidade_ids: vinculos.unidade_ids,
            grupo_ids: vinculos.grupo_ids,
            conglomerado_ids: vinculos.conglomerado_ids,
        };

        Ok((scope, Some(cargo)))
    }

    pub async fn hierarquia(&self) -> Result<Hierarquia, AppError> {
        self.escopo_repo.hierarquia().await
    }

    /// Perfil com cargo e todos os vínculos gravados.
    pub async fn perfil(&self, usuario: Usuario) -> Result<UsuarioCompleto, AppError> {
        let cargo = self.cargo_de(&usuario).await?;
        let tipos_equipe = self.escopo_repo.tipos_equipe_do_usuario(usuario.id).await?;
        let equipes_diretas = self.escopo_repo.equipes_do_usuario(usuario.id).await?;
        let unidades = self.escopo_repo.unidades_do_usuario(usuario.id).await?;
        let grupos = self.escopo_repo.grupos_do_usuario(usuario.id).await?;
        let conglomerados = self.escopo_repo.conglomerados_do_usuario(usuario.id).await?;

        Ok(UsuarioCompleto {
            usuario,
            cargo,
            tipos_equipe,
            equipes_diretas,
            unidades,
            grupos,
            conglomerados,
        })
    }

    /// Equipes que o usuário pode escolher numa venda.
    pub async fn equipes_permitidas(
        &self,
        scope: &AccessScope,
        hierarquia: &Hierarquia,
    ) -> Result<Vec<EquipeDetalhe>, AppError> {
        let permitidas = scope.equipes_permitidas(hierarquia);
        let mut equipes = self.organizacao_repo.list_equipes_ativas().await?;

        if let Some(ids) = permitidas {
            equipes.retain(|e| ids.contains(&e.equipe.id));
        }
        Ok(equipes)
    }

    /// Unidades onde o usuário pode lançar vendas, já com o label da caixa de seleção.
    pub async fn unidades_permitidas(
        &self,
        scope: &AccessScope,
        hierarquia: &Hierarquia,
        busca: Option<&str>,
    ) -> Result<Vec<UnidadeOpcao>, AppError> {
        let permitidas = scope.unidades_permitidas(hierarquia);

        let opcoes = self
            .organizacao_repo
            .list_unidades_ativas()
            .await?
            .into_iter()
            .filter(|u| permitidas.as_ref().is_none_or(|ids| ids.contains(&u.unidade.id)))
            .map(UnidadeOpcao::from)
            .filter(|opcao| label_contem(&opcao.label, busca))
            .collect();

        Ok(opcoes)
    }
}
