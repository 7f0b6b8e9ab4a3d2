// src/services/usuario_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{user_repo::DadosUsuario, CargoRepository, EscopoRepository, UserRepository},
    models::{
        auth::{
            agrupar_por_usuario, AtualizarUsuarioPayload, CriarUsuarioPayload, TipoEmpresa, Usuario,
            UsuarioComEquipes, UsuarioCompleto, UsuarioResumo,
        },
        cargo::Cargo,
        escopo::Vinculos,
    },
    services::{auth::hash_password, escopo_service::EscopoService},
};

#[derive(Clone)]
pub struct UsuarioService {
    user_repo: UserRepository,
    cargo_repo: CargoRepository,
    escopo_repo: EscopoRepository,
    escopo_service: EscopoService,
    pool: PgPool,
}

impl UsuarioService {
    pub fn new(
        user_repo: UserRepository,
        cargo_repo: CargoRepository,
        escopo_repo: EscopoRepository,
        escopo_service: EscopoService,
        pool: PgPool,
    ) -> Self {
        Self { user_repo, cargo_repo, escopo_repo, escopo_service, pool }
    }

    pub async fn list_cargos(&self) -> Result<Vec<Cargo>, AppError> {
        self.cargo_repo.list_all().await
    }

    pub async fn listar(&self, busca: Option<&str>) -> Result<Vec<UsuarioResumo>, AppError> {
        let padrao = crate::common::db_utils::like_pattern(busca);
        self.user_repo.list_resumo(&self.pool, padrao.as_deref()).await
    }

    pub async fn detalhe(&self, id: Uuid) -> Result<UsuarioCompleto, AppError> {
        let usuario = self
            .user_repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::NotFound("usuario"))?;

        self.escopo_service.perfil(usuario).await
    }

    /// Carrega o cargo e filtra os vínculos para o escopo dele.
    async fn preparar_vinculos(&self, cargo_id: Uuid, vinculos: &Vinculos) -> Result<Vinculos, AppError> {
        let cargo = self
            .cargo_repo
            .find_by_id(&self.pool, cargo_id)
            .await?
            .ok_or(AppError::NotFound("cargo"))?;

        let vinculos = vinculos.clone().para_escopo(cargo.escopo);
        if let Some(recurso) = vinculos.vinculo_principal_ausente(cargo.escopo) {
            return Err(AppError::VinculoObrigatorio(recurso));
        }
        Ok(vinculos)
    }

    /// LÓGICA DE NEGÓCIO: cria o usuário e seus vínculos numa única transação.
    pub async fn criar(&self, payload: &CriarUsuarioPayload) -> Result<Usuario, AppError> {
        let vinculos = self.preparar_vinculos(payload.cargo_id, &payload.vinculos).await?;

        // 1. Hashing (fora da transação, não toca no banco)
        let hashed_password = hash_password(&payload.password).await?;

        let dados = DadosUsuario {
            nome_completo: &payload.nome_completo,
            cargo_id: Some(payload.cargo_id),
            cargo_label: payload.cargo_label.as_deref(),
            cargo_descricao: payload.cargo_descricao.as_deref(),
            tipo_empresa: payload.tipo_empresa,
            ativo: payload.ativo.unwrap_or(true),
        };

        // --- INÍCIO DA TRANSAÇÃO ---
        let mut tx = self.pool.begin().await?;

        let usuario = self
            .user_repo
            .create_user(&mut *tx, &payload.email, &hashed_password, &dados)
            .await?;

        self.escopo_repo
            .substituir_vinculos(&mut *tx, usuario.id, &vinculos)
            .await?; // Se falhar aqui, o usuário criado acima é desfeito

        tx.commit().await?;
        // --- FIM DA TRANSAÇÃO ---

        tracing::info!(usuario_id = %usuario.id, email = %usuario.email, "👤 Usuário criado");
        Ok(usuario)
    }

    pub async fn atualizar(&self, id: Uuid, payload: &AtualizarUsuarioPayload) -> Result<Usuario, AppError> {
        let vinculos = self.preparar_vinculos(payload.cargo_id, &payload.vinculos).await?;

        let nova_senha = match payload.password.as_deref() {
            Some(password) => Some(hash_password(password).await?),
            None => None,
        };

        let dados = DadosUsuario {
            nome_completo: &payload.nome_completo,
            cargo_id: Some(payload.cargo_id),
            cargo_label: payload.cargo_label.as_deref(),
            cargo_descricao: payload.cargo_descricao.as_deref(),
            tipo_empresa: payload.tipo_empresa,
            ativo: payload.ativo,
        };

        let mut tx = self.pool.begin().await?;

        let usuario = self
            .user_repo
            .update_user(&mut *tx, id, &dados)
            .await?
            .ok_or(AppError::NotFound("usuario"))?;

        if let Some(hash) = nova_senha.as_deref() {
            self.user_repo.update_password(&mut *tx, id, hash).await?;
        }

        self.escopo_repo
            .substituir_vinculos(&mut *tx, id, &vinculos)
            .await?;

        tx.commit().await?;

        tracing::info!(usuario_id = %id, "Usuário atualizado");
        Ok(usuario)
    }

    pub async fn redefinir_senha(&self, id: Uuid, password: &str) -> Result<(), AppError> {
        let hashed = hash_password(password).await?;
        if !self.user_repo.update_password(&self.pool, id, &hashed).await? {
            return Err(AppError::NotFound("usuario"));
        }
        tracing::info!(usuario_id = %id, "Senha redefinida pelo administrador");
        Ok(())
    }

    pub async fn desativar(&self, id: Uuid) -> Result<(), AppError> {
        if !self.user_repo.deactivate(&self.pool, id).await? {
            return Err(AppError::NotFound("usuario"));
        }
        Ok(())
    }

    // ---
    // Vínculos usuário x equipe
    // ---

    pub async fn list_vinculos_equipe(&self) -> Result<Vec<UsuarioComEquipes>, AppError> {
        let linhas = self.escopo_repo.list_vinculos_equipe().await?;
        Ok(agrupar_por_usuario(linhas))
    }

    /// Adiciona só as equipes que o usuário ainda não tem.
    pub async fn adicionar_equipes(&self, usuario_id: Uuid, equipe_ids: &[Uuid]) -> Result<u64, AppError> {
        if equipe_ids.is_empty() {
            return Err(AppError::NenhumaEquipeSelecionada);
        }

        self.user_repo
            .find_by_id(&self.pool, usuario_id)
            .await?
            .ok_or(AppError::NotFound("usuario"))?;

        let adicionadas = self
            .escopo_repo
            .adicionar_equipes(&self.pool, usuario_id, equipe_ids)
            .await?;

        if adicionadas == 0 {
            return Err(AppError::UsuarioJaNasEquipes);
        }
        Ok(adicionadas)
    }

    pub async fn remover_vinculo_equipe(&self, id: Uuid) -> Result<(), AppError> {
        if !self.escopo_repo.remover_vinculo_equipe(&self.pool, id).await? {
            return Err(AppError::NotFound("usuario_equipe"));
        }
        Ok(())
    }

    /// Cria o primeiro administrador quando o banco ainda não tem usuários.
    pub async fn bootstrap_admin(&self, email: &str, password: &str) -> Result<Option<Usuario>, AppError> {
        if self.user_repo.count(&self.pool).await? > 0 {
            return Ok(None);
        }

        let Some(cargo) = self.cargo_repo.find_admin(&self.pool).await? else {
            tracing::warn!("Nenhum cargo com escopo 'todos' encontrado; administrador inicial não criado");
            return Ok(None);
        };

        let hashed_password = hash_password(password).await?;
        let dados = DadosUsuario {
            nome_completo: "Administrador TUNAP",
            cargo_id: Some(cargo.id),
            cargo_label: Some(&cargo.nome),
            cargo_descricao: None,
            tipo_empresa: TipoEmpresa::Tunap,
            ativo: true,
        };

        let usuario = self
            .user_repo
            .create_user(&self.pool, email, &hashed_password, &dados)
            .await?;

        tracing::info!(email = %usuario.email, "🛠️ Administrador inicial criado");
        Ok(Some(usuario))
    }
}
