// src/config.rs

use crate::{
    db::{
        CargoRepository, CatalogoRepository, DashboardRepository, EscopoRepository, OrganizacaoRepository,
        UserRepository, VendasRepository,
    },
    services::{
        auth::AuthService, catalogo_service::CatalogoService, dashboard_service::DashboardService,
        escopo_service::EscopoService, organizacao_service::OrganizacaoService,
        relatorio_service::RelatorioService, usuario_service::UsuarioService,
        venda_service::VendaService,
    },
};
use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

/// Configurações lidas do ambiente (.env em desenvolvimento).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_addr: String,
    pub database_max_connections: u32,
    pub jwt_expiration_days: i64,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;

        let server_addr = env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let database_max_connections = parse_or("DATABASE_MAX_CONNECTIONS", 5)?;
        let jwt_expiration_days = parse_or("JWT_EXPIRATION_DAYS", 7)?;

        Ok(Self {
            database_url,
            jwt_secret,
            server_addr,
            database_max_connections,
            jwt_expiration_days,
            admin_email: env::var("ADMIN_EMAIL").ok().filter(|v| !v.trim().is_empty()),
            admin_password: env::var("ADMIN_PASSWORD").ok().filter(|v| !v.is_empty()),
        })
    }

    /// Credenciais do administrador inicial, se as duas variáveis existirem.
    pub fn admin_bootstrap(&self) -> Option<(&str, &str)> {
        Some((self.admin_email.as_deref()?, self.admin_password.as_deref()?))
    }
}

fn parse_or<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{} inválida: '{}'", name, value)),
        Err(_) => Ok(default),
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub config: AppConfig,
    pub auth_service: AuthService,
    pub escopo_service: EscopoService,
    pub organizacao_service: OrganizacaoService,
    pub usuario_service: UsuarioService,
    pub catalogo_service: CatalogoService,
    pub venda_service: VendaService,
    pub relatorio_service: RelatorioService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub async fn new(config: AppConfig) -> anyhow::Result<Self> {
        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::from_pool(db_pool, config))
    }

    /// Monta o gráfico de dependências sobre uma pool já criada.
    pub fn from_pool(db_pool: PgPool, config: AppConfig) -> Self {
        let user_repo = UserRepository::new(db_pool.clone());
        let cargo_repo = CargoRepository::new(db_pool.clone());
        let escopo_repo = EscopoRepository::new(db_pool.clone());
        let organizacao_repo = OrganizacaoRepository::new(db_pool.clone());
        let catalogo_repo = CatalogoRepository::new(db_pool.clone());
        let vendas_repo = VendasRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());

        let auth_service = AuthService::new(
            user_repo.clone(),
            cargo_repo.clone(),
            config.jwt_secret.clone(),
            config.jwt_expiration_days,
            db_pool.clone(),
        );
        let escopo_service = EscopoService::new(
            escopo_repo.clone(),
            cargo_repo.clone(),
            organizacao_repo.clone(),
            db_pool.clone(),
        );
        let organizacao_service = OrganizacaoService::new(organizacao_repo.clone(), db_pool.clone());
        let usuario_service = UsuarioService::new(
            user_repo,
            cargo_repo,
            escopo_repo,
            escopo_service.clone(),
            db_pool.clone(),
        );
        let catalogo_service = CatalogoService::new(catalogo_repo.clone(), db_pool.clone());
        let venda_service = VendaService::new(
            vendas_repo.clone(),
            catalogo_repo,
            organizacao_repo,
            db_pool.clone(),
        );
        let relatorio_service = RelatorioService::new(venda_service.clone());
        let dashboard_service = DashboardService::new(dashboard_repo, vendas_repo);

        Self {
            db_pool,
            config,
            auth_service,
            escopo_service,
            organizacao_service,
            usuario_service,
            catalogo_service,
            venda_service,
            relatorio_service,
            dashboard_service,
        }
    }
}
