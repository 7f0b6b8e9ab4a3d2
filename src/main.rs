//src/main.rs

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use tunap_sync::config::{AppConfig, AppState};
use tunap_sync::routes::create_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logger: RUST_LOG controla o filtro (padrão "info")
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let config = AppConfig::from_env()?;
    let app_state = AppState::new(config).await?;

    // Faz o app rodar as migrações do SQLx na inicialização
    sqlx::migrate!().run(&app_state.db_pool).await?;
    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    if let Some((email, password)) = app_state.config.admin_bootstrap() {
        app_state
            .usuario_service
            .bootstrap_admin(email, password)
            .await
            .map_err(|e| anyhow::anyhow!("Falha ao criar o administrador inicial: {}", e))?;
    }

    let listener = TcpListener::bind(&app_state.config.server_addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);

    axum::serve(listener, create_router(app_state)).await?;
    Ok(())
}
