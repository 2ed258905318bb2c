use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use varsityhub_api::{
    account::{memory::InMemoryAccountStore, mysql_store::MySqlAccountStore, AccountStore},
    auth::AuthState,
    config::{app::AppConfig, db::create_pool},
    web::app_router,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = AppConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if cfg.jwt.uses_default_secret() {
        warn!("JWT_SECRET is not set; using the development fallback secret");
    }

    let accounts: Arc<dyn AccountStore> = if cfg.db.is_valid() {
        let pool = create_pool(&cfg.db)?;
        Arc::new(MySqlAccountStore::new(pool))
    } else {
        warn!("DATABASE_URL is not set; using an empty in-memory account store");
        Arc::new(InMemoryAccountStore::new())
    };

    let state = AuthState::from_config(&cfg, accounts);
    let app = app_router(state, &cfg);

    let addr = cfg.http.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, env = %cfg.app_env, "API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
