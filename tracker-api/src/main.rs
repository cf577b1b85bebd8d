//! License tracker service entry point.
//!
//! Wires the store, the outbound HTTP bridge, the vendor adapter set, and
//! the orchestrator into an axum server.

use anyhow::Context;
use bridge_desktop::{EnvSecretStore, ReqwestHttpClient};
use bridge_traits::{HttpClient, SecretStore};
use core_licenses::{
    create_pool, CompanyRepository, DatabaseConfig, LicenseRepository, SqliteCompanyRepository,
    SqliteLicenseRepository,
};
use core_sync::SyncOrchestrator;
use core_vendors::{registered_adapters, VendorContext};
use std::sync::Arc;
use tracker_api::{app_router, AppConfig, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();

    let pool = create_pool(DatabaseConfig::new(&config.database_url))
        .await
        .context("failed to open the license database")?;

    let licenses: Arc<dyn LicenseRepository> = Arc::new(SqliteLicenseRepository::new(pool.clone()));
    let companies: Arc<dyn CompanyRepository> = Arc::new(SqliteCompanyRepository::new(pool));
    let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new());
    let secrets: Arc<dyn SecretStore> = Arc::new(EnvSecretStore::new());

    let ctx = VendorContext::new(http, secrets, companies.clone(), licenses.clone());
    let adapters = registered_adapters(&ctx);
    info!(adapters = adapters.len(), "Registered vendor adapters");

    let orchestrator = Arc::new(SyncOrchestrator::new(adapters));
    let app = app_router(AppState::new(orchestrator, licenses, companies));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "License tracker listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
