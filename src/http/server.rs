use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;

use crate::application::{DeadlineService, LedgerService, LoggingService, WalletService};
use crate::config::ServerConfig;

use super::router::build_router;

/// Wire store → service → deadline → logging, as the HTTP layer sees it.
pub async fn build_wallet(config: &ServerConfig) -> Result<Arc<dyn WalletService>> {
    let ledger = LedgerService::init(&config.store())
        .await
        .context("Failed to open ledger store")?;
    let wallet = LoggingService::new(DeadlineService::new(ledger, config.request_timeout()));
    Ok(Arc::new(wallet))
}

/// Serve the wallet API until Ctrl-C.
pub async fn serve(config: ServerConfig) -> Result<()> {
    let wallet = build_wallet(&config).await?;
    let app = build_router(wallet);

    let listener = TcpListener::bind(config.http_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.http_address))?;
    tracing::info!("wallet server listening on {}", config.http_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    tracing::info!("wallet server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
