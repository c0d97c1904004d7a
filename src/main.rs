use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use postcache::remote::PlaceholderClient;
use postcache::server::{build_router, init_tracing};
use postcache::store::RecordStore;
use postcache::sync::Coordinator;
use postcache::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    init_tracing(config.json_logs);

    let data_dir = config.data_dir();
    let store = RecordStore::open(&data_dir)
        .with_context(|| format!("Failed to open record store at {}", data_dir.display()))?;
    let remote = PlaceholderClient::new(&config.remote_url)?;
    let coordinator = Arc::new(Coordinator::new(store, Arc::new(remote)));

    let listener = tokio::net::TcpListener::bind(config.listen)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen))?;

    info!(
        listen = %config.listen,
        data_dir = %data_dir.display(),
        remote = %config.remote_url,
        "postcache listening"
    );

    axum::serve(listener, build_router(coordinator))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
