use anyhow::Context;
use tokio::net::TcpListener;
use seatline_api::{serve, telemetry, AppState};
use seatline_store::{app_config::Config, ReservationStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load config")?;
    telemetry::init_tracing(&config.logging).context("Failed to install tracing subscriber")?;

    let addr = config
        .server
        .resolve()
        .await
        .with_context(|| format!("Invalid listen address {}:{}", config.server.host, config.server.port))?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    let state = AppState::new(ReservationStore::new());

    tracing::info!("Server is running on {}", listener.local_addr()?);
    serve(state, listener, shutdown_signal()).await?;
    tracing::info!("Server stopped");

    Ok(())
}

/// Resolves on Ctrl+C
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    tracing::info!("Stopping the server...");
}
