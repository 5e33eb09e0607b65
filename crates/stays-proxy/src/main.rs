mod config;
mod error;
mod routes;
mod server;
mod validation;

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use stays_common::liteapi::LiteApiClient;

use config::Config;
use server::{build_router, shutdown_signal, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_ansi(false)
        .init();

    info!("starting stays-proxy");

    let config = Config::from_env()?;
    info!(
        base_url = %config.liteapi.base_url,
        timeout_ms = config.liteapi.timeout.as_millis(),
        bind_addr = %config.bind_addr,
        "liteapi client configured"
    );

    let liteapi = Arc::new(LiteApiClient::new(config.liteapi.clone())?);
    let app = build_router(AppState { liteapi });

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| tracing::error!(error = %e, "server error"))?;

    info!("stays-proxy shut down");
    Ok(())
}
