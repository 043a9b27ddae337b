mod health;
pub mod routes;

use std::sync::Arc;

use anyhow::Result;
use mememart_core::config::{AppConfig, LoadOptions};
use mememart_imgflip::ImgflipClient;

fn init_logging(config: &AppConfig) {
    use mememart_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    run().await
}

pub async fn run() -> Result<()> {
    // Load config and initialize logging before any other operations
    let config = AppConfig::load(LoadOptions::default())?;
    init_logging(&config);

    let client = ImgflipClient::new(&config.catalog)?;
    let state = routes::AppState::new(Arc::new(client), config.catalog.related_limit);

    let app = routes::router(state.clone()).merge(health::router(&state));

    let address = format!("{}:{}", config.server.bind_address, config.server.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;

    tracing::info!(
        bind_address = %address,
        upstream = %config.catalog.api_url,
        "mememart-server started"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.server.graceful_shutdown_secs))
        .await?;

    tracing::info!("mememart-server stopped");
    Ok(())
}

async fn shutdown_signal(grace_secs: u64) {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!(grace_secs, "shutdown signal received, draining connections");
}
