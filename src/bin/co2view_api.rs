use std::future::IntoFuture;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use co2view::chart::ChartRenderer;
use co2view::config::AppConfig;
use co2view::io::dataset::load_table;
use co2view::web::{router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cfg = AppConfig::from_env();
    tracing::info!(path = %cfg.data_path.display(), "loading dataset");

    // Nothing can be served without the table, so a bad file stops the process.
    let table = load_table(&cfg.data_path, &cfg.columns)
        .with_context(|| format!("failed to load dataset {}", cfg.data_path.display()))?;
    let state = AppState::new(table, ChartRenderer::new(cfg.chart_labels()));

    let addr = cfg.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind failed on {addr}"))?;
    tracing::info!(%addr, "co2view listening");

    let server = axum::serve(listener, router(state)).into_future();
    tokio::select! {
        result = server => result.context("server failed")?,
        _ = tokio::signal::ctrl_c() => tracing::info!("shutdown signal received"),
    }
    Ok(())
}
