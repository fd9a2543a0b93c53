use anyhow::{Context, Result};
use axum::Router;
use tracing::info;

use crate::config::settings::SettingsConfig;
use crate::observability::metrics::get_metrics;

/// Bind and serve one Axum application on the configured address.
pub async fn start(settings_config: &SettingsConfig, app: Router) -> Result<()> {
    let metrics = get_metrics().await;

    let bind_addr = &settings_config.server.host;
    let port = &settings_config.server.port;

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", bind_addr, port))
        .await
        .with_context(|| format!("Cannot bind {}:{}", bind_addr, port))?;

    info!(address = %bind_addr, port = %port, "listening");
    metrics.up.set(1);

    axum::serve(listener, app).await.context("server terminated")?;
    Ok(())
}
