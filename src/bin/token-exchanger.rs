use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use mesh_edge::config::loader::load_config;
use mesh_edge::exchange::issuer::TokenIssuer;
use mesh_edge::exchange::routes;
use mesh_edge::keys;
use mesh_edge::observability;
use mesh_edge::observability::metrics::get_metrics;
use mesh_edge::server;
use mesh_edge::utils::logging::{self, LogLevel};
use mesh_edge::ExchangerConfig;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "CONFIG", default_value = "token-exchanger.yaml")]
    config: String,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // -------------------------------
    // 1. Load YAML config and logging
    // -------------------------------

    let cfg: ExchangerConfig = load_config(&args.config).await?;
    logging::run(cfg.settings.logging.as_ref(), args.log_level);

    // -------------------------------
    // 2. Load the signing key once; immutable for the process lifetime
    // -------------------------------

    let signing_key = keys::load_signing_key(&cfg.keys.private_key_path)?;
    let issuer = Arc::new(TokenIssuer::new(signing_key));

    // -------------------------------
    // 3. Build the router and serve
    // -------------------------------

    let metrics = get_metrics().await;
    let app = routes::router(issuer).merge(observability::routes::router(
        &cfg.settings.metrics,
        Arc::new(metrics.registry.clone()),
    ));

    info!("Token exchanger starting...");
    server::server::start(&cfg.settings, app).await
}
