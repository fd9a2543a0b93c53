use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use mesh_edge::aggregate::auth::TokenVerifier;
use mesh_edge::aggregate::clients::{build_downstream_client, CatalogClient, StockClient};
use mesh_edge::aggregate::routes::{self, AppState};
use mesh_edge::config::loader::load_config;
use mesh_edge::keys;
use mesh_edge::observability;
use mesh_edge::observability::metrics::get_metrics;
use mesh_edge::server;
use mesh_edge::utils::logging::{self, LogLevel};
use mesh_edge::BffConfig;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "CONFIG", default_value = "bff-api.yaml")]
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

    let cfg: BffConfig = load_config(&args.config).await?;
    logging::run(cfg.settings.logging.as_ref(), args.log_level);

    // -------------------------------
    // 2. Load the verification key once; immutable for the process lifetime
    // -------------------------------

    let verification_key = keys::load_verification_key(&cfg.keys.public_key_path)?;
    let verifier = Arc::new(TokenVerifier::new(verification_key));

    // -------------------------------
    // 3. Build downstream clients
    // -------------------------------

    let client = build_downstream_client();
    let state = AppState {
        verifier,
        catalog: CatalogClient::new(&cfg.upstreams.catalog_base_url, client.clone()),
        stock: StockClient::new(&cfg.upstreams.stock_base_url, client),
    };

    // -------------------------------
    // 4. Build the router and serve
    // -------------------------------

    let metrics = get_metrics().await;
    let app = routes::router(state).merge(observability::routes::router(
        &cfg.settings.metrics,
        Arc::new(metrics.registry.clone()),
    ));

    info!("BFF API starting...");
    server::server::start(&cfg.settings, app).await
}
