use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use tokio::time::Instant;
use tracing::{error, info};

use super::auth::{AuthenticatedUser, TokenVerifier};
use super::clients::{CatalogClient, StockClient};
use super::merge::{merge, ProductDetail};
use super::AggregateError;
use crate::observability::metrics::get_metrics;

#[derive(Clone)]
pub struct AppState {
    pub verifier: Arc<TokenVerifier>,
    pub catalog: CatalogClient,
    pub stock: StockClient,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/products/{id}", get(get_product_detail))
        .with_state(state)
}

async fn root() -> &'static str {
    "BFF API is running!"
}

async fn get_product_detail(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    user: AuthenticatedUser,
) -> Result<Json<ProductDetail>, AggregateError> {
    let metrics = get_metrics().await;
    let start = Instant::now();
    info!(user = %user.claims.preferred_username, id, "aggregation started");

    // Fan out to both collaborators at once and always wait for both; a
    // catalog failure does not cancel the in-flight stock call.
    let (catalog, stock) = tokio::join!(
        state.catalog.fetch(id, &user.authorization),
        state.stock.fetch(id, &user.authorization),
    );

    if !stock.is_success() {
        metrics.stock_fallbacks.inc();
    }

    let outcome = merge(catalog, stock);
    metrics
        .request_duration
        .with_label_values(&["/api/products"])
        .observe(start.elapsed().as_secs_f64());

    match outcome {
        Ok(detail) => {
            metrics.aggregations.with_label_values(&["ok"]).inc();
            info!(id, "aggregation complete");
            Ok(Json(detail))
        }
        Err(e) => {
            metrics.aggregations.with_label_values(&["error"]).inc();
            error!(id, error = %e, "aggregation failed");
            Err(e)
        }
    }
}
