use std::sync::Arc;

use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use http::{header::CONTENT_TYPE, StatusCode};
use prometheus::{Encoder, Registry, TextEncoder};

use crate::config::settings::MetricsConfig;

/// Optional scrape route; absent entirely when metrics are disabled.
pub fn router(metrics_config: &MetricsConfig, registry: Arc<Registry>) -> Router {
    let mut router = Router::new();
    if metrics_config.is_enabled {
        router = router.route(
            metrics_config.path.as_str(),
            get(move || {
                let registry = registry.clone();
                async move { render(&registry) }
            }),
        );
    }
    router
}

fn render(registry: &Registry) -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = registry.gather();
    let mut buffer = Vec::new();

    encoder
        .encode(&metric_families, &mut buffer)
        .expect("Failed to encode metrics");

    let response = String::from_utf8(buffer.clone()).expect("Failed to convert bytes to string");
    (
        StatusCode::OK,
        [(CONTENT_TYPE, "text/plain; version=0.0.4")],
        response,
    )
}
