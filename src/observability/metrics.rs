use std::sync::Arc;

use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry};
use tokio::sync::OnceCell;
use tracing::info;

// Declare the static OnceCell to hold the Metrics.
static METRICS_INSTANCE: OnceCell<Arc<Metrics>> = OnceCell::const_new();

/// Asynchronously initializes and gets a reference to the static `Metrics`.
pub async fn get_metrics() -> &'static Arc<Metrics> {
    METRICS_INSTANCE
        .get_or_init(|| async {
            info!("Initializing Metrics ...");
            Metrics::new()
        })
        .await
}

#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,

    // Exchange metrics
    pub tokens_issued: IntCounter,
    pub exchange_rejections: IntCounterVec,

    // Aggregation metrics
    pub aggregations: IntCounterVec,
    pub stock_fallbacks: IntCounter,
    pub request_duration: HistogramVec,

    // Runtime
    pub up: IntGauge,
}

impl Metrics {
    fn new() -> Arc<Self> {
        let registry = Registry::new_custom(Some("meshedge".into()), None).unwrap();

        let metrics: Arc<Metrics> = Arc::new(Self {
            tokens_issued: IntCounter::new("tokens_issued_total", "Internal tokens issued").unwrap(),
            exchange_rejections: IntCounterVec::new(Opts::new("exchange_rejections_total", "Rejected exchange requests by reason"), &["reason"]).unwrap(),

            aggregations: IntCounterVec::new(Opts::new("aggregations_total", "Aggregation requests by outcome"), &["outcome"]).unwrap(),
            stock_fallbacks: IntCounter::new("stock_fallbacks_total", "Aggregations that defaulted stock to zero").unwrap(),
            request_duration: HistogramVec::new(HistogramOpts::new("request_duration_seconds", "Request duration seconds").buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]), &["route"]).unwrap(),

            up: IntGauge::new("up", "Service is up").unwrap(),
            registry,
        });

        metrics.registry.register(Box::new(metrics.tokens_issued.clone())).unwrap();
        metrics.registry.register(Box::new(metrics.exchange_rejections.clone())).unwrap();
        metrics.registry.register(Box::new(metrics.aggregations.clone())).unwrap();
        metrics.registry.register(Box::new(metrics.stock_fallbacks.clone())).unwrap();
        metrics.registry.register(Box::new(metrics.request_duration.clone())).unwrap();
        metrics.registry.register(Box::new(metrics.up.clone())).unwrap();

        metrics
    }
}
