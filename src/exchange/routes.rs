use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use tracing::warn;

use super::claims::{AllowListedClaims, ExternalClaimSet};
use super::issuer::TokenIssuer;
use super::ExchangeError;
use crate::observability::metrics::get_metrics;
use crate::utils::constants::{FORWARDED_PAYLOAD_HEADER, INTERNAL_TOKEN_HEADER};

/// Exchange routes. The wildcard mirrors the proxy configuration, which
/// forwards the original request path beneath `/exchange`.
pub fn router(issuer: Arc<TokenIssuer>) -> Router {
    Router::new()
        .route("/exchange", get(exchange))
        .route("/exchange/{*remainder}", get(exchange))
        .with_state(issuer)
}

async fn exchange(State(issuer): State<Arc<TokenIssuer>>, headers: HeaderMap) -> Response {
    let metrics = get_metrics().await;

    match mint(&issuer, &headers) {
        Ok(token) => {
            metrics.tokens_issued.inc();
            // The token travels only in a response header for the proxy to
            // attach to subsequent calls; the body stays empty.
            (StatusCode::OK, [(INTERNAL_TOKEN_HEADER, token)]).into_response()
        }
        Err(e) => {
            warn!(reason = e.reason(), error = %e, "token exchange rejected");
            metrics
                .exchange_rejections
                .with_label_values(&[e.reason()])
                .inc();
            e.into_response()
        }
    }
}

fn mint(issuer: &TokenIssuer, headers: &HeaderMap) -> Result<String, ExchangeError> {
    let external = decode_forwarded_payload(headers)?;
    let narrowed = AllowListedClaims::from_external(&external)?;
    issuer.issue(&narrowed)
}

/// Decode the base64url JSON claim object forwarded by the edge proxy.
fn decode_forwarded_payload(headers: &HeaderMap) -> Result<ExternalClaimSet, ExchangeError> {
    let raw = headers
        .get(FORWARDED_PAYLOAD_HEADER)
        .ok_or(ExchangeError::MissingAssertion)?;

    let raw = raw
        .to_str()
        .map_err(|e| ExchangeError::MalformedAssertion(e.to_string()))?;

    // Proxies emit the payload unpadded; tolerate a padded variant anyway.
    let bytes = URL_SAFE_NO_PAD
        .decode(raw.trim_end_matches('='))
        .map_err(|e| ExchangeError::MalformedAssertion(format!("base64url decode: {}", e)))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| ExchangeError::MalformedAssertion(format!("claim payload is not JSON: {}", e)))
}
