//! Token exchanger: turns a forwarded, pre-verified external claim payload
//! into a short-lived internally-signed token.
//!
//! The payload in `x-jwt-payload` is a pre-verified assertion source: the
//! edge proxy has already checked the original token's signature, so this
//! service only decodes, narrows and re-signs. Contrast with the aggregator,
//! whose bearer token input is self-verifying.

pub mod claims;
pub mod issuer;
pub mod routes;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("forwarded assertion header is missing")]
    MissingAssertion,
    #[error("malformed assertion payload: {0}")]
    MalformedAssertion(String),
    #[error("mandatory 'sub' claim is absent or empty")]
    MissingSubject,
    #[error("failed to sign internal token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

impl ExchangeError {
    /// Stable label used for the rejection counter.
    pub fn reason(&self) -> &'static str {
        match self {
            ExchangeError::MissingAssertion => "missing_assertion",
            ExchangeError::MalformedAssertion(_) => "malformed_assertion",
            ExchangeError::MissingSubject => "missing_subject",
            ExchangeError::Signing(_) => "signing",
        }
    }
}

impl IntoResponse for ExchangeError {
    fn into_response(self) -> Response {
        let status = match self {
            ExchangeError::MissingAssertion => StatusCode::UNAUTHORIZED,
            ExchangeError::MalformedAssertion(_)
            | ExchangeError::MissingSubject
            | ExchangeError::Signing(_) => StatusCode::BAD_REQUEST,
        };
        (status, self.to_string()).into_response()
    }
}
