//! Aggregator (backend-for-frontend): verifies the internal token, fans out
//! to the catalog and stock collaborators concurrently and merges the two
//! outcomes under an asymmetric failure policy. Catalog is mandatory; stock
//! degrades to a zero count.

pub mod auth;
pub mod clients;
pub mod merge;
pub mod routes;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("authentication failed: {0}")]
    Authentication(String),
    #[error("catalog dependency failed: {0}")]
    HardDependency(String),
}

impl IntoResponse for AggregateError {
    fn into_response(self) -> Response {
        let status = match self {
            AggregateError::Authentication(_) => StatusCode::UNAUTHORIZED,
            AggregateError::HardDependency(_) => StatusCode::BAD_GATEWAY,
        };
        (status, self.to_string()).into_response()
    }
}
