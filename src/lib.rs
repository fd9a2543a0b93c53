//! # Mesh Edge Services
//!
//! Two edge services for an internal microservice mesh: a token exchanger
//! that narrows an externally-forwarded identity assertion into a
//! short-lived internally-signed token, and an aggregator (BFF) that
//! verifies that token and composes one response from the catalog and stock
//! collaborators under differentiated failure tolerance.
//!
//! Modules:
//! - `config` — per-service YAML configuration
//! - `keys` — startup-loaded, process-immutable RSA key material
//! - `exchange` — claim allow-listing and internal token issuance
//! - `aggregate` — token verification, concurrent fan-out, merge policy

pub mod aggregate;
pub mod config;
pub mod exchange;
pub mod helpers;
pub mod keys;
pub mod observability;
pub mod server;
pub mod tests;
pub mod utils;

pub use crate::config::settings::{BffConfig, ExchangerConfig};
