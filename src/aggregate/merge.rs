use serde::{Deserialize, Serialize};
use tracing::warn;

use super::AggregateError;

/// Product metadata as returned by the catalog collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub price: f64,
}

/// Stock level as returned by the stock collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockLevel {
    pub product_id: u32,
    pub stock_count: u32,
}

/// The composed record the BFF answers with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock_count: u32,
}

/// Result of one downstream lookup.
#[derive(Debug)]
pub enum DependencyOutcome<T> {
    Success(T),
    NotFound,
    Unavailable(anyhow::Error),
}

impl<T> DependencyOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, DependencyOutcome::Success(_))
    }
}

/// Apply the hard/soft dependency policy to the pair of outcomes.
///
/// The function only looks at final outcomes, so it is insensitive to which
/// downstream call completed first. Catalog failure wins over anything the
/// stock lookup produced.
pub fn merge(
    catalog: DependencyOutcome<Product>,
    stock: DependencyOutcome<StockLevel>,
) -> Result<ProductDetail, AggregateError> {
    let product = match catalog {
        DependencyOutcome::Success(p) => p,
        DependencyOutcome::NotFound => {
            return Err(AggregateError::HardDependency(
                "catalog returned not-found".to_owned(),
            ))
        }
        DependencyOutcome::Unavailable(e) => {
            return Err(AggregateError::HardDependency(format!(
                "catalog unavailable: {}",
                e
            )))
        }
    };

    let stock_count = match stock {
        DependencyOutcome::Success(level) => level.stock_count,
        DependencyOutcome::NotFound => {
            // Absence means zero stock by the collaborator's own contract.
            warn!(id = product.id, "stock lookup returned not-found, defaulting stock to 0");
            0
        }
        DependencyOutcome::Unavailable(e) => {
            warn!(id = product.id, error = %e, "stock lookup failed, defaulting stock to 0");
            0
        }
    };

    Ok(ProductDetail {
        id: product.id,
        name: product.name,
        description: product.description,
        price: product.price,
        stock_count,
    })
}
