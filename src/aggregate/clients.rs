use std::time::Duration;

use anyhow::anyhow;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use super::merge::{DependencyOutcome, Product, StockLevel};
use crate::utils::constants::DEFAULT_HTTP_TIMEOUT_MS;

/// Shared downstream client. One attempt per call, transport timeout only;
/// no retries and no circuit breaking by design.
pub fn build_downstream_client() -> Client {
    Client::builder()
        .timeout(Duration::from_millis(DEFAULT_HTTP_TIMEOUT_MS))
        .build()
        .expect("Failed to build HTTP client")
}

#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
    client: Client,
}

impl CatalogClient {
    pub fn new(base_url: &str, client: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            client,
        }
    }

    pub async fn fetch(&self, id: u32, authorization: &str) -> DependencyOutcome<Product> {
        let url = format!("{}/api/products/{}", self.base_url, id);
        get_json(&self.client, &url, authorization).await
    }
}

#[derive(Debug, Clone)]
pub struct StockClient {
    base_url: String,
    client: Client,
}

impl StockClient {
    pub fn new(base_url: &str, client: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            client,
        }
    }

    pub async fn fetch(&self, id: u32, authorization: &str) -> DependencyOutcome<StockLevel> {
        let url = format!("{}/inventory/{}", self.base_url, id);
        get_json(&self.client, &url, authorization).await
    }
}

/// Issue one GET with the caller's credential attached unchanged and map the
/// response onto a `DependencyOutcome`.
async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    authorization: &str,
) -> DependencyOutcome<T> {
    let response = match client
        .get(url)
        .header(AUTHORIZATION, authorization)
        .send()
        .await
    {
        Ok(r) => r,
        Err(e) => return DependencyOutcome::Unavailable(anyhow!(e)),
    };

    match response.status() {
        StatusCode::NOT_FOUND => DependencyOutcome::NotFound,
        status if !status.is_success() => {
            DependencyOutcome::Unavailable(anyhow!("unexpected status: {}", status))
        }
        _ => match response.json::<T>().await {
            Ok(body) => DependencyOutcome::Success(body),
            Err(e) => DependencyOutcome::Unavailable(anyhow!(e)),
        },
    }
}
