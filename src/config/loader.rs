use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::de::DeserializeOwned;
use tokio::fs;

/// Read and deserialize one service YAML config file.
pub async fn load_config<T: DeserializeOwned>(config_path: &str) -> Result<T> {
    let raw = fs::read_to_string(Path::new(config_path))
        .await
        .with_context(|| format!("Cannot read config file '{}'", config_path))?;
    serde_yaml::from_str(&raw).map_err(|e| anyhow!("Invalid config format: {}", e))
}
