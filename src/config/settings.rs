use serde::Deserialize;

/// ================================
/// Global service-wide settings
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct SettingsConfig {
    pub server: ServerConfig,
    pub metrics: MetricsConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_path")]
    pub path: String,
    #[serde(default)]
    pub is_enabled: bool,
}

fn default_metrics_path() -> String {
    "/metrics".to_owned()
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[derive(Debug, Deserialize, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Compact,
}

/// ================================
/// Token exchanger service
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct ExchangerConfig {
    pub settings: SettingsConfig,
    pub keys: ExchangerKeysConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExchangerKeysConfig {
    /// PEM file holding the RSA private key used to sign internal tokens.
    pub private_key_path: String,
}

/// ================================
/// Aggregator (BFF) service
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct BffConfig {
    pub settings: SettingsConfig,
    pub keys: BffKeysConfig,
    pub upstreams: UpstreamsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BffKeysConfig {
    /// PEM file holding the RSA public key matching the exchanger's signing key.
    pub public_key_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamsConfig {
    pub catalog_base_url: String,
    pub stock_base_url: String,
}
