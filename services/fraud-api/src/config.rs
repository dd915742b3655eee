use config::{ConfigError, Environment};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub merchants: MerchantsConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    pub max_payload_bytes: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RateLimitConfig {
    pub requests_per_minute: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct MerchantsConfig {
    /// TOML merchant table; the bundled directory is used when unset
    pub directory_path: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            // Server defaults
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("server.workers", 4)?
            .set_default("server.max_payload_bytes", 16 * 1024)?
            // Backpressure
            .set_default("rate_limit.requests_per_minute", 600)?;

        builder = builder.add_source(Environment::with_prefix("FRAUD_API").separator("__"));

        // Override from environment variables
        if let Ok(port) = env::var("SERVICE_PORT") {
            builder = builder.set_override("server.port", port)?;
        }

        if let Ok(path) = env::var("MERCHANT_DIRECTORY") {
            builder = builder.set_override("merchants.directory_path", path)?;
        }

        builder.build()?.try_deserialize()
    }
}
