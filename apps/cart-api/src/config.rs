//! Cart API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults that match the usual docker-compose wiring.

use std::env;
use std::time::Duration;

/// Cart API configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP listen port
    pub listen_port: u16,

    /// Redis connection string
    pub redis_url: String,

    /// Base URL of the product catalogue service
    pub catalogue_url: String,

    /// Cart record lifetime in seconds (refreshed on every write)
    pub cart_ttl_secs: u64,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = AppConfig {
            listen_port: env::var("LISTEN_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("LISTEN_PORT".to_string()))?,

            redis_url: env::var("REDIS_URL").unwrap_or_else(|_| "redis://redis:6379".to_string()),

            catalogue_url: env::var("CATALOGUE_URL")
                .unwrap_or_else(|_| "http://catalogue:8080".to_string()),

            cart_ttl_secs: env::var("CART_TTL_SECS")
                .unwrap_or_else(|_| "3600".to_string()) // 1 hour
                .parse()
                .map_err(|_| ConfigError::InvalidValue("CART_TTL_SECS".to_string()))?,
        };

        // A zero TTL would expire carts at write time
        if config.cart_ttl_secs == 0 {
            return Err(ConfigError::InvalidValue("CART_TTL_SECS".to_string()));
        }

        Ok(config)
    }

    /// Returns the cart record TTL as a [`Duration`].
    pub fn cart_ttl(&self) -> Duration {
        Duration::from_secs(self.cart_ttl_secs)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
