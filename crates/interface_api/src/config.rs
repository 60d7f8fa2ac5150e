//! API configuration

use serde::Deserialize;

use core_kernel::{Currency, Timezone};
use infra_rates::RatesConfig;

/// API configuration
///
/// Read from `API_*` environment variables; anything unset keeps its default.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Shared secret of the auth provider that signs user tokens
    pub jwt_secret: String,
    /// Lifetime of tokens minted by [`create_token`](crate::auth::create_token)
    pub jwt_expiration_secs: u64,
    /// Database URL
    pub database_url: String,
    /// Upper bound of the connection pool
    pub database_max_connections: u32,
    /// Log level
    pub log_level: String,
    /// Root of the public quote API
    pub rates_base_url: String,
    /// Seconds between quote refreshes
    pub rates_poll_secs: u64,
    /// Zone used to decide what "today" is
    pub timezone: Timezone,
    /// Currency of the ledger
    pub currency: Currency,
}

impl Default for ApiConfig {
    fn default() -> Self {
        let rates = RatesConfig::default();
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            jwt_secret: "change-me-in-production".to_string(),
            jwt_expiration_secs: 3600,
            database_url: "postgres://localhost/finance_hub".to_string(),
            database_max_connections: 10,
            log_level: "info".to_string(),
            rates_base_url: rates.base_url,
            rates_poll_secs: rates.poll_interval_secs,
            timezone: Timezone::parse("America/Sao_Paulo").unwrap_or_default(),
            currency: Currency::BRL,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn rates(&self) -> RatesConfig {
        RatesConfig {
            base_url: self.rates_base_url.clone(),
            poll_interval_secs: self.rates_poll_secs,
            ..RatesConfig::default()
        }
    }
}
