//! HTTP quote source

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::error::RateError;
use crate::quote::{parse_raw, Quote, RawQuote, QUOTED_PAIRS};

/// Port for anything that can produce a fresh set of quotes
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    async fn fetch(&self) -> Result<Vec<Quote>, RateError>;
}

/// Connection settings for the public quote API
#[derive(Debug, Clone)]
pub struct RatesConfig {
    /// API root, e.g. "https://economia.awesomeapi.com.br"
    pub base_url: String,
    pub timeout_secs: u64,
    pub poll_interval_secs: u64,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            base_url: "https://economia.awesomeapi.com.br".to_string(),
            timeout_secs: 10,
            poll_interval_secs: 300,
        }
    }
}

impl RatesConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    /// Endpoint returning the latest quote of every pair in [`QUOTED_PAIRS`]
    pub fn latest_url(&self) -> String {
        format!(
            "{}/json/last/{}",
            self.base_url.trim_end_matches('/'),
            QUOTED_PAIRS.join(",")
        )
    }
}

/// Client for the AwesomeAPI currency endpoint
#[derive(Debug, Clone)]
pub struct AwesomeApiClient {
    http: reqwest::Client,
    config: RatesConfig,
}

impl AwesomeApiClient {
    pub fn new(config: RatesConfig) -> Result<Self, RateError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &RatesConfig {
        &self.config
    }
}

#[async_trait]
impl QuoteSource for AwesomeApiClient {
    fn name(&self) -> &str {
        "awesomeapi"
    }

    #[instrument(skip(self), fields(base_url = %self.config.base_url))]
    async fn fetch(&self) -> Result<Vec<Quote>, RateError> {
        let response = self.http.get(self.config.latest_url()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RateError::Status {
                status: status.as_u16(),
            });
        }

        let raw: HashMap<String, RawQuote> = response.json().await?;
        let quotes = parse_raw(raw)?;
        debug!(count = quotes.len(), "Fetched quotes");
        Ok(quotes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_url() {
        let config = RatesConfig {
            base_url: "http://localhost:9000/".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.latest_url(),
            "http://localhost:9000/json/last/USD-BRL,EUR-BRL,GBP-BRL,BTC-BRL"
        );
    }

    #[test]
    fn test_poll_interval_never_zero() {
        let config = RatesConfig {
            poll_interval_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
        assert_eq!(RatesConfig::default().poll_interval(), Duration::from_secs(300));
    }
}
