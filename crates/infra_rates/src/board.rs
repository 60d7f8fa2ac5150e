//! Shared in-memory quote board

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tokio::sync::RwLock;

use core_kernel::{Currency, Money};

use crate::error::RateError;
use crate::quote::Quote;

/// Point-in-time copy of the board handed to readers
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RateSnapshot {
    pub quotes: Vec<Quote>,
    /// Time of the last successful poll
    pub updated_at: Option<DateTime<Utc>>,
    /// Message of the last failed poll, cleared on success
    pub last_error: Option<String>,
}

impl RateSnapshot {
    pub fn bid(&self, code: &str) -> Option<Decimal> {
        self.quotes
            .iter()
            .find(|q| q.code.eq_ignore_ascii_case(code))
            .map(|q| q.bid)
    }

    pub fn is_stale(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        self.updated_at.map_or(true, |at| now - at > max_age)
    }
}

/// Latest quotes, shared between the poller and request handlers
#[derive(Debug, Clone, Default)]
pub struct RateBoard {
    inner: Arc<RwLock<RateSnapshot>>,
}

impl RateBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self) -> RateSnapshot {
        self.inner.read().await.clone()
    }

    /// Replaces every quote after a successful poll
    pub async fn replace(&self, quotes: Vec<Quote>, at: DateTime<Utc>) {
        let mut board = self.inner.write().await;
        board.quotes = quotes;
        board.updated_at = Some(at);
        board.last_error = None;
    }

    /// Notes a failed poll; the quotes already on the board stay
    pub async fn record_failure(&self, message: impl Into<String>) {
        self.inner.write().await.last_error = Some(message.into());
    }

    /// Converts `money` into BRL at the current bid
    pub async fn to_brl(&self, money: Money) -> Result<Money, RateError> {
        if money.currency() == Currency::BRL {
            return Ok(money);
        }
        let code = money.currency().code();
        let bid = self
            .inner
            .read()
            .await
            .bid(code)
            .ok_or_else(|| RateError::MissingQuote(code.to_string()))?;
        Ok(money.convert(Currency::BRL, bid)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::MoneyError;
    use rust_decimal_macros::dec;

    fn usd(bid: Decimal) -> Quote {
        Quote {
            code: "USD".to_string(),
            code_in: "BRL".to_string(),
            bid,
            pct_change: None,
            quoted_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_failure_keeps_quotes() {
        let board = RateBoard::new();
        board.replace(vec![usd(dec!(5))], Utc::now()).await;
        board.record_failure("timeout").await;

        let snapshot = board.snapshot().await;
        assert_eq!(snapshot.bid("usd"), Some(dec!(5)));
        assert_eq!(snapshot.last_error.as_deref(), Some("timeout"));
    }

    #[tokio::test]
    async fn test_to_brl() {
        let board = RateBoard::new();
        board.replace(vec![usd(dec!(5.10))], Utc::now()).await;

        let converted = board.to_brl(Money::new(dec!(100), Currency::USD)).await.unwrap();
        assert_eq!(converted, Money::brl(dec!(510)));

        let err = board.to_brl(Money::new(dec!(1), Currency::EUR)).await.unwrap_err();
        assert!(matches!(err, RateError::MissingQuote(code) if code == "EUR"));
    }

    #[tokio::test]
    async fn test_to_brl_overflow_is_error() {
        let board = RateBoard::new();
        board.replace(vec![usd(dec!(5.10))], Utc::now()).await;

        let err = board
            .to_brl(Money::new(Decimal::MAX, Currency::USD))
            .await
            .unwrap_err();
        assert!(matches!(err, RateError::Conversion(MoneyError::Overflow)));
    }

    #[test]
    fn test_staleness() {
        let now = Utc::now();
        let mut snapshot = RateSnapshot::default();
        assert!(snapshot.is_stale(now, Duration::minutes(10)));

        snapshot.updated_at = Some(now - Duration::minutes(5));
        assert!(!snapshot.is_stale(now, Duration::minutes(10)));
        assert!(snapshot.is_stale(now, Duration::minutes(1)));
    }
}
