//! Poller behaviour against scripted quote sources

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use infra_rates::{poll_once, spawn_poller, Quote, QuoteSource, RateBoard, RateError};

fn quote(code: &str, bid: Decimal) -> Quote {
    Quote {
        code: code.to_string(),
        code_in: "BRL".to_string(),
        bid,
        pct_change: None,
        quoted_at: Utc::now(),
    }
}

/// Replays a fixed list of responses, repeating the last one
struct ScriptedSource {
    responses: Mutex<Vec<Result<Vec<Quote>, u16>>>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    fn new(responses: Vec<Result<Vec<Quote>, u16>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl QuoteSource for ScriptedSource {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn fetch(&self) -> Result<Vec<Quote>, RateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut responses = self.responses.lock().unwrap();
        let next = if responses.len() > 1 {
            responses.remove(0)
        } else {
            responses[0].clone()
        };
        next.map_err(|status| RateError::Status { status })
    }
}

// ============================================================================
// poll_once
// ============================================================================

mod poll_once_tests {
    use super::*;

    #[tokio::test]
    async fn test_success_fills_board() {
        let source = ScriptedSource::new(vec![Ok(vec![quote("USD", dec!(5.2)), quote("EUR", dec!(5.6))])]);
        let board = RateBoard::new();

        assert_eq!(poll_once(&source, &board).await.unwrap(), 2);

        let snapshot = board.snapshot().await;
        assert_eq!(snapshot.bid("EUR"), Some(dec!(5.6)));
        assert!(snapshot.updated_at.is_some());
        assert!(snapshot.last_error.is_none());
    }

    #[tokio::test]
    async fn test_failure_keeps_last_quotes() {
        let source = ScriptedSource::new(vec![Ok(vec![quote("USD", dec!(5.2))]), Err(503)]);
        let board = RateBoard::new();

        poll_once(&source, &board).await.unwrap();
        let updated_at = board.snapshot().await.updated_at;

        let err = poll_once(&source, &board).await.unwrap_err();
        assert!(err.is_transient());

        let snapshot = board.snapshot().await;
        assert_eq!(snapshot.bid("USD"), Some(dec!(5.2)));
        assert_eq!(snapshot.updated_at, updated_at);
        assert!(snapshot.last_error.unwrap().contains("503"));
    }

    #[tokio::test]
    async fn test_recovery_clears_error() {
        let source = ScriptedSource::new(vec![Err(500), Ok(vec![quote("GBP", dec!(6.4))])]);
        let board = RateBoard::new();

        assert!(poll_once(&source, &board).await.is_err());
        assert!(board.snapshot().await.quotes.is_empty());

        poll_once(&source, &board).await.unwrap();
        let snapshot = board.snapshot().await;
        assert!(snapshot.last_error.is_none());
        assert_eq!(snapshot.bid("GBP"), Some(dec!(6.4)));
    }

    #[test]
    fn test_client_errors_are_not_transient() {
        assert!(!RateError::Status { status: 404 }.is_transient());
        assert!(RateError::Status { status: 429 }.is_transient());
        assert!(!RateError::Empty.is_transient());
    }
}

// ============================================================================
// spawn_poller
// ============================================================================

mod poller_tests {
    use super::*;

    #[tokio::test]
    async fn test_poller_ticks_immediately_and_repeats() {
        let source = Arc::new(ScriptedSource::new(vec![Ok(vec![quote("BTC", dec!(350000))])]));
        let board = RateBoard::new();

        let handle = spawn_poller(source.clone(), board.clone(), Duration::from_millis(20));
        tokio::time::sleep(Duration::from_millis(150)).await;
        handle.abort();

        assert!(source.calls.load(Ordering::SeqCst) >= 2);
        assert_eq!(board.snapshot().await.bid("BTC"), Some(dec!(350000)));
    }
}
