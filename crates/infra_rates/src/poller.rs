//! Background refresh loop

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::board::RateBoard;
use crate::client::QuoteSource;
use crate::error::RateError;

/// Fetches once and updates the board; returns the number of quotes stored
///
/// On failure the error is recorded on the board and returned, and the
/// previous quotes are left in place.
pub async fn poll_once(source: &dyn QuoteSource, board: &RateBoard) -> Result<usize, RateError> {
    match source.fetch().await {
        Ok(quotes) => {
            let count = quotes.len();
            board.replace(quotes, Utc::now()).await;
            Ok(count)
        }
        Err(e) => {
            board.record_failure(e.to_string()).await;
            Err(e)
        }
    }
}

/// Polls `source` every `period`, starting immediately
pub fn spawn_poller(
    source: Arc<dyn QuoteSource>,
    board: RateBoard,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(source = source.name(), period_secs = period.as_secs(), "Rate poller started");
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            match poll_once(source.as_ref(), &board).await {
                Ok(count) => info!(source = source.name(), count, "Rates refreshed"),
                Err(e) => warn!(
                    source = source.name(),
                    transient = e.is_transient(),
                    error = %e,
                    "Rate poll failed, keeping last quotes"
                ),
            }
        }
    })
}
