//! Currency rates
//!
//! Fetches BRL quotes for the currencies shown on the dashboard from a public
//! quote API and keeps the latest snapshot in memory.
//!
//! - [`QuoteSource`] is the port; [`AwesomeApiClient`] is the HTTP adapter
//! - [`RateBoard`] holds the last successful quotes behind a `RwLock`
//! - [`spawn_poller`] refreshes the board on a fixed interval
//!
//! A failed poll never clears the board: readers keep seeing the previous
//! quotes until the next successful tick.

pub mod error;
pub mod quote;
pub mod client;
pub mod board;
pub mod poller;

pub use error::RateError;
pub use quote::{Quote, QUOTED_PAIRS};
pub use client::{AwesomeApiClient, QuoteSource, RatesConfig};
pub use board::{RateBoard, RateSnapshot};
pub use poller::{poll_once, spawn_poller};
