//! Rate client errors

use thiserror::Error;

use core_kernel::MoneyError;

#[derive(Debug, Error)]
pub enum RateError {
    #[error("Quote request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Quote service answered {status}")]
    Status { status: u16 },

    #[error("Malformed quote for {pair}: {message}")]
    Malformed { pair: String, message: String },

    #[error("Quote service returned no quotes")]
    Empty,

    #[error("No quote for {0}")]
    MissingQuote(String),

    #[error("Cannot convert: {0}")]
    Conversion(#[from] MoneyError),
}

impl RateError {
    pub fn malformed(pair: impl Into<String>, message: impl std::fmt::Display) -> Self {
        RateError::Malformed {
            pair: pair.into(),
            message: message.to_string(),
        }
    }

    /// Whether retrying on the next tick may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            RateError::Request(_) => true,
            RateError::Status { status } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}
