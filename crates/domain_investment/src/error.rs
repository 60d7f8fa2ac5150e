//! Investment domain errors

use thiserror::Error;

use core_kernel::{CoreError, MoneyError};

/// Errors that can occur in the investment domain
#[derive(Debug, Error)]
pub enum InvestmentError {
    #[error("Investment not found: {0}")]
    NotFound(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Asset name is required")]
    MissingAsset,

    #[error(transparent)]
    Money(#[from] MoneyError),

    #[error(transparent)]
    Core(#[from] CoreError),
}
