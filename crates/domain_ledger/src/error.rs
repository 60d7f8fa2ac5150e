//! Ledger domain errors

use thiserror::Error;

use core_kernel::{CoreError, MoneyError};

/// Errors that can occur in the ledger domain
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Referenced record does not exist
    #[error("{entity} not found: {id}")]
    NotFound {
        entity: &'static str,
        id: String,
    },

    /// Account already exists
    #[error("Account already exists: {0}")]
    AccountAlreadyExists(String),

    /// Amount must be strictly positive
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Record currency differs from the ledger currency
    #[error("Currency mismatch: ledger uses {ledger}, record uses {record}")]
    CurrencyMismatch {
        ledger: String,
        record: String,
    },

    /// Transfer between the same ledger
    #[error("Transfer source and destination must differ (both {0})")]
    SameOrigin(String),

    /// Required text field missing
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error(transparent)]
    Money(#[from] MoneyError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl LedgerError {
    pub fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        LedgerError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}
