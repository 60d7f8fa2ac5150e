//! CRM domain errors

use thiserror::Error;

use core_kernel::{CoreError, MoneyError};

use crate::deal::DealStage;

/// Errors that can occur in the CRM domain
#[derive(Debug, Error)]
pub enum CrmError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Probability must be between 0 and 100, got {0}")]
    InvalidProbability(u8),

    /// Closed deals must be reopened before moving
    #[error("Deal {id} is closed ({stage})")]
    DealClosed { id: String, stage: DealStage },

    #[error("Invalid stage: {0}")]
    InvalidStage(String),

    #[error("Checklist has no item at position {0}")]
    ChecklistIndex(usize),

    #[error(transparent)]
    Money(#[from] MoneyError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl CrmError {
    pub fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}
