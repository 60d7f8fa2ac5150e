//! Deals and pipeline stages

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use core_kernel::{ClientId, CoreError, DealId, Money};

use crate::error::CrmError;

/// Kanban column of a deal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealStage {
    Lead,
    Qualificacao,
    Proposta,
    Negociacao,
    FechadoGanho,
    FechadoPerdido,
}

impl DealStage {
    /// Every stage in board order
    pub const ALL: [DealStage; 6] = [
        DealStage::Lead,
        DealStage::Qualificacao,
        DealStage::Proposta,
        DealStage::Negociacao,
        DealStage::FechadoGanho,
        DealStage::FechadoPerdido,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DealStage::Lead => "lead",
            DealStage::Qualificacao => "qualificacao",
            DealStage::Proposta => "proposta",
            DealStage::Negociacao => "negociacao",
            DealStage::FechadoGanho => "fechado_ganho",
            DealStage::FechadoPerdido => "fechado_perdido",
        }
    }

    /// Probability assigned when a deal enters this stage
    pub fn default_probability(&self) -> u8 {
        match self {
            DealStage::Lead => 10,
            DealStage::Qualificacao => 25,
            DealStage::Proposta => 50,
            DealStage::Negociacao => 75,
            DealStage::FechadoGanho => 100,
            DealStage::FechadoPerdido => 0,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, DealStage::FechadoGanho | DealStage::FechadoPerdido)
    }
}

impl fmt::Display for DealStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DealStage {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DealStage::ALL
            .into_iter()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| CoreError::unknown_variant("deal stage", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Baixa,
    #[default]
    Media,
    Alta,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Baixa => "baixa",
            Priority::Media => "media",
            Priority::Alta => "alta",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "baixa" => Ok(Priority::Baixa),
            "media" => Ok(Priority::Media),
            "alta" => Ok(Priority::Alta),
            other => Err(CoreError::unknown_variant("priority", other)),
        }
    }
}

/// A sales opportunity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub id: DealId,
    pub title: String,
    pub value: Money,
    pub stage: DealStage,
    /// Chance of closing, 0 to 100
    pub probability: u8,
    pub priority: Priority,
    pub client_id: Option<ClientId>,
    pub expected_close: Option<NaiveDate>,
}

impl Deal {
    /// Creates a deal in the `lead` stage
    ///
    /// # Errors
    ///
    /// - `CrmError::MissingField` if the title is blank
    /// - `CrmError::InvalidAmount` if the value is negative
    pub fn new(title: impl Into<String>, value: Money) -> Result<Self, CrmError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(CrmError::MissingField("title"));
        }
        if value.is_negative() {
            return Err(CrmError::InvalidAmount(format!(
                "deal value cannot be negative, got {}",
                value
            )));
        }
        Ok(Self {
            id: DealId::new_v7(),
            title,
            value,
            stage: DealStage::Lead,
            probability: DealStage::Lead.default_probability(),
            priority: Priority::default(),
            client_id: None,
            expected_close: None,
        })
    }

    pub fn with_client(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_expected_close(mut self, date: NaiveDate) -> Self {
        self.expected_close = Some(date);
        self
    }

    /// Places the deal in `stage` without any transition checks
    ///
    /// Used when restoring stored deals; the stored probability is kept.
    pub fn at_stage(mut self, stage: DealStage, probability: u8) -> Result<Self, CrmError> {
        self.stage = stage;
        self.set_probability(probability)?;
        Ok(self)
    }

    /// Overrides the stage's default probability
    pub fn set_probability(&mut self, probability: u8) -> Result<(), CrmError> {
        if probability > 100 {
            return Err(CrmError::InvalidProbability(probability));
        }
        self.probability = probability;
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        !self.stage.is_closed()
    }

    /// Moves the deal to another column, returning the stage it left
    ///
    /// The probability is reset to the new stage's default.
    ///
    /// # Errors
    ///
    /// Returns `CrmError::DealClosed` if the deal is already won or lost
    pub fn move_to(&mut self, stage: DealStage) -> Result<DealStage, CrmError> {
        if self.stage.is_closed() {
            return Err(CrmError::DealClosed {
                id: self.id.to_string(),
                stage: self.stage,
            });
        }
        let previous = self.stage;
        self.stage = stage;
        self.probability = stage.default_probability();
        debug!(deal_id = %self.id, from = %previous, to = %stage, "Deal moved");
        Ok(previous)
    }

    /// Puts a closed deal back into an open stage
    ///
    /// # Errors
    ///
    /// Returns `CrmError::InvalidStage` if `stage` is itself a closed stage
    pub fn reopen(&mut self, stage: DealStage) -> Result<(), CrmError> {
        if stage.is_closed() {
            return Err(CrmError::InvalidStage(format!(
                "cannot reopen into {}",
                stage
            )));
        }
        self.stage = stage;
        self.probability = stage.default_probability();
        debug!(deal_id = %self.id, to = %stage, "Deal reopened");
        Ok(())
    }

    /// Value weighted by closing probability
    pub fn weighted_value(&self) -> Money {
        self.value
            .multiply(Decimal::from(self.probability) / Decimal::from(100))
    }
}
