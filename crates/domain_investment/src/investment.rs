//! Investment records
//!
//! An investment is one application into one asset. Its current value is
//! maintained by the user; the return percentage is always derived from the
//! applied amount and the current value unless a stored figure is restored.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use core_kernel::{CoreError, InvestmentId, Money, MoneyError, Origin};

use crate::error::InvestmentError;
use crate::return_percentage;

/// Asset class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentType {
    /// Fixed income (CDB, treasury bonds, LCI/LCA)
    RendaFixa,
    /// Equities
    Acoes,
    Cripto,
    /// Investment funds
    Fundos,
}

impl InvestmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvestmentType::RendaFixa => "renda_fixa",
            InvestmentType::Acoes => "acoes",
            InvestmentType::Cripto => "cripto",
            InvestmentType::Fundos => "fundos",
        }
    }
}

impl fmt::Display for InvestmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvestmentType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "renda_fixa" => Ok(InvestmentType::RendaFixa),
            "acoes" => Ok(InvestmentType::Acoes),
            "cripto" => Ok(InvestmentType::Cripto),
            "fundos" => Ok(InvestmentType::Fundos),
            other => Err(CoreError::unknown_variant("investment type", other)),
        }
    }
}

/// How soon the money can be redeemed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Liquidity {
    /// Same or next business day
    Diaria,
    Mensal,
    /// Only at maturity
    NoVencimento,
}

impl Liquidity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Liquidity::Diaria => "diaria",
            Liquidity::Mensal => "mensal",
            Liquidity::NoVencimento => "no_vencimento",
        }
    }
}

impl fmt::Display for Liquidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Liquidity {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "diaria" => Ok(Liquidity::Diaria),
            "mensal" => Ok(Liquidity::Mensal),
            "no_vencimento" => Ok(Liquidity::NoVencimento),
            other => Err(CoreError::unknown_variant("liquidity", other)),
        }
    }
}

/// One application into one asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investment {
    pub id: InvestmentId,
    /// Application date
    pub date: NaiveDate,
    pub origin: Origin,
    pub investment_type: InvestmentType,
    /// Asset name (ticker, bond, fund)
    pub asset: String,
    pub applied: Money,
    pub current_value: Money,
    /// Return over the applied amount, as a percentage
    pub return_pct: Decimal,
    pub liquidity: Liquidity,
}

impl Investment {
    /// Creates an investment and derives its return
    ///
    /// # Errors
    ///
    /// - `InvestmentError::MissingAsset` if the asset name is blank
    /// - `InvestmentError::InvalidAmount` unless the applied amount is
    ///   positive and the current value is not negative
    /// - `InvestmentError::Money` if the two amounts differ in currency
    pub fn new(
        date: NaiveDate,
        origin: Origin,
        investment_type: InvestmentType,
        asset: impl Into<String>,
        applied: Money,
        current_value: Money,
        liquidity: Liquidity,
    ) -> Result<Self, InvestmentError> {
        let asset = asset.into();
        if asset.trim().is_empty() {
            return Err(InvestmentError::MissingAsset);
        }
        if !applied.is_positive() {
            return Err(InvestmentError::InvalidAmount(format!(
                "applied amount must be positive, got {}",
                applied
            )));
        }
        check_valuation(&applied, &current_value)?;

        Ok(Self {
            id: InvestmentId::new_v7(),
            date,
            origin,
            investment_type,
            asset,
            return_pct: return_percentage(applied.amount(), current_value.amount()),
            applied,
            current_value,
            liquidity,
        })
    }

    /// Overrides the derived return with a stored figure
    pub fn with_return_pct(mut self, return_pct: Decimal) -> Self {
        self.return_pct = return_pct;
        self
    }

    /// Records a new valuation and recalculates the return
    pub fn update_value(&mut self, current_value: Money) -> Result<(), InvestmentError> {
        check_valuation(&self.applied, &current_value)?;
        self.current_value = current_value;
        self.return_pct = return_percentage(self.applied.amount(), current_value.amount());
        debug!(
            investment_id = %self.id,
            current_value = %self.current_value,
            return_pct = %self.return_pct,
            "Investment revalued"
        );
        Ok(())
    }

    /// Current value minus applied amount
    pub fn gain(&self) -> Money {
        Money::new(
            self.current_value.amount() - self.applied.amount(),
            self.applied.currency(),
        )
    }
}

fn check_valuation(applied: &Money, current_value: &Money) -> Result<(), InvestmentError> {
    if applied.currency() != current_value.currency() {
        return Err(MoneyError::CurrencyMismatch(
            applied.currency().to_string(),
            current_value.currency().to_string(),
        )
        .into());
    }
    if current_value.is_negative() {
        return Err(InvestmentError::InvalidAmount(format!(
            "current value cannot be negative, got {}",
            current_value
        )));
    }
    Ok(())
}
