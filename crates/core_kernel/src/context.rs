//! Business/personal ledger split
//!
//! Every financial record belongs to exactly one [`Origin`]. The dashboard
//! views them through a [`FinancialContext`], where `consolidado` merges both
//! ledgers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Which ledger a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Business ledger
    Empresa,
    /// Personal ledger
    Pessoal,
}

impl Origin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::Empresa => "empresa",
            Origin::Pessoal => "pessoal",
        }
    }

    /// The other ledger
    pub fn counterpart(&self) -> Origin {
        match self {
            Origin::Empresa => Origin::Pessoal,
            Origin::Pessoal => Origin::Empresa,
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Origin {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "empresa" => Ok(Origin::Empresa),
            "pessoal" => Ok(Origin::Pessoal),
            other => Err(CoreError::unknown_variant("origin", other)),
        }
    }
}

/// The ledger view selected in the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinancialContext {
    Empresa,
    Pessoal,
    /// Both ledgers merged
    #[default]
    Consolidado,
}

impl FinancialContext {
    pub fn as_str(&self) -> &'static str {
        match self {
            FinancialContext::Empresa => "empresa",
            FinancialContext::Pessoal => "pessoal",
            FinancialContext::Consolidado => "consolidado",
        }
    }

    /// Returns true if records of `origin` are visible in this context
    pub fn includes(&self, origin: Origin) -> bool {
        match self {
            FinancialContext::Empresa => origin == Origin::Empresa,
            FinancialContext::Pessoal => origin == Origin::Pessoal,
            FinancialContext::Consolidado => true,
        }
    }

    /// The origins visible in this context
    pub fn origins(&self) -> &'static [Origin] {
        match self {
            FinancialContext::Empresa => &[Origin::Empresa],
            FinancialContext::Pessoal => &[Origin::Pessoal],
            FinancialContext::Consolidado => &[Origin::Empresa, Origin::Pessoal],
        }
    }
}

impl From<Origin> for FinancialContext {
    fn from(origin: Origin) -> Self {
        match origin {
            Origin::Empresa => FinancialContext::Empresa,
            Origin::Pessoal => FinancialContext::Pessoal,
        }
    }
}

impl fmt::Display for FinancialContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FinancialContext {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "empresa" => Ok(FinancialContext::Empresa),
            "pessoal" => Ok(FinancialContext::Pessoal),
            "consolidado" => Ok(FinancialContext::Consolidado),
            other => Err(CoreError::unknown_variant("financial context", other)),
        }
    }
}
