//! Financial accounts
//!
//! Accounts are independent balances (bank, wallet, brokerage) that the user
//! keeps up to date. They are not derived from the revenue/expense flow.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{AccountId, CoreError, Money, Origin};

use crate::error::LedgerError;

/// Kind of account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Checking/savings account at a bank
    Banco,
    /// Cash or digital wallet
    Carteira,
    /// Brokerage/investment account
    Investimento,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Banco => "banco",
            AccountType::Carteira => "carteira",
            AccountType::Investimento => "investimento",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "banco" => Ok(AccountType::Banco),
            "carteira" => Ok(AccountType::Carteira),
            "investimento" => Ok(AccountType::Investimento),
            other => Err(CoreError::unknown_variant("account type", other)),
        }
    }
}

/// A balance-holding account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialAccount {
    pub id: AccountId,
    pub name: String,
    pub account_type: AccountType,
    pub origin: Origin,
    /// Current balance; may be negative for overdrawn accounts
    pub balance: Money,
    pub bank_name: Option<String>,
}

impl FinancialAccount {
    /// Creates a new account
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::MissingField` if the name is blank
    pub fn new(
        name: impl Into<String>,
        account_type: AccountType,
        origin: Origin,
        balance: Money,
    ) -> Result<Self, LedgerError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(LedgerError::MissingField("name"));
        }
        Ok(Self {
            id: AccountId::new_v7(),
            name,
            account_type,
            origin,
            balance,
            bank_name: None,
        })
    }

    /// Sets the bank name
    pub fn with_bank(mut self, bank_name: impl Into<String>) -> Self {
        self.bank_name = Some(bank_name.into());
        self
    }

    /// Replaces the balance with a new reading
    pub fn set_balance(&mut self, balance: Money) -> Result<(), LedgerError> {
        if balance.currency() != self.balance.currency() {
            return Err(LedgerError::CurrencyMismatch {
                ledger: self.balance.currency().to_string(),
                record: balance.currency().to_string(),
            });
        }
        self.balance = balance;
        Ok(())
    }
}
