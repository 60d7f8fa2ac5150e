//! Ledger Domain - Business and Personal Cash Flow
//!
//! This crate keeps the two ledgers the dashboard works with (the business,
//! `empresa`, and the personal, `pessoal`) and computes the aggregations its
//! widgets display.
//!
//! # Records
//!
//! - **Revenue**: money received, optionally attributed to a client, channel
//!   and service
//! - **Expense**: money spent, optionally recurring with a due date
//! - **Transfer**: money moved between the two ledgers (pró-labore, aporte...)
//! - **FinancialAccount**: a bank account, wallet or investment account balance
//!
//! # Views
//!
//! Every aggregation takes a [`FinancialContext`](core_kernel::FinancialContext):
//! `empresa`, `pessoal`, or `consolidado` for both at once.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use core_kernel::{Currency, DateRange, FinancialContext, Money, Origin};
//! use domain_ledger::{Ledger, Revenue};
//! use rust_decimal_macros::dec;
//!
//! let mut ledger = Ledger::new(Currency::BRL);
//! let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
//! let revenue = Revenue::new(date, Money::brl(dec!(1200)), Origin::Empresa).unwrap();
//! ledger.record_revenue(revenue).unwrap();
//!
//! let summary = ledger.summary(FinancialContext::Consolidado, DateRange::all_time());
//! assert_eq!(summary.revenue.amount(), dec!(1200));
//! ```

pub mod ledger;
pub mod account;
pub mod transaction;
pub mod reports;
pub mod recurring;
pub mod error;

pub use ledger::Ledger;
pub use account::{FinancialAccount, AccountType};
pub use transaction::{Revenue, Expense, Transfer, TransferType, PaymentStatus};
pub use reports::{
    LedgerSummary, KpiReport, KpiMetric, BreakdownEntry, MonthlyPoint,
    AccountsOverview, AccountTypeTotal, TransferSummary, TransferTypeTotal,
};
pub use error::LedgerError;

/// Label used when a revenue or expense has no channel/service/category
pub const UNCATEGORIZED_LABEL: &str = "Outros";
