//! Repository implementations for domain entities
//!
//! Each repository owns a clone of the pool and scopes every statement by
//! `user_id`. Queries are built at runtime with `sqlx::query_as` so the
//! crate compiles without a live database; row structs derive `FromRow`
//! and convert into domain types with `TryFrom`.

pub mod transactions;
pub mod accounts;
pub mod investments;
pub mod crm;
pub mod planner;
pub mod catalog;

pub use transactions::{TransactionKind, TransactionRepository, TransactionRow};
pub use accounts::{AccountRepository, AccountRow};
pub use investments::{InvestmentRepository, InvestmentRow};
pub use crm::{ClientRepository, ClientRow, DealRepository, DealRow};
pub use planner::{PlannerRepository, GoalRow, TaskRow, HabitRow, WaterLogRow};
pub use catalog::{CatalogEntry, CatalogRepository};

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

use core_kernel::{Currency, Money};

use crate::error::DatabaseError;

/// Parses a text column into its domain enum
pub(crate) fn parse_column<T>(table: &'static str, value: &str) -> Result<T, DatabaseError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value
        .parse()
        .map_err(|e| DatabaseError::invalid_row(table, e))
}

/// Unwraps a column that is nullable in the schema but required for this row kind
pub(crate) fn required<T>(
    table: &'static str,
    column: &'static str,
    value: Option<T>,
) -> Result<T, DatabaseError> {
    value.ok_or_else(|| DatabaseError::invalid_row(table, format!("{} is null", column)))
}

pub(crate) fn money_column(
    table: &'static str,
    amount: Decimal,
    currency: &str,
) -> Result<Money, DatabaseError> {
    let currency: Currency = parse_column(table, currency)?;
    Ok(Money::new(amount, currency))
}
