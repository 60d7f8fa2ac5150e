//! Core Kernel - Foundational types shared by every finance hub crate
//!
//! This crate provides the building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic
//! - The business/personal origin split and the dashboard's financial context
//! - Calendar helpers (date ranges, month keys, local "today")
//! - Strongly-typed identifiers

pub mod money;
pub mod context;
pub mod temporal;
pub mod identifiers;
pub mod error;

pub use money::{Money, Currency, MoneyError, percentage};
pub use context::{Origin, FinancialContext};
pub use temporal::{DateRange, MonthKey, Timezone, TemporalError};
pub use identifiers::{
    UserId, AccountId, RevenueId, ExpenseId, TransferId, InvestmentId,
    ClientId, DealId, GoalId, TaskId, HabitId, WaterLogId, ChannelId, ServiceId,
};
pub use error::CoreError;
