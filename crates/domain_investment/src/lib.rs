//! Investment Domain
//!
//! Tracks money applied to investments by either origin and how the
//! portfolio is spread across investment types and liquidity windows.
//!
//! # Key Concepts
//!
//! - **Applied amount**: what was originally put into the asset
//! - **Current value**: the latest valuation, updated by the user
//! - **Return**: `(current - applied) / applied`, as a percentage
//! - **Liquidity**: how soon the money can be withdrawn

pub mod investment;
pub mod portfolio;
pub mod error;

pub use investment::{Investment, InvestmentType, Liquidity};
pub use portfolio::{AllocationSlice, PortfolioSummary};
pub use error::InvestmentError;

use rust_decimal::Decimal;

/// Return on `applied` given its `current` value, as a percentage
///
/// Zero when nothing was applied.
///
/// # Example
///
/// ```rust
/// use domain_investment::return_percentage;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(return_percentage(dec!(1000), dec!(1125)), dec!(12.5));
/// ```
pub fn return_percentage(applied: Decimal, current: Decimal) -> Decimal {
    core_kernel::percentage(current - applied, applied).unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_loss_is_negative() {
        assert_eq!(return_percentage(dec!(200), dec!(150)), dec!(-25));
    }

    #[test]
    fn test_zero_applied() {
        assert_eq!(return_percentage(dec!(0), dec!(150)), Decimal::ZERO);
    }
}
