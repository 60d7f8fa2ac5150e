//! Pre-built Test Fixtures
//!
//! Ready-to-use values shared by the test suites. Dates are fixed so that
//! period and recency calculations stay predictable.

use chrono::NaiveDate;
use core_kernel::{ClientId, Currency, DateRange, Money, MonthKey, UserId};
use rust_decimal_macros::dec;
use uuid::Uuid;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    pub fn brl_100() -> Money {
        Money::brl(dec!(100.00))
    }

    /// A typical monthly service fee
    pub fn brl_fee() -> Money {
        Money::brl(dec!(2500.00))
    }

    /// A lifetime value above the high-ticket threshold
    pub fn brl_high_ticket() -> Money {
        Money::brl(dec!(8000.00))
    }

    pub fn brl_zero() -> Money {
        Money::zero(Currency::BRL)
    }

    /// Foreign amount for currency mismatch tests
    pub fn usd_100() -> Money {
        Money::new(dec!(100.00), Currency::USD)
    }
}

/// Fixture for calendar test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// The "today" used across tests (Saturday, June 15th 2024)
    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    pub fn current_month() -> MonthKey {
        MonthKey::from_date(Self::today())
    }

    /// June 2024
    pub fn current_month_range() -> DateRange {
        DateRange::month(Self::current_month())
    }

    /// May 2024
    pub fn previous_month_range() -> DateRange {
        DateRange::month(MonthKey::new(2024, 5).unwrap())
    }

    /// A day inside the current month
    pub fn day(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    /// `days` days before today
    pub fn days_ago(days: u64) -> NaiveDate {
        Self::today()
            .checked_sub_days(chrono::Days::new(days))
            .unwrap()
    }
}

/// Fixture for identifier test data
pub struct IdFixtures;

impl IdFixtures {
    pub fn user_id() -> UserId {
        UserId::from_uuid(Uuid::parse_str("6f1c2a9e-3b7d-4e58-9a41-0c2d5e8f7a10").unwrap())
    }

    /// A second user for isolation tests
    pub fn other_user_id() -> UserId {
        UserId::from_uuid(Uuid::parse_str("6f1c2a9e-3b7d-4e58-9a41-0c2d5e8f7a11").unwrap())
    }

    pub fn client_id() -> ClientId {
        ClientId::from_uuid(Uuid::parse_str("a3d4c1f0-5e6b-4a7c-8d9e-1f2a3b4c5d60").unwrap())
    }
}

/// Fixture for labels used by records
pub struct StringFixtures;

impl StringFixtures {
    pub fn channel() -> &'static str {
        "Instagram"
    }

    pub fn service() -> &'static str {
        "Identidade Visual"
    }

    pub fn expense_category() -> &'static str {
        "Software"
    }

    pub fn client_name() -> &'static str {
        "Padaria Sol Nascente"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_today_is_in_current_month() {
        assert!(TemporalFixtures::current_month_range().contains(TemporalFixtures::today()));
        assert!(!TemporalFixtures::previous_month_range().contains(TemporalFixtures::today()));
    }

    #[test]
    fn test_days_ago() {
        assert_eq!(
            TemporalFixtures::days_ago(15),
            NaiveDate::from_ymd_opt(2024, 5, 31).unwrap()
        );
    }

    #[test]
    fn test_user_ids_differ() {
        assert_ne!(IdFixtures::user_id(), IdFixtures::other_user_id());
    }
}
