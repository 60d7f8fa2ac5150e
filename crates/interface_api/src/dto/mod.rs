//! Request and response bodies

pub mod ledger;
pub mod dashboard;
pub mod investment;
pub mod crm;
pub mod planner;
pub mod catalog;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::ValidationError;

use core_kernel::{DateRange, FinancialContext, MonthKey};

use crate::error::ApiError;

/// `?context=&from=&to=` accepted by list and dashboard endpoints
#[derive(Debug, Default, Deserialize)]
pub struct PeriodQuery {
    pub context: Option<FinancialContext>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl PeriodQuery {
    pub fn context(&self) -> FinancialContext {
        self.context.unwrap_or_default()
    }

    /// Explicit range for list filters; `None` when no bound was given
    pub fn filter(&self, today: NaiveDate) -> Result<Option<DateRange>, ApiError> {
        match (self.from, self.to) {
            (None, None) => Ok(None),
            _ => self.period(today).map(Some),
        }
    }

    /// Range for dashboard widgets; defaults to the month of `to` or today
    pub fn period(&self, today: NaiveDate) -> Result<DateRange, ApiError> {
        match (self.from, self.to) {
            (Some(from), to) => Ok(DateRange::new(from, to.unwrap_or(today))?),
            (None, Some(to)) => Ok(DateRange::new(MonthKey::from_date(to).first_day(), to)?),
            (None, None) => Ok(DateRange::month(MonthKey::from_date(today))),
        }
    }
}

pub(crate) fn positive(value: &Decimal) -> Result<(), ValidationError> {
    if *value > Decimal::ZERO {
        Ok(())
    } else {
        Err(ValidationError::new("must_be_positive"))
    }
}

pub(crate) fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if *value >= Decimal::ZERO {
        Ok(())
    } else {
        Err(ValidationError::new("must_not_be_negative"))
    }
}

pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank"))
    } else {
        Ok(())
    }
}

/// Largest amount accepted by the quote converter
pub const MAX_CONVERTIBLE: i64 = 1_000_000_000_000;

pub(crate) fn convertible_amount(value: &Decimal) -> Result<(), ValidationError> {
    non_negative(value)?;
    if *value > Decimal::from(MAX_CONVERTIBLE) {
        return Err(ValidationError::new("too_large"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, day).unwrap()
    }

    #[test]
    fn test_period_defaults_to_current_month() {
        let period = PeriodQuery::default().period(d(5, 17)).unwrap();
        assert_eq!(period.start, d(5, 1));
        assert_eq!(period.end, d(5, 31));
    }

    #[test]
    fn test_period_open_end() {
        let query = PeriodQuery {
            from: Some(d(1, 10)),
            ..Default::default()
        };
        let period = query.period(d(3, 2)).unwrap();
        assert_eq!((period.start, period.end), (d(1, 10), d(3, 2)));
    }

    #[test]
    fn test_inverted_period_rejected() {
        let query = PeriodQuery {
            from: Some(d(4, 1)),
            to: Some(d(3, 1)),
            context: None,
        };
        assert!(query.period(d(5, 1)).is_err());
    }

    #[test]
    fn test_convertible_amount_bounds() {
        assert!(convertible_amount(&Decimal::ZERO).is_ok());
        assert!(convertible_amount(&Decimal::from(MAX_CONVERTIBLE)).is_ok());
        assert!(convertible_amount(&Decimal::from(MAX_CONVERTIBLE + 1)).is_err());
        assert!(convertible_amount(&Decimal::NEGATIVE_ONE).is_err());
    }

    #[test]
    fn test_filter_absent_without_bounds() {
        assert!(PeriodQuery::default().filter(d(5, 1)).unwrap().is_none());
    }
}
