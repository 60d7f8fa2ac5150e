//! Savings goals

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::temporal::months_between;
use core_kernel::{percentage, GoalId, Money, MoneyError, Origin};

use crate::error::PlannerError;

/// A target amount to save, optionally by a deadline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,
    pub title: String,
    pub target: Money,
    pub current: Money,
    pub deadline: Option<NaiveDate>,
    pub origin: Origin,
}

impl Goal {
    /// Creates a goal with nothing saved yet
    ///
    /// # Errors
    ///
    /// - `PlannerError::MissingField` if the title is blank
    /// - `PlannerError::InvalidAmount` unless the target is positive
    pub fn new(title: impl Into<String>, target: Money, origin: Origin) -> Result<Self, PlannerError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(PlannerError::MissingField("title"));
        }
        if !target.is_positive() {
            return Err(PlannerError::InvalidAmount(format!(
                "goal target must be positive, got {}",
                target
            )));
        }
        Ok(Self {
            id: GoalId::new_v7(),
            title,
            current: Money::zero(target.currency()),
            target,
            deadline: None,
            origin,
        })
    }

    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets the amount already saved
    pub fn with_current(mut self, current: Money) -> Result<Self, PlannerError> {
        self.check_currency(&current)?;
        if current.is_negative() {
            return Err(PlannerError::InvalidAmount(format!(
                "saved amount cannot be negative, got {}",
                current
            )));
        }
        self.current = current;
        Ok(self)
    }

    fn check_currency(&self, money: &Money) -> Result<(), MoneyError> {
        if money.currency() != self.target.currency() {
            return Err(MoneyError::CurrencyMismatch(
                self.target.currency().to_string(),
                money.currency().to_string(),
            ));
        }
        Ok(())
    }

    /// Adds a deposit and returns whether the goal is now reached
    pub fn contribute(&mut self, amount: Money) -> Result<bool, PlannerError> {
        self.check_currency(&amount)?;
        if !amount.is_positive() {
            return Err(PlannerError::InvalidAmount(format!(
                "contribution must be positive, got {}",
                amount
            )));
        }
        self.current = self.current.checked_add(&amount)?;
        Ok(self.is_reached())
    }

    pub fn is_reached(&self) -> bool {
        self.current.amount() >= self.target.amount()
    }

    /// Percentage saved, capped at 100
    pub fn progress(&self) -> Decimal {
        percentage(self.current.amount(), self.target.amount())
            .unwrap_or(Decimal::ZERO)
            .min(dec!(100))
    }

    /// Amount still missing; zero once reached
    pub fn remaining(&self) -> Money {
        let missing = (self.target.amount() - self.current.amount()).max(Decimal::ZERO);
        Money::new(missing, self.target.currency())
    }

    /// Monthly deposit needed to reach the target by the deadline
    ///
    /// `None` without a deadline. A deadline less than a month away, or
    /// already past, asks for the whole remainder now.
    pub fn monthly_needed(&self, today: NaiveDate) -> Option<Money> {
        let deadline = self.deadline?;
        let months = months_between(today, deadline).max(1);
        let per_month = self.remaining().amount() / Decimal::from(months);
        Some(Money::new(per_month, self.target.currency()).round_to_currency())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal() -> Goal {
        Goal::new("Reserva de emergência", Money::brl(dec!(12000)), Origin::Pessoal).unwrap()
    }

    #[test]
    fn test_contribute_until_reached() {
        let mut goal = goal();
        assert!(!goal.contribute(Money::brl(dec!(3000))).unwrap());
        assert_eq!(goal.progress(), dec!(25));
        assert_eq!(goal.remaining(), Money::brl(dec!(9000)));

        assert!(goal.contribute(Money::brl(dec!(10000))).unwrap());
        assert_eq!(goal.progress(), dec!(100));
        assert!(goal.remaining().is_zero());
    }

    #[test]
    fn test_rejects_zero_target() {
        assert!(Goal::new("Viagem", Money::brl(dec!(0)), Origin::Pessoal).is_err());
    }

    #[test]
    fn test_monthly_needed() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let goal = goal()
            .with_current(Money::brl(dec!(2000)))
            .unwrap()
            .with_deadline(NaiveDate::from_ymd_opt(2024, 11, 10).unwrap());

        assert_eq!(goal.monthly_needed(today), Some(Money::brl(dec!(1000))));
    }

    #[test]
    fn test_monthly_needed_past_deadline() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let goal = goal().with_deadline(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());

        assert_eq!(goal.monthly_needed(today), Some(Money::brl(dec!(12000))));
        assert_eq!(Goal::new("x", Money::brl(dec!(1)), Origin::Empresa).unwrap().monthly_needed(today), None);
    }
}
