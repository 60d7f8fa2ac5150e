//! Daily habits and streaks

use std::collections::BTreeSet;

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{percentage, HabitId};

use crate::error::PlannerError;

/// A habit and the days it was done
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: HabitId,
    pub name: String,
    pub completions: BTreeSet<NaiveDate>,
}

impl Habit {
    pub fn new(name: impl Into<String>) -> Result<Self, PlannerError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(PlannerError::MissingField("name"));
        }
        Ok(Self {
            id: HabitId::new_v7(),
            name,
            completions: BTreeSet::new(),
        })
    }

    /// Records the habit as done on `date`; false if it already was
    pub fn mark_done(&mut self, date: NaiveDate) -> bool {
        self.completions.insert(date)
    }

    pub fn unmark(&mut self, date: NaiveDate) -> bool {
        self.completions.remove(&date)
    }

    pub fn is_done_on(&self, date: NaiveDate) -> bool {
        self.completions.contains(&date)
    }

    /// Consecutive days done, ending today or, if today is still open, yesterday
    pub fn current_streak(&self, today: NaiveDate) -> u32 {
        let start = if self.is_done_on(today) {
            Some(today)
        } else {
            today.pred_opt().filter(|d| self.is_done_on(*d))
        };

        let mut streak = 0;
        let mut cursor = start;
        while let Some(day) = cursor.filter(|d| self.is_done_on(*d)) {
            streak += 1;
            cursor = day.pred_opt();
        }
        streak
    }

    /// Longest run of consecutive days ever recorded
    pub fn longest_streak(&self) -> u32 {
        let mut longest = 0;
        let mut run = 0;
        let mut previous: Option<NaiveDate> = None;
        for &day in &self.completions {
            run = match previous {
                Some(p) if p.succ_opt() == Some(day) => run + 1,
                _ => 1,
            };
            longest = longest.max(run);
            previous = Some(day);
        }
        longest
    }

    /// Percentage of the last `days` days (today included) marked done
    pub fn completion_rate(&self, today: NaiveDate, days: u32) -> Option<Decimal> {
        let first = today.checked_sub_days(Days::new(u64::from(days).saturating_sub(1)))?;
        let done = self.completions.range(first..=today).count();
        percentage(Decimal::from(done), Decimal::from(days))
    }
}
