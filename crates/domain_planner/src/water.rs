//! Water intake tracking

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{percentage, WaterLogId};

use crate::error::PlannerError;

/// Daily goal used when the user has not set one
pub const DEFAULT_DAILY_GOAL_ML: u32 = 2000;

/// One glass or bottle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaterLog {
    pub id: WaterLogId,
    pub date: NaiveDate,
    pub ml: u32,
}

impl WaterLog {
    pub fn new(date: NaiveDate, ml: u32) -> Result<Self, PlannerError> {
        if ml == 0 {
            return Err(PlannerError::InvalidAmount(
                "water intake must be positive".to_string(),
            ));
        }
        Ok(Self {
            id: WaterLogId::new_v7(),
            date,
            ml,
        })
    }
}

/// Intake for one day against the goal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyWater {
    pub date: NaiveDate,
    pub total_ml: u32,
    pub goal_ml: u32,
    /// Capped at 100
    pub progress: Decimal,
    pub remaining_ml: u32,
    pub entries: usize,
}

/// Sums the logs of `date`
pub fn daily_total(logs: &[WaterLog], date: NaiveDate, goal_ml: u32) -> DailyWater {
    let (total_ml, entries) = logs
        .iter()
        .filter(|log| log.date == date)
        .fold((0u32, 0usize), |(total, count), log| {
            (total.saturating_add(log.ml), count + 1)
        });

    DailyWater {
        date,
        total_ml,
        goal_ml,
        progress: percentage(Decimal::from(total_ml), Decimal::from(goal_ml))
            .unwrap_or(Decimal::ZERO)
            .min(dec!(100)),
        remaining_ml: goal_ml.saturating_sub(total_ml),
        entries,
    }
}

/// Daily totals for the `days` days ending at `end`, oldest first
pub fn daily_history(logs: &[WaterLog], end: NaiveDate, days: u32, goal_ml: u32) -> Vec<DailyWater> {
    (0..days)
        .rev()
        .filter_map(|offset| end.checked_sub_days(Days::new(u64::from(offset))))
        .map(|date| daily_total(logs, date, goal_ml))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 8, day).unwrap()
    }

    #[test]
    fn test_zero_ml_rejected() {
        assert!(WaterLog::new(d(1), 0).is_err());
    }

    #[test]
    fn test_daily_total() {
        let logs = vec![
            WaterLog::new(d(1), 250).unwrap(),
            WaterLog::new(d(1), 500).unwrap(),
            WaterLog::new(d(2), 300).unwrap(),
        ];
        let day = daily_total(&logs, d(1), DEFAULT_DAILY_GOAL_ML);

        assert_eq!(day.total_ml, 750);
        assert_eq!(day.entries, 2);
        assert_eq!(day.progress, dec!(37.5));
        assert_eq!(day.remaining_ml, 1250);
    }

    #[test]
    fn test_progress_capped() {
        let logs = vec![WaterLog::new(d(1), 3000).unwrap()];
        let day = daily_total(&logs, d(1), DEFAULT_DAILY_GOAL_ML);
        assert_eq!(day.progress, dec!(100));
        assert_eq!(day.remaining_ml, 0);
    }

    #[test]
    fn test_history_oldest_first() {
        let logs = vec![WaterLog::new(d(2), 300).unwrap()];
        let history = daily_history(&logs, d(3), 3, 1000);

        let dates: Vec<NaiveDate> = history.iter().map(|h| h.date).collect();
        assert_eq!(dates, vec![d(1), d(2), d(3)]);
        assert_eq!(history[1].total_ml, 300);
    }
}
