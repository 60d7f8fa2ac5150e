//! Tests for domain_planner

use chrono::{Days, NaiveDate};
use rust_decimal_macros::dec;

use core_kernel::{Currency, Money, Origin};

use domain_planner::goal::Goal;
use domain_planner::habit::Habit;
use domain_planner::task::{Task, TaskPriority};
use domain_planner::water::{daily_total, WaterLog, DEFAULT_DAILY_GOAL_ML};
use domain_planner::PlannerError;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 10, 15).unwrap()
}

// ============================================================================
// Goal Tests
// ============================================================================

mod goal_tests {
    use super::*;

    #[test]
    fn test_contribution_currency_checked() {
        let mut goal = Goal::new("Notebook", Money::brl(dec!(6000)), Origin::Empresa).unwrap();
        let result = goal.contribute(Money::new(dec!(100), Currency::USD));

        assert!(matches!(result, Err(PlannerError::Money(_))));
        assert!(goal.current.is_zero());
    }

    #[test]
    fn test_negative_contribution_rejected() {
        let mut goal = Goal::new("Notebook", Money::brl(dec!(6000)), Origin::Empresa).unwrap();
        assert!(matches!(
            goal.contribute(Money::brl(dec!(-50))),
            Err(PlannerError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_progress_rounding() {
        let goal = Goal::new("Curso", Money::brl(dec!(3000)), Origin::Pessoal)
            .unwrap()
            .with_current(Money::brl(dec!(1000)))
            .unwrap();
        assert_eq!(goal.progress(), dec!(33.33));
    }

    #[test]
    fn test_monthly_needed_rounds_to_cents() {
        let goal = Goal::new("Carro", Money::brl(dec!(10000)), Origin::Pessoal)
            .unwrap()
            .with_deadline(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());

        // Three months left
        assert_eq!(goal.monthly_needed(today()), Some(Money::brl(dec!(3333.33))));
    }
}

// ============================================================================
// Task Tests
// ============================================================================

mod task_tests {
    use super::*;

    #[test]
    fn test_blank_title_rejected() {
        assert!(matches!(Task::new(""), Err(PlannerError::MissingField("title"))));
    }

    #[test]
    fn test_priority_wire_name() {
        let task = Task::new("Pagar DAS").unwrap().with_priority(TaskPriority::Alta);
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["priority"], "alta");
        assert_eq!(json["done"], false);
    }
}

// ============================================================================
// Habit Tests
// ============================================================================

mod habit_tests {
    use super::*;

    #[test]
    fn test_full_week() {
        let mut habit = Habit::new("Academia").unwrap();
        for offset in 0..7 {
            habit.mark_done(today().checked_sub_days(Days::new(offset)).unwrap());
        }

        assert_eq!(habit.current_streak(today()), 7);
        assert_eq!(habit.completion_rate(today(), 7), Some(dec!(100)));
        assert_eq!(habit.completion_rate(today(), 14), Some(dec!(50)));
    }

    #[test]
    fn test_unmark_breaks_streak() {
        let mut habit = Habit::new("Meditar").unwrap();
        let yesterday = today().pred_opt().unwrap();
        habit.mark_done(today());
        habit.mark_done(yesterday);
        assert!(habit.unmark(yesterday));

        assert_eq!(habit.current_streak(today()), 1);
    }
}

// ============================================================================
// Water Tests
// ============================================================================

mod water_tests {
    use super::*;

    #[test]
    fn test_other_days_ignored() {
        let logs = vec![
            WaterLog::new(today(), 500).unwrap(),
            WaterLog::new(today().pred_opt().unwrap(), 2000).unwrap(),
        ];
        let day = daily_total(&logs, today(), DEFAULT_DAILY_GOAL_ML);

        assert_eq!(day.total_ml, 500);
        assert_eq!(day.progress, dec!(25));
    }

    #[test]
    fn test_zero_goal() {
        let logs = vec![WaterLog::new(today(), 500).unwrap()];
        assert_eq!(daily_total(&logs, today(), 0).progress, dec!(0));
    }
}
