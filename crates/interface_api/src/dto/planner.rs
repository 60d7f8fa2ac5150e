//! Goal, task, habit and water DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{Money, Origin};
use domain_planner::{Goal, Habit, Task, TaskPriority};

use super::{non_negative, positive};

/// Window used for the habit completion rate
pub const HABIT_RATE_DAYS: u32 = 30;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateGoalRequest {
    #[validate(length(min = 1, max = 160))]
    pub title: String,
    #[validate(custom(function = "positive"))]
    pub target: Decimal,
    #[validate(custom(function = "non_negative"))]
    pub current: Option<Decimal>,
    pub deadline: Option<NaiveDate>,
    pub origin: Origin,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ContributeRequest {
    #[validate(custom(function = "positive"))]
    pub amount: Decimal,
}

/// A goal with its progress as of today
#[derive(Debug, Serialize)]
pub struct GoalResponse {
    #[serde(flatten)]
    pub goal: Goal,
    pub progress: Decimal,
    pub remaining: Money,
    pub monthly_needed: Option<Money>,
    pub reached: bool,
}

impl GoalResponse {
    pub fn new(goal: Goal, today: NaiveDate) -> Self {
        Self {
            progress: goal.progress(),
            remaining: goal.remaining(),
            monthly_needed: goal.monthly_needed(today),
            reached: goal.is_reached(),
            goal,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<TaskPriority>,
}

#[derive(Debug, Serialize)]
pub struct TaskResponse {
    #[serde(flatten)]
    pub task: Task,
    pub overdue: bool,
}

impl TaskResponse {
    pub fn new(task: Task, today: NaiveDate) -> Self {
        Self {
            overdue: task.is_overdue(today),
            task,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateHabitRequest {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ToggleHabitRequest {
    /// Defaults to today
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct HabitResponse {
    #[serde(flatten)]
    pub habit: Habit,
    pub done_today: bool,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub completion_rate: Option<Decimal>,
}

impl HabitResponse {
    pub fn new(habit: Habit, today: NaiveDate) -> Self {
        Self {
            done_today: habit.is_done_on(today),
            current_streak: habit.current_streak(today),
            longest_streak: habit.longest_streak(),
            completion_rate: habit.completion_rate(today, HABIT_RATE_DAYS),
            habit,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateWaterRequest {
    #[validate(range(min = 1, max = 5000))]
    pub ml: u32,
    /// Defaults to today
    pub date: Option<NaiveDate>,
}

/// `?days=&goal_ml=` for the water history
#[derive(Debug, Default, Deserialize, Validate)]
pub struct WaterQuery {
    #[validate(range(min = 1, max = 90))]
    pub days: Option<u32>,
    #[validate(range(min = 1))]
    pub goal_ml: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_goal_response_fields() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let goal = Goal::new("Curso de inglês", Money::brl(dec!(3000)), Origin::Pessoal)
            .unwrap()
            .with_current(Money::brl(dec!(750)))
            .unwrap();

        let response = GoalResponse::new(goal, today);
        assert_eq!(response.progress, dec!(25));
        assert_eq!(response.remaining, Money::brl(dec!(2250)));
        assert!(response.monthly_needed.is_none());

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["title"], "Curso de inglês");
    }

    #[test]
    fn test_water_limits() {
        let request = CreateWaterRequest { ml: 0, date: None };
        assert!(request.validate().is_err());
        let query = WaterQuery { days: Some(365), goal_ml: None };
        assert!(query.validate().is_err());
    }
}
