//! Planner Domain
//!
//! Productivity records that sit next to the finance widgets: savings
//! goals, a task list, daily habits, and water intake.

pub mod goal;
pub mod task;
pub mod habit;
pub mod water;
pub mod error;

pub use goal::Goal;
pub use task::{sort_for_display, Task, TaskPriority};
pub use habit::Habit;
pub use water::{daily_history, daily_total, DailyWater, WaterLog, DEFAULT_DAILY_GOAL_ML};
pub use error::PlannerError;
