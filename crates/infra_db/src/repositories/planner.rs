//! Goals, tasks, habits and water logs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use core_kernel::{DateRange, GoalId, HabitId, TaskId, UserId, WaterLogId};
use domain_planner::{Goal, Habit, Task, WaterLog};

use super::{money_column, parse_column};
use crate::error::{classify, DatabaseError};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct GoalRow {
    pub id: Uuid,
    pub title: String,
    pub target: Decimal,
    pub current: Decimal,
    pub currency: String,
    pub deadline: Option<NaiveDate>,
    pub origin: String,
}

impl TryFrom<GoalRow> for Goal {
    type Error = DatabaseError;

    fn try_from(row: GoalRow) -> Result<Self, Self::Error> {
        Ok(Goal {
            id: GoalId::from_uuid(row.id),
            title: row.title,
            target: money_column("goals", row.target, &row.currency)?,
            current: money_column("goals", row.current, &row.currency)?,
            deadline: row.deadline,
            origin: parse_column("goals", &row.origin)?,
        })
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TaskRow {
    pub id: Uuid,
    pub title: String,
    pub done: bool,
    pub due_date: Option<NaiveDate>,
    pub priority: String,
    pub completed_on: Option<NaiveDate>,
}

impl TryFrom<TaskRow> for Task {
    type Error = DatabaseError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        Ok(Task {
            id: TaskId::from_uuid(row.id),
            title: row.title,
            done: row.done,
            due_date: row.due_date,
            priority: parse_column("tasks", &row.priority)?,
            completed_on: row.completed_on,
        })
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct HabitRow {
    pub id: Uuid,
    pub name: String,
    pub completions: Vec<NaiveDate>,
}

impl From<HabitRow> for Habit {
    fn from(row: HabitRow) -> Self {
        Habit {
            id: HabitId::from_uuid(row.id),
            name: row.name,
            completions: row.completions.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WaterLogRow {
    pub id: Uuid,
    pub date: NaiveDate,
    pub ml: i32,
}

impl TryFrom<WaterLogRow> for WaterLog {
    type Error = DatabaseError;

    fn try_from(row: WaterLogRow) -> Result<Self, Self::Error> {
        let ml = u32::try_from(row.ml).map_err(|e| DatabaseError::invalid_row("water_logs", e))?;
        Ok(WaterLog {
            id: WaterLogId::from_uuid(row.id),
            date: row.date,
            ml,
        })
    }
}

/// Repository for the personal planner tables
#[derive(Debug, Clone)]
pub struct PlannerRepository {
    pool: PgPool,
}

impl PlannerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---- goals ----

    #[instrument(skip(self, goal), fields(goal_id = %goal.id))]
    pub async fn insert_goal(&self, user: UserId, goal: &Goal) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO goals (id, user_id, title, target, current, currency, deadline, origin)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(Uuid::from(goal.id))
        .bind(Uuid::from(user))
        .bind(&goal.title)
        .bind(goal.target.amount())
        .bind(goal.current.amount())
        .bind(goal.target.currency().code())
        .bind(goal.deadline)
        .bind(goal.origin.as_str())
        .execute(&self.pool)
        .await
        .map_err(classify)?;
        Ok(())
    }

    pub async fn list_goals(&self, user: UserId) -> Result<Vec<Goal>, DatabaseError> {
        sqlx::query_as::<_, GoalRow>(
            r#"
            SELECT id, title, target, current, currency, deadline, origin
            FROM goals WHERE user_id = $1
            ORDER BY deadline NULLS LAST, title
            "#,
        )
        .bind(Uuid::from(user))
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(Goal::try_from)
        .collect()
    }

    pub async fn find_goal(&self, user: UserId, id: GoalId) -> Result<Goal, DatabaseError> {
        let row = sqlx::query_as::<_, GoalRow>(
            r#"
            SELECT id, title, target, current, currency, deadline, origin
            FROM goals WHERE user_id = $1 AND id = $2
            "#,
        )
        .bind(Uuid::from(user))
        .bind(Uuid::from(id))
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Goal", id))?;
        Goal::try_from(row)
    }

    #[instrument(skip(self, goal), fields(goal_id = %goal.id))]
    pub async fn update_goal_current(&self, user: UserId, goal: &Goal) -> Result<(), DatabaseError> {
        let result = sqlx::query("UPDATE goals SET current = $1 WHERE id = $2 AND user_id = $3")
            .bind(goal.current.amount())
            .bind(Uuid::from(goal.id))
            .bind(Uuid::from(user))
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Goal", goal.id));
        }
        Ok(())
    }

    // ---- tasks ----

    #[instrument(skip(self, task), fields(task_id = %task.id))]
    pub async fn insert_task(&self, user: UserId, task: &Task) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO tasks (id, user_id, title, done, due_date, priority, completed_on)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(Uuid::from(task.id))
        .bind(Uuid::from(user))
        .bind(&task.title)
        .bind(task.done)
        .bind(task.due_date)
        .bind(task.priority.as_str())
        .bind(task.completed_on)
        .execute(&self.pool)
        .await
        .map_err(classify)?;
        Ok(())
    }

    pub async fn list_tasks(&self, user: UserId) -> Result<Vec<Task>, DatabaseError> {
        sqlx::query_as::<_, TaskRow>(
            "SELECT id, title, done, due_date, priority, completed_on FROM tasks WHERE user_id = $1",
        )
        .bind(Uuid::from(user))
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(Task::try_from)
        .collect()
    }

    pub async fn find_task(&self, user: UserId, id: TaskId) -> Result<Task, DatabaseError> {
        let row = sqlx::query_as::<_, TaskRow>(
            r#"
            SELECT id, title, done, due_date, priority, completed_on
            FROM tasks WHERE user_id = $1 AND id = $2
            "#,
        )
        .bind(Uuid::from(user))
        .bind(Uuid::from(id))
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Task", id))?;
        Task::try_from(row)
    }

    /// Stores the done flag and completion date of a toggled task
    #[instrument(skip(self, task), fields(task_id = %task.id, done = task.done))]
    pub async fn set_task_done(&self, user: UserId, task: &Task) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "UPDATE tasks SET done = $1, completed_on = $2 WHERE id = $3 AND user_id = $4",
        )
        .bind(task.done)
        .bind(task.completed_on)
        .bind(Uuid::from(task.id))
        .bind(Uuid::from(user))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Task", task.id));
        }
        Ok(())
    }

    // ---- habits ----

    #[instrument(skip(self, habit), fields(habit_id = %habit.id))]
    pub async fn insert_habit(&self, user: UserId, habit: &Habit) -> Result<(), DatabaseError> {
        let completions: Vec<NaiveDate> = habit.completions.iter().copied().collect();
        sqlx::query("INSERT INTO habits (id, user_id, name, completions) VALUES ($1, $2, $3, $4)")
            .bind(Uuid::from(habit.id))
            .bind(Uuid::from(user))
            .bind(&habit.name)
            .bind(completions)
            .execute(&self.pool)
            .await
            .map_err(classify)?;
        Ok(())
    }

    pub async fn list_habits(&self, user: UserId) -> Result<Vec<Habit>, DatabaseError> {
        let rows = sqlx::query_as::<_, HabitRow>(
            "SELECT id, name, completions FROM habits WHERE user_id = $1 ORDER BY name",
        )
        .bind(Uuid::from(user))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Habit::from).collect())
    }

    pub async fn find_habit(&self, user: UserId, id: HabitId) -> Result<Habit, DatabaseError> {
        sqlx::query_as::<_, HabitRow>(
            "SELECT id, name, completions FROM habits WHERE user_id = $1 AND id = $2",
        )
        .bind(Uuid::from(user))
        .bind(Uuid::from(id))
        .fetch_optional(&self.pool)
        .await?
        .map(Habit::from)
        .ok_or_else(|| DatabaseError::not_found("Habit", id))
    }

    #[instrument(skip(self, habit), fields(habit_id = %habit.id))]
    pub async fn update_habit_completions(&self, user: UserId, habit: &Habit) -> Result<(), DatabaseError> {
        let completions: Vec<NaiveDate> = habit.completions.iter().copied().collect();
        let result = sqlx::query("UPDATE habits SET completions = $1 WHERE id = $2 AND user_id = $3")
            .bind(completions)
            .bind(Uuid::from(habit.id))
            .bind(Uuid::from(user))
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Habit", habit.id));
        }
        Ok(())
    }

    // ---- water ----

    pub async fn insert_water(&self, user: UserId, log: &WaterLog) -> Result<(), DatabaseError> {
        let ml = i32::try_from(log.ml)
            .map_err(|e| DatabaseError::invalid_row("water_logs", e))?;
        sqlx::query("INSERT INTO water_logs (id, user_id, date, ml) VALUES ($1, $2, $3, $4)")
            .bind(Uuid::from(log.id))
            .bind(Uuid::from(user))
            .bind(log.date)
            .bind(ml)
            .execute(&self.pool)
            .await
            .map_err(classify)?;
        Ok(())
    }

    /// Water logs inside `range`, oldest first
    pub async fn list_water(&self, user: UserId, range: DateRange) -> Result<Vec<WaterLog>, DatabaseError> {
        sqlx::query_as::<_, WaterLogRow>(
            r#"
            SELECT id, date, ml FROM water_logs
            WHERE user_id = $1 AND date >= $2 AND date <= $3
            ORDER BY date, created_at
            "#,
        )
        .bind(Uuid::from(user))
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(WaterLog::try_from)
        .collect()
    }
}
