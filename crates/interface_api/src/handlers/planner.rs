//! Goal, task, habit and water handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

use core_kernel::{DateRange, GoalId, HabitId, Money, TaskId};
use domain_planner::{
    daily_history, daily_total, sort_for_display, DailyWater, Goal, Habit, Task, WaterLog,
    DEFAULT_DAILY_GOAL_ML,
};
use infra_db::repositories::PlannerRepository;

use crate::auth::CurrentUser;
use crate::dto::planner::{
    ContributeRequest, CreateGoalRequest, CreateHabitRequest, CreateTaskRequest,
    CreateWaterRequest, GoalResponse, HabitResponse, TaskResponse, ToggleHabitRequest, WaterQuery,
};
use crate::{error::ApiError, AppState};

const DEFAULT_WATER_DAYS: u32 = 7;

// ============================================================================
// Goals
// ============================================================================

pub async fn list_goals(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Vec<GoalResponse>>, ApiError> {
    let today = state.today();
    let goals = PlannerRepository::new(state.pool.clone())
        .list_goals(user)
        .await?
        .into_iter()
        .map(|goal| GoalResponse::new(goal, today))
        .collect();
    Ok(Json(goals))
}

pub async fn create_goal(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<CreateGoalRequest>,
) -> Result<(StatusCode, Json<GoalResponse>), ApiError> {
    request.validate()?;

    let currency = state.config.currency;
    let mut goal = Goal::new(request.title, Money::new(request.target, currency), request.origin)?;
    if let Some(current) = request.current {
        goal = goal.with_current(Money::new(current, currency))?;
    }
    if let Some(deadline) = request.deadline {
        goal = goal.with_deadline(deadline);
    }

    PlannerRepository::new(state.pool.clone())
        .insert_goal(user, &goal)
        .await?;
    Ok((StatusCode::CREATED, Json(GoalResponse::new(goal, state.today()))))
}

/// Adds a deposit to a goal
pub async fn contribute(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<ContributeRequest>,
) -> Result<Json<GoalResponse>, ApiError> {
    request.validate()?;

    let repository = PlannerRepository::new(state.pool.clone());
    let mut goal = repository.find_goal(user, GoalId::from_uuid(id)).await?;
    let reached = goal.contribute(Money::new(request.amount, state.config.currency))?;
    repository.update_goal_current(user, &goal).await?;

    if reached {
        tracing::info!(goal_id = %goal.id, "Goal reached");
    }
    Ok(Json(GoalResponse::new(goal, state.today())))
}

// ============================================================================
// Tasks
// ============================================================================

pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Vec<TaskResponse>>, ApiError> {
    let today = state.today();
    let mut tasks = PlannerRepository::new(state.pool.clone())
        .list_tasks(user)
        .await?;
    sort_for_display(&mut tasks);
    Ok(Json(
        tasks
            .into_iter()
            .map(|task| TaskResponse::new(task, today))
            .collect(),
    ))
}

pub async fn create_task(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskResponse>), ApiError> {
    request.validate()?;

    let mut task = Task::new(request.title)?;
    if let Some(due) = request.due_date {
        task = task.due_on(due);
    }
    if let Some(priority) = request.priority {
        task = task.with_priority(priority);
    }

    PlannerRepository::new(state.pool.clone())
        .insert_task(user, &task)
        .await?;
    Ok((StatusCode::CREATED, Json(TaskResponse::new(task, state.today()))))
}

pub async fn toggle_task(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<TaskResponse>, ApiError> {
    let today = state.today();
    let repository = PlannerRepository::new(state.pool.clone());
    let mut task = repository.find_task(user, TaskId::from_uuid(id)).await?;
    task.toggle(today);
    repository.set_task_done(user, &task).await?;
    Ok(Json(TaskResponse::new(task, today)))
}

// ============================================================================
// Habits
// ============================================================================

pub async fn list_habits(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Vec<HabitResponse>>, ApiError> {
    let today = state.today();
    let habits = PlannerRepository::new(state.pool.clone())
        .list_habits(user)
        .await?
        .into_iter()
        .map(|habit| HabitResponse::new(habit, today))
        .collect();
    Ok(Json(habits))
}

pub async fn create_habit(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<CreateHabitRequest>,
) -> Result<(StatusCode, Json<HabitResponse>), ApiError> {
    request.validate()?;

    let habit = Habit::new(request.name)?;
    PlannerRepository::new(state.pool.clone())
        .insert_habit(user, &habit)
        .await?;
    Ok((StatusCode::CREATED, Json(HabitResponse::new(habit, state.today()))))
}

/// Marks or unmarks a habit for a day, today when the body names none
pub async fn toggle_habit(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    request: Option<Json<ToggleHabitRequest>>,
) -> Result<Json<HabitResponse>, ApiError> {
    let today = state.today();
    let Json(request) = request.unwrap_or_default();
    let date = request.date.unwrap_or(today);
    if date > today {
        return Err(ApiError::BadRequest(format!(
            "cannot mark a habit on a future date ({date})"
        )));
    }

    let repository = PlannerRepository::new(state.pool.clone());
    let mut habit = repository.find_habit(user, HabitId::from_uuid(id)).await?;
    if habit.is_done_on(date) {
        habit.unmark(date);
    } else {
        habit.mark_done(date);
    }
    repository.update_habit_completions(user, &habit).await?;
    Ok(Json(HabitResponse::new(habit, today)))
}

// ============================================================================
// Water
// ============================================================================

/// Daily totals for the trailing window, oldest first
pub async fn water_history(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(query): Query<WaterQuery>,
) -> Result<Json<Vec<DailyWater>>, ApiError> {
    query.validate()?;

    let today = state.today();
    let days = query.days.unwrap_or(DEFAULT_WATER_DAYS);
    let goal = query.goal_ml.unwrap_or(DEFAULT_DAILY_GOAL_ML);
    let logs = PlannerRepository::new(state.pool.clone())
        .list_water(user, DateRange::trailing_days(today, u64::from(days)))
        .await?;
    Ok(Json(daily_history(&logs, today, days, goal)))
}

pub async fn log_water(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<CreateWaterRequest>,
) -> Result<(StatusCode, Json<WaterLog>), ApiError> {
    request.validate()?;

    let log = WaterLog::new(request.date.unwrap_or_else(|| state.today()), request.ml)?;
    PlannerRepository::new(state.pool.clone())
        .insert_water(user, &log)
        .await?;
    Ok((StatusCode::CREATED, Json(log)))
}

pub async fn water_today(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(query): Query<WaterQuery>,
) -> Result<Json<DailyWater>, ApiError> {
    query.validate()?;

    let today = state.today();
    let logs = PlannerRepository::new(state.pool.clone())
        .list_water(user, DateRange::trailing_days(today, 1))
        .await?;
    let goal = query.goal_ml.unwrap_or(DEFAULT_DAILY_GOAL_ML);
    Ok(Json(daily_total(&logs, today, goal)))
}
