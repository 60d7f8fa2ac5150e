//! Revenue, expense and transfer handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use core_kernel::{ClientId, Money};
use domain_ledger::{Expense, Revenue, Transfer};
use infra_db::repositories::{TransactionKind, TransactionRepository};

use crate::auth::CurrentUser;
use crate::dto::ledger::{
    CreateExpenseRequest, CreateRevenueRequest, CreateTransferRequest, RecurringQuery,
    RecurringResponse,
};
use crate::dto::PeriodQuery;
use crate::{error::ApiError, AppState};

/// Days ahead shown in the "due soon" list
const DEFAULT_DUE_WINDOW_DAYS: u64 = 7;

pub async fn list_revenues(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<Vec<Revenue>>, ApiError> {
    let range = query.filter(state.today())?;
    let context = query.context();
    let revenues = TransactionRepository::new(state.pool.clone())
        .list_revenues(user, range)
        .await?
        .into_iter()
        .filter(|r| context.includes(r.origin))
        .collect();
    Ok(Json(revenues))
}

pub async fn create_revenue(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<CreateRevenueRequest>,
) -> Result<(StatusCode, Json<Revenue>), ApiError> {
    request.validate()?;

    let amount = Money::new(request.amount, state.config.currency);
    let mut revenue = Revenue::new(request.date, amount, request.origin)?;
    if let Some(service) = non_blank(request.service) {
        revenue = revenue.with_service(service);
    }
    if let Some(channel) = non_blank(request.channel) {
        revenue = revenue.with_channel(channel);
    }
    if let Some(category) = non_blank(request.category) {
        revenue = revenue.with_category(category);
    }
    if let Some(status) = request.status {
        revenue = revenue.with_status(status);
    }
    if let Some(client) = request.client_id {
        revenue = revenue.with_client(ClientId::from_uuid(client));
    }
    if let Some(description) = non_blank(request.description) {
        revenue = revenue.with_description(description);
    }

    TransactionRepository::new(state.pool.clone())
        .insert_revenue(user, &revenue)
        .await?;
    info!(revenue_id = %revenue.id, amount = %revenue.amount, "Revenue recorded");
    Ok((StatusCode::CREATED, Json(revenue)))
}

pub async fn pay_revenue(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    TransactionRepository::new(state.pool.clone())
        .mark_paid(user, TransactionKind::Revenue, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_expenses(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<Vec<Expense>>, ApiError> {
    let range = query.filter(state.today())?;
    let context = query.context();
    let expenses = TransactionRepository::new(state.pool.clone())
        .list_expenses(user, range)
        .await?
        .into_iter()
        .filter(|e| context.includes(e.origin))
        .collect();
    Ok(Json(expenses))
}

pub async fn create_expense(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<CreateExpenseRequest>,
) -> Result<(StatusCode, Json<Expense>), ApiError> {
    request.validate()?;

    let amount = Money::new(request.amount, state.config.currency);
    let mut expense = Expense::new(
        request.date,
        amount,
        request.origin,
        request.category,
        request.description.unwrap_or_default(),
    )?;
    if request.recurring {
        expense = expense.recurring();
    }
    if let Some(due) = request.due_date {
        expense = expense.due_on(due);
    }
    if let Some(status) = request.status {
        expense = expense.with_status(status);
    }

    TransactionRepository::new(state.pool.clone())
        .insert_expense(user, &expense)
        .await?;
    info!(expense_id = %expense.id, amount = %expense.amount, "Expense recorded");
    Ok((StatusCode::CREATED, Json(expense)))
}

pub async fn pay_expense(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    TransactionRepository::new(state.pool.clone())
        .mark_paid(user, TransactionKind::Expense, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Recurring expenses widget: the list, the monthly total, and what is due
pub async fn recurring_expenses(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(query): Query<RecurringQuery>,
) -> Result<Json<RecurringResponse>, ApiError> {
    let ledger = TransactionRepository::new(state.pool.clone())
        .load_ledger(user, state.config.currency)
        .await?;
    let context = query.context.unwrap_or_default();
    let today = state.today();
    let days = query.days.unwrap_or(DEFAULT_DUE_WINDOW_DAYS);

    Ok(Json(RecurringResponse {
        expenses: ledger.recurring_expenses(context).into_iter().cloned().collect(),
        monthly_commitment: ledger.monthly_commitment(context),
        upcoming: ledger.upcoming_due(context, today, days).into_iter().cloned().collect(),
        overdue: ledger.overdue(context, today).into_iter().cloned().collect(),
    }))
}

pub async fn list_transfers(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<Vec<Transfer>>, ApiError> {
    let range = query.filter(state.today())?;
    let transfers = TransactionRepository::new(state.pool.clone())
        .list_transfers(user, range)
        .await?;
    Ok(Json(transfers))
}

pub async fn create_transfer(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<CreateTransferRequest>,
) -> Result<(StatusCode, Json<Transfer>), ApiError> {
    request.validate()?;

    let amount = Money::new(request.amount, state.config.currency);
    let mut transfer = Transfer::new(
        request.date,
        request.from,
        request.to,
        amount,
        request.transfer_type,
    )?;
    if let Some(description) = non_blank(request.description) {
        transfer = transfer.with_description(description);
    }

    TransactionRepository::new(state.pool.clone())
        .insert_transfer(user, &transfer)
        .await?;
    info!(
        transfer_id = %transfer.id,
        from = %transfer.from,
        to = %transfer.to,
        "Transfer recorded"
    );
    Ok((StatusCode::CREATED, Json(transfer)))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
