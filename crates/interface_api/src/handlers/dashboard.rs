//! Dashboard widget handlers
//!
//! Each widget loads the user's ledger and aggregates it in memory for the
//! requested context and period.

use axum::{
    extract::{Query, State},
    Extension, Json,
};

use core_kernel::{MonthKey, UserId};
use domain_ledger::{BreakdownEntry, KpiReport, Ledger, MonthlyPoint};
use infra_db::repositories::TransactionRepository;

use crate::auth::CurrentUser;
use crate::dto::dashboard::{CashflowQuery, ChannelsResponse, SummaryResponse};
use crate::dto::PeriodQuery;
use crate::{error::ApiError, AppState};

async fn load_ledger(state: &AppState, user: UserId) -> Result<Ledger, ApiError> {
    Ok(TransactionRepository::new(state.pool.clone())
        .load_ledger(user, state.config.currency)
        .await?)
}

/// Totals, pending amounts, balances and inter-ledger transfers
pub async fn summary(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let period = query.period(state.today())?;
    let context = query.context();
    let ledger = load_ledger(&state, user).await?;

    Ok(Json(SummaryResponse {
        summary: ledger.summary(context, period),
        accounts: ledger.accounts_overview(context),
        transfers: ledger.transfer_summary(period),
    }))
}

/// KPI cards compared with the preceding period of equal length
pub async fn kpis(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<KpiReport>, ApiError> {
    let period = query.period(state.today())?;
    let ledger = load_ledger(&state, user).await?;
    Ok(Json(ledger.kpis(query.context(), period)))
}

/// Revenue split by channel and by service
pub async fn channels(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<ChannelsResponse>, ApiError> {
    let period = query.period(state.today())?;
    let context = query.context();
    let ledger = load_ledger(&state, user).await?;

    Ok(Json(ChannelsResponse {
        channels: ledger.revenue_by_channel(context, period),
        services: ledger.revenue_by_service(context, period),
    }))
}

pub async fn categories(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<Vec<BreakdownEntry>>, ApiError> {
    let period = query.period(state.today())?;
    let ledger = load_ledger(&state, user).await?;
    Ok(Json(ledger.expenses_by_category(query.context(), period)))
}

/// Monthly revenue, expenses and net, oldest month first
pub async fn cashflow(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(query): Query<CashflowQuery>,
) -> Result<Json<Vec<MonthlyPoint>>, ApiError> {
    let end = query
        .end
        .unwrap_or_else(|| MonthKey::from_date(state.today()));
    let ledger = load_ledger(&state, user).await?;
    Ok(Json(ledger.monthly_series(
        query.context.unwrap_or_default(),
        end,
        query.months(),
    )))
}
