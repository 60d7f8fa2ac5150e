//! Investment handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

use core_kernel::{InvestmentId, Money};
use domain_investment::{Investment, PortfolioSummary};
use infra_db::repositories::InvestmentRepository;

use crate::auth::CurrentUser;
use crate::dto::investment::{CreateInvestmentRequest, UpdateValuationRequest};
use crate::dto::PeriodQuery;
use crate::{error::ApiError, AppState};

pub async fn list_investments(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<Vec<Investment>>, ApiError> {
    let context = query.context();
    let investments = InvestmentRepository::new(state.pool.clone())
        .list(user)
        .await?
        .into_iter()
        .filter(|i| context.includes(i.origin))
        .collect();
    Ok(Json(investments))
}

pub async fn create_investment(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<CreateInvestmentRequest>,
) -> Result<(StatusCode, Json<Investment>), ApiError> {
    request.validate()?;

    let currency = state.config.currency;
    let applied = Money::new(request.applied, currency);
    let current = Money::new(request.current_value.unwrap_or(request.applied), currency);
    let investment = Investment::new(
        request.date,
        request.origin,
        request.investment_type,
        request.asset,
        applied,
        current,
        request.liquidity,
    )?;

    InvestmentRepository::new(state.pool.clone())
        .insert(user, &investment)
        .await?;
    Ok((StatusCode::CREATED, Json(investment)))
}

/// Records a new market value and returns the recalculated investment
pub async fn update_value(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateValuationRequest>,
) -> Result<Json<Investment>, ApiError> {
    request.validate()?;

    let repository = InvestmentRepository::new(state.pool.clone());
    let mut investment = repository.find(user, InvestmentId::from_uuid(id)).await?;
    investment.update_value(Money::new(request.current_value, investment.applied.currency()))?;
    repository.update_valuation(user, &investment).await?;
    Ok(Json(investment))
}

/// Totals and allocation by type and liquidity
pub async fn portfolio(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<PortfolioSummary>, ApiError> {
    let investments = InvestmentRepository::new(state.pool.clone()).list(user).await?;
    let summary = PortfolioSummary::from_investments(&investments, query.context(), state.config.currency)?;
    Ok(Json(summary))
}
