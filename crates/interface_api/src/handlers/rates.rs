//! Currency quote handlers

use axum::{
    extract::{Query, State},
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{Currency, Money};
use infra_rates::RateSnapshot;

use crate::dto::convertible_amount;
use crate::{error::ApiError, AppState};

/// Latest quotes held by the poller
pub async fn latest(State(state): State<AppState>) -> Json<RateSnapshot> {
    Json(state.rates.snapshot().await)
}

#[derive(Debug, Deserialize, Validate)]
pub struct ConvertQuery {
    #[validate(custom(function = "convertible_amount"))]
    pub amount: Decimal,
    pub currency: Currency,
}

#[derive(Debug, Serialize)]
pub struct ConvertResponse {
    pub original: Money,
    pub converted: Money,
}

/// Converts an amount into BRL at the current bid
///
/// Answers 503 while the board has no quote for the currency.
pub async fn convert(
    State(state): State<AppState>,
    Query(query): Query<ConvertQuery>,
) -> Result<Json<ConvertResponse>, ApiError> {
    query.validate()?;
    let original = Money::new(query.amount, query.currency);
    let converted = state.rates.to_brl(original).await?;
    Ok(Json(ConvertResponse { original, converted }))
}
