//! Investment DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use core_kernel::Origin;
use domain_investment::{InvestmentType, Liquidity};

use super::{non_negative, positive};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateInvestmentRequest {
    pub date: NaiveDate,
    pub origin: Origin,
    pub investment_type: InvestmentType,
    #[validate(length(min = 1, max = 120))]
    pub asset: String,
    #[validate(custom(function = "positive"))]
    pub applied: Decimal,
    /// Defaults to the applied amount
    #[validate(custom(function = "non_negative"))]
    pub current_value: Option<Decimal>,
    pub liquidity: Liquidity,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateValuationRequest {
    #[validate(custom(function = "non_negative"))]
    pub current_value: Decimal,
}
