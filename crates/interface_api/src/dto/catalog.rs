//! Channel and service catalog DTOs

use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use super::non_negative;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateChannelRequest {
    #[validate(length(min = 1, max = 60))]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateServiceRequest {
    #[validate(length(min = 1, max = 80))]
    pub name: String,
    #[validate(custom(function = "non_negative"))]
    pub price: Option<Decimal>,
}
