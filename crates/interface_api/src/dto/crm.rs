//! Client and deal DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use domain_crm::{ClientStatus, DealStage, InternalData, Priority};

use super::{non_negative, not_blank};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateClientRequest {
    #[validate(length(min = 1, max = 160))]
    pub name: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 40))]
    pub phone: Option<String>,
    pub status: Option<ClientStatus>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Lifetime value carried over from before the client was tracked here
    #[validate(custom(function = "non_negative"))]
    pub ltv: Option<Decimal>,
    /// Defaults to today
    pub created_at: Option<NaiveDate>,
    pub last_purchase_date: Option<NaiveDate>,
    #[serde(default)]
    pub internal: InternalData,
}

/// Partial update; absent fields keep their stored value
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateClientRequest {
    #[validate(length(max = 160), custom(function = "not_blank"))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 40))]
    pub phone: Option<String>,
    pub status: Option<ClientStatus>,
    pub tags: Option<Vec<String>>,
    #[validate(custom(function = "non_negative"))]
    pub ltv: Option<Decimal>,
    pub last_purchase_date: Option<NaiveDate>,
    pub internal: Option<InternalData>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateDealRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(custom(function = "non_negative"))]
    pub value: Decimal,
    /// Starting column; `lead` when absent
    pub stage: Option<DealStage>,
    pub priority: Option<Priority>,
    pub client_id: Option<Uuid>,
    pub expected_close: Option<NaiveDate>,
}

/// Kanban drop of a deal onto a stage column
#[derive(Debug, Deserialize)]
pub struct MoveDealRequest {
    pub stage: DealStage,
    /// Required to move a deal out of a closed stage
    #[serde(default)]
    pub reopen: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_email_validated() {
        let request: CreateClientRequest = serde_json::from_value(serde_json::json!({
            "name": "Padaria Sol",
            "email": "not-an-email"
        }))
        .unwrap();
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_update_rejects_blank_name_and_negative_ltv() {
        let request: UpdateClientRequest = serde_json::from_value(serde_json::json!({
            "name": "   ",
            "ltv": "-10"
        }))
        .unwrap();
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("ltv"));

        let ok: UpdateClientRequest =
            serde_json::from_value(serde_json::json!({ "ltv": "7500.00" })).unwrap();
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_move_request_defaults() {
        let request: MoveDealRequest =
            serde_json::from_value(serde_json::json!({ "stage": "fechado_ganho" })).unwrap();
        assert_eq!(request.stage, DealStage::FechadoGanho);
        assert!(!request.reopen);
    }
}
