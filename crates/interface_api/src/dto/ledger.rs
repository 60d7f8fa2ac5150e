//! Account, revenue, expense and transfer DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use core_kernel::{FinancialContext, Money, Origin};
use domain_ledger::{AccountType, AccountsOverview, Expense, FinancialAccount, PaymentStatus, TransferType};

use super::positive;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateAccountRequest {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    pub account_type: AccountType,
    pub origin: Origin,
    #[serde(default)]
    pub balance: Decimal,
    #[validate(length(max = 120))]
    pub bank_name: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBalanceRequest {
    pub balance: Decimal,
}

/// Accounts visible in the selected context and their totals
#[derive(Debug, Serialize)]
pub struct AccountsOverviewResponse {
    pub accounts: Vec<FinancialAccount>,
    pub overview: AccountsOverview,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRevenueRequest {
    pub date: NaiveDate,
    #[validate(custom(function = "positive"))]
    pub amount: Decimal,
    pub origin: Origin,
    #[validate(length(max = 80))]
    pub service: Option<String>,
    #[validate(length(max = 80))]
    pub channel: Option<String>,
    #[validate(length(max = 80))]
    pub category: Option<String>,
    pub status: Option<PaymentStatus>,
    pub client_id: Option<Uuid>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateExpenseRequest {
    pub date: NaiveDate,
    #[validate(custom(function = "positive"))]
    pub amount: Decimal,
    pub origin: Origin,
    #[validate(length(min = 1, max = 80))]
    pub category: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[serde(default)]
    pub recurring: bool,
    pub due_date: Option<NaiveDate>,
    pub status: Option<PaymentStatus>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTransferRequest {
    pub date: NaiveDate,
    pub from: Origin,
    pub to: Origin,
    #[validate(custom(function = "positive"))]
    pub amount: Decimal,
    pub transfer_type: TransferType,
    #[validate(length(max = 500))]
    pub description: Option<String>,
}

/// `?context=&days=` for the recurring expenses widget
#[derive(Debug, Default, Deserialize)]
pub struct RecurringQuery {
    pub context: Option<FinancialContext>,
    /// Look-ahead window for upcoming due dates
    pub days: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct RecurringResponse {
    pub expenses: Vec<Expense>,
    pub monthly_commitment: Money,
    pub upcoming: Vec<Expense>,
    pub overdue: Vec<Expense>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_revenue_amount_must_be_positive() {
        let request: CreateRevenueRequest = serde_json::from_value(serde_json::json!({
            "date": "2024-04-02",
            "amount": "0",
            "origin": "empresa"
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_expense_requires_category() {
        let request = CreateExpenseRequest {
            date: NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(),
            amount: dec!(90),
            origin: Origin::Pessoal,
            category: String::new(),
            description: None,
            recurring: true,
            due_date: None,
            status: None,
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("category"));
    }

    #[test]
    fn test_balance_may_be_negative() {
        let request = UpdateBalanceRequest { balance: dec!(-50) };
        assert!(request.validate().is_ok());
    }
}
