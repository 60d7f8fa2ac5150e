//! Account handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

use core_kernel::{AccountId, Money};
use domain_ledger::{FinancialAccount, Ledger};
use infra_db::repositories::AccountRepository;

use crate::auth::CurrentUser;
use crate::dto::ledger::{AccountsOverviewResponse, CreateAccountRequest, UpdateBalanceRequest};
use crate::dto::PeriodQuery;
use crate::{error::ApiError, AppState};

/// Lists accounts with totals per type for the selected context
pub async fn list_accounts(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<AccountsOverviewResponse>, ApiError> {
    let accounts = AccountRepository::new(state.pool.clone()).list(user).await?;
    let context = query.context();

    let ledger = Ledger::from_records(state.config.currency, accounts, vec![], vec![], vec![])?;
    let overview = ledger.accounts_overview(context);
    let accounts = ledger
        .accounts()
        .iter()
        .filter(|a| context.includes(a.origin))
        .cloned()
        .collect();

    Ok(Json(AccountsOverviewResponse { accounts, overview }))
}

pub async fn create_account(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<CreateAccountRequest>,
) -> Result<(StatusCode, Json<FinancialAccount>), ApiError> {
    request.validate()?;

    let balance = Money::new(request.balance, state.config.currency);
    let mut account = FinancialAccount::new(request.name, request.account_type, request.origin, balance)?;
    if let Some(bank) = request.bank_name.filter(|b| !b.trim().is_empty()) {
        account = account.with_bank(bank);
    }

    AccountRepository::new(state.pool.clone()).insert(user, &account).await?;
    Ok((StatusCode::CREATED, Json(account)))
}

/// Records a new balance reading
pub async fn update_balance(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateBalanceRequest>,
) -> Result<StatusCode, ApiError> {
    let balance = Money::new(request.balance, state.config.currency);
    AccountRepository::new(state.pool.clone())
        .update_balance(user, AccountId::from_uuid(id), balance)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_account(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    AccountRepository::new(state.pool.clone())
        .delete(user, AccountId::from_uuid(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
