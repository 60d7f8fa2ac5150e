//! Client and deal handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use core_kernel::{ClientId, DealId, Money};
use domain_crm::{analyze_client, Client, ClientAnalysis, Deal, DealStage, PipelineSummary};
use infra_db::repositories::{ClientRepository, DealRepository, TransactionRepository};

use crate::auth::CurrentUser;
use crate::dto::crm::{CreateClientRequest, CreateDealRequest, MoveDealRequest, UpdateClientRequest};
use crate::{error::ApiError, AppState};

pub async fn list_clients(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Vec<Client>>, ApiError> {
    Ok(Json(ClientRepository::new(state.pool.clone()).list(user).await?))
}

pub async fn create_client(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<CreateClientRequest>,
) -> Result<(StatusCode, Json<Client>), ApiError> {
    request.validate()?;

    let created_at = request.created_at.unwrap_or_else(|| state.today());
    let mut client = Client::new(request.name, created_at)?;
    if let Some(email) = request.email {
        client = client.with_email(email);
    }
    if let Some(phone) = request.phone {
        client = client.with_phone(phone);
    }
    if let Some(status) = request.status {
        client = client.with_status(status);
    }
    if let Some(ltv) = request.ltv {
        client = client.with_ltv(Money::new(ltv, state.config.currency));
    }
    if let Some(date) = request.last_purchase_date {
        client = client.with_last_purchase(date);
    }
    for tag in request.tags {
        client.add_tag(tag);
    }
    client.internal = request.internal;

    ClientRepository::new(state.pool.clone()).insert(user, &client).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

pub async fn get_client(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Client>, ApiError> {
    let client = ClientRepository::new(state.pool.clone())
        .find(user, ClientId::from_uuid(id))
        .await?;
    Ok(Json(client))
}

pub async fn update_client(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateClientRequest>,
) -> Result<Json<Client>, ApiError> {
    request.validate()?;

    let repository = ClientRepository::new(state.pool.clone());
    let mut client = repository.find(user, ClientId::from_uuid(id)).await?;

    if let Some(name) = request.name {
        client.rename(name)?;
    }
    if let Some(email) = request.email {
        client.email = Some(email);
    }
    if let Some(phone) = request.phone {
        client.phone = Some(phone);
    }
    if let Some(status) = request.status {
        client.status = status;
    }
    if let Some(tags) = request.tags {
        client.tags.clear();
        for tag in tags {
            client.add_tag(tag);
        }
    }
    if let Some(ltv) = request.ltv {
        client.ltv = Money::new(ltv, state.config.currency);
    }
    if let Some(date) = request.last_purchase_date {
        client.last_purchase_date = Some(date);
    }
    if let Some(internal) = request.internal {
        client.internal = internal;
    }

    repository.update(user, &client).await?;
    Ok(Json(client))
}

/// Relationship tier, recurrence potential, health and suggested actions
pub async fn analyze(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ClientAnalysis>, ApiError> {
    let client_id = ClientId::from_uuid(id);
    let client = ClientRepository::new(state.pool.clone()).find(user, client_id).await?;
    let revenues = TransactionRepository::new(state.pool.clone())
        .list_client_revenues(user, client_id)
        .await?;

    Ok(Json(analyze_client(&client, &revenues, state.today())))
}

pub async fn list_deals(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Vec<Deal>>, ApiError> {
    Ok(Json(DealRepository::new(state.pool.clone()).list(user).await?))
}

pub async fn create_deal(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<CreateDealRequest>,
) -> Result<(StatusCode, Json<Deal>), ApiError> {
    request.validate()?;

    let mut deal = Deal::new(request.title, Money::new(request.value, state.config.currency))?;
    if let Some(client) = request.client_id {
        deal = deal.with_client(ClientId::from_uuid(client));
    }
    if let Some(priority) = request.priority {
        deal = deal.with_priority(priority);
    }
    if let Some(date) = request.expected_close {
        deal = deal.with_expected_close(date);
    }
    if let Some(stage) = request.stage.filter(|s| *s != DealStage::Lead) {
        deal.move_to(stage)?;
    }

    DealRepository::new(state.pool.clone()).insert(user, &deal).await?;
    Ok((StatusCode::CREATED, Json(deal)))
}

/// Moves a deal to another pipeline column
///
/// Closed deals answer 409 unless the request asks to reopen them.
pub async fn move_deal(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<MoveDealRequest>,
) -> Result<Json<Deal>, ApiError> {
    let repository = DealRepository::new(state.pool.clone());
    let mut deal = repository.find(user, DealId::from_uuid(id)).await?;

    let from = if request.reopen && !deal.is_open() {
        let previous = deal.stage;
        deal.reopen(request.stage)?;
        previous
    } else {
        deal.move_to(request.stage)?
    };

    repository.update_stage(user, &deal).await?;
    info!(deal_id = %deal.id, from = %from, to = %deal.stage, "Deal moved");
    Ok(Json(deal))
}

/// Stage totals, weighted forecast and win rate
pub async fn pipeline(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<PipelineSummary>, ApiError> {
    let deals = DealRepository::new(state.pool.clone()).list(user).await?;
    Ok(Json(PipelineSummary::from_deals(&deals, state.config.currency)?))
}
