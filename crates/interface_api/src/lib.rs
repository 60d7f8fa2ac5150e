//! HTTP API Layer
//!
//! This crate provides the REST API behind the finance dashboard using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers per bounded context
//! - **Middleware**: Token validation and audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent JSON error responses
//!
//! Every route under `/api/v1` acts on behalf of the user named by the
//! bearer token; handlers never read rows of another user.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let app = create_router(AppState::new(pool, config, RateBoard::new()));
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod auth;

use axum::{
    Router,
    routing::{get, post, put, delete},
    middleware as axum_middleware,
};
use chrono::NaiveDate;
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use infra_rates::RateBoard;

use crate::config::ApiConfig;
use crate::middleware::{auth_middleware, audit_middleware};
use crate::handlers::{
    accounts, catalog, crm, dashboard, export, health, investments, ledger, planner, rates,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: ApiConfig,
    pub rates: RateBoard,
}

impl AppState {
    pub fn new(pool: PgPool, config: ApiConfig, rates: RateBoard) -> Self {
        Self { pool, config, rates }
    }

    /// Calendar date in the configured zone
    pub fn today(&self) -> NaiveDate {
        self.config.timezone.today()
    }
}

/// Creates the main API router
pub fn create_router(state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let account_routes = Router::new()
        .route("/", get(accounts::list_accounts).post(accounts::create_account))
        .route("/:id", delete(accounts::delete_account))
        .route("/:id/balance", put(accounts::update_balance));

    let revenue_routes = Router::new()
        .route("/", get(ledger::list_revenues).post(ledger::create_revenue))
        .route("/:id/pay", post(ledger::pay_revenue));

    let expense_routes = Router::new()
        .route("/", get(ledger::list_expenses).post(ledger::create_expense))
        .route("/recurring", get(ledger::recurring_expenses))
        .route("/:id/pay", post(ledger::pay_expense));

    let transfer_routes = Router::new()
        .route("/", get(ledger::list_transfers).post(ledger::create_transfer));

    let dashboard_routes = Router::new()
        .route("/summary", get(dashboard::summary))
        .route("/kpis", get(dashboard::kpis))
        .route("/channels", get(dashboard::channels))
        .route("/categories", get(dashboard::categories))
        .route("/cashflow", get(dashboard::cashflow));

    let investment_routes = Router::new()
        .route("/", get(investments::list_investments).post(investments::create_investment))
        .route("/portfolio", get(investments::portfolio))
        .route("/:id/value", put(investments::update_value));

    let client_routes = Router::new()
        .route("/", get(crm::list_clients).post(crm::create_client))
        .route("/:id", get(crm::get_client).put(crm::update_client))
        .route("/:id/analysis", get(crm::analyze));

    let deal_routes = Router::new()
        .route("/", get(crm::list_deals).post(crm::create_deal))
        .route("/pipeline", get(crm::pipeline))
        .route("/:id/stage", put(crm::move_deal));

    let goal_routes = Router::new()
        .route("/", get(planner::list_goals).post(planner::create_goal))
        .route("/:id/contribute", post(planner::contribute));

    let task_routes = Router::new()
        .route("/", get(planner::list_tasks).post(planner::create_task))
        .route("/:id/toggle", post(planner::toggle_task));

    let habit_routes = Router::new()
        .route("/", get(planner::list_habits).post(planner::create_habit))
        .route("/:id/toggle", post(planner::toggle_habit));

    let water_routes = Router::new()
        .route("/", get(planner::water_history).post(planner::log_water))
        .route("/today", get(planner::water_today));

    let catalog_routes = Router::new()
        .route("/channels", get(catalog::list_channels).post(catalog::create_channel))
        .route("/services", get(catalog::list_services).post(catalog::create_service));

    let rate_routes = Router::new()
        .route("/", get(rates::latest))
        .route("/convert", get(rates::convert));

    // Protected API routes
    let api_routes = Router::new()
        .nest("/accounts", account_routes)
        .nest("/revenues", revenue_routes)
        .nest("/expenses", expense_routes)
        .nest("/transfers", transfer_routes)
        .nest("/dashboard", dashboard_routes)
        .nest("/investments", investment_routes)
        .nest("/clients", client_routes)
        .nest("/deals", deal_routes)
        .nest("/goals", goal_routes)
        .nest("/tasks", task_routes)
        .nest("/habits", habit_routes)
        .nest("/water", water_routes)
        .nest("/rates", rate_routes)
        .merge(catalog_routes)
        .route("/export", get(export::export_backup))
        .layer(axum_middleware::from_fn(audit_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
