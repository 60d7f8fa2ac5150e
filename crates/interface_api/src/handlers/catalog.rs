//! Sales channel and service catalog handlers

use axum::{extract::State, http::StatusCode, Extension, Json};
use validator::Validate;

use infra_db::repositories::{CatalogEntry, CatalogRepository};

use crate::auth::CurrentUser;
use crate::dto::catalog::{CreateChannelRequest, CreateServiceRequest};
use crate::{error::ApiError, AppState};

pub async fn list_channels(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Vec<CatalogEntry>>, ApiError> {
    Ok(Json(CatalogRepository::new(state.pool.clone()).list_channels(user).await?))
}

pub async fn create_channel(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<CreateChannelRequest>,
) -> Result<(StatusCode, Json<CatalogEntry>), ApiError> {
    request.validate()?;
    let name = trimmed(&request.name)?;

    let entry = CatalogRepository::new(state.pool.clone())
        .add_channel(user, name)
        .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn list_services(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Vec<CatalogEntry>>, ApiError> {
    Ok(Json(CatalogRepository::new(state.pool.clone()).list_services(user).await?))
}

pub async fn create_service(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<CreateServiceRequest>,
) -> Result<(StatusCode, Json<CatalogEntry>), ApiError> {
    request.validate()?;
    let name = trimmed(&request.name)?;

    let entry = CatalogRepository::new(state.pool.clone())
        .add_service(user, name, request.price)
        .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

fn trimmed(name: &str) -> Result<&str, ApiError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApiError::InvalidFields(vec!["name: blank".to_string()]));
    }
    Ok(name)
}
