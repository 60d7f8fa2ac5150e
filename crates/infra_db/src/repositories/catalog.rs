//! Channel and service catalogs
//!
//! Revenues reference channels and services by name; these tables only
//! feed the pickers in the revenue form.

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use core_kernel::UserId;

use crate::error::{classify, DatabaseError};

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct CatalogEntry {
    pub id: Uuid,
    pub name: String,
    /// Reference price; services only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
}

#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_channels(&self, user: UserId) -> Result<Vec<CatalogEntry>, DatabaseError> {
        let entries = sqlx::query_as::<_, CatalogEntry>(
            "SELECT id, name, NULL::numeric AS price FROM channels WHERE user_id = $1 ORDER BY name",
        )
        .bind(Uuid::from(user))
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    /// Adds a channel; a name already in use yields `DuplicateEntry`
    #[instrument(skip(self))]
    pub async fn add_channel(&self, user: UserId, name: &str) -> Result<CatalogEntry, DatabaseError> {
        let entry = CatalogEntry {
            id: Uuid::now_v7(),
            name: name.trim().to_string(),
            price: None,
        };
        sqlx::query("INSERT INTO channels (id, user_id, name) VALUES ($1, $2, $3)")
            .bind(entry.id)
            .bind(Uuid::from(user))
            .bind(&entry.name)
            .execute(&self.pool)
            .await
            .map_err(classify)?;
        Ok(entry)
    }

    pub async fn list_services(&self, user: UserId) -> Result<Vec<CatalogEntry>, DatabaseError> {
        let entries = sqlx::query_as::<_, CatalogEntry>(
            "SELECT id, name, price FROM services WHERE user_id = $1 ORDER BY name",
        )
        .bind(Uuid::from(user))
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    #[instrument(skip(self))]
    pub async fn add_service(
        &self,
        user: UserId,
        name: &str,
        price: Option<Decimal>,
    ) -> Result<CatalogEntry, DatabaseError> {
        let entry = CatalogEntry {
            id: Uuid::now_v7(),
            name: name.trim().to_string(),
            price,
        };
        sqlx::query("INSERT INTO services (id, user_id, name, price) VALUES ($1, $2, $3, $4)")
            .bind(entry.id)
            .bind(Uuid::from(user))
            .bind(&entry.name)
            .bind(entry.price)
            .execute(&self.pool)
            .await
            .map_err(classify)?;
        Ok(entry)
    }
}
