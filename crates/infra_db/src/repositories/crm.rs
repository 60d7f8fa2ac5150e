//! Client and deal repositories

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use core_kernel::{ClientId, DealId, UserId};
use domain_crm::{Client, Deal, DealStage, InternalData};

use super::{money_column, parse_column};
use crate::error::{classify, DatabaseError};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClientRow {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: String,
    pub tags: Vec<String>,
    pub ltv: Decimal,
    pub currency: String,
    pub created_on: NaiveDate,
    pub last_purchase_date: Option<NaiveDate>,
    pub internal_data: Json<InternalData>,
}

impl TryFrom<ClientRow> for Client {
    type Error = DatabaseError;

    fn try_from(row: ClientRow) -> Result<Self, Self::Error> {
        Ok(Client {
            id: ClientId::from_uuid(row.id),
            name: row.name,
            email: row.email,
            phone: row.phone,
            status: parse_column("clients", &row.status)?,
            tags: row.tags,
            ltv: money_column("clients", row.ltv, &row.currency)?,
            created_at: row.created_on,
            last_purchase_date: row.last_purchase_date,
            internal: row.internal_data.0,
        })
    }
}

const CLIENT_SELECT: &str = "SELECT id, name, email, phone, status, tags, ltv, currency, \
     created_on, last_purchase_date, internal_data FROM clients";

#[derive(Debug, Clone)]
pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[instrument(skip(self, client), fields(client_id = %client.id))]
    pub async fn insert(&self, user: UserId, client: &Client) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO clients (
                id, user_id, name, email, phone, status, tags, ltv, currency,
                created_on, last_purchase_date, internal_data
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(Uuid::from(client.id))
        .bind(Uuid::from(user))
        .bind(&client.name)
        .bind(&client.email)
        .bind(&client.phone)
        .bind(client.status.as_str())
        .bind(&client.tags)
        .bind(client.ltv.amount())
        .bind(client.ltv.currency().code())
        .bind(client.created_at)
        .bind(client.last_purchase_date)
        .bind(Json(&client.internal))
        .execute(&self.pool)
        .await
        .map_err(classify)?;
        Ok(())
    }

    pub async fn list(&self, user: UserId) -> Result<Vec<Client>, DatabaseError> {
        let sql = format!("{CLIENT_SELECT} WHERE user_id = $1 ORDER BY name");
        sqlx::query_as::<_, ClientRow>(&sql)
            .bind(Uuid::from(user))
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(Client::try_from)
            .collect()
    }

    pub async fn find(&self, user: UserId, id: ClientId) -> Result<Client, DatabaseError> {
        let sql = format!("{CLIENT_SELECT} WHERE user_id = $1 AND id = $2");
        let row = sqlx::query_as::<_, ClientRow>(&sql)
            .bind(Uuid::from(user))
            .bind(Uuid::from(id))
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Client", id))?;
        Client::try_from(row)
    }

    /// Overwrites every mutable column of the client
    #[instrument(skip(self, client), fields(client_id = %client.id))]
    pub async fn update(&self, user: UserId, client: &Client) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE clients SET
                name = $1, email = $2, phone = $3, status = $4, tags = $5,
                ltv = $6, currency = $7, last_purchase_date = $8, internal_data = $9
            WHERE id = $10 AND user_id = $11
            "#,
        )
        .bind(&client.name)
        .bind(&client.email)
        .bind(&client.phone)
        .bind(client.status.as_str())
        .bind(&client.tags)
        .bind(client.ltv.amount())
        .bind(client.ltv.currency().code())
        .bind(client.last_purchase_date)
        .bind(Json(&client.internal))
        .bind(Uuid::from(client.id))
        .bind(Uuid::from(user))
        .execute(&self.pool)
        .await
        .map_err(classify)?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Client", client.id));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DealRow {
    pub id: Uuid,
    pub title: String,
    pub value: Decimal,
    pub currency: String,
    pub stage: String,
    pub probability: i16,
    pub priority: String,
    pub client_id: Option<Uuid>,
    pub expected_close: Option<NaiveDate>,
}

impl TryFrom<DealRow> for Deal {
    type Error = DatabaseError;

    fn try_from(row: DealRow) -> Result<Self, Self::Error> {
        let stage: DealStage = parse_column("deals", &row.stage)?;
        let probability = u8::try_from(row.probability)
            .map_err(|e| DatabaseError::invalid_row("deals", e))?;

        Ok(Deal {
            id: DealId::from_uuid(row.id),
            title: row.title,
            value: money_column("deals", row.value, &row.currency)?,
            stage,
            probability,
            priority: parse_column("deals", &row.priority)?,
            client_id: row.client_id.map(ClientId::from_uuid),
            expected_close: row.expected_close,
        })
    }
}

const DEAL_SELECT: &str = "SELECT id, title, value, currency, stage, probability, priority, \
     client_id, expected_close FROM deals";

#[derive(Debug, Clone)]
pub struct DealRepository {
    pool: PgPool,
}

impl DealRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[instrument(skip(self, deal), fields(deal_id = %deal.id, stage = %deal.stage))]
    pub async fn insert(&self, user: UserId, deal: &Deal) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO deals (
                id, user_id, title, value, currency, stage, probability,
                priority, client_id, expected_close
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(Uuid::from(deal.id))
        .bind(Uuid::from(user))
        .bind(&deal.title)
        .bind(deal.value.amount())
        .bind(deal.value.currency().code())
        .bind(deal.stage.as_str())
        .bind(i16::from(deal.probability))
        .bind(deal.priority.as_str())
        .bind(deal.client_id.map(Uuid::from))
        .bind(deal.expected_close)
        .execute(&self.pool)
        .await
        .map_err(classify)?;
        Ok(())
    }

    pub async fn list(&self, user: UserId) -> Result<Vec<Deal>, DatabaseError> {
        let sql = format!("{DEAL_SELECT} WHERE user_id = $1 ORDER BY created_at");
        sqlx::query_as::<_, DealRow>(&sql)
            .bind(Uuid::from(user))
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(Deal::try_from)
            .collect()
    }

    pub async fn find(&self, user: UserId, id: DealId) -> Result<Deal, DatabaseError> {
        let sql = format!("{DEAL_SELECT} WHERE user_id = $1 AND id = $2");
        let row = sqlx::query_as::<_, DealRow>(&sql)
            .bind(Uuid::from(user))
            .bind(Uuid::from(id))
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Deal", id))?;
        Deal::try_from(row)
    }

    /// Persists a stage move together with its probability
    #[instrument(skip(self, deal), fields(deal_id = %deal.id, stage = %deal.stage))]
    pub async fn update_stage(&self, user: UserId, deal: &Deal) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "UPDATE deals SET stage = $1, probability = $2 WHERE id = $3 AND user_id = $4",
        )
        .bind(deal.stage.as_str())
        .bind(i16::from(deal.probability))
        .bind(Uuid::from(deal.id))
        .bind(Uuid::from(user))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Deal", deal.id));
        }
        Ok(())
    }
}
