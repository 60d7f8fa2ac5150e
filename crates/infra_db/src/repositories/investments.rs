//! Investment repository

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use core_kernel::{InvestmentId, UserId};
use domain_investment::Investment;

use super::{money_column, parse_column};
use crate::error::{classify, DatabaseError};

const TABLE: &str = "investments";

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct InvestmentRow {
    pub id: Uuid,
    pub date: NaiveDate,
    pub origin: String,
    pub investment_type: String,
    pub asset: String,
    pub applied: Decimal,
    pub current_value: Decimal,
    pub currency: String,
    pub return_pct: Decimal,
    pub liquidity: String,
}

impl TryFrom<InvestmentRow> for Investment {
    type Error = DatabaseError;

    fn try_from(row: InvestmentRow) -> Result<Self, Self::Error> {
        Ok(Investment {
            id: InvestmentId::from_uuid(row.id),
            date: row.date,
            origin: parse_column(TABLE, &row.origin)?,
            investment_type: parse_column(TABLE, &row.investment_type)?,
            asset: row.asset,
            applied: money_column(TABLE, row.applied, &row.currency)?,
            current_value: money_column(TABLE, row.current_value, &row.currency)?,
            return_pct: row.return_pct,
            liquidity: parse_column(TABLE, &row.liquidity)?,
        })
    }
}

const SELECT: &str = "SELECT id, date, origin, investment_type, asset, applied, current_value, \
     currency, return_pct, liquidity FROM investments";

#[derive(Debug, Clone)]
pub struct InvestmentRepository {
    pool: PgPool,
}

impl InvestmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[instrument(skip(self, investment), fields(investment_id = %investment.id))]
    pub async fn insert(&self, user: UserId, investment: &Investment) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO investments (
                id, user_id, date, origin, investment_type, asset,
                applied, current_value, currency, return_pct, liquidity
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(Uuid::from(investment.id))
        .bind(Uuid::from(user))
        .bind(investment.date)
        .bind(investment.origin.as_str())
        .bind(investment.investment_type.as_str())
        .bind(&investment.asset)
        .bind(investment.applied.amount())
        .bind(investment.current_value.amount())
        .bind(investment.applied.currency().code())
        .bind(investment.return_pct)
        .bind(investment.liquidity.as_str())
        .execute(&self.pool)
        .await
        .map_err(classify)?;
        Ok(())
    }

    /// All investments of the user, newest first
    pub async fn list(&self, user: UserId) -> Result<Vec<Investment>, DatabaseError> {
        let sql = format!("{SELECT} WHERE user_id = $1 ORDER BY date DESC");
        sqlx::query_as::<_, InvestmentRow>(&sql)
            .bind(Uuid::from(user))
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(Investment::try_from)
            .collect()
    }

    pub async fn find(&self, user: UserId, id: InvestmentId) -> Result<Investment, DatabaseError> {
        let sql = format!("{SELECT} WHERE user_id = $1 AND id = $2");
        let row = sqlx::query_as::<_, InvestmentRow>(&sql)
            .bind(Uuid::from(user))
            .bind(Uuid::from(id))
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Investment", id))?;
        Investment::try_from(row)
    }

    /// Stores a new valuation and the return derived from it
    #[instrument(skip(self, investment), fields(investment_id = %investment.id))]
    pub async fn update_valuation(&self, user: UserId, investment: &Investment) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "UPDATE investments SET current_value = $1, return_pct = $2 WHERE id = $3 AND user_id = $4",
        )
        .bind(investment.current_value.amount())
        .bind(investment.return_pct)
        .bind(Uuid::from(investment.id))
        .bind(Uuid::from(user))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Investment", investment.id));
        }
        Ok(())
    }
}
