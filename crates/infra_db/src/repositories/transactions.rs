//! Transaction repository
//!
//! Revenues, expenses and transfers share the `transactions` table and are
//! told apart by the `kind` column. Columns that only apply to one kind are
//! nullable and checked when the row is converted back.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{debug, instrument};
use uuid::Uuid;

use core_kernel::{
    ClientId, Currency, DateRange, ExpenseId, RevenueId, TransferId, UserId,
};
use domain_ledger::{Expense, Ledger, PaymentStatus, Revenue, Transfer};

use super::{money_column, parse_column, required, AccountRepository};
use crate::error::{classify, DatabaseError};

const TABLE: &str = "transactions";

const COLUMNS: &str = "id, kind, date, amount, currency, origin, from_origin, to_origin, \
     transfer_type, service, channel, category, status, client_id, description, recurring, due_date";

/// Discriminator stored in `transactions.kind`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Revenue,
    Expense,
    Transfer,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Revenue => "revenue",
            TransactionKind::Expense => "expense",
            TransactionKind::Transfer => "transfer",
        }
    }
}

/// Database row for any transaction kind
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TransactionRow {
    pub id: Uuid,
    pub kind: String,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub currency: String,
    pub origin: Option<String>,
    pub from_origin: Option<String>,
    pub to_origin: Option<String>,
    pub transfer_type: Option<String>,
    pub service: Option<String>,
    pub channel: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub client_id: Option<Uuid>,
    pub description: Option<String>,
    pub recurring: bool,
    pub due_date: Option<NaiveDate>,
}

impl TryFrom<TransactionRow> for Revenue {
    type Error = DatabaseError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        Ok(Revenue {
            id: RevenueId::from_uuid(row.id),
            date: row.date,
            amount: money_column(TABLE, row.amount, &row.currency)?,
            origin: parse_column(TABLE, &required(TABLE, "origin", row.origin)?)?,
            service: row.service,
            channel: row.channel,
            category: row.category,
            status: match row.status {
                Some(status) => parse_column(TABLE, &status)?,
                None => PaymentStatus::Pago,
            },
            client_id: row.client_id.map(ClientId::from_uuid),
            description: row.description,
        })
    }
}

impl TryFrom<TransactionRow> for Expense {
    type Error = DatabaseError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        Ok(Expense {
            id: ExpenseId::from_uuid(row.id),
            date: row.date,
            amount: money_column(TABLE, row.amount, &row.currency)?,
            origin: parse_column(TABLE, &required(TABLE, "origin", row.origin)?)?,
            category: required(TABLE, "category", row.category)?,
            recurring: row.recurring,
            due_date: row.due_date,
            status: parse_column(TABLE, &required(TABLE, "status", row.status)?)?,
            description: row.description.unwrap_or_default(),
        })
    }
}

impl TryFrom<TransactionRow> for Transfer {
    type Error = DatabaseError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        Ok(Transfer {
            id: TransferId::from_uuid(row.id),
            date: row.date,
            from: parse_column(TABLE, &required(TABLE, "from_origin", row.from_origin)?)?,
            to: parse_column(TABLE, &required(TABLE, "to_origin", row.to_origin)?)?,
            amount: money_column(TABLE, row.amount, &row.currency)?,
            transfer_type: parse_column(TABLE, &required(TABLE, "transfer_type", row.transfer_type)?)?,
            description: row.description,
        })
    }
}

/// Repository for revenues, expenses and transfers
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: PgPool,
}

impl TransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[instrument(skip(self, revenue), fields(revenue_id = %revenue.id))]
    pub async fn insert_revenue(&self, user: UserId, revenue: &Revenue) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO transactions (
                id, user_id, kind, date, amount, currency, origin,
                service, channel, category, status, client_id, description
            ) VALUES ($1, $2, 'revenue', $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(Uuid::from(revenue.id))
        .bind(Uuid::from(user))
        .bind(revenue.date)
        .bind(revenue.amount.amount())
        .bind(revenue.amount.currency().code())
        .bind(revenue.origin.as_str())
        .bind(&revenue.service)
        .bind(&revenue.channel)
        .bind(&revenue.category)
        .bind(revenue.status.as_str())
        .bind(revenue.client_id.map(Uuid::from))
        .bind(&revenue.description)
        .execute(&self.pool)
        .await
        .map_err(classify)?;

        debug!("Revenue stored");
        Ok(())
    }

    #[instrument(skip(self, expense), fields(expense_id = %expense.id))]
    pub async fn insert_expense(&self, user: UserId, expense: &Expense) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO transactions (
                id, user_id, kind, date, amount, currency, origin,
                category, status, description, recurring, due_date
            ) VALUES ($1, $2, 'expense', $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(Uuid::from(expense.id))
        .bind(Uuid::from(user))
        .bind(expense.date)
        .bind(expense.amount.amount())
        .bind(expense.amount.currency().code())
        .bind(expense.origin.as_str())
        .bind(&expense.category)
        .bind(expense.status.as_str())
        .bind(&expense.description)
        .bind(expense.recurring)
        .bind(expense.due_date)
        .execute(&self.pool)
        .await
        .map_err(classify)?;

        debug!("Expense stored");
        Ok(())
    }

    #[instrument(skip(self, transfer), fields(transfer_id = %transfer.id))]
    pub async fn insert_transfer(&self, user: UserId, transfer: &Transfer) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO transactions (
                id, user_id, kind, date, amount, currency,
                from_origin, to_origin, transfer_type, description
            ) VALUES ($1, $2, 'transfer', $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(Uuid::from(transfer.id))
        .bind(Uuid::from(user))
        .bind(transfer.date)
        .bind(transfer.amount.amount())
        .bind(transfer.amount.currency().code())
        .bind(transfer.from.as_str())
        .bind(transfer.to.as_str())
        .bind(transfer.transfer_type.as_str())
        .bind(&transfer.description)
        .execute(&self.pool)
        .await
        .map_err(classify)?;

        debug!("Transfer stored");
        Ok(())
    }

    /// Rows of one kind, newest first, optionally limited to a date range
    pub async fn list_rows(
        &self,
        user: UserId,
        kind: TransactionKind,
        range: Option<DateRange>,
    ) -> Result<Vec<TransactionRow>, DatabaseError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM transactions \
             WHERE user_id = $1 AND kind = $2 \
               AND ($3::date IS NULL OR date >= $3) \
               AND ($4::date IS NULL OR date <= $4) \
             ORDER BY date DESC, created_at DESC"
        );
        let rows = sqlx::query_as::<_, TransactionRow>(&sql)
            .bind(Uuid::from(user))
            .bind(kind.as_str())
            .bind(range.map(|r| r.start))
            .bind(range.map(|r| r.end))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn list_revenues(
        &self,
        user: UserId,
        range: Option<DateRange>,
    ) -> Result<Vec<Revenue>, DatabaseError> {
        self.list_rows(user, TransactionKind::Revenue, range)
            .await?
            .into_iter()
            .map(Revenue::try_from)
            .collect()
    }

    pub async fn list_expenses(
        &self,
        user: UserId,
        range: Option<DateRange>,
    ) -> Result<Vec<Expense>, DatabaseError> {
        self.list_rows(user, TransactionKind::Expense, range)
            .await?
            .into_iter()
            .map(Expense::try_from)
            .collect()
    }

    pub async fn list_transfers(
        &self,
        user: UserId,
        range: Option<DateRange>,
    ) -> Result<Vec<Transfer>, DatabaseError> {
        self.list_rows(user, TransactionKind::Transfer, range)
            .await?
            .into_iter()
            .map(Transfer::try_from)
            .collect()
    }

    /// Revenues attributed to one client, across all dates
    pub async fn list_client_revenues(
        &self,
        user: UserId,
        client: ClientId,
    ) -> Result<Vec<Revenue>, DatabaseError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM transactions \
             WHERE user_id = $1 AND kind = 'revenue' AND client_id = $2 \
             ORDER BY date DESC"
        );
        sqlx::query_as::<_, TransactionRow>(&sql)
            .bind(Uuid::from(user))
            .bind(Uuid::from(client))
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(Revenue::try_from)
            .collect()
    }

    /// Sets a revenue or expense to `pago`
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no row of that kind and id
    /// belongs to the user
    #[instrument(skip(self))]
    pub async fn mark_paid(
        &self,
        user: UserId,
        kind: TransactionKind,
        id: Uuid,
    ) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "UPDATE transactions SET status = 'pago' WHERE id = $1 AND user_id = $2 AND kind = $3",
        )
        .bind(id)
        .bind(Uuid::from(user))
        .bind(kind.as_str())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found(kind.as_str(), id));
        }
        Ok(())
    }

    /// Loads every record of the user into an in-memory ledger
    #[instrument(skip(self))]
    pub async fn load_ledger(&self, user: UserId, currency: Currency) -> Result<Ledger, DatabaseError> {
        let accounts = AccountRepository::new(self.pool.clone()).list(user).await?;
        let revenues = self.list_revenues(user, None).await?;
        let expenses = self.list_expenses(user, None).await?;
        let transfers = self.list_transfers(user, None).await?;

        debug!(
            accounts = accounts.len(),
            revenues = revenues.len(),
            expenses = expenses.len(),
            transfers = transfers.len(),
            "Ledger loaded"
        );

        Ledger::from_records(currency, accounts, revenues, expenses, transfers)
            .map_err(|e| DatabaseError::invalid_row(TABLE, e))
    }
}
