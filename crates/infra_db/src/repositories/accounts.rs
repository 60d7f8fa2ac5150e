//! Account repository

use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use core_kernel::{AccountId, Money, UserId};
use domain_ledger::FinancialAccount;

use super::{money_column, parse_column};
use crate::error::{classify, DatabaseError};

const TABLE: &str = "accounts";

/// Database row for an account
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AccountRow {
    pub id: Uuid,
    pub name: String,
    pub account_type: String,
    pub origin: String,
    pub balance: Decimal,
    pub currency: String,
    pub bank_name: Option<String>,
}

impl TryFrom<AccountRow> for FinancialAccount {
    type Error = DatabaseError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        Ok(FinancialAccount {
            id: AccountId::from_uuid(row.id),
            name: row.name,
            account_type: parse_column(TABLE, &row.account_type)?,
            origin: parse_column(TABLE, &row.origin)?,
            balance: money_column(TABLE, row.balance, &row.currency)?,
            bank_name: row.bank_name,
        })
    }
}

#[derive(Debug, Clone)]
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[instrument(skip(self, account), fields(account_id = %account.id))]
    pub async fn insert(&self, user: UserId, account: &FinancialAccount) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO accounts (id, user_id, name, account_type, origin, balance, currency, bank_name)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(Uuid::from(account.id))
        .bind(Uuid::from(user))
        .bind(&account.name)
        .bind(account.account_type.as_str())
        .bind(account.origin.as_str())
        .bind(account.balance.amount())
        .bind(account.balance.currency().code())
        .bind(&account.bank_name)
        .execute(&self.pool)
        .await
        .map_err(classify)?;
        Ok(())
    }

    /// All accounts of the user, ordered by name
    pub async fn list(&self, user: UserId) -> Result<Vec<FinancialAccount>, DatabaseError> {
        sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, name, account_type, origin, balance, currency, bank_name
            FROM accounts
            WHERE user_id = $1
            ORDER BY name
            "#,
        )
        .bind(Uuid::from(user))
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(FinancialAccount::try_from)
        .collect()
    }

    /// Replaces the balance with a new reading
    #[instrument(skip(self))]
    pub async fn update_balance(
        &self,
        user: UserId,
        id: AccountId,
        balance: Money,
    ) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "UPDATE accounts SET balance = $1, currency = $2 WHERE id = $3 AND user_id = $4",
        )
        .bind(balance.amount())
        .bind(balance.currency().code())
        .bind(Uuid::from(id))
        .bind(Uuid::from(user))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Account", id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, user: UserId, id: AccountId) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1 AND user_id = $2")
            .bind(Uuid::from(id))
            .bind(Uuid::from(user))
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Account", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_ledger::AccountType;
    use rust_decimal_macros::dec;

    #[test]
    fn test_account_from_row() {
        let row = AccountRow {
            id: Uuid::now_v7(),
            name: "Conta PJ".to_string(),
            account_type: "banco".to_string(),
            origin: "empresa".to_string(),
            balance: dec!(-120.50),
            currency: "BRL".to_string(),
            bank_name: Some("Inter".to_string()),
        };

        let account = FinancialAccount::try_from(row).unwrap();
        assert_eq!(account.account_type, AccountType::Banco);
        assert_eq!(account.balance, Money::brl(dec!(-120.50)));
    }

    #[test]
    fn test_unknown_account_type() {
        let row = AccountRow {
            id: Uuid::now_v7(),
            name: "Cofre".to_string(),
            account_type: "poupanca".to_string(),
            origin: "pessoal".to_string(),
            balance: dec!(0),
            currency: "BRL".to_string(),
            bank_name: None,
        };
        assert!(FinancialAccount::try_from(row).is_err());
    }
}
