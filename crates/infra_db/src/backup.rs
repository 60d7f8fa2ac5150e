//! JSON backup export
//!
//! Dumps every user-owned table into one document. Rows are serialized by
//! PostgreSQL itself (`json_agg`), so the export always mirrors the stored
//! columns, including ones the domain types do not model.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use core_kernel::UserId;

use crate::error::{classify, DatabaseError};

/// Format version written into every document
pub const BACKUP_VERSION: u32 = 1;

/// Tables included in a backup, in dependency order
pub const BACKUP_TABLES: [&str; 11] = [
    "accounts",
    "clients",
    "transactions",
    "investments",
    "deals",
    "goals",
    "tasks",
    "habits",
    "water_logs",
    "channels",
    "services",
];

/// A downloadable snapshot of one user's data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupDocument {
    pub version: u32,
    pub exported_at: DateTime<Utc>,
    pub user_id: Uuid,
    /// Table name to array of row objects
    pub tables: BTreeMap<String, serde_json::Value>,
}

impl BackupDocument {
    pub fn new(user: UserId, exported_at: DateTime<Utc>) -> Self {
        Self {
            version: BACKUP_VERSION,
            exported_at,
            user_id: Uuid::from(user),
            tables: BTreeMap::new(),
        }
    }

    /// Number of rows in `table`; zero when it was not exported
    pub fn row_count(&self, table: &str) -> usize {
        self.tables
            .get(table)
            .and_then(|rows| rows.as_array())
            .map_or(0, Vec::len)
    }

    pub fn total_rows(&self) -> usize {
        self.tables.keys().map(|table| self.row_count(table)).sum()
    }
}

#[derive(Debug, Clone)]
pub struct BackupService {
    pool: PgPool,
}

impl BackupService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Exports every table in [`BACKUP_TABLES`] for `user`
    #[instrument(skip(self), fields(user_id = %user))]
    pub async fn export_user(&self, user: UserId) -> Result<BackupDocument, DatabaseError> {
        let mut document = BackupDocument::new(user, Utc::now());

        for table in BACKUP_TABLES {
            let rows = self.export_table(table, user).await?;
            document.tables.insert(table.to_string(), rows);
        }

        info!(rows = document.total_rows(), "Backup exported");
        Ok(document)
    }

    async fn export_table(&self, table: &'static str, user: UserId) -> Result<serde_json::Value, DatabaseError> {
        // Table names come from BACKUP_TABLES only, never from input
        let sql = format!(
            "SELECT COALESCE(json_agg(t), '[]'::json) FROM (SELECT * FROM {table} WHERE user_id = $1 ORDER BY created_at) t"
        );
        let (rows,): (serde_json::Value,) = sqlx::query_as(&sql)
            .bind(Uuid::from(user))
            .fetch_one(&self.pool)
            .await
            .map_err(classify)?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_row_counts() {
        let mut document = BackupDocument::new(UserId::new(), Utc::now());
        document.tables.insert("goals".into(), json!([{ "title": "Viagem" }, { "title": "Carro" }]));
        document.tables.insert("tasks".into(), json!([]));

        assert_eq!(document.row_count("goals"), 2);
        assert_eq!(document.row_count("tasks"), 0);
        assert_eq!(document.row_count("habits"), 0);
        assert_eq!(document.total_rows(), 2);
    }

    #[test]
    fn test_every_table_is_user_scoped() {
        // Each listed table is created with a user_id column in the schema
        let schema = include_str!("../../../migrations/0001_initial_schema.sql");
        for table in BACKUP_TABLES {
            let create = format!("CREATE TABLE IF NOT EXISTS {} (", table);
            let start = schema.find(&create).unwrap_or_else(|| panic!("{} missing", table));
            let body = &schema[start..];
            let end = body.find(");").unwrap();
            assert!(body[..end].contains("user_id"), "{} has no user_id", table);
        }
    }

    #[test]
    fn test_document_serializes_tables_by_name() {
        let document = BackupDocument::new(UserId::new(), Utc::now());
        let value = serde_json::to_value(&document).unwrap();
        assert_eq!(value["version"], json!(1));
        assert!(value["tables"].is_object());
    }
}
