//! Database error types

use thiserror::Error;

/// Errors raised by the repositories
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Entity not found: {0}")]
    NotFound(String),

    /// Unique constraint violation (23505)
    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    /// Foreign key violation (23503), e.g. a revenue naming a deleted client
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Check constraint violation (23514)
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// A stored row no longer converts into its domain type
    #[error("Invalid row in {table}: {message}")]
    InvalidRow { table: &'static str, message: String },

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Connection pool exhausted")]
    PoolExhausted,

    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),
}

impl DatabaseError {
    /// ```rust
    /// use infra_db::DatabaseError;
    ///
    /// let error = DatabaseError::not_found("Deal", "DEAL-123");
    /// assert!(error.is_not_found());
    /// ```
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        DatabaseError::NotFound(format!("{} with id '{}' not found", entity, id))
    }

    pub fn invalid_row(table: &'static str, error: impl std::fmt::Display) -> Self {
        DatabaseError::InvalidRow {
            table,
            message: error.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DatabaseError::NotFound(_) | DatabaseError::SqlError(sqlx::Error::RowNotFound)
        )
    }

    /// The database could not be reached or had no free connection
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            DatabaseError::ConnectionFailed(_)
                | DatabaseError::PoolExhausted
                | DatabaseError::SqlError(sqlx::Error::PoolTimedOut)
                | DatabaseError::SqlError(sqlx::Error::Io(_))
        )
    }
}

/// Maps SQLx errors onto specific variants by PostgreSQL error code
///
/// Repositories call this on writes so constraint failures reach the API as
/// conflicts or validation errors rather than generic SQL errors.
impl From<&sqlx::Error> for DatabaseError {
    fn from(error: &sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => {
                DatabaseError::NotFound("Record not found".to_string())
            }
            sqlx::Error::PoolTimedOut => DatabaseError::PoolExhausted,
            sqlx::Error::Database(db_err) => {
                // https://www.postgresql.org/docs/current/errcodes-appendix.html
                match db_err.code().as_deref() {
                    Some("23505") => DatabaseError::DuplicateEntry(db_err.message().to_string()),
                    Some("23503") => {
                        DatabaseError::ForeignKeyViolation(db_err.message().to_string())
                    }
                    Some("23514") => {
                        DatabaseError::ConstraintViolation(db_err.message().to_string())
                    }
                    _ => DatabaseError::QueryFailed(db_err.message().to_string()),
                }
            }
            _ => DatabaseError::QueryFailed(error.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DatabaseError {
    fn from(error: sqlx::migrate::MigrateError) -> Self {
        DatabaseError::MigrationFailed(error.to_string())
    }
}

/// Classifies a write error by PostgreSQL error code
pub(crate) fn classify(error: sqlx::Error) -> DatabaseError {
    DatabaseError::from(&error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_is_not_found() {
        assert!(DatabaseError::SqlError(sqlx::Error::RowNotFound).is_not_found());
        assert!(classify(sqlx::Error::RowNotFound).is_not_found());
    }

    #[test]
    fn test_pool_timeout_is_unavailable() {
        assert!(classify(sqlx::Error::PoolTimedOut).is_unavailable());
        assert!(DatabaseError::SqlError(sqlx::Error::PoolTimedOut).is_unavailable());
        assert!(!DatabaseError::not_found("Goal", "GOAL-1").is_unavailable());
    }

    #[test]
    fn test_invalid_row_message() {
        let error = DatabaseError::invalid_row("deals", "unknown deal stage: ganho");
        assert_eq!(error.to_string(), "Invalid row in deals: unknown deal stage: ganho");
    }
}
