//! Infrastructure Database Layer
//!
//! PostgreSQL persistence for the finance hub using SQLx. Every table is
//! scoped by `user_id`; repositories take the owning [`UserId`] on every
//! call and never read rows across users.
//!
//! # Architecture
//!
//! Repositories map between database rows and domain types. Rows are read
//! into `FromRow` structs and converted with `TryFrom`, so a stored value the
//! domain no longer accepts surfaces as [`DatabaseError::InvalidRow`] instead
//! of a panic.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, DatabaseConfig};
//! use infra_db::repositories::TransactionRepository;
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/finance_hub")).await?;
//! let ledger = TransactionRepository::new(pool).load_ledger(user_id, Currency::BRL).await?;
//! ```
//!
//! [`UserId`]: core_kernel::UserId

pub mod pool;
pub mod error;
pub mod repositories;
pub mod backup;

pub use pool::{create_pool, run_migrations, DatabaseConfig};
pub use error::DatabaseError;
pub use backup::{BackupDocument, BackupService, BACKUP_TABLES};
