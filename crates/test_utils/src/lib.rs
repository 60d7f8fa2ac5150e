//! Shared helpers for the Finance Hub test suites
//!
//! Fixed dates and amounts live in `fixtures`, fluent record construction in
//! `builders`, proptest strategies in `generators` and decimal-aware asserts
//! in `assertions`. `database` starts a migrated Postgres container.

pub mod assertions;
pub mod builders;
pub mod database;
pub mod fixtures;
pub mod generators;

pub use assertions::*;
pub use builders::*;
pub use database::*;
pub use fixtures::*;
pub use generators::*;
