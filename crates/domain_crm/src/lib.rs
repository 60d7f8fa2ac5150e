//! CRM Domain
//!
//! This crate manages clients, the sales pipeline, and the heuristic that
//! classifies a client's relationship from its purchase history.
//!
//! # Pipeline
//!
//! Deals move through a fixed kanban:
//!
//! ```text
//! lead -> qualificacao -> proposta -> negociacao -> fechado_ganho
//!                                               \-> fechado_perdido
//! ```
//!
//! Open deals may jump to any stage. Closed deals stay closed until they are
//! explicitly reopened.
//!
//! # Client analysis
//!
//! [`analyze_client`] is a pure function over the client record, the
//! revenues attributed to it, and the current date. Nothing it derives is
//! stored.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use domain_crm::{analyze_client, Client, Relationship};
//!
//! let created = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
//! let client = Client::new("Padaria Central", created).unwrap();
//!
//! let analysis = analyze_client(&client, &[], today);
//! assert_eq!(analysis.relationship, Relationship::Pontual);
//! ```

pub mod client;
pub mod deal;
pub mod pipeline;
pub mod analysis;
pub mod error;

pub use client::{ChecklistItem, Client, ClientStatus, Contract, InternalData, Project};
pub use deal::{Deal, DealStage, Priority};
pub use pipeline::{PipelineSummary, StageTotal};
pub use analysis::{
    analyze_client, ClientAnalysis, HealthScore, Insight, RecurrencePotential, Relationship,
    AT_RISK_DAYS, CRITICAL_DAYS, HIGH_TICKET, INACTIVE_DAYS, RECURRENT_MIN_AGE_MONTHS,
    RECURRENT_MIN_PROJECTS,
};
pub use error::CrmError;
