//! Request handlers, one module per bounded context

pub mod health;
pub mod accounts;
pub mod ledger;
pub mod dashboard;
pub mod investments;
pub mod crm;
pub mod planner;
pub mod catalog;
pub mod rates;
pub mod export;
