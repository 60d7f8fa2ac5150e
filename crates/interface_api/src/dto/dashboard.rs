//! Dashboard widget DTOs

use serde::{Deserialize, Serialize};

use core_kernel::{FinancialContext, MonthKey};
use domain_ledger::{AccountsOverview, BreakdownEntry, LedgerSummary, TransferSummary};

/// Months shown by the cash flow chart when none are requested
pub const DEFAULT_CASHFLOW_MONTHS: usize = 6;
const MAX_CASHFLOW_MONTHS: usize = 36;

#[derive(Debug, Default, Deserialize)]
pub struct CashflowQuery {
    pub context: Option<FinancialContext>,
    /// Last month of the series, `YYYY-MM`
    pub end: Option<MonthKey>,
    pub months: Option<usize>,
}

impl CashflowQuery {
    pub fn months(&self) -> usize {
        self.months
            .unwrap_or(DEFAULT_CASHFLOW_MONTHS)
            .clamp(1, MAX_CASHFLOW_MONTHS)
    }
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    #[serde(flatten)]
    pub summary: LedgerSummary,
    pub accounts: AccountsOverview,
    pub transfers: TransferSummary,
}

#[derive(Debug, Serialize)]
pub struct ChannelsResponse {
    pub channels: Vec<BreakdownEntry>,
    pub services: Vec<BreakdownEntry>,
}
