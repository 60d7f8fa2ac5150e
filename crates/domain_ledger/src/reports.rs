//! Aggregated views returned to the dashboard

use rust_decimal::Decimal;
use serde::Serialize;

use core_kernel::{percentage, DateRange, FinancialContext, Money, MonthKey};

use crate::account::AccountType;
use crate::transaction::TransferType;

/// Totals for one context over one period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerSummary {
    pub context: FinancialContext,
    pub period: DateRange,
    pub revenue: Money,
    pub expenses: Money,
    /// Revenue minus expenses
    pub net: Money,
    /// Net as a percentage of revenue; `None` without revenue
    pub margin: Option<Decimal>,
    /// Revenue not yet received
    pub pending_receivables: Money,
    /// Expenses not yet paid
    pub pending_payables: Money,
}

/// One metric compared across two periods
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiMetric {
    pub current: Money,
    pub previous: Money,
    /// Change relative to the previous period; `None` when the previous value is zero
    pub growth: Option<Decimal>,
}

impl KpiMetric {
    pub fn new(current: Money, previous: Money) -> Self {
        let growth = percentage(
            current.amount() - previous.amount(),
            previous.amount().abs(),
        );
        Self {
            current,
            previous,
            growth,
        }
    }
}

/// KPI cards: revenue, expenses and net, each against the preceding period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiReport {
    pub context: FinancialContext,
    pub current_period: DateRange,
    pub previous_period: Option<DateRange>,
    pub revenue: KpiMetric,
    pub expenses: KpiMetric,
    pub net: KpiMetric,
}

/// One slice of a grouped total (channel, service or category)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownEntry {
    pub label: String,
    pub amount: Money,
    pub count: usize,
    /// Share of the grouped total
    pub share: Option<Decimal>,
}

/// One bar of the cashflow chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyPoint {
    pub month: MonthKey,
    pub revenue: Money,
    pub expenses: Money,
    pub net: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountTypeTotal {
    pub account_type: AccountType,
    pub total: Money,
    pub count: usize,
}

/// Balances grouped by account type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountsOverview {
    pub context: FinancialContext,
    pub by_type: Vec<AccountTypeTotal>,
    pub total: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferTypeTotal {
    pub transfer_type: TransferType,
    pub total: Money,
}

/// Flows between the business and personal ledgers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferSummary {
    pub period: DateRange,
    pub empresa_to_pessoal: Money,
    pub pessoal_to_empresa: Money,
    /// Positive when more money left the business than came back
    pub net_to_pessoal: Money,
    pub by_type: Vec<TransferTypeTotal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_kpi_growth() {
        let metric = KpiMetric::new(Money::brl(dec!(150)), Money::brl(dec!(100)));
        assert_eq!(metric.growth, Some(dec!(50)));
    }

    #[test]
    fn test_kpi_growth_from_zero_is_undefined() {
        let metric = KpiMetric::new(Money::brl(dec!(150)), Money::brl(dec!(0)));
        assert_eq!(metric.growth, None);
    }

    #[test]
    fn test_kpi_growth_from_negative_net() {
        // -100 -> 50 is an improvement of 150% of the magnitude
        let metric = KpiMetric::new(Money::brl(dec!(50)), Money::brl(dec!(-100)));
        assert_eq!(metric.growth, Some(dec!(150)));
    }
}
