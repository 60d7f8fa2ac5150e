//! In-memory ledger holding both origins' records
//!
//! The ledger validates records on entry and answers every aggregation the
//! dashboard needs. All amounts it holds share the ledger currency, so sums
//! inside this module never mix currencies.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::debug;

use core_kernel::{
    percentage, AccountId, Currency, DateRange, ExpenseId, FinancialContext, Money, MonthKey,
    Origin, RevenueId, TransferId,
};

use crate::account::{AccountType, FinancialAccount};
use crate::error::LedgerError;
use crate::reports::{
    AccountTypeTotal, AccountsOverview, BreakdownEntry, KpiMetric, KpiReport, LedgerSummary,
    MonthlyPoint, TransferSummary, TransferTypeTotal,
};
use crate::transaction::{Expense, PaymentStatus, Revenue, Transfer, TransferType};
use crate::UNCATEGORIZED_LABEL;

/// Revenues, expenses, transfers and accounts for one user
///
/// # Invariants
///
/// - Every amount and balance is in the ledger currency
/// - Revenue and expense amounts are strictly positive
/// - Transfers always move money between different origins
#[derive(Debug, Clone)]
pub struct Ledger {
    currency: Currency,
    accounts: Vec<FinancialAccount>,
    revenues: Vec<Revenue>,
    expenses: Vec<Expense>,
    transfers: Vec<Transfer>,
}

impl Ledger {
    /// Creates an empty ledger in the given currency
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            accounts: Vec::new(),
            revenues: Vec::new(),
            expenses: Vec::new(),
            transfers: Vec::new(),
        }
    }

    /// Builds a ledger from previously stored records, validating each one
    pub fn from_records(
        currency: Currency,
        accounts: Vec<FinancialAccount>,
        revenues: Vec<Revenue>,
        expenses: Vec<Expense>,
        transfers: Vec<Transfer>,
    ) -> Result<Self, LedgerError> {
        let mut ledger = Self::new(currency);
        for account in accounts {
            ledger.add_account(account)?;
        }
        for revenue in revenues {
            ledger.record_revenue(revenue)?;
        }
        for expense in expenses {
            ledger.record_expense(expense)?;
        }
        for transfer in transfers {
            ledger.record_transfer(transfer)?;
        }
        Ok(ledger)
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn accounts(&self) -> &[FinancialAccount] {
        &self.accounts
    }

    pub fn revenues(&self) -> &[Revenue] {
        &self.revenues
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn transfers(&self) -> &[Transfer] {
        &self.transfers
    }

    fn check_currency(&self, money: &Money) -> Result<(), LedgerError> {
        if money.currency() != self.currency {
            return Err(LedgerError::CurrencyMismatch {
                ledger: self.currency.to_string(),
                record: money.currency().to_string(),
            });
        }
        Ok(())
    }

    fn total<'a>(&self, amounts: impl Iterator<Item = &'a Money>) -> Money {
        let sum: Decimal = amounts.map(|m| m.amount()).sum();
        Money::new(sum, self.currency)
    }

    // ------------------------------------------------------------------
    // Recording
    // ------------------------------------------------------------------

    /// Adds an account
    ///
    /// # Errors
    ///
    /// Returns error if the id is already present or the balance currency
    /// differs from the ledger's
    pub fn add_account(&mut self, account: FinancialAccount) -> Result<AccountId, LedgerError> {
        self.check_currency(&account.balance)?;
        if self.accounts.iter().any(|a| a.id == account.id) {
            return Err(LedgerError::AccountAlreadyExists(account.id.to_string()));
        }
        let id = account.id;
        self.accounts.push(account);
        Ok(id)
    }

    /// Removes an account, returning it
    pub fn remove_account(&mut self, id: &AccountId) -> Result<FinancialAccount, LedgerError> {
        let index = self
            .accounts
            .iter()
            .position(|a| &a.id == id)
            .ok_or_else(|| LedgerError::not_found("Account", id))?;
        Ok(self.accounts.remove(index))
    }

    pub fn record_revenue(&mut self, revenue: Revenue) -> Result<RevenueId, LedgerError> {
        self.check_currency(&revenue.amount)?;
        let id = revenue.id;
        debug!(revenue_id = %id, amount = %revenue.amount, origin = %revenue.origin, "Recording revenue");
        self.revenues.push(revenue);
        Ok(id)
    }

    pub fn record_expense(&mut self, expense: Expense) -> Result<ExpenseId, LedgerError> {
        self.check_currency(&expense.amount)?;
        let id = expense.id;
        debug!(expense_id = %id, amount = %expense.amount, origin = %expense.origin, "Recording expense");
        self.expenses.push(expense);
        Ok(id)
    }

    pub fn record_transfer(&mut self, transfer: Transfer) -> Result<TransferId, LedgerError> {
        self.check_currency(&transfer.amount)?;
        let id = transfer.id;
        debug!(transfer_id = %id, from = %transfer.from, to = %transfer.to, "Recording transfer");
        self.transfers.push(transfer);
        Ok(id)
    }

    /// Marks a revenue as received
    pub fn mark_revenue_paid(&mut self, id: &RevenueId) -> Result<&Revenue, LedgerError> {
        let revenue = self
            .revenues
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| LedgerError::not_found("Revenue", id))?;
        revenue.status = PaymentStatus::Pago;
        Ok(revenue)
    }

    /// Marks an expense as paid
    pub fn mark_expense_paid(&mut self, id: &ExpenseId) -> Result<&Expense, LedgerError> {
        let expense = self
            .expenses
            .iter_mut()
            .find(|e| &e.id == id)
            .ok_or_else(|| LedgerError::not_found("Expense", id))?;
        expense.status = PaymentStatus::Pago;
        Ok(expense)
    }

    // ------------------------------------------------------------------
    // Filtering
    // ------------------------------------------------------------------

    /// Revenues visible in `context` dated within `range`
    pub fn revenues_in(
        &self,
        context: FinancialContext,
        range: DateRange,
    ) -> impl Iterator<Item = &Revenue> {
        self.revenues
            .iter()
            .filter(move |r| context.includes(r.origin) && range.contains(r.date))
    }

    /// Expenses visible in `context` dated within `range`
    pub fn expenses_in(
        &self,
        context: FinancialContext,
        range: DateRange,
    ) -> impl Iterator<Item = &Expense> {
        self.expenses
            .iter()
            .filter(move |e| context.includes(e.origin) && range.contains(e.date))
    }

    // ------------------------------------------------------------------
    // Aggregations
    // ------------------------------------------------------------------

    /// Revenue, expenses, net result and pending amounts
    pub fn summary(&self, context: FinancialContext, range: DateRange) -> LedgerSummary {
        let revenue = self.total(self.revenues_in(context, range).map(|r| &r.amount));
        let expenses = self.total(self.expenses_in(context, range).map(|e| &e.amount));
        let pending_receivables = self.total(
            self.revenues_in(context, range)
                .filter(|r| !r.is_paid())
                .map(|r| &r.amount),
        );
        let pending_payables = self.total(
            self.expenses_in(context, range)
                .filter(|e| !e.is_paid())
                .map(|e| &e.amount),
        );
        let net = Money::new(revenue.amount() - expenses.amount(), self.currency);

        LedgerSummary {
            context,
            period: range,
            revenue,
            expenses,
            net,
            margin: percentage(net.amount(), revenue.amount()),
            pending_receivables,
            pending_payables,
        }
    }

    /// KPI cards for `current` compared with the period of equal length before it
    pub fn kpis(&self, context: FinancialContext, current: DateRange) -> KpiReport {
        let now = self.summary(context, current);
        let previous_period = current.previous();
        let zero = Money::zero(self.currency);
        let (prev_revenue, prev_expenses, prev_net) = match previous_period {
            Some(range) => {
                let before = self.summary(context, range);
                (before.revenue, before.expenses, before.net)
            }
            None => (zero, zero, zero),
        };

        KpiReport {
            context,
            current_period: current,
            previous_period,
            revenue: KpiMetric::new(now.revenue, prev_revenue),
            expenses: KpiMetric::new(now.expenses, prev_expenses),
            net: KpiMetric::new(now.net, prev_net),
        }
    }

    fn breakdown<'a>(&self, items: impl Iterator<Item = (Option<&'a str>, &'a Money)>) -> Vec<BreakdownEntry> {
        let mut groups: BTreeMap<String, (Decimal, usize)> = BTreeMap::new();
        for (label, amount) in items {
            let label = label
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .unwrap_or(UNCATEGORIZED_LABEL);
            let entry = groups.entry(label.to_string()).or_insert((Decimal::ZERO, 0));
            entry.0 += amount.amount();
            entry.1 += 1;
        }

        let grand_total: Decimal = groups.values().map(|(sum, _)| *sum).sum();
        let mut entries: Vec<BreakdownEntry> = groups
            .into_iter()
            .map(|(label, (sum, count))| BreakdownEntry {
                label,
                amount: Money::new(sum, self.currency),
                count,
                share: percentage(sum, grand_total),
            })
            .collect();
        // BTreeMap already ordered labels; a stable sort keeps that for ties
        entries.sort_by(|a, b| b.amount.amount().cmp(&a.amount.amount()));
        entries
    }

    /// Revenue grouped by acquisition channel
    pub fn revenue_by_channel(&self, context: FinancialContext, range: DateRange) -> Vec<BreakdownEntry> {
        self.breakdown(
            self.revenues_in(context, range)
                .map(|r| (r.channel.as_deref(), &r.amount)),
        )
    }

    /// Revenue grouped by service sold
    pub fn revenue_by_service(&self, context: FinancialContext, range: DateRange) -> Vec<BreakdownEntry> {
        self.breakdown(
            self.revenues_in(context, range)
                .map(|r| (r.service.as_deref(), &r.amount)),
        )
    }

    /// Expenses grouped by category
    pub fn expenses_by_category(&self, context: FinancialContext, range: DateRange) -> Vec<BreakdownEntry> {
        self.breakdown(
            self.expenses_in(context, range)
                .map(|e| (Some(e.category.as_str()), &e.amount)),
        )
    }

    /// Revenue, expenses and net for the `months` months ending at `end`, oldest first
    ///
    /// Months without records are included with zero totals so the chart
    /// keeps a continuous axis.
    pub fn monthly_series(
        &self,
        context: FinancialContext,
        end: MonthKey,
        months: usize,
    ) -> Vec<MonthlyPoint> {
        end.trailing(months)
            .into_iter()
            .map(|month| {
                let summary = self.summary(context, DateRange::month(month));
                MonthlyPoint {
                    month,
                    revenue: summary.revenue,
                    expenses: summary.expenses,
                    net: summary.net,
                }
            })
            .collect()
    }

    /// Account balances grouped by type
    pub fn accounts_overview(&self, context: FinancialContext) -> AccountsOverview {
        let mut groups: BTreeMap<AccountType, (Decimal, usize)> = BTreeMap::new();
        for account in self.accounts.iter().filter(|a| context.includes(a.origin)) {
            let entry = groups.entry(account.account_type).or_insert((Decimal::ZERO, 0));
            entry.0 += account.balance.amount();
            entry.1 += 1;
        }

        let total: Decimal = groups.values().map(|(sum, _)| *sum).sum();
        AccountsOverview {
            context,
            by_type: groups
                .into_iter()
                .map(|(account_type, (sum, count))| AccountTypeTotal {
                    account_type,
                    total: Money::new(sum, self.currency),
                    count,
                })
                .collect(),
            total: Money::new(total, self.currency),
        }
    }

    /// Flows between the two ledgers within `range`
    pub fn transfer_summary(&self, range: DateRange) -> TransferSummary {
        let in_range: Vec<&Transfer> = self
            .transfers
            .iter()
            .filter(|t| range.contains(t.date))
            .collect();

        let empresa_to_pessoal = self.total(
            in_range
                .iter()
                .filter(|t| t.from == Origin::Empresa)
                .map(|t| &t.amount),
        );
        let pessoal_to_empresa = self.total(
            in_range
                .iter()
                .filter(|t| t.from == Origin::Pessoal)
                .map(|t| &t.amount),
        );

        let mut by_type: BTreeMap<TransferType, Decimal> = BTreeMap::new();
        for transfer in &in_range {
            *by_type.entry(transfer.transfer_type).or_insert(Decimal::ZERO) += transfer.amount.amount();
        }

        TransferSummary {
            period: range,
            empresa_to_pessoal,
            pessoal_to_empresa,
            net_to_pessoal: Money::new(
                empresa_to_pessoal.amount() - pessoal_to_empresa.amount(),
                self.currency,
            ),
            by_type: by_type
                .into_iter()
                .map(|(transfer_type, sum)| TransferTypeTotal {
                    transfer_type,
                    total: Money::new(sum, self.currency),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, day).unwrap()
    }

    #[test]
    fn test_rejects_foreign_currency() {
        let mut ledger = Ledger::new(Currency::BRL);
        let revenue = Revenue::new(d(1, 1), Money::new(dec!(10), Currency::USD), Origin::Empresa).unwrap();
        assert!(matches!(
            ledger.record_revenue(revenue),
            Err(LedgerError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_summary_filters_by_context() {
        let mut ledger = Ledger::new(Currency::BRL);
        ledger
            .record_revenue(Revenue::new(d(1, 5), Money::brl(dec!(1000)), Origin::Empresa).unwrap())
            .unwrap();
        ledger
            .record_revenue(Revenue::new(d(1, 6), Money::brl(dec!(300)), Origin::Pessoal).unwrap())
            .unwrap();
        ledger
            .record_expense(
                Expense::new(d(1, 7), Money::brl(dec!(250)), Origin::Empresa, "Software", "SaaS").unwrap(),
            )
            .unwrap();

        let empresa = ledger.summary(FinancialContext::Empresa, DateRange::all_time());
        assert_eq!(empresa.revenue.amount(), dec!(1000));
        assert_eq!(empresa.net.amount(), dec!(750));
        assert_eq!(empresa.margin, Some(dec!(75)));
        assert_eq!(empresa.pending_payables.amount(), dec!(250));

        let all = ledger.summary(FinancialContext::Consolidado, DateRange::all_time());
        assert_eq!(all.revenue.amount(), dec!(1300));
    }

    #[test]
    fn test_mark_paid_unknown_id() {
        let mut ledger = Ledger::new(Currency::BRL);
        let result = ledger.mark_expense_paid(&ExpenseId::new());
        assert!(matches!(result, Err(LedgerError::NotFound { entity: "Expense", .. })));
    }
}
