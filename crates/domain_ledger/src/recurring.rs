//! Recurring expense tracking
//!
//! Recurring expenses (rent, subscriptions, payroll) are stored once per
//! occurrence with `recurring = true`. The views here answer "how much am I
//! committed to every month" and "what is due soon".

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

use core_kernel::{FinancialContext, Money};

use crate::ledger::Ledger;
use crate::transaction::Expense;

impl Ledger {
    /// All recurring expenses visible in `context`, newest first
    pub fn recurring_expenses(&self, context: FinancialContext) -> Vec<&Expense> {
        let mut items: Vec<&Expense> = self
            .expenses()
            .iter()
            .filter(|e| e.recurring && context.includes(e.origin))
            .collect();
        items.sort_by(|a, b| b.date.cmp(&a.date));
        items
    }

    /// Sum of the latest occurrence of each recurring expense
    ///
    /// Occurrences are grouped by (origin, category, description) so a rent
    /// paid every month counts once at its most recent amount.
    pub fn monthly_commitment(&self, context: FinancialContext) -> Money {
        let mut latest: BTreeMap<(&str, &str, &str), &Expense> = BTreeMap::new();
        for expense in self.recurring_expenses(context) {
            let key = (
                expense.origin.as_str(),
                expense.category.as_str(),
                expense.description.as_str(),
            );
            // recurring_expenses is newest first, so the first hit wins
            latest.entry(key).or_insert(expense);
        }
        let total: Decimal = latest.values().map(|e| e.amount.amount()).sum();
        Money::new(total, self.currency())
    }

    /// Unpaid expenses due between `today` and `today + days`, soonest first
    pub fn upcoming_due(&self, context: FinancialContext, today: NaiveDate, days: u64) -> Vec<&Expense> {
        let horizon = today.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX);
        let mut items: Vec<&Expense> = self
            .expenses()
            .iter()
            .filter(|e| context.includes(e.origin) && !e.is_paid())
            .filter(|e| matches!(e.due_date, Some(due) if due >= today && due <= horizon))
            .collect();
        items.sort_by_key(|e| e.due_date);
        items
    }

    /// Unpaid expenses whose due date has passed, oldest first
    pub fn overdue(&self, context: FinancialContext, today: NaiveDate) -> Vec<&Expense> {
        let mut items: Vec<&Expense> = self
            .expenses()
            .iter()
            .filter(|e| context.includes(e.origin) && e.is_overdue(today))
            .collect();
        items.sort_by_key(|e| e.due_date);
        items
    }
}
