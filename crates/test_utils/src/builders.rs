//! Test Data Builders
//!
//! Builders with sensible defaults so that tests only spell out the fields
//! they care about.

use chrono::NaiveDate;
use core_kernel::{ClientId, Currency, Money, Origin};
use domain_crm::{Client, ClientStatus, Project};
use domain_ledger::{
    AccountType, Expense, FinancialAccount, Ledger, PaymentStatus, Revenue, Transfer, TransferType,
};
use rust_decimal::Decimal;

use crate::fixtures::{MoneyFixtures, StringFixtures, TemporalFixtures};

/// Builder for revenues
pub struct TestRevenueBuilder {
    date: NaiveDate,
    amount: Money,
    origin: Origin,
    channel: Option<String>,
    service: Option<String>,
    status: PaymentStatus,
    client_id: Option<ClientId>,
}

impl Default for TestRevenueBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestRevenueBuilder {
    pub fn new() -> Self {
        Self {
            date: TemporalFixtures::today(),
            amount: MoneyFixtures::brl_fee(),
            origin: Origin::Empresa,
            channel: Some(StringFixtures::channel().to_string()),
            service: Some(StringFixtures::service().to_string()),
            status: PaymentStatus::Pago,
            client_id: None,
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = Money::brl(amount);
        self
    }

    pub fn personal(mut self) -> Self {
        self.origin = Origin::Pessoal;
        self
    }

    pub fn channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    /// Drops the channel so the revenue lands in the uncategorized bucket
    pub fn without_channel(mut self) -> Self {
        self.channel = None;
        self
    }

    pub fn service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    pub fn pending(mut self) -> Self {
        self.status = PaymentStatus::Pendente;
        self
    }

    pub fn for_client(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    /// Builds the revenue
    ///
    /// # Panics
    ///
    /// Panics if the amount is not positive
    pub fn build(self) -> Revenue {
        let mut revenue = Revenue::new(self.date, self.amount, self.origin)
            .expect("test revenue must be valid")
            .with_status(self.status);
        if let Some(channel) = self.channel {
            revenue = revenue.with_channel(channel);
        }
        if let Some(service) = self.service {
            revenue = revenue.with_service(service);
        }
        if let Some(client_id) = self.client_id {
            revenue = revenue.with_client(client_id);
        }
        revenue
    }
}

/// Builder for expenses
pub struct TestExpenseBuilder {
    date: NaiveDate,
    amount: Money,
    origin: Origin,
    category: String,
    recurring: bool,
    due_date: Option<NaiveDate>,
    status: PaymentStatus,
}

impl Default for TestExpenseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestExpenseBuilder {
    pub fn new() -> Self {
        Self {
            date: TemporalFixtures::today(),
            amount: MoneyFixtures::brl_100(),
            origin: Origin::Empresa,
            category: StringFixtures::expense_category().to_string(),
            recurring: false,
            due_date: None,
            status: PaymentStatus::Pago,
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = Money::brl(amount);
        self
    }

    pub fn personal(mut self) -> Self {
        self.origin = Origin::Pessoal;
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Monthly recurring, pending, due on `due`
    pub fn recurring_due(mut self, due: NaiveDate) -> Self {
        self.recurring = true;
        self.due_date = Some(due);
        self.status = PaymentStatus::Pendente;
        self
    }

    pub fn pending(mut self) -> Self {
        self.status = PaymentStatus::Pendente;
        self
    }

    /// Builds the expense
    ///
    /// # Panics
    ///
    /// Panics if the amount is not positive or the category is blank
    pub fn build(self) -> Expense {
        let mut expense = Expense::new(self.date, self.amount, self.origin, self.category, "")
            .expect("test expense must be valid")
            .with_status(self.status);
        if self.recurring {
            expense = expense.recurring();
        }
        if let Some(due) = self.due_date {
            expense = expense.due_on(due);
        }
        expense
    }
}

/// Builder for clients
pub struct TestClientBuilder {
    name: String,
    created_at: NaiveDate,
    ltv: Money,
    last_purchase: Option<NaiveDate>,
    projects: usize,
    status: ClientStatus,
}

impl Default for TestClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClientBuilder {
    pub fn new() -> Self {
        Self {
            name: StringFixtures::client_name().to_string(),
            created_at: TemporalFixtures::days_ago(365),
            ltv: MoneyFixtures::brl_zero(),
            last_purchase: None,
            projects: 0,
            status: ClientStatus::Ativo,
        }
    }

    pub fn created_days_ago(mut self, days: u64) -> Self {
        self.created_at = TemporalFixtures::days_ago(days);
        self
    }

    pub fn ltv(mut self, ltv: Decimal) -> Self {
        self.ltv = Money::brl(ltv);
        self
    }

    pub fn last_purchase_days_ago(mut self, days: u64) -> Self {
        self.last_purchase = Some(TemporalFixtures::days_ago(days));
        self
    }

    /// Adds `count` delivered projects to the client's internal data
    pub fn projects(mut self, count: usize) -> Self {
        self.projects = count;
        self
    }

    pub fn status(mut self, status: ClientStatus) -> Self {
        self.status = status;
        self
    }

    /// Builds the client
    ///
    /// # Panics
    ///
    /// Panics if the name is blank
    pub fn build(self) -> Client {
        let mut client = Client::new(self.name, self.created_at)
            .expect("test client must be valid")
            .with_ltv(self.ltv)
            .with_status(self.status);
        if let Some(date) = self.last_purchase {
            client = client.with_last_purchase(date);
        }
        for n in 1..=self.projects {
            client = client.with_project(Project::new(format!("Projeto {}", n)));
        }
        client
    }
}

/// Builder for a ledger with a few records
pub struct TestLedgerBuilder {
    accounts: Vec<FinancialAccount>,
    revenues: Vec<Revenue>,
    expenses: Vec<Expense>,
    transfers: Vec<Transfer>,
}

impl Default for TestLedgerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestLedgerBuilder {
    pub fn new() -> Self {
        Self {
            accounts: Vec::new(),
            revenues: Vec::new(),
            expenses: Vec::new(),
            transfers: Vec::new(),
        }
    }

    /// Adds a bank account holding `balance`
    pub fn account(mut self, name: &str, origin: Origin, balance: Decimal) -> Self {
        let account = FinancialAccount::new(name, AccountType::Banco, origin, Money::brl(balance))
            .expect("test account must be valid");
        self.accounts.push(account);
        self
    }

    pub fn revenue(mut self, revenue: Revenue) -> Self {
        self.revenues.push(revenue);
        self
    }

    pub fn expense(mut self, expense: Expense) -> Self {
        self.expenses.push(expense);
        self
    }

    /// Adds a transfer from the company to the personal ledger
    pub fn pro_labore(mut self, date: NaiveDate, amount: Decimal) -> Self {
        let transfer = Transfer::new(
            date,
            Origin::Empresa,
            Origin::Pessoal,
            Money::brl(amount),
            TransferType::ProLabore,
        )
        .expect("test transfer must be valid");
        self.transfers.push(transfer);
        self
    }

    /// Builds the ledger in BRL
    ///
    /// # Panics
    ///
    /// Panics if a record is rejected by the ledger
    pub fn build(self) -> Ledger {
        Ledger::from_records(
            Currency::BRL,
            self.accounts,
            self.revenues,
            self.expenses,
            self.transfers,
        )
        .expect("test ledger must be valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_revenue_builder_defaults() {
        let revenue = TestRevenueBuilder::new().build();
        assert_eq!(revenue.amount, MoneyFixtures::brl_fee());
        assert_eq!(revenue.channel.as_deref(), Some("Instagram"));
        assert!(revenue.is_paid());
    }

    #[test]
    fn test_recurring_expense_is_pending() {
        let expense = TestExpenseBuilder::new()
            .recurring_due(TemporalFixtures::day(20))
            .build();
        assert!(expense.recurring);
        assert!(!expense.is_paid());
        assert_eq!(expense.due_date, Some(TemporalFixtures::day(20)));
    }

    #[test]
    fn test_client_builder_projects() {
        let client = TestClientBuilder::new().projects(3).ltv(dec!(1200)).build();
        assert_eq!(client.project_count(), 3);
        assert_eq!(client.ltv, Money::brl(dec!(1200)));
    }

    #[test]
    fn test_ledger_builder() {
        let ledger = TestLedgerBuilder::new()
            .account("Conta PJ", Origin::Empresa, dec!(10000))
            .revenue(TestRevenueBuilder::new().build())
            .expense(TestExpenseBuilder::new().build())
            .pro_labore(TemporalFixtures::day(5), dec!(3000))
            .build();

        assert_eq!(ledger.accounts().len(), 1);
        assert_eq!(ledger.revenues().len(), 1);
        assert_eq!(ledger.expenses().len(), 1);
        assert_eq!(ledger.transfers().len(), 1);
    }
}
