//! Revenue, expense and transfer records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{ClientId, CoreError, ExpenseId, Money, Origin, RevenueId, TransferId};

use crate::error::LedgerError;

/// Settlement state of a revenue or expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pago,
    Pendente,
    /// Past its due date without being paid
    Atrasado,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pago => "pago",
            PaymentStatus::Pendente => "pendente",
            PaymentStatus::Atrasado => "atrasado",
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, PaymentStatus::Pago)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pago" => Ok(PaymentStatus::Pago),
            "pendente" => Ok(PaymentStatus::Pendente),
            "atrasado" => Ok(PaymentStatus::Atrasado),
            other => Err(CoreError::unknown_variant("payment status", other)),
        }
    }
}

fn ensure_positive(amount: &Money) -> Result<(), LedgerError> {
    if !amount.is_positive() {
        return Err(LedgerError::InvalidAmount(format!(
            "amount must be positive, got {}",
            amount
        )));
    }
    Ok(())
}

/// Money received
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Revenue {
    pub id: RevenueId,
    pub date: NaiveDate,
    pub amount: Money,
    pub origin: Origin,
    pub service: Option<String>,
    pub channel: Option<String>,
    pub category: Option<String>,
    pub status: PaymentStatus,
    pub client_id: Option<ClientId>,
    pub description: Option<String>,
}

impl Revenue {
    /// Creates a paid revenue
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidAmount` unless the amount is positive
    pub fn new(date: NaiveDate, amount: Money, origin: Origin) -> Result<Self, LedgerError> {
        ensure_positive(&amount)?;
        Ok(Self {
            id: RevenueId::new_v7(),
            date,
            amount,
            origin,
            service: None,
            channel: None,
            category: None,
            status: PaymentStatus::Pago,
            client_id: None,
            description: None,
        })
    }

    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_client(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    pub fn with_status(mut self, status: PaymentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_paid(&self) -> bool {
        self.status.is_settled()
    }
}

/// Money spent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub date: NaiveDate,
    pub amount: Money,
    pub origin: Origin,
    pub category: String,
    /// Repeats every month (rent, subscriptions, payroll)
    pub recurring: bool,
    pub due_date: Option<NaiveDate>,
    pub status: PaymentStatus,
    pub description: String,
}

impl Expense {
    /// Creates a one-off pending expense
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidAmount` unless the amount is positive, and
    /// `LedgerError::MissingField` for a blank category
    pub fn new(
        date: NaiveDate,
        amount: Money,
        origin: Origin,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, LedgerError> {
        ensure_positive(&amount)?;
        let category = category.into();
        if category.trim().is_empty() {
            return Err(LedgerError::MissingField("category"));
        }
        Ok(Self {
            id: ExpenseId::new_v7(),
            date,
            amount,
            origin,
            category,
            recurring: false,
            due_date: None,
            status: PaymentStatus::Pendente,
            description: description.into(),
        })
    }

    /// Marks the expense as monthly recurring
    pub fn recurring(mut self) -> Self {
        self.recurring = true;
        self
    }

    pub fn due_on(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_status(mut self, status: PaymentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_paid(&self) -> bool {
        self.status.is_settled()
    }

    /// Status as of `today`: an unpaid expense past its due date is overdue
    /// even if the stored status still says pending
    pub fn effective_status(&self, today: NaiveDate) -> PaymentStatus {
        match (self.status, self.due_date) {
            (PaymentStatus::Pago, _) => PaymentStatus::Pago,
            (_, Some(due)) if due < today => PaymentStatus::Atrasado,
            (status, _) => status,
        }
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.effective_status(today) == PaymentStatus::Atrasado
    }
}

/// Reason money moved between the ledgers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferType {
    /// Owner's salary paid by the business
    ProLabore,
    /// Capital injected into the business
    Aporte,
    /// Reimbursement of an expense paid from the other ledger
    Reembolso,
    /// Profit distribution to the owner
    DistribuicaoLucros,
    Outro,
}

impl TransferType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferType::ProLabore => "pro_labore",
            TransferType::Aporte => "aporte",
            TransferType::Reembolso => "reembolso",
            TransferType::DistribuicaoLucros => "distribuicao_lucros",
            TransferType::Outro => "outro",
        }
    }
}

impl fmt::Display for TransferType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransferType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pro_labore" => Ok(TransferType::ProLabore),
            "aporte" => Ok(TransferType::Aporte),
            "reembolso" => Ok(TransferType::Reembolso),
            "distribuicao_lucros" => Ok(TransferType::DistribuicaoLucros),
            "outro" => Ok(TransferType::Outro),
            other => Err(CoreError::unknown_variant("transfer type", other)),
        }
    }
}

/// Money moved from one ledger to the other
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    pub id: TransferId,
    pub date: NaiveDate,
    pub from: Origin,
    pub to: Origin,
    pub amount: Money,
    pub transfer_type: TransferType,
    pub description: Option<String>,
}

impl Transfer {
    /// Creates a transfer
    ///
    /// # Errors
    ///
    /// - `LedgerError::SameOrigin` if `from == to`
    /// - `LedgerError::InvalidAmount` unless the amount is positive
    pub fn new(
        date: NaiveDate,
        from: Origin,
        to: Origin,
        amount: Money,
        transfer_type: TransferType,
    ) -> Result<Self, LedgerError> {
        if from == to {
            return Err(LedgerError::SameOrigin(from.to_string()));
        }
        ensure_positive(&amount)?;
        Ok(Self {
            id: TransferId::new_v7(),
            date,
            from,
            to,
            amount,
            transfer_type,
            description: None,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    #[test]
    fn test_revenue_rejects_zero() {
        let result = Revenue::new(d(1), Money::brl(dec!(0)), Origin::Empresa);
        assert!(matches!(result, Err(LedgerError::InvalidAmount(_))));
    }

    #[test]
    fn test_expense_effective_status() {
        let expense = Expense::new(d(1), Money::brl(dec!(100)), Origin::Pessoal, "Moradia", "Aluguel")
            .unwrap()
            .due_on(d(10));

        assert_eq!(expense.effective_status(d(10)), PaymentStatus::Pendente);
        assert_eq!(expense.effective_status(d(11)), PaymentStatus::Atrasado);

        let paid = expense.with_status(PaymentStatus::Pago);
        assert_eq!(paid.effective_status(d(30)), PaymentStatus::Pago);
    }

    #[test]
    fn test_transfer_same_origin() {
        let result = Transfer::new(
            d(1),
            Origin::Empresa,
            Origin::Empresa,
            Money::brl(dec!(10)),
            TransferType::Outro,
        );
        assert!(matches!(result, Err(LedgerError::SameOrigin(_))));
    }

    #[test]
    fn test_transfer_type_wire_name() {
        let json = serde_json::to_string(&TransferType::DistribuicaoLucros).unwrap();
        assert_eq!(json, "\"distribuicao_lucros\"");
    }
}
