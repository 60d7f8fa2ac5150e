//! Property-Based Test Generators
//!
//! proptest strategies producing records that respect the domain rules.

use chrono::NaiveDate;
use core_kernel::{Currency, FinancialContext, Money, Origin};
use domain_ledger::{Expense, PaymentStatus, Revenue};
use proptest::prelude::*;
use rust_decimal::Decimal;

pub fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just(Currency::BRL),
        Just(Currency::USD),
        Just(Currency::EUR),
        Just(Currency::GBP),
    ]
}

pub fn origin_strategy() -> impl Strategy<Value = Origin> {
    prop_oneof![Just(Origin::Empresa), Just(Origin::Pessoal)]
}

pub fn context_strategy() -> impl Strategy<Value = FinancialContext> {
    prop_oneof![
        Just(FinancialContext::Empresa),
        Just(FinancialContext::Pessoal),
        Just(FinancialContext::Consolidado),
    ]
}

pub fn payment_status_strategy() -> impl Strategy<Value = PaymentStatus> {
    prop_oneof![
        Just(PaymentStatus::Pago),
        Just(PaymentStatus::Pendente),
        Just(PaymentStatus::Atrasado),
    ]
}

/// Positive amounts in centavos, up to one million reais
pub fn positive_amount_minor_strategy() -> impl Strategy<Value = i64> {
    1i64..100_000_000i64
}

pub fn positive_brl_strategy() -> impl Strategy<Value = Money> {
    positive_amount_minor_strategy().prop_map(|minor| Money::from_minor(minor, Currency::BRL))
}

pub fn positive_money_strategy() -> impl Strategy<Value = Money> {
    (positive_amount_minor_strategy(), currency_strategy())
        .prop_map(|(minor, currency)| Money::from_minor(minor, currency))
}

/// Percentages between 0% and 100% with two decimals
pub fn percentage_strategy() -> impl Strategy<Value = Decimal> {
    (0u32..=10000u32).prop_map(|n| Decimal::new(i64::from(n), 2))
}

/// Any day of 2023 or 2024
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0u64..731u64).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2023, 1, 1)
            .and_then(|start| start.checked_add_days(chrono::Days::new(offset)))
            .unwrap_or(NaiveDate::MIN)
    })
}

pub fn channel_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("Instagram".to_string())),
        Just(Some("Indicação".to_string())),
        Just(Some("Site".to_string())),
    ]
}

pub fn revenue_strategy() -> impl Strategy<Value = Revenue> {
    (
        date_strategy(),
        positive_brl_strategy(),
        origin_strategy(),
        channel_strategy(),
        payment_status_strategy(),
    )
        .prop_map(|(date, amount, origin, channel, status)| {
            let revenue = Revenue::new(date, amount, origin)
                .expect("positive amount")
                .with_status(status);
            match channel {
                Some(channel) => revenue.with_channel(channel),
                None => revenue,
            }
        })
}

pub fn expense_strategy() -> impl Strategy<Value = Expense> {
    (
        date_strategy(),
        positive_brl_strategy(),
        origin_strategy(),
        prop_oneof![Just("Software"), Just("Impostos"), Just("Aluguel")],
        any::<bool>(),
    )
        .prop_map(|(date, amount, origin, category, recurring)| {
            let expense = Expense::new(date, amount, origin, category, "")
                .expect("positive amount and category");
            if recurring {
                expense.recurring().due_on(date)
            } else {
                expense
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn test_generated_revenues_are_positive(revenue in revenue_strategy()) {
            prop_assert!(revenue.amount.is_positive());
            prop_assert_eq!(revenue.amount.currency(), Currency::BRL);
        }

        #[test]
        fn test_generated_dates_in_window(date in date_strategy()) {
            prop_assert!(date >= NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
            prop_assert!(date <= NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
        }

        #[test]
        fn test_percentages_bounded(pct in percentage_strategy()) {
            prop_assert!(pct >= Decimal::ZERO);
            prop_assert!(pct <= Decimal::ONE_HUNDRED);
        }
    }
}
