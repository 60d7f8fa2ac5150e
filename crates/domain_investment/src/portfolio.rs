//! Portfolio aggregation

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use core_kernel::{percentage, Currency, FinancialContext, Money, MoneyError};

use crate::investment::{Investment, InvestmentType, Liquidity};
use crate::return_percentage;

/// Part of the portfolio sharing one key (type or liquidity)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationSlice<K> {
    pub key: K,
    pub applied: Money,
    pub current: Money,
    pub count: usize,
    /// Share of the portfolio's current value
    pub share: Option<Decimal>,
}

/// Totals and allocation of the investments visible in one context
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioSummary {
    pub context: FinancialContext,
    pub total_applied: Money,
    pub total_current: Money,
    pub total_return: Money,
    pub return_pct: Decimal,
    pub by_type: Vec<AllocationSlice<InvestmentType>>,
    pub by_liquidity: Vec<AllocationSlice<Liquidity>>,
}

impl PortfolioSummary {
    /// Aggregates the investments whose origin belongs to `context`
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::CurrencyMismatch` if an included investment is
    /// not denominated in `currency`
    pub fn from_investments(
        investments: &[Investment],
        context: FinancialContext,
        currency: Currency,
    ) -> Result<Self, MoneyError> {
        let included: Vec<&Investment> = investments
            .iter()
            .filter(|i| context.includes(i.origin))
            .collect();

        if let Some(foreign) = included.iter().find(|i| i.applied.currency() != currency) {
            return Err(MoneyError::CurrencyMismatch(
                currency.to_string(),
                foreign.applied.currency().to_string(),
            ));
        }

        let applied: Decimal = included.iter().map(|i| i.applied.amount()).sum();
        let current: Decimal = included.iter().map(|i| i.current_value.amount()).sum();

        Ok(Self {
            context,
            total_applied: Money::new(applied, currency),
            total_current: Money::new(current, currency),
            total_return: Money::new(current - applied, currency),
            return_pct: return_percentage(applied, current),
            by_type: slices(&included, current, currency, |i| i.investment_type),
            by_liquidity: slices(&included, current, currency, |i| i.liquidity),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }
}

fn slices<K: Ord + Copy>(
    investments: &[&Investment],
    portfolio_current: Decimal,
    currency: Currency,
    key: impl Fn(&Investment) -> K,
) -> Vec<AllocationSlice<K>> {
    let mut groups: BTreeMap<K, (Decimal, Decimal, usize)> = BTreeMap::new();
    for investment in investments {
        let entry = groups
            .entry(key(investment))
            .or_insert((Decimal::ZERO, Decimal::ZERO, 0));
        entry.0 += investment.applied.amount();
        entry.1 += investment.current_value.amount();
        entry.2 += 1;
    }

    let mut result: Vec<AllocationSlice<K>> = groups
        .into_iter()
        .map(|(key, (applied, current, count))| AllocationSlice {
            key,
            applied: Money::new(applied, currency),
            current: Money::new(current, currency),
            count,
            share: percentage(current, portfolio_current),
        })
        .collect();
    result.sort_by(|a, b| b.current.amount().cmp(&a.current.amount()));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_kernel::Origin;
    use rust_decimal_macros::dec;

    fn investment(
        origin: Origin,
        kind: InvestmentType,
        liquidity: Liquidity,
        applied: Decimal,
        current: Decimal,
    ) -> Investment {
        Investment::new(
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            origin,
            kind,
            "ativo",
            Money::brl(applied),
            Money::brl(current),
            liquidity,
        )
        .unwrap()
    }

    #[test]
    fn test_empty_portfolio() {
        let summary = PortfolioSummary::from_investments(&[], FinancialContext::Consolidado, Currency::BRL).unwrap();
        assert!(summary.is_empty());
        assert_eq!(summary.return_pct, Decimal::ZERO);
    }

    #[test]
    fn test_context_filter() {
        let items = vec![
            investment(Origin::Empresa, InvestmentType::RendaFixa, Liquidity::Diaria, dec!(1000), dec!(1000)),
            investment(Origin::Pessoal, InvestmentType::Acoes, Liquidity::Diaria, dec!(500), dec!(600)),
        ];
        let summary = PortfolioSummary::from_investments(&items, FinancialContext::Pessoal, Currency::BRL).unwrap();

        assert_eq!(summary.total_applied, Money::brl(dec!(500)));
        assert_eq!(summary.return_pct, dec!(20));
        assert_eq!(summary.by_type.len(), 1);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn slices_add_up_to_total(values in prop::collection::vec((1i64..100_000, 0i64..200_000, 0usize..4), 1..20)) {
                let kinds = [
                    InvestmentType::RendaFixa,
                    InvestmentType::Acoes,
                    InvestmentType::Cripto,
                    InvestmentType::Fundos,
                ];
                let items: Vec<Investment> = values
                    .iter()
                    .map(|(applied, current, kind)| {
                        investment(
                            Origin::Pessoal,
                            kinds[*kind],
                            Liquidity::Mensal,
                            Decimal::from(*applied),
                            Decimal::from(*current),
                        )
                    })
                    .collect();

                let summary = PortfolioSummary::from_investments(&items, FinancialContext::Consolidado, Currency::BRL).unwrap();
                let by_type: Decimal = summary.by_type.iter().map(|s| s.current.amount()).sum();
                let count: usize = summary.by_type.iter().map(|s| s.count).sum();

                prop_assert_eq!(by_type, summary.total_current.amount());
                prop_assert_eq!(count, items.len());
                prop_assert_eq!(summary.by_liquidity.len(), 1);
            }
        }
    }
}
