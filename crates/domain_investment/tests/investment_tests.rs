//! Tests for domain_investment

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{Currency, FinancialContext, Money, Origin};

use domain_investment::investment::{Investment, InvestmentType, Liquidity};
use domain_investment::portfolio::PortfolioSummary;
use domain_investment::InvestmentError;

fn apply(
    origin: Origin,
    kind: InvestmentType,
    asset: &str,
    applied: Decimal,
    current: Decimal,
    liquidity: Liquidity,
) -> Investment {
    Investment::new(
        NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(),
        origin,
        kind,
        asset,
        Money::brl(applied),
        Money::brl(current),
        liquidity,
    )
    .unwrap()
}

fn portfolio() -> Vec<Investment> {
    vec![
        apply(Origin::Empresa, InvestmentType::RendaFixa, "Tesouro Selic", dec!(20000), dec!(21000), Liquidity::Diaria),
        apply(Origin::Pessoal, InvestmentType::Acoes, "ITSA4", dec!(5000), dec!(4500), Liquidity::Diaria),
        apply(Origin::Pessoal, InvestmentType::Cripto, "BTC", dec!(2000), dec!(3500), Liquidity::Diaria),
        apply(Origin::Pessoal, InvestmentType::RendaFixa, "CDB 2027", dec!(10000), dec!(11000), Liquidity::NoVencimento),
    ]
}

// ============================================================================
// Investment Tests
// ============================================================================

mod investment_tests {
    use super::*;

    #[test]
    fn test_blank_asset_rejected() {
        let result = Investment::new(
            NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(),
            Origin::Pessoal,
            InvestmentType::Fundos,
            "   ",
            Money::brl(dec!(100)),
            Money::brl(dec!(100)),
            Liquidity::Mensal,
        );
        assert!(matches!(result, Err(InvestmentError::MissingAsset)));
    }

    #[test]
    fn test_negative_valuation_rejected() {
        let mut investment = apply(Origin::Pessoal, InvestmentType::Cripto, "ETH", dec!(100), dec!(80), Liquidity::Diaria);
        let result = investment.update_value(Money::brl(dec!(-1)));

        assert!(matches!(result, Err(InvestmentError::InvalidAmount(_))));
        assert_eq!(investment.return_pct, dec!(-20));
    }

    #[test]
    fn test_total_loss() {
        let mut investment = apply(Origin::Pessoal, InvestmentType::Cripto, "LUNA", dec!(100), dec!(100), Liquidity::Diaria);
        investment.update_value(Money::brl(dec!(0))).unwrap();
        assert_eq!(investment.return_pct, dec!(-100));
    }

    #[test]
    fn test_stored_return_override() {
        let investment = apply(Origin::Pessoal, InvestmentType::Fundos, "FII", dec!(100), dec!(100), Liquidity::Mensal)
            .with_return_pct(dec!(3.2));
        assert_eq!(investment.return_pct, dec!(3.2));
    }

    #[test]
    fn test_serializes_wire_names() {
        let investment = apply(Origin::Empresa, InvestmentType::RendaFixa, "LCA", dec!(1), dec!(1), Liquidity::NoVencimento);
        let json = serde_json::to_value(&investment).unwrap();

        assert_eq!(json["investment_type"], "renda_fixa");
        assert_eq!(json["liquidity"], "no_vencimento");
        assert_eq!(json["origin"], "empresa");
    }
}

// ============================================================================
// Portfolio Tests
// ============================================================================

mod portfolio_tests {
    use super::*;

    #[test]
    fn test_consolidated_totals() {
        let summary = PortfolioSummary::from_investments(&portfolio(), FinancialContext::Consolidado, Currency::BRL).unwrap();

        assert_eq!(summary.total_applied, Money::brl(dec!(37000)));
        assert_eq!(summary.total_current, Money::brl(dec!(40000)));
        assert_eq!(summary.total_return, Money::brl(dec!(3000)));
        assert_eq!(summary.return_pct, dec!(8.11));
    }

    #[test]
    fn test_allocation_by_type_sorted_by_value() {
        let summary = PortfolioSummary::from_investments(&portfolio(), FinancialContext::Consolidado, Currency::BRL).unwrap();

        let first = &summary.by_type[0];
        assert_eq!(first.key, InvestmentType::RendaFixa);
        assert_eq!(first.current, Money::brl(dec!(32000)));
        assert_eq!(first.count, 2);
        assert_eq!(first.share, Some(dec!(80)));
        assert_eq!(summary.by_type.len(), 3);
    }

    #[test]
    fn test_allocation_by_liquidity() {
        let summary = PortfolioSummary::from_investments(&portfolio(), FinancialContext::Pessoal, Currency::BRL).unwrap();

        assert_eq!(summary.by_liquidity[0].key, Liquidity::NoVencimento);
        assert_eq!(summary.by_liquidity[0].share, Some(dec!(57.89)));
        assert_eq!(summary.by_liquidity[1].key, Liquidity::Diaria);
        assert_eq!(summary.by_liquidity[1].current, Money::brl(dec!(8000)));
    }

    #[test]
    fn test_foreign_currency_rejected() {
        let mut items = portfolio();
        items.push(
            Investment::new(
                NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(),
                Origin::Pessoal,
                InvestmentType::Acoes,
                "AAPL",
                Money::new(dec!(100), Currency::USD),
                Money::new(dec!(120), Currency::USD),
                Liquidity::Diaria,
            )
            .unwrap(),
        );

        assert!(PortfolioSummary::from_investments(&items, FinancialContext::Pessoal, Currency::BRL).is_err());
        // Empresa view does not include the USD holding
        assert!(PortfolioSummary::from_investments(&items, FinancialContext::Empresa, Currency::BRL).is_ok());
    }
}
