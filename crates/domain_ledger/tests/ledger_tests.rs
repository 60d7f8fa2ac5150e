//! Tests for domain_ledger

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use core_kernel::{ClientId, Currency, DateRange, FinancialContext, Money, MonthKey, Origin};

use domain_ledger::account::{AccountType, FinancialAccount};
use domain_ledger::transaction::{Expense, PaymentStatus, Revenue, Transfer, TransferType};
use domain_ledger::{Ledger, LedgerError, UNCATEGORIZED_LABEL};

fn d(m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, m, day).unwrap()
}

fn brl(amount: rust_decimal::Decimal) -> Money {
    Money::brl(amount)
}

fn sample_ledger() -> Ledger {
    let mut ledger = Ledger::new(Currency::BRL);

    // March: business sales through two channels, one personal income
    for (day, amount, channel, service) in [
        (3, dec!(2000), Some("Instagram"), Some("Consultoria")),
        (10, dec!(1000), Some("Indicação"), Some("Consultoria")),
        (15, dec!(500), None, Some("Mentoria")),
    ] {
        let mut revenue = Revenue::new(d(3, day), brl(amount), Origin::Empresa).unwrap();
        if let Some(channel) = channel {
            revenue = revenue.with_channel(channel);
        }
        if let Some(service) = service {
            revenue = revenue.with_service(service);
        }
        ledger.record_revenue(revenue).unwrap();
    }
    ledger
        .record_revenue(
            Revenue::new(d(3, 5), brl(dec!(8000)), Origin::Pessoal)
                .unwrap()
                .with_category("Salário"),
        )
        .unwrap();

    // February business revenue for KPI comparison
    ledger
        .record_revenue(
            Revenue::new(d(2, 20), brl(dec!(2000)), Origin::Empresa)
                .unwrap()
                .with_channel("Instagram"),
        )
        .unwrap();

    ledger
        .record_expense(
            Expense::new(d(3, 1), brl(dec!(1500)), Origin::Pessoal, "Moradia", "Aluguel")
                .unwrap()
                .recurring()
                .due_on(d(3, 5))
                .with_status(PaymentStatus::Pago),
        )
        .unwrap();
    ledger
        .record_expense(
            Expense::new(d(3, 2), brl(dec!(300)), Origin::Empresa, "Software", "CRM")
                .unwrap()
                .recurring()
                .due_on(d(3, 20)),
        )
        .unwrap();
    ledger
        .record_expense(
            Expense::new(d(3, 12), brl(dec!(700)), Origin::Empresa, "Marketing", "Anúncios")
                .unwrap()
                .due_on(d(3, 12)),
        )
        .unwrap();

    ledger
}

fn march() -> DateRange {
    DateRange::month(MonthKey::new(2024, 3).unwrap())
}

// ============================================================================
// Summary and KPI Tests
// ============================================================================

mod summary_tests {
    use super::*;

    #[test]
    fn test_empresa_summary() {
        let ledger = sample_ledger();
        let summary = ledger.summary(FinancialContext::Empresa, march());

        assert_eq!(summary.revenue, brl(dec!(3500)));
        assert_eq!(summary.expenses, brl(dec!(1000)));
        assert_eq!(summary.net, brl(dec!(2500)));
        assert_eq!(summary.pending_payables, brl(dec!(1000)));
        assert_eq!(summary.pending_receivables, brl(dec!(0)));
    }

    #[test]
    fn test_consolidado_merges_origins() {
        let ledger = sample_ledger();
        let summary = ledger.summary(FinancialContext::Consolidado, march());

        assert_eq!(summary.revenue, brl(dec!(11500)));
        assert_eq!(summary.expenses, brl(dec!(2500)));
    }

    #[test]
    fn test_margin_is_none_without_revenue() {
        let ledger = Ledger::new(Currency::BRL);
        let summary = ledger.summary(FinancialContext::Pessoal, march());

        assert!(summary.revenue.is_zero());
        assert_eq!(summary.margin, None);
    }

    #[test]
    fn test_pending_receivables() {
        let mut ledger = Ledger::new(Currency::BRL);
        let id = ledger
            .record_revenue(
                Revenue::new(d(3, 1), brl(dec!(900)), Origin::Empresa)
                    .unwrap()
                    .with_status(PaymentStatus::Pendente),
            )
            .unwrap();

        let before = ledger.summary(FinancialContext::Empresa, march());
        assert_eq!(before.pending_receivables, brl(dec!(900)));

        ledger.mark_revenue_paid(&id).unwrap();
        let after = ledger.summary(FinancialContext::Empresa, march());
        assert!(after.pending_receivables.is_zero());
    }

    #[test]
    fn test_kpis_against_previous_month_length() {
        let ledger = sample_ledger();
        // March has 31 days, so the previous range is Jan 30 - Feb 29
        let report = ledger.kpis(FinancialContext::Empresa, march());

        let previous = report.previous_period.unwrap();
        assert_eq!(previous.end, d(2, 29));
        assert_eq!(previous.start, d(1, 30));
        assert_eq!(report.revenue.previous, brl(dec!(2000)));
        assert_eq!(report.revenue.growth, Some(dec!(75)));
    }
}

// ============================================================================
// Breakdown Tests
// ============================================================================

mod breakdown_tests {
    use super::*;

    #[test]
    fn test_revenue_by_channel_sorted_with_fallback_label() {
        let ledger = sample_ledger();
        let channels = ledger.revenue_by_channel(FinancialContext::Empresa, march());

        let labels: Vec<&str> = channels.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Instagram", "Indicação", UNCATEGORIZED_LABEL]);
        assert_eq!(channels[0].share, Some(dec!(57.14)));
        assert_eq!(channels[0].count, 1);
    }

    #[test]
    fn test_revenue_by_service_groups() {
        let ledger = sample_ledger();
        let services = ledger.revenue_by_service(FinancialContext::Empresa, march());

        assert_eq!(services[0].label, "Consultoria");
        assert_eq!(services[0].amount, brl(dec!(3000)));
        assert_eq!(services[0].count, 2);
    }

    #[test]
    fn test_expenses_by_category_respects_context() {
        let ledger = sample_ledger();
        let categories = ledger.expenses_by_category(FinancialContext::Pessoal, march());

        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].label, "Moradia");
        assert_eq!(categories[0].share, Some(dec!(100)));
    }

    #[test]
    fn test_breakdown_of_empty_period() {
        let ledger = sample_ledger();
        let jan = DateRange::month(MonthKey::new(2024, 1).unwrap());
        assert!(ledger.revenue_by_channel(FinancialContext::Consolidado, jan).is_empty());
    }
}

// ============================================================================
// Monthly Series Tests
// ============================================================================

mod series_tests {
    use super::*;

    #[test]
    fn test_monthly_series_includes_empty_months() {
        let ledger = sample_ledger();
        let series = ledger.monthly_series(
            FinancialContext::Empresa,
            MonthKey::new(2024, 4).unwrap(),
            4,
        );

        assert_eq!(series.len(), 4);
        assert_eq!(series[0].month.to_string(), "2024-01");
        assert!(series[0].revenue.is_zero());
        assert_eq!(series[1].revenue, brl(dec!(2000)));
        assert_eq!(series[2].net, brl(dec!(2500)));
        assert!(series[3].expenses.is_zero());
    }
}

// ============================================================================
// Account Tests
// ============================================================================

mod account_tests {
    use super::*;

    #[test]
    fn test_account_requires_name() {
        let result = FinancialAccount::new("  ", AccountType::Banco, Origin::Empresa, brl(dec!(0)));
        assert!(matches!(result, Err(LedgerError::MissingField("name"))));
    }

    #[test]
    fn test_duplicate_account_rejected() {
        let mut ledger = Ledger::new(Currency::BRL);
        let account = FinancialAccount::new("Conta PJ", AccountType::Banco, Origin::Empresa, brl(dec!(10)))
            .unwrap()
            .with_bank("Banco Inter");
        ledger.add_account(account.clone()).unwrap();

        assert!(matches!(
            ledger.add_account(account),
            Err(LedgerError::AccountAlreadyExists(_))
        ));
    }

    #[test]
    fn test_accounts_overview() {
        let mut ledger = Ledger::new(Currency::BRL);
        for (name, kind, origin, balance) in [
            ("Conta PJ", AccountType::Banco, Origin::Empresa, dec!(12000)),
            ("Conta PF", AccountType::Banco, Origin::Pessoal, dec!(3000)),
            ("Carteira", AccountType::Carteira, Origin::Pessoal, dec!(150)),
            ("Corretora", AccountType::Investimento, Origin::Pessoal, dec!(-50)),
        ] {
            ledger
                .add_account(FinancialAccount::new(name, kind, origin, brl(balance)).unwrap())
                .unwrap();
        }

        let pessoal = ledger.accounts_overview(FinancialContext::Pessoal);
        assert_eq!(pessoal.total, brl(dec!(3100)));
        assert_eq!(pessoal.by_type.len(), 3);

        let all = ledger.accounts_overview(FinancialContext::Consolidado);
        assert_eq!(all.by_type[0].account_type, AccountType::Banco);
        assert_eq!(all.by_type[0].total, brl(dec!(15000)));
        assert_eq!(all.by_type[0].count, 2);
    }

    #[test]
    fn test_remove_account() {
        let mut ledger = Ledger::new(Currency::BRL);
        let id = ledger
            .add_account(FinancialAccount::new("Nubank", AccountType::Banco, Origin::Pessoal, brl(dec!(1))).unwrap())
            .unwrap();

        ledger.remove_account(&id).unwrap();
        assert!(ledger.accounts().is_empty());
        assert!(ledger.remove_account(&id).is_err());
    }

    #[test]
    fn test_set_balance_currency_check() {
        let mut account = FinancialAccount::new("Wise", AccountType::Carteira, Origin::Pessoal, brl(dec!(1))).unwrap();
        assert!(account.set_balance(Money::new(dec!(5), Currency::EUR)).is_err());
        account.set_balance(brl(dec!(99))).unwrap();
        assert_eq!(account.balance, brl(dec!(99)));
    }
}

// ============================================================================
// Transfer Tests
// ============================================================================

mod transfer_tests {
    use super::*;

    #[test]
    fn test_transfer_summary() {
        let mut ledger = Ledger::new(Currency::BRL);
        for (from, to, amount, kind) in [
            (Origin::Empresa, Origin::Pessoal, dec!(5000), TransferType::ProLabore),
            (Origin::Empresa, Origin::Pessoal, dec!(2000), TransferType::DistribuicaoLucros),
            (Origin::Pessoal, Origin::Empresa, dec!(1000), TransferType::Aporte),
        ] {
            ledger
                .record_transfer(Transfer::new(d(3, 28), from, to, brl(amount), kind).unwrap())
                .unwrap();
        }

        let summary = ledger.transfer_summary(march());
        assert_eq!(summary.empresa_to_pessoal, brl(dec!(7000)));
        assert_eq!(summary.pessoal_to_empresa, brl(dec!(1000)));
        assert_eq!(summary.net_to_pessoal, brl(dec!(6000)));
        assert_eq!(summary.by_type.len(), 3);
        assert_eq!(summary.by_type[0].transfer_type, TransferType::ProLabore);
    }

    #[test]
    fn test_transfer_outside_range_ignored() {
        let mut ledger = Ledger::new(Currency::BRL);
        ledger
            .record_transfer(
                Transfer::new(d(1, 2), Origin::Empresa, Origin::Pessoal, brl(dec!(10)), TransferType::Outro)
                    .unwrap(),
            )
            .unwrap();

        assert!(ledger.transfer_summary(march()).empresa_to_pessoal.is_zero());
    }
}

// ============================================================================
// Recurring Expense Tests
// ============================================================================

mod recurring_tests {
    use super::*;

    #[test]
    fn test_recurring_filter() {
        let ledger = sample_ledger();
        assert_eq!(ledger.recurring_expenses(FinancialContext::Consolidado).len(), 2);
        assert_eq!(ledger.recurring_expenses(FinancialContext::Empresa).len(), 1);
    }

    #[test]
    fn test_monthly_commitment_counts_latest_occurrence_once() {
        let mut ledger = sample_ledger();
        ledger
            .record_expense(
                Expense::new(d(4, 1), brl(dec!(1600)), Origin::Pessoal, "Moradia", "Aluguel")
                    .unwrap()
                    .recurring(),
            )
            .unwrap();

        // 1600 (latest rent) + 300 (CRM)
        assert_eq!(ledger.monthly_commitment(FinancialContext::Consolidado), brl(dec!(1900)));
    }

    #[test]
    fn test_upcoming_due() {
        let ledger = sample_ledger();
        let upcoming = ledger.upcoming_due(FinancialContext::Consolidado, d(3, 10), 15);

        let descriptions: Vec<&str> = upcoming.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(descriptions, vec!["Anúncios", "CRM"]);
    }

    #[test]
    fn test_overdue_excludes_paid() {
        let ledger = sample_ledger();
        let overdue = ledger.overdue(FinancialContext::Consolidado, d(3, 25));

        let descriptions: Vec<&str> = overdue.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(descriptions, vec!["Anúncios", "CRM"]);
    }

    #[test]
    fn test_client_attribution_survives_recording() {
        let mut ledger = Ledger::new(Currency::BRL);
        let client = ClientId::new();
        ledger
            .record_revenue(Revenue::new(d(3, 1), brl(dec!(10)), Origin::Empresa).unwrap().with_client(client))
            .unwrap();
        assert_eq!(ledger.revenues()[0].client_id, Some(client));
    }
}

// ============================================================================
// Rebuild Tests
// ============================================================================

mod rebuild_tests {
    use super::*;

    #[test]
    fn test_from_records_validates() {
        let good = Revenue::new(d(3, 1), brl(dec!(10)), Origin::Empresa).unwrap();
        let foreign = Revenue::new(d(3, 1), Money::new(dec!(10), Currency::USD), Origin::Empresa).unwrap();

        assert!(Ledger::from_records(Currency::BRL, vec![], vec![good.clone()], vec![], vec![]).is_ok());
        assert!(Ledger::from_records(Currency::BRL, vec![], vec![good, foreign], vec![], vec![]).is_err());
    }
}
