//! Custom Test Assertions
//!
//! Assertion helpers for domain types that print the amounts involved.

use core_kernel::Money;
use domain_ledger::BreakdownEntry;
use rust_decimal::Decimal;

/// Asserts that two Money values are equal within `tolerance`
///
/// # Panics
///
/// Panics if the currencies differ or the amounts are further apart than
/// `tolerance`
pub fn assert_money_approx_eq(actual: &Money, expected: &Money, tolerance: Decimal) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );

    let diff = (actual.amount() - expected.amount()).abs();
    assert!(
        diff <= tolerance,
        "Money amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual.amount(),
        expected.amount(),
        diff,
        tolerance
    );
}

/// Asserts that `actual` is exactly `expected` reais
pub fn assert_brl(actual: &Money, expected: Decimal) {
    assert_money_approx_eq(actual, &Money::brl(expected), Decimal::ZERO);
}

pub fn assert_money_zero(money: &Money) {
    assert!(
        money.is_zero(),
        "Expected zero money, got {} {}",
        money.currency().symbol(),
        money.amount()
    );
}

/// Asserts that a breakdown is sorted by amount, largest first
pub fn assert_breakdown_sorted(entries: &[BreakdownEntry]) {
    for pair in entries.windows(2) {
        assert!(
            pair[0].amount.amount() >= pair[1].amount.amount(),
            "Breakdown out of order: {} ({}) before {} ({})",
            pair[0].label,
            pair[0].amount.amount(),
            pair[1].label,
            pair[1].amount.amount()
        );
    }
}

/// Asserts that the shares of a non-empty breakdown add up to 100%
pub fn assert_shares_sum_to_100(entries: &[BreakdownEntry], tolerance: Decimal) {
    let total: Decimal = entries.iter().filter_map(|e| e.share).sum();
    let diff = (total - Decimal::ONE_HUNDRED).abs();
    assert!(
        diff <= tolerance,
        "Breakdown shares sum to {}, expected 100 (tolerance {})",
        total,
        tolerance
    );
}

/// Asserts that a breakdown has an entry labelled `label` worth `amount`
pub fn assert_breakdown_entry(entries: &[BreakdownEntry], label: &str, amount: Decimal) {
    let entry = entries
        .iter()
        .find(|e| e.label == label)
        .unwrap_or_else(|| panic!("No breakdown entry labelled {:?}", label));
    assert_eq!(
        entry.amount.amount(),
        amount,
        "Entry {:?} holds {}, expected {}",
        label,
        entry.amount.amount(),
        amount
    );
}
