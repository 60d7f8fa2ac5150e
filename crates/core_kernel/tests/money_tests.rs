//! Unit tests for the Money module
//!
//! Tests cover money creation, arithmetic, currency handling, conversion
//! and the percentage helper used by every dashboard share.

use core_kernel::{Money, Currency, MoneyError, percentage};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

mod creation {
    use super::*;

    #[test]
    fn test_new_rounds_to_four_decimal_places() {
        let m = Money::new(dec!(100.123456789), Currency::BRL);
        assert_eq!(m.amount(), dec!(100.1235));
    }

    #[test]
    fn test_brl_shorthand() {
        let m = Money::brl(dec!(12.34));
        assert_eq!(m.currency(), Currency::BRL);
        assert_eq!(m.amount(), dec!(12.34));
    }

    #[test]
    fn test_zero_creates_zero_amount() {
        let m = Money::zero(Currency::EUR);
        assert!(m.is_zero());
        assert!(!m.is_positive());
        assert!(!m.is_negative());
    }

    #[test]
    fn test_negative_amount() {
        let m = Money::brl(dec!(-5));
        assert!(m.is_negative());
        assert_eq!(m.abs(), Money::brl(dec!(5)));
    }
}

mod arithmetic {
    use super::*;

    #[test]
    fn test_checked_sub_mismatch() {
        let a = Money::brl(dec!(10));
        let b = Money::new(dec!(1), Currency::GBP);
        assert_eq!(
            a.checked_sub(&b),
            Err(MoneyError::CurrencyMismatch("BRL".to_string(), "GBP".to_string()))
        );
    }

    #[test]
    fn test_sum_of_empty_is_zero() {
        let empty: Vec<Money> = Vec::new();
        assert_eq!(Money::sum(&empty, Currency::BRL).unwrap(), Money::zero(Currency::BRL));
    }

    #[test]
    fn test_divide_by_zero() {
        assert_eq!(
            Money::brl(dec!(10)).divide(Decimal::ZERO),
            Err(MoneyError::DivisionByZero)
        );
    }

    #[test]
    fn test_multiply_by_probability() {
        let weighted = Money::brl(dec!(10000)).multiply(dec!(0.25));
        assert_eq!(weighted.amount(), dec!(2500));
    }

    #[test]
    fn test_round_to_currency() {
        let m = Money::brl(dec!(10.005));
        assert_eq!(m.round_to_currency().amount(), dec!(10.00));
    }
}

mod display {
    use super::*;

    #[test]
    fn test_display_uses_symbol() {
        assert_eq!(Money::brl(dec!(1500)).to_string(), "R$ 1500.00");
        assert_eq!(Money::new(dec!(3.5), Currency::USD).to_string(), "$ 3.50");
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_value(Money::brl(dec!(10.5))).unwrap();
        assert_eq!(json["currency"], "BRL");
    }
}

mod shares {
    use super::*;

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(percentage(dec!(1), dec!(3)), Some(dec!(33.33)));
    }

    #[test]
    fn test_percentage_of_negative_whole() {
        assert_eq!(percentage(dec!(50), dec!(-100)), Some(dec!(-50)));
    }
}
