//! major-unit to minor-unit amount conversion
//!
//! the ledger's transfer instruction takes integer minor units. conversion
//! from the human decimal always rounds DOWN, so float-ish input can never
//! spend more than what was typed.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::{Result, WalletError};

/// decimals of the native token (1 major unit = 10^9 minor units)
pub const NATIVE_DECIMALS: u32 = 9;

/// parse a user-typed amount string into a decimal
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let s = s.trim();
    if s.is_empty() {
        return Err(WalletError::InvalidAmount("amount is empty".into()));
    }
    Decimal::from_str(s).map_err(|e| WalletError::InvalidAmount(e.to_string()))
}

/// convert a positive major-unit amount to integer minor units, truncating
/// excess precision
pub fn to_minor_units(amount: Decimal, decimals: u32) -> Result<u64> {
    if amount <= Decimal::ZERO {
        return Err(WalletError::InvalidAmount(format!(
            "must be positive, got {amount}"
        )));
    }
    let scale = 10u64
        .checked_pow(decimals)
        .ok_or_else(|| WalletError::InvalidAmount(format!("unsupported scale 10^{decimals}")))?;
    let minor = amount
        .checked_mul(Decimal::from(scale))
        .ok_or_else(|| WalletError::InvalidAmount(format!("{amount} overflows the ledger")))?
        .trunc();
    if minor.is_zero() {
        return Err(WalletError::InvalidAmount(format!(
            "{amount} is below the smallest transferable unit"
        )));
    }
    minor
        .to_u64()
        .ok_or_else(|| WalletError::InvalidAmount(format!("{amount} overflows the ledger")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_exact_conversion() {
        assert_eq!(to_minor_units(dec("1.5"), NATIVE_DECIMALS).unwrap(), 1_500_000_000);
        assert_eq!(to_minor_units(dec("1"), NATIVE_DECIMALS).unwrap(), 1_000_000_000);
        assert_eq!(to_minor_units(dec("0.1"), NATIVE_DECIMALS).unwrap(), 100_000_000);
    }

    #[test]
    fn test_smallest_unit() {
        assert_eq!(to_minor_units(dec("0.000000001"), NATIVE_DECIMALS).unwrap(), 1);
    }

    #[test]
    fn test_excess_precision_rounds_down() {
        assert_eq!(
            to_minor_units(dec("0.0000000019"), NATIVE_DECIMALS).unwrap(),
            1
        );
        assert_eq!(
            to_minor_units(dec("1.9999999999"), NATIVE_DECIMALS).unwrap(),
            1_999_999_999
        );
    }

    #[test]
    fn test_rejects_zero_and_negative() {
        assert!(matches!(
            to_minor_units(dec("0"), NATIVE_DECIMALS),
            Err(WalletError::InvalidAmount(_))
        ));
        assert!(matches!(
            to_minor_units(dec("-0.5"), NATIVE_DECIMALS),
            Err(WalletError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_rejects_dust() {
        // positive but truncates to zero minor units
        assert!(matches!(
            to_minor_units(dec("0.0000000001"), NATIVE_DECIMALS),
            Err(WalletError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(" 0.25 ").unwrap(), dec("0.25"));
        assert!(matches!(
            parse_amount(""),
            Err(WalletError::InvalidAmount(_))
        ));
        assert!(matches!(
            parse_amount("lots"),
            Err(WalletError::InvalidAmount(_))
        ));
    }
}
