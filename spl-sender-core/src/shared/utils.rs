//! Utility functions for the sender core
//!
//! This module contains common utility functions used throughout the sender core.

use crate::shared::error::SenderError;
use crate::shared::types::BaseUnits;
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

/// Parse a base58 account address
pub fn parse_address(address: &str) -> Result<Pubkey, SenderError> {
    let address = address.trim();
    if address.is_empty() {
        return Err(SenderError::validation("Address cannot be empty"));
    }
    Ok(Pubkey::from_str(address)?)
}

/// Parse a user-entered decimal amount into base units.
///
/// Scaling is done on the digits, so `amount` × 10^`decimals` is exact for any
/// value representable in base units. Zero, signs, exponents and more
/// fractional digits than `decimals` are rejected.
pub fn parse_amount(amount: &str, decimals: u8) -> Result<BaseUnits, SenderError> {
    let amount = amount.trim();
    if amount.is_empty() {
        return Err(SenderError::validation("Amount cannot be empty"));
    }

    let (whole, fraction) = match amount.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (amount, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(SenderError::validation("Invalid amount format"));
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit()) {
        return Err(SenderError::validation(format!("Invalid amount format: {}", amount)));
    }

    // Trailing zeros never carry precision
    let fraction = fraction.trim_end_matches('0');
    if fraction.len() > decimals as usize {
        return Err(SenderError::validation(format!(
            "Amount {} has more than {} decimal places",
            amount, decimals
        )));
    }

    let overflow = || SenderError::validation(format!("Amount {} is too large", amount));

    let scale = 10u64.checked_pow(decimals as u32).ok_or_else(overflow)?;
    let whole_units = if whole.is_empty() {
        0
    } else {
        whole.parse::<u64>().map_err(|_| overflow())?
    };

    let fraction_units = if fraction.is_empty() {
        0
    } else {
        let padding = 10u64
            .checked_pow((decimals as usize - fraction.len()) as u32)
            .ok_or_else(overflow)?;
        fraction
            .parse::<u64>()
            .map_err(|_| overflow())?
            .checked_mul(padding)
            .ok_or_else(overflow)?
    };

    let units = whole_units
        .checked_mul(scale)
        .and_then(|w| w.checked_add(fraction_units))
        .ok_or_else(overflow)?;

    if units == 0 {
        return Err(SenderError::validation("Amount must be greater than zero"));
    }
    Ok(units)
}

/// Format base units as a decimal string with trailing zeros trimmed
pub fn format_amount(units: BaseUnits, decimals: u8) -> String {
    if decimals == 0 {
        return units.to_string();
    }

    let digits = format!("{:0>width$}", units, width = decimals as usize + 1);
    let (whole, fraction) = digits.split_at(digits.len() - decimals as usize);
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, fraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::constants::{LAMPORTS_PER_SOL, NATIVE_DECIMALS};
    use proptest::prelude::*;

    #[test]
    fn test_parse_address() {
        assert!(parse_address("D3V8DhfG3nKLL99Ywb6ThuU8DxxbBgnPQmA3piqQ2ec2").is_ok());
        assert!(parse_address("  D3V8DhfG3nKLL99Ywb6ThuU8DxxbBgnPQmA3piqQ2ec2 ").is_ok());
        assert!(parse_address("").is_err());
        assert!(parse_address("0x742d35Cc6634C0532925a3b8D4C9db96C4b4d8b6").is_err());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1", NATIVE_DECIMALS).unwrap(), LAMPORTS_PER_SOL);
        assert_eq!(parse_amount("1.5", 6).unwrap(), 1_500_000);
        assert_eq!(parse_amount(".25", 2).unwrap(), 25);
        assert_eq!(parse_amount("5.", 0).unwrap(), 5);
        assert_eq!(parse_amount("0.000000001", 9).unwrap(), 1);
        assert_eq!(parse_amount("2.500", 1).unwrap(), 25);
    }

    #[test]
    fn test_parse_amount_rejects_bad_input() {
        assert!(parse_amount("", 9).is_err());
        assert!(parse_amount(".", 9).is_err());
        assert!(parse_amount("0", 9).is_err());
        assert!(parse_amount("0.0", 9).is_err());
        assert!(parse_amount("-1", 9).is_err());
        assert!(parse_amount("1e3", 9).is_err());
        assert!(parse_amount("1.2.3", 9).is_err());
        assert!(parse_amount("0.0000000001", 9).is_err());
        assert!(parse_amount("18446744073709551616", 0).is_err());
        assert!(parse_amount("18446744074", 9).is_err());
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(1_000_000, 6), "1");
        assert_eq!(format_amount(100_000, 6), "0.1");
        assert_eq!(format_amount(1_234_500_000, 9), "1.2345");
        assert_eq!(format_amount(42, 0), "42");
        assert_eq!(format_amount(0, 9), "0");
    }

    proptest! {
        #[test]
        fn proptest_whole_amounts_scale_exactly(whole in 1u64..=18_000_000_000, decimals in 0u8..=9) {
            let scale = 10u64.pow(decimals as u32);
            prop_assume!(whole.checked_mul(scale).is_some());
            let units = parse_amount(&whole.to_string(), decimals).unwrap();
            prop_assert_eq!(units, whole * scale);
        }

        #[test]
        fn proptest_formatted_units_parse_back(units in 1u64..u64::MAX, decimals in 0u8..=12) {
            let text = format_amount(units, decimals);
            prop_assert_eq!(parse_amount(&text, decimals).unwrap(), units);
        }
    }
}
