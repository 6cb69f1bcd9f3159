//! Fixed-point conversion between decimal ether strings and wei
//!
//! All conversions are done on the decimal text with integer arithmetic so
//! nothing is lost to floating point. Only the display amount is an `f64`.

use super::errors::ConversionError;

/// Number of fractional digits in one ether
pub const DECIMALS: usize = 18;

const WEI_PER_ETHER: u128 = 1_000_000_000_000_000_000;

/// Parse a decimal ether string (e.g. `"0.01"`) into wei
///
/// Trailing fractional zeros are exact and therefore accepted, but any
/// significant digit past the 18th is an error instead of being truncated.
pub fn parse_units(value: &str) -> Result<u128, ConversionError> {
    let s = value.trim();
    if s.is_empty() {
        return Err(ConversionError::Empty);
    }
    let s = s.strip_prefix('+').unwrap_or(s);

    let (whole, frac) = match s.split_once('.') {
        Some((w, f)) => (w, f),
        None => (s, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return Err(ConversionError::Malformed(value.to_string()));
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ConversionError::Malformed(value.to_string()));
    }

    let frac = frac.trim_end_matches('0');
    if frac.len() > DECIMALS {
        return Err(ConversionError::TooPrecise {
            value: value.to_string(),
            digits: frac.len(),
        });
    }

    let whole_val: u128 = if whole.is_empty() {
        0
    } else {
        // Only digits remain, so a parse failure can only be overflow
        whole
            .parse()
            .map_err(|_| ConversionError::Overflow(value.to_string()))?
    };

    let frac_val: u128 = if frac.is_empty() {
        0
    } else {
        format!("{:0<width$}", frac, width = DECIMALS)
            .parse()
            .map_err(|_| ConversionError::Malformed(value.to_string()))?
    };

    whole_val
        .checked_mul(WEI_PER_ETHER)
        .and_then(|w| w.checked_add(frac_val))
        .ok_or_else(|| ConversionError::Overflow(value.to_string()))
}

/// Format wei as an exact decimal ether string, e.g. `1.0` or `0.000000000000000001`
pub fn format_units(wei: u128) -> String {
    let whole = wei / WEI_PER_ETHER;
    let frac = wei % WEI_PER_ETHER;

    let frac_str = format!("{:0width$}", frac, width = DECIMALS);
    let frac_str = frac_str.trim_end_matches('0');

    if frac_str.is_empty() {
        format!("{}.0", whole)
    } else {
        format!("{}.{}", whole, frac_str)
    }
}

/// Decimal amount for display (wei / 10^18)
pub fn to_display_amount(wei: u128) -> f64 {
    format_units(wei)
        .parse()
        .unwrap_or(wei as f64 / WEI_PER_ETHER as f64)
}

/// Parse a JSON-RPC quantity, either `0x`-prefixed hex or plain decimal
pub fn parse_quantity(value: &str) -> Result<u128, ConversionError> {
    let s = value.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex_digits) if !hex_digits.is_empty() => u128::from_str_radix(hex_digits, 16),
        Some(_) => return Err(ConversionError::InvalidQuantity(value.to_string())),
        None => s.parse::<u128>(),
    };

    parsed.map_err(|_| ConversionError::InvalidQuantity(value.to_string()))
}

/// Encode a value as a minimal `0x`-prefixed hex quantity
pub fn to_quantity(value: u128) -> String {
    format!("{:#x}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_units_basic() {
        assert_eq!(parse_units("1").unwrap(), WEI_PER_ETHER);
        assert_eq!(parse_units("0.01").unwrap(), 10_000_000_000_000_000);
        assert_eq!(parse_units("1.5").unwrap(), 1_500_000_000_000_000_000);
        assert_eq!(parse_units(".5").unwrap(), 500_000_000_000_000_000);
        assert_eq!(parse_units("2.").unwrap(), 2 * WEI_PER_ETHER);
        assert_eq!(parse_units("+1").unwrap(), WEI_PER_ETHER);
        assert!(matches!(parse_units("+"), Err(ConversionError::Malformed(_))));
        assert!(matches!(parse_units("++1"), Err(ConversionError::Malformed(_))));
        assert!(matches!(parse_units("-1"), Err(ConversionError::Malformed(_))));
    }

    #[test]
    fn test_one_wei_is_exact() {
        assert_eq!(parse_units("0.000000000000000001").unwrap(), 1);
    }

    #[test]
    fn test_nineteen_fractional_digits_rejected() {
        let err = parse_units("0.0000000000000000001").unwrap_err();
        assert_eq!(
            err,
            ConversionError::TooPrecise {
                value: "0.0000000000000000001".to_string(),
                digits: 19,
            }
        );
    }

    #[test]
    fn test_trailing_zeros_past_eighteen_digits_are_exact() {
        assert_eq!(parse_units("1.0000000000000000000000").unwrap(), WEI_PER_ETHER);
    }

    #[test]
    fn test_parse_units_rejects_garbage() {
        assert_eq!(parse_units("").unwrap_err(), ConversionError::Empty);
        assert_eq!(parse_units("   ").unwrap_err(), ConversionError::Empty);
        assert!(matches!(parse_units("-1"), Err(ConversionError::Malformed(_))));
        assert!(matches!(parse_units("1e18"), Err(ConversionError::Malformed(_))));
        assert!(matches!(parse_units("1.2.3"), Err(ConversionError::Malformed(_))));
        assert!(matches!(parse_units("."), Err(ConversionError::Malformed(_))));
        assert!(matches!(parse_units("abc"), Err(ConversionError::Malformed(_))));
    }

    #[test]
    fn test_parse_units_overflow() {
        let huge = "9".repeat(40);
        assert!(matches!(parse_units(&huge), Err(ConversionError::Overflow(_))));
        // Fits in u128 on its own but not once scaled by 10^18
        assert!(matches!(
            parse_units("1000000000000000000000"),
            Err(ConversionError::Overflow(_))
        ));
    }

    #[test]
    fn test_format_units() {
        assert_eq!(format_units(WEI_PER_ETHER), "1.0");
        assert_eq!(format_units(0), "0.0");
        assert_eq!(format_units(1), "0.000000000000000001");
        assert_eq!(format_units(1_500_000_000_000_000_000), "1.5");
    }

    #[test]
    fn test_round_trip_is_idempotent() {
        let samples = [
            "0",
            "1",
            "0.01",
            "123.456",
            "0.000000000000000001",
            "98765.432109876543210987",
            "42.100",
            "340282366920.938463463374607431",
        ];

        for sample in samples {
            let wei = parse_units(sample).unwrap();
            assert_eq!(parse_units(&format_units(wei)).unwrap(), wei, "sample {}", sample);
        }
    }

    #[test]
    fn test_display_amount() {
        assert_eq!(to_display_amount(WEI_PER_ETHER), 1.0);
        assert_eq!(to_display_amount(10_000_000_000_000_000), 0.01);
    }

    #[test]
    fn test_quantities() {
        assert_eq!(parse_quantity("0x5208").unwrap(), 21000);
        assert_eq!(parse_quantity("0xde0b6b3a7640000").unwrap(), WEI_PER_ETHER);
        assert_eq!(parse_quantity("1700000000").unwrap(), 1_700_000_000);
        assert!(parse_quantity("0x").is_err());
        assert!(parse_quantity("0xzz").is_err());
        assert_eq!(to_quantity(21000), "0x5208");
        assert_eq!(to_quantity(0), "0x0");
    }
}
