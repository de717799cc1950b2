//! Decimal amount ↔ minor unit conversion.
//!
//! Amounts are fixed-point integers with [`DEFAULT_DECIMALS`] fractional
//! digits. Extra fractional digits are truncated, never rounded.

use alloy::primitives::U256;

use crate::transaction::types::AmountError;

/// Precision of the native asset.
pub const DEFAULT_DECIMALS: u8 = 18;

/// Anything that can be turned into minor units.
#[derive(Debug, Clone, PartialEq)]
pub enum AmountInput {
    /// Human-readable decimal, e.g. "12.5".
    Decimal(String),
    /// Human-readable float, formatted with its shortest exact representation.
    Float(f64),
    /// Already minor units; passed through unchanged.
    MinorUnits(U256),
}

impl From<&str> for AmountInput {
    fn from(s: &str) -> Self {
        AmountInput::Decimal(s.to_string())
    }
}

impl From<String> for AmountInput {
    fn from(s: String) -> Self {
        AmountInput::Decimal(s)
    }
}

impl From<f64> for AmountInput {
    fn from(v: f64) -> Self {
        AmountInput::Float(v)
    }
}

impl From<U256> for AmountInput {
    fn from(v: U256) -> Self {
        AmountInput::MinorUnits(v)
    }
}

/// Convert a human-readable amount into minor units.
pub fn to_minor_units(amount: impl Into<AmountInput>, decimals: u8) -> Result<U256, AmountError> {
    match amount.into() {
        AmountInput::MinorUnits(units) => Ok(units),
        AmountInput::Decimal(s) => decimal_to_minor_units(&s, decimals),
        AmountInput::Float(v) => {
            if !v.is_finite() || v < 0.0 {
                return Err(AmountError::Invalid(v.to_string()));
            }
            if v == 0.0 {
                return Ok(U256::ZERO);
            }
            decimal_to_minor_units(&v.to_string(), decimals)
        }
    }
}

/// Format minor units as a decimal string with trailing zeros trimmed.
pub fn from_minor_units(units: U256, decimals: u8) -> String {
    let digits = units.to_string();
    let decimals = decimals as usize;
    if decimals == 0 {
        return digits;
    }

    let padded = format!("{:0>width$}", digits, width = decimals + 1);
    let (int_part, frac_part) = padded.split_at(padded.len() - decimals);
    let frac_part = frac_part.trim_end_matches('0');
    if frac_part.is_empty() {
        int_part.to_string()
    } else {
        format!("{}.{}", int_part, frac_part)
    }
}

fn decimal_to_minor_units(input: &str, decimals: u8) -> Result<U256, AmountError> {
    let s = input.trim();
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, f),
        None => (s, ""),
    };

    let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
    let empty = int_part.is_empty() && frac_part.is_empty();
    if empty || !all_digits(int_part) || !all_digits(frac_part) {
        return Err(AmountError::Invalid(input.to_string()));
    }

    let decimals = decimals as usize;
    let mut digits = String::with_capacity(int_part.len() + decimals);
    digits.push_str(int_part);
    if frac_part.len() >= decimals {
        digits.push_str(&frac_part[..decimals]);
    } else {
        digits.push_str(frac_part);
        digits.extend(std::iter::repeat('0').take(decimals - frac_part.len()));
    }

    let significant = digits.trim_start_matches('0');
    if significant.is_empty() {
        return Ok(U256::ZERO);
    }
    U256::from_str_radix(significant, 10).map_err(|_| AmountError::Overflow(input.to_string()))
}
