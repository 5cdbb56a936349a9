//! Human-decimal display strings.
//!
//! Settlement math never touches this type; it only exists at the
//! presentation boundary, where base-unit integers become "35.5" style strings.
//! Formatting works on the integer's decimal digits, so every `U256` renders
//! exactly at any scale.

use crate::domain::{Amount, Percent, SignedAmount};
use serde::Serialize;
use std::fmt;

/// Exact decimal for display. Serializes to a JSON string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Decimal(String);

impl Decimal {
    /// Shift a base-unit amount by `decimals` places, dropping trailing zeros.
    pub fn from_base_units(amount: Amount, decimals: u32) -> Self {
        Decimal(place_point(&amount.to_string(), decimals as usize))
    }

    pub fn from_signed_base_units(amount: SignedAmount, decimals: u32) -> Self {
        let magnitude = Self::from_base_units(amount.magnitude(), decimals);
        if amount.is_negative() && !magnitude.is_zero() {
            Decimal(format!("-{}", magnitude.0))
        } else {
            magnitude
        }
    }

    /// Two-decimal percentage, e.g. `75.00`.
    pub fn from_percent(percent: Percent) -> Self {
        Decimal(percent.to_string())
    }

    pub fn is_zero(&self) -> bool {
        self.0.bytes().all(|b| matches!(b, b'0' | b'.' | b'-'))
    }
}

/// Insert a decimal point `decimals` digits from the right of `digits`.
fn place_point(digits: &str, decimals: usize) -> String {
    if decimals == 0 {
        return digits.to_string();
    }

    let padded = format!("{:0>width$}", digits, width = decimals + 1);
    let (whole, frac) = padded.split_at(padded.len() - decimals);
    let frac = frac.trim_end_matches('0');
    if frac.is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, frac)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
