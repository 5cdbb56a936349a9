//! Domain primitives: Address, Amount, SignedAmount, TimeSecs.

use crate::error::ParseError;
use alloy_primitives::{U256, U512};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Time in seconds since Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeSecs(pub u64);

impl TimeSecs {
    pub fn new(secs: u64) -> Self {
        TimeSecs(secs)
    }

    /// Wall-clock time, for callers that need to supply `now`.
    pub fn now() -> Self {
        TimeSecs(Utc::now().timestamp().max(0) as u64)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Parse an on-chain uint256 timestamp.
    ///
    /// Values beyond `u64::MAX` saturate: no caller-supplied `now` can pass them.
    pub fn parse_field(field: &'static str, raw: &str) -> Result<Self, ParseError> {
        let value = Amount::parse_field(field, raw)?;
        Ok(TimeSecs(u64::try_from(value.0).unwrap_or(u64::MAX)))
    }

    /// UTC datetime, if representable.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        let secs = i64::try_from(self.0).ok()?;
        Utc.timestamp_opt(secs, 0).single()
    }
}

/// EVM-style party or token identity.
///
/// Equality is byte equality, so hex casing never matters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(pub alloy_primitives::Address);

impl Address {
    pub const ZERO: Address = Address(alloy_primitives::Address::ZERO);

    pub fn is_zero(&self) -> bool {
        self.0 == alloy_primitives::Address::ZERO
    }

    /// Parse a hex address, reporting `field` on failure.
    pub fn parse_field(field: &'static str, raw: &str) -> Result<Self, ParseError> {
        let trimmed = raw.trim();
        alloy_primitives::Address::from_str(trimmed)
            .map(Address)
            .map_err(|_| ParseError::Address {
                field,
                value: raw.to_string(),
            })
    }

    /// Like [`Address::parse_field`], but absent or empty input means "nobody yet".
    pub fn parse_optional_field(
        field: &'static str,
        raw: Option<&str>,
    ) -> Result<Self, ParseError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(Address::ZERO),
            Some(s) => Self::parse_field(field, s),
        }
    }
}

impl FromStr for Address {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_field("address", s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Address::from_str(&raw).map_err(serde::de::Error::custom)
    }
}

/// Unsigned token amount in base units (e.g. 6-decimal USDC).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(pub U256);

impl Amount {
    pub const ZERO: Amount = Amount(U256::ZERO);

    pub fn new(value: U256) -> Self {
        Amount(value)
    }

    pub fn from_u64(value: u64) -> Self {
        Amount(U256::from(value))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Parse a plain decimal integer string.
    ///
    /// Only ASCII digits are accepted. Empty strings, signs, separators and
    /// values that overflow 256 bits are errors, never zero.
    pub fn parse_field(field: &'static str, raw: &str) -> Result<Self, ParseError> {
        let err = || ParseError::Integer {
            field,
            value: raw.to_string(),
        };

        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }

        U256::from_str_radix(raw, 10).map(Amount).map_err(|_| err())
    }

    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_add(rhs.0).map(Amount)
    }

    pub fn checked_mul(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_mul(rhs.0).map(Amount)
    }

    /// Difference clamped at zero.
    pub fn saturating_sub(self, rhs: Amount) -> Amount {
        Amount(self.0.saturating_sub(rhs.0))
    }

    /// `floor(self * num / den)` with a 512-bit intermediate product.
    ///
    /// `None` only for a zero denominator or a quotient wider than 256 bits.
    pub fn mul_div_floor(self, num: Amount, den: Amount) -> Option<Amount> {
        if den.is_zero() {
            return None;
        }
        let quotient = self.widen() * num.widen() / den.widen();
        narrow(quotient).map(Amount)
    }

    /// Zero-extend to 512 bits.
    pub(crate) fn widen(&self) -> U512 {
        let mut limbs = [0u64; 8];
        limbs[..4].copy_from_slice(self.0.as_limbs());
        U512::from_limbs(limbs)
    }
}

fn narrow(value: U512) -> Option<U256> {
    let limbs = value.as_limbs();
    if limbs[4..].iter().any(|&limb| limb != 0) {
        return None;
    }
    Some(U256::from_limbs([limbs[0], limbs[1], limbs[2], limbs[3]]))
}

impl FromStr for Amount {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_field("amount", s)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Base-unit amounts travel as decimal strings; JSON numbers lose precision past 2^53.
impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Amount::from_str(&raw).map_err(serde::de::Error::custom)
    }
}

/// Signed difference between two amounts, kept as sign and magnitude.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SignedAmount {
    negative: bool,
    magnitude: Amount,
}

impl SignedAmount {
    /// `to - from`, decided by comparison so no subtraction can underflow.
    pub fn delta(to: Amount, from: Amount) -> Self {
        if to >= from {
            SignedAmount {
                negative: false,
                magnitude: to.saturating_sub(from),
            }
        } else {
            SignedAmount {
                negative: true,
                magnitude: from.saturating_sub(to),
            }
        }
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn is_zero(&self) -> bool {
        self.magnitude.is_zero()
    }

    /// Absolute value.
    pub fn magnitude(&self) -> Amount {
        self.magnitude
    }
}

impl fmt::Display for SignedAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-{}", self.magnitude)
        } else {
            write!(f, "{}", self.magnitude)
        }
    }
}

impl Serialize for SignedAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
