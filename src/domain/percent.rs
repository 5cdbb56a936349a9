//! Signed percentage with two fixed decimals, computed without floating point.

use crate::domain::{Amount, SignedAmount};
use alloy_primitives::U512;
use serde::{Serialize, Serializer};
use std::fmt;

/// `10000` = 100.00%.
const BASIS_POINTS_PER_UNIT: u64 = 10_000;

/// A percentage held as truncated basis points (hundredths of a percent).
///
/// Basis points are 512-bit: `|delta| * 10000` can exceed 256 bits when the
/// basis is small.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Percent {
    negative: bool,
    basis_points: U512,
}

impl Percent {
    pub const ZERO: Percent = Percent {
        negative: false,
        basis_points: U512::ZERO,
    };

    /// `delta / basis` as a percentage: `floor(|delta| * 10000 / basis)` basis
    /// points, sign reapplied afterwards. A zero basis yields `0.00`.
    pub fn of(delta: SignedAmount, basis: Amount) -> Self {
        if basis.is_zero() {
            return Percent::ZERO;
        }

        // |delta| < 2^256 and 10000 < 2^14, so the product fits.
        let basis_points = delta.magnitude().widen() * U512::from(BASIS_POINTS_PER_UNIT)
            / basis.widen();

        Percent {
            negative: delta.is_negative() && !basis_points.is_zero(),
            basis_points,
        }
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn basis_points(&self) -> U512 {
        self.basis_points
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hundred = U512::from(100u64);
        let whole = self.basis_points / hundred;
        let frac = self.basis_points % hundred;
        let sign = if self.negative { "-" } else { "" };
        write!(f, "{}{}.{:0>2}", sign, whole, frac.to_string())
    }
}

impl Serialize for Percent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
