//! Validated domain types for escrow trades.
//!
//! This module provides:
//! - 256-bit base-unit amounts and sign-and-magnitude deltas
//! - Address and timestamp primitives with strict parsing
//! - Escrow records plus the raw shapes they are parsed from
//! - Display-only decimal and percentage types

pub mod decimal;
pub mod escrow;
pub mod percent;
pub mod primitives;

pub use decimal::Decimal;
pub use escrow::{EscrowData, EscrowState, RawEscrowData, RawEscrowState, RawScalar};
pub use percent::Percent;
pub use primitives::{Address, Amount, SignedAmount, TimeSecs};
