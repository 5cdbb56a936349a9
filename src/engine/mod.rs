//! Pure computation engine(s) for escrow lifecycle and settlement.
//!
//! Nothing here reads the clock or performs I/O: `now` and every amount are
//! passed in, so identical inputs always give identical outputs.

pub mod funding;
pub mod invariants;
pub mod lifecycle;
pub mod settlement;

pub use funding::{
    expected_total_sell_in, required_funder_contribution, FundingRequirement, FUNDER_MULTIPLIER,
    PROPOSER_PROFIT_SHARE_PCT,
};
pub use lifecycle::{classify, classify_raw, TradeStatus, TradeView, ViewerRole};
pub use settlement::{
    compute_expected_outcome, compute_realized_outcome, split, ExpectedOutcome, RealizedOutcome,
    SettledAmounts, Split, ViewerPnl,
};
