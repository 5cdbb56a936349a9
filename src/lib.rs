pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod present;
pub mod telemetry;

pub use config::Config;
pub use domain::{
    Address, Amount, Decimal, EscrowData, EscrowState, Percent, RawEscrowData, RawEscrowState,
    SignedAmount, TimeSecs,
};
pub use engine::{
    classify, classify_raw, compute_expected_outcome, compute_realized_outcome, ExpectedOutcome,
    RealizedOutcome, SettledAmounts, TradeStatus, TradeView, ViewerRole,
};
pub use error::{EngineError, ParseError};
