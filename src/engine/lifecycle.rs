use crate::domain::{Address, EscrowData, EscrowState, RawEscrowData, RawEscrowState, TimeSecs};
use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// Lifecycle state of an escrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TradeStatus {
    /// Awaiting a funder before the deadline.
    Open,
    /// Funded and bought; position is live.
    Funded,
    /// Position sold; payouts are fixed.
    Sold,
    /// Deadline passed without funding. Terminal.
    ExpiredUnfunded,
}

impl TradeStatus {
    /// Derive status in strict priority order.
    ///
    /// On-chain buy/sell flags dominate the clock: a trade funded before its
    /// deadline is never reported as expired.
    pub fn derive(data: &EscrowData, state: &EscrowState, now: TimeSecs) -> Self {
        if state.sell_performed {
            TradeStatus::Sold
        } else if state.buy_performed {
            TradeStatus::Funded
        } else if now > data.expiration_timestamp {
            TradeStatus::ExpiredUnfunded
        } else {
            TradeStatus::Open
        }
    }
}

impl std::fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeStatus::Open => write!(f, "open"),
            TradeStatus::Funded => write!(f, "funded"),
            TradeStatus::Sold => write!(f, "sold"),
            TradeStatus::ExpiredUnfunded => write!(f, "expiredUnfunded"),
        }
    }
}

/// Derived projection of an escrow. Recomputed on every read, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeView {
    pub data: EscrowData,
    pub state: EscrowState,
    pub status: TradeStatus,
    pub is_proposer: bool,
    pub is_funder: bool,
    pub can_buy: bool,
    pub can_sell: bool,
    pub can_withdraw_proposer: bool,
    pub can_withdraw_funder: bool,
}

/// Classify an escrow as seen by `viewer` at `now`.
///
/// Total over validated inputs. Withdrawal flags are role-based and never
/// depend on who is looking.
pub fn classify(
    data: EscrowData,
    state: EscrowState,
    now: TimeSecs,
    viewer: Option<&Address>,
) -> TradeView {
    let status = TradeStatus::derive(&data, &state, now);

    let is_proposer = viewer.is_some_and(|v| *v == data.proposer);
    let is_funder = viewer.is_some_and(|v| !state.funder.is_zero() && *v == state.funder);

    let can_buy = status == TradeStatus::Open;
    let can_sell = status == TradeStatus::Funded && (is_proposer || is_funder);

    let can_withdraw_proposer = match status {
        TradeStatus::ExpiredUnfunded => !state.withdraw_proposer_performed,
        TradeStatus::Sold => !state.withdraw_proposer_performed && !state.proposer_payout.is_zero(),
        TradeStatus::Open | TradeStatus::Funded => false,
    };
    let can_withdraw_funder = status == TradeStatus::Sold
        && !state.withdraw_funder_performed
        && !state.funder_payout.is_zero();

    tracing::debug!(
        proposer = %data.proposer,
        status = %status,
        now = now.as_u64(),
        can_withdraw_proposer,
        can_withdraw_funder,
        "Classified escrow"
    );

    TradeView {
        data,
        state,
        status,
        is_proposer,
        is_funder,
        can_buy,
        can_sell,
        can_withdraw_proposer,
        can_withdraw_funder,
    }
}

/// Parse raw upstream fields, then classify.
pub fn classify_raw(
    data: &RawEscrowData,
    state: &RawEscrowState,
    now: TimeSecs,
    viewer: Option<&str>,
) -> Result<TradeView, EngineError> {
    let data = EscrowData::try_from(data)?;
    let state = EscrowState::try_from(state)?;
    let viewer = viewer.map(|v| Address::parse_field("viewer", v)).transpose()?;
    Ok(classify(data, state, now, viewer.as_ref()))
}

/// Which side of the trade a viewer is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewerRole {
    Proposer,
    Funder,
    Observer,
}

impl ViewerRole {
    /// Proposer wins when the viewer matches both sides.
    pub fn of(view: &TradeView) -> Self {
        if view.is_proposer {
            ViewerRole::Proposer
        } else if view.is_funder {
            ViewerRole::Funder
        } else {
            ViewerRole::Observer
        }
    }
}
