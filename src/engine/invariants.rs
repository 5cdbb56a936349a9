//! Consistency checks for a polled escrow.
//!
//! Classification stays total; callers that want to reject a corrupt or
//! mid-reorg read run these first.

use super::funding::{expected_total_sell_in, required_funder_contribution};
use crate::domain::{EscrowData, EscrowState, TimeSecs};
use crate::error::EngineError;

/// Check every invariant that does not depend on the clock.
///
/// A proposer withdrawal on an unfunded escrow is accepted here, since only
/// `now` can tell whether the deadline has passed. Use [`check_at`] for that.
pub fn check(state: &EscrowState) -> Result<(), EngineError> {
    check_flags(state)?;
    check_funding(state)?;
    check_settlement(state)
}

/// [`check`] plus the deadline rule for unfunded proposer withdrawals.
pub fn check_at(data: &EscrowData, state: &EscrowState, now: TimeSecs) -> Result<(), EngineError> {
    check(state)?;

    if state.withdraw_proposer_performed
        && !state.buy_performed
        && now <= data.expiration_timestamp
    {
        return Err(EngineError::invalid(format!(
            "proposer withdrew before deadline {} (now {})",
            data.expiration_timestamp.as_u64(),
            now.as_u64()
        )));
    }

    Ok(())
}

fn check_flags(state: &EscrowState) -> Result<(), EngineError> {
    if state.sell_performed && !state.buy_performed {
        return Err(EngineError::invalid("sell performed before buy"));
    }
    if state.withdraw_funder_performed && !state.sell_performed {
        return Err(EngineError::invalid("funder withdrew before sale"));
    }
    if state.withdraw_proposer_performed && state.buy_performed && !state.sell_performed {
        return Err(EngineError::invalid("proposer withdrew from a live position"));
    }
    Ok(())
}

fn check_funding(state: &EscrowState) -> Result<(), EngineError> {
    if !state.buy_performed {
        return Ok(());
    }

    if !state.is_funded() {
        return Err(EngineError::invalid("buy performed without a funder"));
    }

    let required = required_funder_contribution(state.proposer_contribution)?;
    if state.funder_contribution != required {
        return Err(EngineError::invalid(format!(
            "funder contribution {} is not 4x proposer contribution {}",
            state.funder_contribution, state.proposer_contribution
        )));
    }

    let total = expected_total_sell_in(state.proposer_contribution)?;
    if state.total_sell_in != total {
        return Err(EngineError::invalid(format!(
            "total sell-in {} != {} + {}",
            state.total_sell_in, state.proposer_contribution, state.funder_contribution
        )));
    }

    Ok(())
}

fn check_settlement(state: &EscrowState) -> Result<(), EngineError> {
    if !state.sell_performed {
        if !state.proposer_payout.is_zero() || !state.funder_payout.is_zero() {
            return Err(EngineError::invalid("payouts set before sale"));
        }
        return Ok(());
    }

    let paid_out = state
        .proposer_payout
        .checked_add(state.funder_payout)
        .ok_or_else(|| EngineError::invalid("payout sum overflows 256 bits"))?;
    if paid_out != state.final_sell_amount {
        return Err(EngineError::invalid(format!(
            "payouts {} + {} != final sell amount {}",
            state.proposer_payout, state.funder_payout, state.final_sell_amount
        )));
    }

    Ok(())
}
