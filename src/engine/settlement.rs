//! Profit/loss split between proposer and funder.
//!
//! All arithmetic is unsigned 256-bit with floor division. Payouts are always
//! computed as `funder = exit - proposer` so the two sides sum to the exit
//! value exactly.

use super::funding::PROPOSER_PROFIT_SHARE_PCT;
use super::lifecycle::ViewerRole;
use crate::domain::{Amount, EscrowState, Percent, SignedAmount};
use crate::error::EngineError;
use serde::Serialize;

/// Result of applying the split formula to an exit value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split {
    pub is_profit: bool,
    pub proposer_payout: Amount,
    pub funder_payout: Amount,
    /// Loss absorbed by the proposer's stake. Zero in the profit case.
    pub funder_protection: Amount,
    /// Proposer payout above a proportional return. Zero in the loss case.
    pub proposer_bonus: Amount,
}

fn overflow(what: &str) -> EngineError {
    EngineError::invalid(format!("{} overflows 256 bits", what))
}

/// `floor(contribution * exit / cost_basis)`, or zero with no cost basis.
fn direct_return(
    contribution: Amount,
    exit: Amount,
    cost_basis: Amount,
) -> Result<Amount, EngineError> {
    if cost_basis.is_zero() {
        return Ok(Amount::ZERO);
    }
    contribution
        .mul_div_floor(exit, cost_basis)
        .ok_or_else(|| overflow("direct return"))
}

fn check_cost_basis(contribution: Amount, cost_basis: Amount) -> Result<(), EngineError> {
    if cost_basis.is_zero() && !contribution.is_zero() {
        return Err(EngineError::invalid(format!(
            "cost basis is 0 but proposer contribution is {}",
            contribution
        )));
    }
    if contribution > cost_basis {
        return Err(EngineError::invalid(format!(
            "proposer contribution {} exceeds cost basis {}",
            contribution, cost_basis
        )));
    }
    Ok(())
}

/// Apply the split formula.
///
/// * `contribution` - proposer's stake `P`
/// * `cost_basis` - total sell-in `S`
/// * `exit` - exit value `R`
pub fn split(contribution: Amount, cost_basis: Amount, exit: Amount) -> Result<Split, EngineError> {
    check_cost_basis(contribution, cost_basis)?;

    if exit >= cost_basis {
        let profit = exit.saturating_sub(cost_basis);
        let share = profit
            .mul_div_floor(
                Amount::from_u64(PROPOSER_PROFIT_SHARE_PCT),
                Amount::from_u64(100),
            )
            .ok_or_else(|| overflow("profit share"))?;
        let proposer_payout = contribution
            .checked_add(share)
            .ok_or_else(|| overflow("proposer payout"))?;
        // P <= S <= R and share <= profit, so P + share <= R.
        let funder_payout = exit.saturating_sub(proposer_payout);
        let proposer_bonus =
            proposer_payout.saturating_sub(direct_return(contribution, exit, cost_basis)?);

        return Ok(Split {
            is_profit: true,
            proposer_payout,
            funder_payout,
            funder_protection: Amount::ZERO,
            proposer_bonus,
        });
    }

    let loss = cost_basis.saturating_sub(exit);
    let (proposer_payout, funder_protection) = if loss >= contribution {
        (Amount::ZERO, contribution)
    } else {
        (contribution.saturating_sub(loss), loss)
    };
    // P - loss = R - (S - P) <= R.
    let funder_payout = exit.saturating_sub(proposer_payout);

    Ok(Split {
        is_profit: false,
        proposer_payout,
        funder_payout,
        funder_protection,
        proposer_bonus: Amount::ZERO,
    })
}

/// Projected outcome of a live funded position at a mark-to-market value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedOutcome {
    pub is_profit: bool,
    pub proposer_expected_payout: Amount,
    pub funder_expected_payout: Amount,
    pub funder_protection: Amount,
    pub proposer_bonus: Amount,
}

/// Expected outcome if the position were closed at `mark_to_market`.
///
/// `Ok(None)` means the outcome is currently unknowable (no price), which is
/// not the same as a zero outcome. Inputs are validated even without a price.
pub fn compute_expected_outcome(
    contribution: Amount,
    cost_basis: Amount,
    mark_to_market: Option<Amount>,
) -> Result<Option<ExpectedOutcome>, EngineError> {
    check_cost_basis(contribution, cost_basis)?;

    let Some(exit) = mark_to_market else {
        tracing::debug!(
            contribution = %contribution,
            cost_basis = %cost_basis,
            "No mark-to-market value, outcome unknown"
        );
        return Ok(None);
    };

    let split = split(contribution, cost_basis, exit)?;

    tracing::debug!(
        is_profit = split.is_profit,
        exit = %exit,
        proposer_payout = %split.proposer_payout,
        funder_payout = %split.funder_payout,
        "Computed expected outcome"
    );

    Ok(Some(ExpectedOutcome {
        is_profit: split.is_profit,
        proposer_expected_payout: split.proposer_payout,
        funder_expected_payout: split.funder_payout,
        funder_protection: split.funder_protection,
        proposer_bonus: split.proposer_bonus,
    }))
}

/// Amounts fixed on-chain once a position is sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SettledAmounts {
    pub proposer_contribution: Amount,
    pub funder_contribution: Amount,
    pub total_sell_in: Amount,
    pub final_sell_amount: Amount,
    pub proposer_payout: Amount,
    pub funder_payout: Amount,
}

impl From<&EscrowState> for SettledAmounts {
    fn from(state: &EscrowState) -> Self {
        SettledAmounts {
            proposer_contribution: state.proposer_contribution,
            funder_contribution: state.funder_contribution,
            total_sell_in: state.total_sell_in,
            final_sell_amount: state.final_sell_amount,
            proposer_payout: state.proposer_payout,
            funder_payout: state.funder_payout,
        }
    }
}

/// P&L from one party's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerPnl {
    pub role: ViewerRole,
    pub contribution: Amount,
    pub payout: Amount,
    pub pnl: SignedAmount,
    pub pnl_pct: Percent,
}

/// Presentational metrics for a sold position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RealizedOutcome {
    pub is_profit: bool,
    /// `finalSellAmount - totalSellIn`.
    pub position_pnl: SignedAmount,
    pub position_pnl_pct: Percent,
    /// Absent for observers.
    pub viewer: Option<ViewerPnl>,
    /// Proposer payout above a proportional return; only when profitable.
    pub bonus: Option<Amount>,
    /// Proposer stake consumed protecting the funder; only when not profitable.
    pub protection: Option<Amount>,
}

/// Derive display metrics from settled amounts. Payouts are taken as given.
pub fn compute_realized_outcome(
    settled: &SettledAmounts,
    viewer_role: ViewerRole,
) -> Result<RealizedOutcome, EngineError> {
    if settled.total_sell_in.is_zero()
        && !(settled.proposer_contribution.is_zero() && settled.funder_contribution.is_zero())
    {
        return Err(EngineError::invalid(format!(
            "total sell-in is 0 but contributions are {} / {}",
            settled.proposer_contribution, settled.funder_contribution
        )));
    }

    let paid_out = settled
        .proposer_payout
        .checked_add(settled.funder_payout)
        .ok_or_else(|| overflow("payout sum"))?;
    if paid_out != settled.final_sell_amount {
        return Err(EngineError::invalid(format!(
            "payouts {} + {} do not sum to final sell amount {}",
            settled.proposer_payout, settled.funder_payout, settled.final_sell_amount
        )));
    }

    let position_pnl = SignedAmount::delta(settled.final_sell_amount, settled.total_sell_in);
    let position_pnl_pct = Percent::of(position_pnl, settled.total_sell_in);

    let viewer = match viewer_role {
        ViewerRole::Proposer => Some((settled.proposer_contribution, settled.proposer_payout)),
        ViewerRole::Funder => Some((settled.funder_contribution, settled.funder_payout)),
        ViewerRole::Observer => None,
    }
    .map(|(contribution, payout)| {
        let pnl = SignedAmount::delta(payout, contribution);
        ViewerPnl {
            role: viewer_role,
            contribution,
            payout,
            pnl,
            pnl_pct: Percent::of(pnl, contribution),
        }
    });

    let is_profit = settled.final_sell_amount >= settled.total_sell_in;
    let (bonus, protection) = if is_profit {
        let direct = direct_return(
            settled.proposer_contribution,
            settled.final_sell_amount,
            settled.total_sell_in,
        )?;
        (Some(settled.proposer_payout.saturating_sub(direct)), None)
    } else {
        (
            None,
            Some(
                settled
                    .proposer_contribution
                    .saturating_sub(settled.proposer_payout),
            ),
        )
    };

    tracing::debug!(
        is_profit,
        position_pnl = %position_pnl,
        position_pnl_pct = %position_pnl_pct,
        viewer_role = ?viewer_role,
        "Computed realized outcome"
    );

    Ok(RealizedOutcome {
        is_profit,
        position_pnl,
        position_pnl_pct,
        viewer,
        bonus,
        protection,
    })
}
