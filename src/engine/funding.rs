//! Fixed 20/80 contribution structure.

use crate::domain::{Amount, EscrowData};
use crate::error::EngineError;
use serde::Serialize;

/// Funder puts in 4x the proposer's stake (20% / 80%).
pub const FUNDER_MULTIPLIER: u64 = 4;

/// Share of profit paid to the proposer on top of their capital.
pub const PROPOSER_PROFIT_SHARE_PCT: u64 = 30;

pub fn required_funder_contribution(proposer_contribution: Amount) -> Result<Amount, EngineError> {
    proposer_contribution
        .checked_mul(Amount::from_u64(FUNDER_MULTIPLIER))
        .ok_or_else(|| EngineError::invalid("funder contribution overflows 256 bits"))
}

/// Cost basis once funded: proposer + 4x proposer.
pub fn expected_total_sell_in(proposer_contribution: Amount) -> Result<Amount, EngineError> {
    required_funder_contribution(proposer_contribution)?
        .checked_add(proposer_contribution)
        .ok_or_else(|| EngineError::invalid("total sell-in overflows 256 bits"))
}

/// What funding an open escrow would commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingRequirement {
    pub proposer_contribution: Amount,
    pub funder_contribution: Amount,
    pub total_sell_in: Amount,
}

impl FundingRequirement {
    pub fn for_escrow(data: &EscrowData) -> Result<Self, EngineError> {
        let proposer_contribution = data.sell_amount;
        Ok(FundingRequirement {
            proposer_contribution,
            funder_contribution: required_funder_contribution(proposer_contribution)?,
            total_sell_in: expected_total_sell_in(proposer_contribution)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Address, TimeSecs};
    use alloy_primitives::U256;

    #[test]
    fn test_twenty_eighty_split() {
        let p = Amount::from_u64(20_000_000);
        assert_eq!(required_funder_contribution(p).unwrap(), Amount::from_u64(80_000_000));
        assert_eq!(expected_total_sell_in(p).unwrap(), Amount::from_u64(100_000_000));
    }

    #[test]
    fn test_overflow_is_rejected() {
        let p = Amount::new(U256::MAX);
        assert!(matches!(
            required_funder_contribution(p),
            Err(EngineError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_requirement_for_escrow() {
        let data = EscrowData {
            proposer: Address::ZERO,
            expiration_timestamp: TimeSecs(0),
            sell_token: Address::ZERO,
            buy_token: Address::ZERO,
            sell_amount: Amount::from_u64(5_000_000),
            metadata_uri: String::new(),
        };
        let req = FundingRequirement::for_escrow(&data).unwrap();
        assert_eq!(req.funder_contribution, Amount::from_u64(20_000_000));
        assert_eq!(req.total_sell_in, Amount::from_u64(25_000_000));
    }
}
