//! Escrow records: the immutable creation data and the polled mutable state.
//!
//! Upstream readers hand over loosely typed JSON (numbers as decimal strings,
//! booleans sometimes as strings). `RawEscrowData` / `RawEscrowState` accept
//! that shape; `TryFrom` turns it into validated values before any arithmetic.

use crate::domain::{Address, Amount, TimeSecs};
use crate::error::ParseError;
use serde::{Deserialize, Serialize};

/// Immutable once the escrow is created on-chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EscrowData {
    pub proposer: Address,
    /// Funding deadline.
    pub expiration_timestamp: TimeSecs,
    pub sell_token: Address,
    pub buy_token: Address,
    /// The proposer's stated stake before funding.
    pub sell_amount: Amount,
    /// Opaque annotation, e.g. the trade thesis.
    pub metadata_uri: String,
}

/// Mutable on-chain state. Every flag is a one-way transition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EscrowState {
    pub buy_performed: bool,
    pub sell_performed: bool,
    pub withdraw_proposer_performed: bool,
    pub withdraw_funder_performed: bool,
    /// Zero address until funded.
    pub funder: Address,
    pub proposer_contribution: Amount,
    pub funder_contribution: Amount,
    /// Cost basis of the bought position: proposer + funder contributions.
    pub total_sell_in: Amount,
    pub buy_token_amount: Amount,
    /// Realized proceeds, only meaningful once sold.
    pub final_sell_amount: Amount,
    pub proposer_payout: Amount,
    pub funder_payout: Amount,
}

impl EscrowState {
    pub fn is_funded(&self) -> bool {
        !self.funder.is_zero()
    }
}

/// A scalar as it arrives from the chain reader or cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawScalar {
    Bool(bool),
    Unsigned(u64),
    Text(String),
}

impl RawScalar {
    fn describe(&self) -> String {
        match self {
            RawScalar::Bool(b) => b.to_string(),
            RawScalar::Unsigned(n) => n.to_string(),
            RawScalar::Text(s) => s.clone(),
        }
    }

    pub fn to_amount(&self, field: &'static str) -> Result<Amount, ParseError> {
        match self {
            RawScalar::Unsigned(n) => Ok(Amount::from_u64(*n)),
            RawScalar::Text(s) => Amount::parse_field(field, s),
            RawScalar::Bool(_) => Err(ParseError::Integer {
                field,
                value: self.describe(),
            }),
        }
    }

    pub fn to_time(&self, field: &'static str) -> Result<TimeSecs, ParseError> {
        match self {
            RawScalar::Unsigned(n) => Ok(TimeSecs(*n)),
            RawScalar::Text(s) => TimeSecs::parse_field(field, s),
            RawScalar::Bool(_) => Err(ParseError::Integer {
                field,
                value: self.describe(),
            }),
        }
    }

    /// Only `true`/`false`, as JSON booleans or exact lowercase strings.
    pub fn to_bool(&self, field: &'static str) -> Result<bool, ParseError> {
        match self {
            RawScalar::Bool(b) => Ok(*b),
            RawScalar::Text(s) if s == "true" => Ok(true),
            RawScalar::Text(s) if s == "false" => Ok(false),
            _ => Err(ParseError::Boolean {
                field,
                value: self.describe(),
            }),
        }
    }
}

fn required<'a, T>(field: &'static str, value: &'a Option<T>) -> Result<&'a T, ParseError> {
    value.as_ref().ok_or(ParseError::Missing { field })
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawEscrowData {
    pub proposer: Option<String>,
    pub expiration_timestamp: Option<RawScalar>,
    pub sell_token: Option<String>,
    pub buy_token: Option<String>,
    pub sell_amount: Option<RawScalar>,
    pub metadata_uri: Option<String>,
}

impl TryFrom<&RawEscrowData> for EscrowData {
    type Error = ParseError;

    fn try_from(raw: &RawEscrowData) -> Result<Self, Self::Error> {
        Ok(EscrowData {
            proposer: Address::parse_field("proposer", required("proposer", &raw.proposer)?)?,
            expiration_timestamp: required("expirationTimestamp", &raw.expiration_timestamp)?
                .to_time("expirationTimestamp")?,
            sell_token: Address::parse_field("sellToken", required("sellToken", &raw.sell_token)?)?,
            buy_token: Address::parse_field("buyToken", required("buyToken", &raw.buy_token)?)?,
            sell_amount: required("sellAmount", &raw.sell_amount)?.to_amount("sellAmount")?,
            metadata_uri: raw.metadata_uri.clone().unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawEscrowState {
    pub buy_performed: Option<RawScalar>,
    pub sell_performed: Option<RawScalar>,
    pub withdraw_proposer_performed: Option<RawScalar>,
    pub withdraw_funder_performed: Option<RawScalar>,
    pub funder: Option<String>,
    pub proposer_contribution: Option<RawScalar>,
    pub funder_contribution: Option<RawScalar>,
    pub total_sell_in: Option<RawScalar>,
    pub buy_token_amount: Option<RawScalar>,
    pub final_sell_amount: Option<RawScalar>,
    pub proposer_payout: Option<RawScalar>,
    pub funder_payout: Option<RawScalar>,
}

impl TryFrom<&RawEscrowState> for EscrowState {
    type Error = ParseError;

    fn try_from(raw: &RawEscrowState) -> Result<Self, Self::Error> {
        let flag = |field: &'static str, v: &Option<RawScalar>| required(field, v)?.to_bool(field);
        let amount =
            |field: &'static str, v: &Option<RawScalar>| required(field, v)?.to_amount(field);

        Ok(EscrowState {
            buy_performed: flag("buyPerformed", &raw.buy_performed)?,
            sell_performed: flag("sellPerformed", &raw.sell_performed)?,
            withdraw_proposer_performed: flag(
                "withdrawProposerPerformed",
                &raw.withdraw_proposer_performed,
            )?,
            withdraw_funder_performed: flag(
                "withdrawFunderPerformed",
                &raw.withdraw_funder_performed,
            )?,
            funder: Address::parse_optional_field("funder", raw.funder.as_deref())?,
            proposer_contribution: amount("proposerContribution", &raw.proposer_contribution)?,
            funder_contribution: amount("funderContribution", &raw.funder_contribution)?,
            total_sell_in: amount("totalSellIn", &raw.total_sell_in)?,
            buy_token_amount: amount("buyTokenAmount", &raw.buy_token_amount)?,
            final_sell_amount: amount("finalSellAmount", &raw.final_sell_amount)?,
            proposer_payout: amount("proposerPayout", &raw.proposer_payout)?,
            funder_payout: amount("funderPayout", &raw.funder_payout)?,
        })
    }
}
