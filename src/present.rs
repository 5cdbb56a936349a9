//! Formatting of engine outputs into human-decimal, JSON-ready views.
//!
//! The engine only speaks base units. Everything here is display: decimals
//! come from [`Config`], and nothing flows back into settlement math.

use crate::config::Config;
use crate::domain::{Address, Amount, Decimal};
use crate::engine::{ExpectedOutcome, RealizedOutcome, TradeStatus, TradeView, ViewerRole};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedOutcomeDisplay {
    pub is_profit: bool,
    pub proposer_expected_payout: Decimal,
    pub funder_expected_payout: Decimal,
    pub funder_protection: Decimal,
    pub proposer_bonus: Decimal,
}

impl ExpectedOutcomeDisplay {
    pub fn new(outcome: &ExpectedOutcome, config: &Config) -> Self {
        let quote = |a: Amount| Decimal::from_base_units(a, config.quote_decimals);
        ExpectedOutcomeDisplay {
            is_profit: outcome.is_profit,
            proposer_expected_payout: quote(outcome.proposer_expected_payout),
            funder_expected_payout: quote(outcome.funder_expected_payout),
            funder_protection: quote(outcome.funder_protection),
            proposer_bonus: quote(outcome.proposer_bonus),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerPnlDisplay {
    pub role: ViewerRole,
    pub contribution: Decimal,
    pub payout: Decimal,
    pub pnl: Decimal,
    pub pnl_pct: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RealizedOutcomeDisplay {
    pub is_profit: bool,
    pub position_pnl: Decimal,
    pub position_pnl_pct: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewer: Option<ViewerPnlDisplay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bonus: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protection: Option<Decimal>,
}

impl RealizedOutcomeDisplay {
    pub fn new(outcome: &RealizedOutcome, config: &Config) -> Self {
        let decimals = config.quote_decimals;
        let quote = |a: Amount| Decimal::from_base_units(a, decimals);

        let viewer = outcome.viewer.map(|v| ViewerPnlDisplay {
            role: v.role,
            contribution: quote(v.contribution),
            payout: quote(v.payout),
            pnl: Decimal::from_signed_base_units(v.pnl, decimals),
            pnl_pct: Decimal::from_percent(v.pnl_pct),
        });

        RealizedOutcomeDisplay {
            is_profit: outcome.is_profit,
            position_pnl: Decimal::from_signed_base_units(outcome.position_pnl, decimals),
            position_pnl_pct: Decimal::from_percent(outcome.position_pnl_pct),
            viewer,
            bonus: outcome.bonus.map(quote),
            protection: outcome.protection.map(quote),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeViewDisplay {
    pub proposer: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funder: Option<Address>,
    pub status: TradeStatus,
    pub expiration_timestamp: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    pub sell_token: Address,
    pub buy_token: Address,
    pub sell_amount: Decimal,
    pub metadata_uri: String,
    pub proposer_contribution: Decimal,
    pub funder_contribution: Decimal,
    pub total_sell_in: Decimal,
    pub buy_token_amount: Decimal,
    pub final_sell_amount: Decimal,
    pub proposer_payout: Decimal,
    pub funder_payout: Decimal,
    pub withdraw_proposer_performed: bool,
    pub withdraw_funder_performed: bool,
    pub is_proposer: bool,
    pub is_funder: bool,
    pub can_buy: bool,
    pub can_sell: bool,
    pub can_withdraw_proposer: bool,
    pub can_withdraw_funder: bool,
}

impl TradeViewDisplay {
    pub fn new(view: &TradeView, config: &Config) -> Self {
        let quote = |a: Amount| Decimal::from_base_units(a, config.quote_decimals);
        let data = &view.data;
        let state = &view.state;

        TradeViewDisplay {
            proposer: data.proposer,
            funder: state.is_funded().then_some(state.funder),
            status: view.status,
            expiration_timestamp: data.expiration_timestamp.as_u64(),
            expires_at: data.expiration_timestamp.to_datetime(),
            sell_token: data.sell_token,
            buy_token: data.buy_token,
            sell_amount: quote(data.sell_amount),
            metadata_uri: data.metadata_uri.clone(),
            proposer_contribution: quote(state.proposer_contribution),
            funder_contribution: quote(state.funder_contribution),
            total_sell_in: quote(state.total_sell_in),
            buy_token_amount: Decimal::from_base_units(
                state.buy_token_amount,
                config.buy_token_decimals,
            ),
            final_sell_amount: quote(state.final_sell_amount),
            proposer_payout: quote(state.proposer_payout),
            funder_payout: quote(state.funder_payout),
            withdraw_proposer_performed: state.withdraw_proposer_performed,
            withdraw_funder_performed: state.withdraw_funder_performed,
            is_proposer: view.is_proposer,
            is_funder: view.is_funder,
            can_buy: view.can_buy,
            can_sell: view.can_sell,
            can_withdraw_proposer: view.can_withdraw_proposer,
            can_withdraw_funder: view.can_withdraw_funder,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EscrowData, EscrowState, TimeSecs};
    use crate::engine::{classify, compute_expected_outcome};
    use std::str::FromStr;

    #[test]
    fn test_expected_display_uses_quote_decimals() {
        let outcome = compute_expected_outcome(
            Amount::from_u64(20_000_000),
            Amount::from_u64(100_000_000),
            Some(Amount::from_u64(150_000_000)),
        )
        .unwrap()
        .unwrap();
        let display = ExpectedOutcomeDisplay::new(&outcome, &Config::default());
        let json = serde_json::to_value(&display).unwrap();
        assert_eq!(json["isProfit"], true);
        assert_eq!(json["proposerExpectedPayout"], "35");
        assert_eq!(json["funderExpectedPayout"], "115");
        assert_eq!(json["funderProtection"], "0");
        assert_eq!(json["proposerBonus"], "5");
    }

    #[test]
    fn test_funded_view_with_large_buy_amount() {
        let data = EscrowData {
            proposer: Address::from_str("0x1111111111111111111111111111111111111111").unwrap(),
            expiration_timestamp: TimeSecs::new(1_700_000_000),
            sell_token: Address::ZERO,
            buy_token: Address::ZERO,
            sell_amount: Amount::from_u64(20_000_000),
            metadata_uri: String::new(),
        };
        // 10^29 base units, beyond a 96-bit mantissa.
        let buy_token_amount =
            Amount::parse_field("buyTokenAmount", "100000000000000000000000000000").unwrap();
        let state = EscrowState {
            buy_performed: true,
            funder: Address::from_str("0x2222222222222222222222222222222222222222").unwrap(),
            proposer_contribution: Amount::from_u64(20_000_000),
            funder_contribution: Amount::from_u64(80_000_000),
            total_sell_in: Amount::from_u64(100_000_000),
            buy_token_amount,
            ..EscrowState::default()
        };
        let view = classify(data, state, TimeSecs::new(1_600_000_000), None);
        assert_eq!(view.status, TradeStatus::Funded);

        let json = serde_json::to_value(TradeViewDisplay::new(&view, &Config::default())).unwrap();
        assert_eq!(json["buyTokenAmount"], "100000000000");
        assert_eq!(json["totalSellIn"], "100");
    }
}
