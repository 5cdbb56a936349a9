//! End-to-end: raw upstream JSON -> validated escrow -> view/outcome -> display JSON.
//!
//! Covers field naming (camelCase), string-typed amounts, and byte-identical
//! output for identical inputs.

use firstloss::present::{ExpectedOutcomeDisplay, RealizedOutcomeDisplay, TradeViewDisplay};
use firstloss::{
    classify_raw, compute_expected_outcome, compute_realized_outcome, Amount, Config,
    EngineError, ParseError, RawEscrowData, RawEscrowState, SettledAmounts, TimeSecs,
    TradeStatus, ViewerRole,
};
use serde_json::json;

const PROPOSER: &str = "0x1111111111111111111111111111111111111111";
const FUNDER: &str = "0x2222222222222222222222222222222222222222";
const DEADLINE: u64 = 1_700_000_000;

fn raw_data() -> RawEscrowData {
    serde_json::from_value(json!({
        "proposer": PROPOSER,
        "expirationTimestamp": DEADLINE.to_string(),
        "sellToken": "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
        "buyToken": "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2",
        "sellAmount": "20000000",
        "metadataUri": "long ETH into the merge"
    }))
    .unwrap()
}

fn raw_sold_state() -> RawEscrowState {
    serde_json::from_value(json!({
        "buyPerformed": "true",
        "sellPerformed": true,
        "withdrawProposerPerformed": false,
        "withdrawFunderPerformed": false,
        "funder": FUNDER,
        "proposerContribution": "20000000",
        "funderContribution": "80000000",
        "totalSellIn": "100000000",
        "buyTokenAmount": "50000000000000000000",
        "finalSellAmount": "150000000",
        "proposerPayout": "35000000",
        "funderPayout": "115000000"
    }))
    .unwrap()
}

fn render_view(viewer: Option<&str>) -> Vec<u8> {
    let now = TimeSecs::new(DEADLINE + 60);
    let view = classify_raw(&raw_data(), &raw_sold_state(), now, viewer).unwrap();
    let display = TradeViewDisplay::new(&view, &Config::default());
    serde_json::to_vec(&display).unwrap()
}

#[test]
fn test_trade_view_contract() {
    let body: serde_json::Value = serde_json::from_slice(&render_view(Some(FUNDER))).unwrap();

    assert_eq!(body["status"], "sold");
    assert_eq!(body["expirationTimestamp"], DEADLINE);
    assert_eq!(body["expiresAt"], "2023-11-14T22:13:20Z");
    assert_eq!(body["sellAmount"], "20");
    assert_eq!(body["totalSellIn"], "100");
    assert_eq!(body["buyTokenAmount"], "50");
    assert_eq!(body["finalSellAmount"], "150");
    assert_eq!(body["proposerPayout"], "35");
    assert_eq!(body["funderPayout"], "115");
    assert_eq!(body["isFunder"], true);
    assert_eq!(body["isProposer"], false);
    assert_eq!(body["canBuy"], false);
    assert_eq!(body["canSell"], false);
    assert_eq!(body["canWithdrawProposer"], true);
    assert_eq!(body["canWithdrawFunder"], true);
    assert!(body["funder"].is_string());
}

#[test]
fn test_trade_view_is_byte_identical() {
    assert_eq!(render_view(Some(PROPOSER)), render_view(Some(PROPOSER)));
    assert_eq!(render_view(None), render_view(None));
}

#[test]
fn test_unfunded_view_omits_funder() {
    let state: RawEscrowState = serde_json::from_value(json!({
        "buyPerformed": false,
        "sellPerformed": false,
        "withdrawProposerPerformed": false,
        "withdrawFunderPerformed": false,
        "proposerContribution": "0",
        "funderContribution": "0",
        "totalSellIn": "0",
        "buyTokenAmount": "0",
        "finalSellAmount": "0",
        "proposerPayout": "0",
        "funderPayout": "0"
    }))
    .unwrap();
    let view = classify_raw(&raw_data(), &state, TimeSecs::new(DEADLINE - 1), None).unwrap();
    assert_eq!(view.status, TradeStatus::Open);
    let body = serde_json::to_value(TradeViewDisplay::new(&view, &Config::default())).unwrap();
    assert!(body.get("funder").is_none());
    assert_eq!(body["status"], "open");
    assert_eq!(body["canBuy"], true);
}

#[test]
fn test_malformed_amount_fails_loudly() {
    let mut state = raw_sold_state();
    state.proposer_payout = Some(firstloss::domain::RawScalar::Text("35,000000".to_string()));
    match classify_raw(&raw_data(), &state, TimeSecs::new(0), None) {
        Err(EngineError::Parse(ParseError::Integer { field, .. })) => {
            assert_eq!(field, "proposerPayout")
        }
        other => panic!("expected Parse error, got {:?}", other),
    }
}

#[test]
fn test_malformed_viewer_fails_loudly() {
    match classify_raw(&raw_data(), &raw_sold_state(), TimeSecs::new(0), Some("bob")) {
        Err(EngineError::Parse(ParseError::Address { field, .. })) => {
            assert_eq!(field, "viewer")
        }
        other => panic!("expected Parse error, got {:?}", other),
    }
}

#[test]
fn test_expected_outcome_contract() {
    let outcome = compute_expected_outcome(
        Amount::from_u64(20_000_000),
        Amount::from_u64(100_000_000),
        Some(Amount::from_u64(90_000_000)),
    )
    .unwrap()
    .unwrap();
    let display = ExpectedOutcomeDisplay::new(&outcome, &Config::default());
    let body = serde_json::to_value(display).unwrap();
    assert_eq!(
        body,
        json!({
            "isProfit": false,
            "proposerExpectedPayout": "10",
            "funderExpectedPayout": "80",
            "funderProtection": "10",
            "proposerBonus": "0"
        })
    );
}

#[test]
fn test_realized_outcome_contract() {
    let view = classify_raw(
        &raw_data(),
        &raw_sold_state(),
        TimeSecs::new(DEADLINE + 60),
        Some(PROPOSER),
    )
    .unwrap();
    let settled = SettledAmounts::from(&view.state);
    let outcome = compute_realized_outcome(&settled, ViewerRole::of(&view)).unwrap();
    let display = RealizedOutcomeDisplay::new(&outcome, &Config::default());
    let body = serde_json::to_value(display).unwrap();
    assert_eq!(
        body,
        json!({
            "isProfit": true,
            "positionPnl": "50",
            "positionPnlPct": "50.00",
            "viewer": {
                "role": "proposer",
                "contribution": "20",
                "payout": "35",
                "pnl": "15",
                "pnlPct": "75.00"
            },
            "bonus": "5"
        })
    );
}

#[test]
fn test_realized_loss_contract_for_observer() {
    let settled = SettledAmounts {
        proposer_contribution: Amount::from_u64(20_000_000),
        funder_contribution: Amount::from_u64(80_000_000),
        total_sell_in: Amount::from_u64(100_000_000),
        final_sell_amount: Amount::from_u64(70_500_000),
        proposer_payout: Amount::ZERO,
        funder_payout: Amount::from_u64(70_500_000),
    };
    let outcome = compute_realized_outcome(&settled, ViewerRole::Observer).unwrap();
    let display = RealizedOutcomeDisplay::new(&outcome, &Config::default());
    let body = serde_json::to_value(display).unwrap();
    assert_eq!(
        body,
        json!({
            "isProfit": false,
            "positionPnl": "-29.5",
            "positionPnlPct": "-29.50",
            "protection": "20"
        })
    );
}
