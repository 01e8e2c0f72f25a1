//! Lifecycle evaluator properties and reference scenarios
//!
//! Covers the full decision surface:
//! - phase derivation for every combination of deadline and funding
//! - progress ratio bounds
//! - case-insensitive creator matching
//! - the three reference campaigns (withdrawable, refundable, ongoing)
//! - donation input validation

use chrono::{DateTime, Duration, TimeZone, Utc};
use fundline_campaign::{Address, Campaign, CampaignId, RewardTier};
use fundline_lifecycle::prelude::*;
use fundline_lifecycle::{progress_percent, Notice};
use proptest::prelude::*;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
}

fn campaign(creator: &str, goal: f64, raised: f64, deadline: DateTime<Utc>) -> Campaign {
    Campaign::new(CampaignId::from("c"), Address::from(creator), "Scenario", goal, deadline)
        .with_amount_raised(raised)
}

proptest! {
    #[test]
    fn prop_expired_and_funded_is_successful(
        goal in 0.01f64..1_000.0,
        surplus in 0.0f64..1_000.0,
        secs_past in 1i64..10_000_000,
    ) {
        let deadline = now() - Duration::seconds(secs_past);
        let phase = Phase::derive(goal, goal + surplus, deadline, now());
        prop_assert_eq!(phase, Phase::SuccessfulEnd);
    }

    #[test]
    fn prop_expired_and_short_is_failed(
        goal in 0.02f64..1_000.0,
        fraction in 0.0f64..0.999,
        secs_past in 1i64..10_000_000,
    ) {
        let deadline = now() - Duration::seconds(secs_past);
        let phase = Phase::derive(goal, goal * fraction, deadline, now());
        prop_assert_eq!(phase, Phase::FailedEnd);
    }

    #[test]
    fn prop_before_deadline_is_ongoing(
        goal in 0.01f64..1_000.0,
        raised in 0.0f64..10_000.0,
        secs_left in 0i64..10_000_000,
    ) {
        let deadline = now() + Duration::seconds(secs_left);
        prop_assert_eq!(Phase::derive(goal, raised, deadline, now()), Phase::Ongoing);
    }

    #[test]
    fn prop_progress_within_bounds(
        goal in 0.0001f64..1_000_000.0,
        raised in 0.0f64..10_000_000.0,
    ) {
        let progress = progress_percent(raised, goal);
        prop_assert!((0.0..=100.0).contains(&progress));
    }

    #[test]
    fn prop_creator_match_ignores_case(hex in "[0-9a-fA-F]{40}") {
        let creator = format!("0x{}", hex.to_uppercase());
        let c = campaign(&creator, 10.0, 0.0, now());
        let viewer = Viewer::connected(format!("0x{}", hex.to_lowercase()).as_str());
        prop_assert!(evaluate(&c, &viewer, now()).is_creator);
    }

    #[test]
    fn prop_anonymous_never_gets_fund_action(
        raised in 0.0f64..200.0,
        offset in -1_000_000i64..1_000_000,
    ) {
        let c = campaign("0xabc", 100.0, raised, now() + Duration::seconds(offset));
        let eval = evaluate(&c, &Viewer::Anonymous, now());
        prop_assert_eq!(eval.action, PermittedAction::ConnectIdentity);
        prop_assert!(eval.action.kind().is_none());
    }
}

#[test]
fn creator_case_insensitive_reference() {
    let c = campaign("0xABC", 10.0, 0.0, now());
    assert!(evaluate(&c, &Viewer::connected("0xabc"), now()).is_creator);
}

#[test]
fn scenario_goal_met_withdrawable() {
    let c = campaign("0xZ1A2B3C4D5E6F7G8H9I0", 80.0, 85.0, now() - Duration::days(1));

    let creator = evaluate(&c, &Viewer::connected("0xz1a2b3c4d5e6f7g8h9i0"), now());
    assert_eq!(creator.phase, Phase::SuccessfulEnd);
    assert_eq!(creator.action, PermittedAction::Withdraw { amount: 85.0 });

    let backer = evaluate(&c, &Viewer::connected("0xbacker"), now());
    assert_eq!(backer.phase, Phase::SuccessfulEnd);
    assert_eq!(backer.action, PermittedAction::None(Notice::GoalReached));
    assert!(backer.action.kind().is_none());
}

#[test]
fn scenario_goal_not_met_refundable() {
    let c = campaign("0xP1Q2R3S4T5U6V7W8X9Y0", 100.0, 30.0, now() - Duration::days(2));

    let backer = evaluate(&c, &Viewer::connected("0xbacker"), now());
    assert_eq!(backer.phase, Phase::FailedEnd);
    assert_eq!(backer.action, PermittedAction::ClaimRefund);

    let creator = evaluate(&c, &Viewer::connected("0xP1Q2R3S4T5U6V7W8X9Y0"), now());
    assert_eq!(creator.phase, Phase::FailedEnd);
    assert!(creator.action.kind().is_none());
}

#[test]
fn scenario_ongoing() {
    let c = campaign("0x1A2B3C4D5E6F7G8H9I0J", 100.0, 75.0, now() + Duration::days(30));

    let backer = evaluate(&c, &Viewer::connected("0xbacker"), now());
    assert_eq!(backer.phase, Phase::Ongoing);
    assert_eq!(backer.action, PermittedAction::Contribute);
    assert_eq!(backer.progress, 75.0);

    let creator = evaluate(&c, &Viewer::connected("0x1a2b3c4d5e6f7g8h9i0j"), now());
    assert_eq!(creator.action, PermittedAction::None(Notice::WithdrawAfterSuccess));
}

#[test]
fn scenario_donation_validation() {
    assert!(matches!(
        validate_donation(Some("-5"), None),
        Err(DonationError::InvalidDonationAmount { .. })
    ));

    let tier = RewardTier::new("r1-1", "Bronze Supporter NFT", "Early support", 0.1);
    assert!(matches!(
        validate_donation(Some("0.05"), Some(&tier)),
        Err(DonationError::BelowTierMinimum { .. })
    ));
}
