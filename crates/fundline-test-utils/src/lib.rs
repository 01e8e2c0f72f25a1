//! Testing utilities for the Fundline workspace
//!
//! Shared fixtures and service setups for integration tests.

#![allow(missing_docs)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use fundline_campaign::{Address, Campaign, CampaignId, RewardTier};
use fundline_core::{ActionService, CampaignCatalog, Clock, InMemoryLedger, ManualClock, SimulatedLedger};
use std::sync::Arc;

pub const CREATOR: &str = "0xC0FFEE0000000000000000000000000000000001";
pub const BACKER: &str = "0xbacker0000000000000000000000000000000002";

/// Fixed instant every fixture is laid out around
pub fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
}

/// Campaign owned by [`CREATOR`] whose deadline is `now + offset`
pub fn campaign_ending_in(id: &str, goal: f64, raised: f64, offset: Duration) -> Campaign {
    Campaign::new(
        CampaignId::from(id),
        Address::from(CREATOR),
        format!("Test campaign {id}"),
        goal,
        reference_now() + offset,
    )
    .with_description("A campaign built for tests.")
    .with_amount_raised(raised)
}

/// Ongoing campaign with one 0.1 tier
pub fn ongoing_with_tier(id: &str) -> Campaign {
    campaign_ending_in(id, 10.0, 2.0, Duration::days(7)).with_rewards(vec![RewardTier::new(
        "t1",
        "Supporter",
        "Name in the credits.",
        0.1,
    )])
}

/// Service over an in-memory ledger with a manual clock at [`reference_now`]
pub async fn setup_test_service(campaigns: Vec<Campaign>) -> (ActionService, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(reference_now()));
    let ledger = Arc::new(InMemoryLedger::new(clock.clone()));
    build(campaigns, ledger, clock).await
}

/// Service over a simulated ledger with the given latency
pub async fn setup_simulated_service(
    campaigns: Vec<Campaign>,
    latency: std::time::Duration,
) -> (ActionService, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(reference_now()));
    let ledger = Arc::new(SimulatedLedger::new(InMemoryLedger::new(clock.clone()), latency));
    build(campaigns, ledger, clock).await
}

/// Service seeded with the reference campaigns
pub async fn setup_fixture_service() -> (ActionService, Arc<ManualClock>) {
    setup_test_service(fundline_core::reference_campaigns(reference_now())).await
}

async fn build(
    campaigns: Vec<Campaign>,
    ledger: Arc<dyn fundline_core::Ledger>,
    clock: Arc<ManualClock>,
) -> (ActionService, Arc<ManualClock>) {
    let catalog = CampaignCatalog::new();
    for campaign in campaigns {
        catalog.insert(campaign);
    }
    let shared_clock: Arc<dyn Clock> = clock.clone();
    let service = ActionService::new(Arc::new(catalog), ledger, shared_clock);
    service.open_accounts().await.unwrap();
    (service, clock)
}
