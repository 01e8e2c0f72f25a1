//! In-memory campaign catalog and creator profiles

use crate::fixtures::{reference_backers, reference_campaigns};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use fundline_campaign::{
    Address, Campaign, CampaignComment, CampaignDraft, CampaignId, DraftError,
};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Aggregate statistics for one creator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorProfile {
    /// Creator identity
    pub creator: Address,
    /// Number of campaigns created
    pub total_campaigns: usize,
    /// Campaigns whose raised amount reached the goal
    pub successful_campaigns: usize,
    /// `successful / total`, in percent
    pub success_rate: f64,
    /// Sum raised across all campaigns
    pub total_raised: f64,
    /// Reputation score in `[0, 100]`
    pub reputation: u32,
}

impl CreatorProfile {
    /// Aggregate over a creator's campaigns; `None` if there are none
    #[must_use]
    pub fn from_campaigns(creator: Address, campaigns: &[Campaign]) -> Option<Self> {
        if campaigns.is_empty() {
            return None;
        }

        let total_campaigns = campaigns.len();
        let successful_campaigns = campaigns.iter().filter(|c| c.goal_reached()).count();
        let success_rate = successful_campaigns as f64 / total_campaigns as f64 * 100.0;
        let total_raised: f64 = campaigns.iter().map(|c| c.amount_raised).sum();

        let score = success_rate * 0.6 + total_campaigns as f64 * 2.0 + total_raised * 0.1;
        let reputation = score.clamp(0.0, 100.0).round() as u32;

        Some(Self {
            creator,
            total_campaigns,
            successful_campaigns,
            success_rate,
            total_raised,
            reputation,
        })
    }
}

/// Campaign store
///
/// Also remembers which backers funded a campaign before its ledger
/// account existed, so those contributions can be attributed on opening.
#[derive(Debug)]
pub struct CampaignCatalog {
    campaigns: DashMap<CampaignId, Campaign>,
    opening_backers: DashMap<CampaignId, Vec<(Address, f64)>>,
    next_id: AtomicU64,
}

impl Default for CampaignCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl CampaignCatalog {
    /// Empty catalog
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            campaigns: DashMap::new(),
            opening_backers: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Catalog seeded with the reference campaigns
    #[must_use]
    pub fn with_fixtures(now: DateTime<Utc>) -> Self {
        let catalog = Self::new();
        for campaign in reference_campaigns(now) {
            catalog.insert(campaign);
        }
        for (id, backer, amount) in reference_backers() {
            catalog.add_opening_backer(&id, backer, amount);
        }
        catalog
    }

    /// Insert or replace a campaign
    ///
    /// Numeric ids advance the id counter so `create` never collides.
    pub fn insert(&self, campaign: Campaign) {
        if let Ok(n) = campaign.id.as_str().parse::<u64>() {
            self.next_id.fetch_max(n.saturating_add(1), Ordering::SeqCst);
        }
        self.campaigns.insert(campaign.id.clone(), campaign);
    }

    /// Record a contribution made before the campaign's ledger account existed
    pub fn add_opening_backer(&self, id: &CampaignId, backer: Address, amount: f64) {
        self.opening_backers
            .entry(id.clone())
            .or_default()
            .push((backer, amount));
    }

    /// Contributions to attribute when the ledger account is opened
    #[must_use]
    pub fn opening_backers(&self, id: &CampaignId) -> Vec<(Address, f64)> {
        self.opening_backers
            .get(id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Validate a draft and publish it under a fresh id
    ///
    /// # Errors
    /// `DraftError` if the draft breaks a creation-form rule
    pub fn create(
        &self,
        draft: CampaignDraft,
        creator: Address,
        now: DateTime<Utc>,
    ) -> Result<Campaign, DraftError> {
        draft.validate(now)?;

        let id = CampaignId::new(self.next_id.fetch_add(1, Ordering::SeqCst).to_string());
        let campaign = draft.into_campaign(id, creator);
        tracing::info!(campaign = %campaign.id, creator = %campaign.creator, "campaign created");

        self.campaigns.insert(campaign.id.clone(), campaign.clone());
        Ok(campaign)
    }

    /// Snapshot of one campaign
    #[must_use]
    pub fn get(&self, id: &CampaignId) -> Option<Campaign> {
        self.campaigns.get(id).map(|entry| entry.value().clone())
    }

    /// All campaigns, numeric ids first in numeric order
    #[must_use]
    pub fn list(&self) -> Vec<Campaign> {
        let mut campaigns: Vec<Campaign> = self
            .campaigns
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        campaigns.sort_by(|a, b| {
            let key = |c: &Campaign| (c.id.as_str().len(), c.id.as_str().to_string());
            key(a).cmp(&key(b))
        });
        campaigns
    }

    /// Campaigns created by `creator`, matched ignoring case
    #[must_use]
    pub fn by_creator(&self, creator: &Address) -> Vec<Campaign> {
        self.list()
            .into_iter()
            .filter(|c| c.creator.matches(creator))
            .collect()
    }

    /// Profile for `creator`, `None` if they have no campaigns
    #[must_use]
    pub fn creator_profile(&self, creator: &Address) -> Option<CreatorProfile> {
        CreatorProfile::from_campaigns(creator.clone(), &self.by_creator(creator))
    }

    /// Record the ledger's cumulative total for a campaign
    ///
    /// Never lowers the stored amount.
    pub fn record_raised(&self, id: &CampaignId, raised: f64) {
        if let Some(mut campaign) = self.campaigns.get_mut(id) {
            if raised > campaign.amount_raised {
                campaign.amount_raised = raised;
            }
        }
    }

    /// Append a comment to a campaign; `None` if the campaign is unknown
    pub fn add_comment(
        &self,
        id: &CampaignId,
        author: &Address,
        text: &str,
        at: DateTime<Utc>,
    ) -> Option<CampaignComment> {
        let mut campaign = self.campaigns.get_mut(id)?;
        let comment = CampaignComment {
            id: format!("c{}-{}", id, campaign.comments.len() + 1),
            author: author.to_string(),
            comment: text.trim().to_string(),
            timestamp: at,
        };
        campaign.comments.push(comment.clone());
        Some(comment)
    }

    /// Number of campaigns
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.campaigns.len()
    }

    /// Check if the catalog is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.campaigns.is_empty()
    }
}
