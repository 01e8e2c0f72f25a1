//! Campaign records
//!
//! A campaign carries only raw funding facts (goal, amount raised, deadline).
//! Its lifecycle phase is never stored here; it is derived on every read by
//! the lifecycle evaluator.

use crate::identity::{Address, CampaignId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Campaign category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    /// Technology projects
    #[default]
    Tech,
    /// Art projects
    Art,
    /// Education projects
    Education,
    /// Games
    Games,
}

impl Category {
    /// All categories, in display order
    pub const ALL: [Category; 4] = [
        Category::Tech,
        Category::Art,
        Category::Education,
        Category::Games,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Tech => "Tech",
            Category::Art => "Art",
            Category::Education => "Education",
            Category::Games => "Games",
        };
        f.write_str(name)
    }
}

/// Reward tier unlocked by a minimum pledge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardTier {
    /// Tier identifier
    pub id: String,
    /// Tier title
    pub title: String,
    /// Perk description
    pub description: String,
    /// Minimum pledge for this tier
    pub pledge_amount: f64,
}

impl RewardTier {
    /// Create a reward tier
    #[inline]
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        pledge_amount: f64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            pledge_amount,
        }
    }
}

/// Creator-posted progress update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignUpdate {
    /// Update identifier
    pub id: String,
    /// Headline
    pub title: String,
    /// Body text
    pub content: String,
    /// Posting time
    pub timestamp: DateTime<Utc>,
}

/// Backer comment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignComment {
    /// Comment identifier
    pub id: String,
    /// Author address (free-form, may be abbreviated)
    pub author: String,
    /// Comment text
    pub comment: String,
    /// Posting time
    pub timestamp: DateTime<Utc>,
}

/// Roadmap milestone status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MilestoneStatus {
    /// Not started
    #[default]
    Pending,
    /// Work under way
    #[serde(rename = "In Progress")]
    InProgress,
    /// Delivered
    Completed,
}

/// Roadmap milestone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    /// Milestone identifier
    pub id: String,
    /// Milestone title
    pub title: String,
    /// What will be delivered
    pub description: String,
    /// Planned delivery date
    pub target_date: DateTime<Utc>,
    /// Current status
    #[serde(default)]
    pub status: MilestoneStatus,
}

/// Crowdfunding campaign
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    /// Unique identifier
    pub id: CampaignId,
    /// Creator identity
    pub creator: Address,
    /// Title
    pub title: String,
    /// Long description
    pub description: String,
    /// Target funding amount (positive)
    pub goal: f64,
    /// Cumulative contributions (non-negative)
    pub amount_raised: f64,
    /// Funding deadline
    pub deadline: DateTime<Utc>,
    /// Legacy flag from the source data model. Not used for lifecycle decisions.
    #[serde(default)]
    pub completed: bool,
    /// Image asset key
    #[serde(default)]
    pub image: String,
    /// Category
    #[serde(default)]
    pub category: Category,
    /// Progress updates
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub updates: Vec<CampaignUpdate>,
    /// Backer comments
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<CampaignComment>,
    /// Reward tiers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rewards: Vec<RewardTier>,
    /// Roadmap
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub milestones: Vec<Milestone>,
}

impl Campaign {
    /// Create a campaign with nothing raised yet
    #[must_use]
    pub fn new(
        id: CampaignId,
        creator: Address,
        title: impl Into<String>,
        goal: f64,
        deadline: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            creator,
            title: title.into(),
            description: String::new(),
            goal,
            amount_raised: 0.0,
            deadline,
            completed: false,
            image: String::new(),
            category: Category::default(),
            updates: Vec::new(),
            comments: Vec::new(),
            rewards: Vec::new(),
            milestones: Vec::new(),
        }
    }

    /// With description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// With amount raised
    #[inline]
    #[must_use]
    pub fn with_amount_raised(mut self, amount_raised: f64) -> Self {
        self.amount_raised = amount_raised;
        self
    }

    /// With category
    #[inline]
    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// With image asset key
    #[inline]
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// With reward tiers
    #[inline]
    #[must_use]
    pub fn with_rewards(mut self, rewards: Vec<RewardTier>) -> Self {
        self.rewards = rewards;
        self
    }

    /// With updates
    #[inline]
    #[must_use]
    pub fn with_updates(mut self, updates: Vec<CampaignUpdate>) -> Self {
        self.updates = updates;
        self
    }

    /// With comments
    #[inline]
    #[must_use]
    pub fn with_comments(mut self, comments: Vec<CampaignComment>) -> Self {
        self.comments = comments;
        self
    }

    /// With milestones
    #[inline]
    #[must_use]
    pub fn with_milestones(mut self, milestones: Vec<Milestone>) -> Self {
        self.milestones = milestones;
        self
    }

    /// Look up a reward tier by id
    #[must_use]
    pub fn reward(&self, tier_id: &str) -> Option<&RewardTier> {
        self.rewards.iter().find(|tier| tier.id == tier_id)
    }

    /// Goal reached, independent of the deadline
    #[inline]
    #[must_use]
    pub fn goal_reached(&self) -> bool {
        self.amount_raised >= self.goal
    }

    /// Check if the deadline has passed at `now`
    #[inline]
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.deadline
    }
}
