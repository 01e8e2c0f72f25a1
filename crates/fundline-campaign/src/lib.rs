//! Fundline Campaign - data model for crowdfunding campaigns
//!
//! Provides:
//! - Campaign identities and creator addresses
//! - Campaign records with their pass-through collections
//!   (updates, comments, reward tiers, milestones)
//! - Creation-form validation for new campaign drafts
//! - Countdown computation towards a campaign deadline
//!
//! # Example
//!
//! ```rust,ignore
//! use fundline_campaign::{Address, Campaign, CampaignId, Category};
//!
//! let campaign = Campaign::new(
//!     CampaignId::from("7"),
//!     Address::from("0xABC"),
//!     "Open hardware synth",
//!     40.0,
//!     deadline,
//! )
//! .with_category(Category::Art);
//!
//! assert!(campaign.creator.matches(&Address::from("0xabc")));
//! ```

pub mod campaign;
pub mod countdown;
pub mod draft;
pub mod error;
pub mod identity;

pub use campaign::{
    Campaign, CampaignComment, CampaignUpdate, Category, Milestone, MilestoneStatus, RewardTier,
};
pub use countdown::TimeLeft;
pub use draft::{CampaignDraft, MilestoneDraft};
pub use error::{DraftError, DraftViolation};
pub use identity::{Address, CampaignId};

/// Currency label used when rendering amounts
pub const CURRENCY: &str = "ETH";
