//! Campaign drafts submitted through the creation form
//!
//! Rules:
//! - Title: 5 to 100 characters
//! - Description: 20 to 5000 characters
//! - Goal: at least 0.01
//! - Deadline: strictly in the future
//! - Milestones (optional): title at least 3, description at least 10 characters

use crate::campaign::{Campaign, Category, Milestone, MilestoneStatus, RewardTier};
use crate::error::{DraftError, DraftViolation};
use crate::identity::{Address, CampaignId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Minimum title length
pub const TITLE_MIN: usize = 5;
/// Maximum title length
pub const TITLE_MAX: usize = 100;
/// Minimum description length
pub const DESCRIPTION_MIN: usize = 20;
/// Maximum description length
pub const DESCRIPTION_MAX: usize = 5000;
/// Smallest accepted funding goal
pub const GOAL_MIN: f64 = 0.01;
/// Minimum milestone title length
pub const MILESTONE_TITLE_MIN: usize = 3;
/// Minimum milestone description length
pub const MILESTONE_DESCRIPTION_MIN: usize = 10;

/// Roadmap entry of a draft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneDraft {
    /// Milestone title
    pub title: String,
    /// What will be delivered
    pub description: String,
    /// Planned delivery date
    pub target_date: DateTime<Utc>,
}

/// Unsubmitted campaign
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignDraft {
    /// Title
    pub title: String,
    /// Description
    pub description: String,
    /// Funding goal
    pub goal: f64,
    /// Funding deadline
    pub deadline: DateTime<Utc>,
    /// Category
    #[serde(default)]
    pub category: Category,
    /// Reward tiers
    #[serde(default)]
    pub rewards: Vec<RewardTier>,
    /// Roadmap
    #[serde(default)]
    pub milestones: Vec<MilestoneDraft>,
}

impl CampaignDraft {
    /// Create a draft with the form's default goal of 0.1
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        deadline: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            goal: 0.1,
            deadline,
            category: Category::default(),
            rewards: Vec::new(),
            milestones: Vec::new(),
        }
    }

    /// With goal
    #[inline]
    #[must_use]
    pub fn with_goal(mut self, goal: f64) -> Self {
        self.goal = goal;
        self
    }

    /// With category
    #[inline]
    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// With reward tiers
    #[inline]
    #[must_use]
    pub fn with_rewards(mut self, rewards: Vec<RewardTier>) -> Self {
        self.rewards = rewards;
        self
    }

    /// Add a milestone
    #[must_use]
    pub fn with_milestone(
        mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        target_date: DateTime<Utc>,
    ) -> Self {
        self.milestones.push(MilestoneDraft {
            title: title.into(),
            description: description.into(),
            target_date,
        });
        self
    }

    /// Check the draft against the creation-form rules
    ///
    /// # Errors
    /// `DraftError` listing every broken rule
    pub fn validate(&self, now: DateTime<Utc>) -> Result<(), DraftError> {
        let mut violations = Vec::new();

        let title_len = self.title.chars().count();
        if title_len < TITLE_MIN {
            violations.push(DraftViolation::TitleTooShort { min: TITLE_MIN });
        } else if title_len > TITLE_MAX {
            violations.push(DraftViolation::TitleTooLong { max: TITLE_MAX });
        }

        let description_len = self.description.chars().count();
        if description_len < DESCRIPTION_MIN {
            violations.push(DraftViolation::DescriptionTooShort {
                min: DESCRIPTION_MIN,
            });
        } else if description_len > DESCRIPTION_MAX {
            violations.push(DraftViolation::DescriptionTooLong {
                max: DESCRIPTION_MAX,
            });
        }

        if self.goal.is_nan() || self.goal < GOAL_MIN {
            violations.push(DraftViolation::GoalTooSmall { min: GOAL_MIN });
        }

        if self.deadline <= now {
            violations.push(DraftViolation::DeadlineNotInFuture);
        }

        for (index, milestone) in self.milestones.iter().enumerate() {
            if milestone.title.chars().count() < MILESTONE_TITLE_MIN {
                violations.push(DraftViolation::MilestoneTitleTooShort {
                    index,
                    min: MILESTONE_TITLE_MIN,
                });
            }
            if milestone.description.chars().count() < MILESTONE_DESCRIPTION_MIN {
                violations.push(DraftViolation::MilestoneDescriptionTooShort {
                    index,
                    min: MILESTONE_DESCRIPTION_MIN,
                });
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(DraftError { violations })
        }
    }

    /// Turn a validated draft into a campaign with nothing raised
    ///
    /// Milestones start as `Pending` and get ids derived from the campaign id.
    #[must_use]
    pub fn into_campaign(self, id: CampaignId, creator: Address) -> Campaign {
        let milestones = self
            .milestones
            .into_iter()
            .enumerate()
            .map(|(i, m)| Milestone {
                id: format!("m{}-{}", id, i + 1),
                title: m.title,
                description: m.description,
                target_date: m.target_date,
                status: MilestoneStatus::Pending,
            })
            .collect();

        Campaign::new(id, creator, self.title, self.goal, self.deadline)
            .with_description(self.description)
            .with_category(self.category)
            .with_rewards(self.rewards)
            .with_milestones(milestones)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
    }

    fn valid_draft() -> CampaignDraft {
        CampaignDraft::new(
            "Solar kiosk",
            "Off-grid charging kiosks for rural markets.",
            now() + Duration::days(30),
        )
        .with_goal(12.0)
    }

    #[test]
    fn valid_draft_passes() {
        assert!(valid_draft().validate(now()).is_ok());
    }

    #[test]
    fn default_goal_is_form_default() {
        let draft = CampaignDraft::new("Title", "Description", now());
        assert_eq!(draft.goal, 0.1);
    }

    #[test]
    fn reports_every_violation() {
        let draft = CampaignDraft::new("Hey", "Too short", now()).with_goal(0.001);
        let err = draft.validate(now()).unwrap_err();

        assert_eq!(
            err.violations,
            vec![
                DraftViolation::TitleTooShort { min: 5 },
                DraftViolation::DescriptionTooShort { min: 20 },
                DraftViolation::GoalTooSmall { min: 0.01 },
                DraftViolation::DeadlineNotInFuture,
            ]
        );
    }

    #[test]
    fn title_and_description_upper_bounds() {
        let mut draft = valid_draft();
        draft.title = "x".repeat(101);
        draft.description = "y".repeat(5001);
        let err = draft.validate(now()).unwrap_err();

        assert!(err.contains(&DraftViolation::TitleTooLong { max: 100 }));
        assert!(err.contains(&DraftViolation::DescriptionTooLong { max: 5000 }));
    }

    #[test]
    fn length_bounds_are_inclusive() {
        let mut draft = valid_draft();
        draft.title = "x".repeat(100);
        draft.description = "y".repeat(20);
        draft.goal = 0.01;
        assert!(draft.validate(now()).is_ok());
    }

    #[test]
    fn nan_goal_rejected() {
        let draft = valid_draft().with_goal(f64::NAN);
        let err = draft.validate(now()).unwrap_err();
        assert!(err.contains(&DraftViolation::GoalTooSmall { min: 0.01 }));
    }

    #[test]
    fn milestone_rules_carry_index() {
        let draft = valid_draft()
            .with_milestone("Whitepaper", "Publish the architecture paper", now())
            .with_milestone("Go", "soon", now());
        let err = draft.validate(now()).unwrap_err();

        assert_eq!(
            err.violations,
            vec![
                DraftViolation::MilestoneTitleTooShort { index: 1, min: 3 },
                DraftViolation::MilestoneDescriptionTooShort { index: 1, min: 10 },
            ]
        );
    }

    #[test]
    fn into_campaign_starts_pending_with_nothing_raised() {
        let campaign = valid_draft()
            .with_milestone("Prototype", "First working kiosk", now() + Duration::days(10))
            .into_campaign(CampaignId::from("7"), Address::from("0xabc"));

        assert_eq!(campaign.amount_raised, 0.0);
        assert_eq!(campaign.goal, 12.0);
        assert_eq!(campaign.milestones.len(), 1);
        assert_eq!(campaign.milestones[0].id, "m7-1");
        assert_eq!(campaign.milestones[0].status, MilestoneStatus::Pending);
    }
}
