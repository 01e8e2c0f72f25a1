//! Error types for campaign drafts

use std::fmt;

/// A single creation-form rule that a draft breaks
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DraftViolation {
    /// Title shorter than the minimum
    #[error("title must be at least {min} characters")]
    TitleTooShort { min: usize },

    /// Title longer than the maximum
    #[error("title must not exceed {max} characters")]
    TitleTooLong { max: usize },

    /// Description shorter than the minimum
    #[error("description must be at least {min} characters")]
    DescriptionTooShort { min: usize },

    /// Description longer than the maximum
    #[error("description must not exceed {max} characters")]
    DescriptionTooLong { max: usize },

    /// Funding goal below the minimum
    #[error("funding goal must be at least {min}")]
    GoalTooSmall { min: f64 },

    /// Deadline not in the future
    #[error("deadline must be in the future")]
    DeadlineNotInFuture,

    /// Milestone title too short
    #[error("milestone {index}: title must be at least {min} characters")]
    MilestoneTitleTooShort { index: usize, min: usize },

    /// Milestone description too short
    #[error("milestone {index}: description must be at least {min} characters")]
    MilestoneDescriptionTooShort { index: usize, min: usize },
}

/// Draft rejected by the creation-form rules
///
/// Carries every violation found, not just the first.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftError {
    /// All broken rules, in form order
    pub violations: Vec<DraftViolation>,
}

impl DraftError {
    /// Check whether a specific violation was reported
    #[must_use]
    pub fn contains(&self, violation: &DraftViolation) -> bool {
        self.violations.contains(violation)
    }
}

impl fmt::Display for DraftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid campaign draft: ")?;
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for DraftError {}
