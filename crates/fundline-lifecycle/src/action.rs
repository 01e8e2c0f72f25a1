//! Permitted actions
//!
//! | Role      | Ongoing    | SuccessfulEnd      | FailedEnd   |
//! |-----------|------------|--------------------|-------------|
//! | anonymous | connect    | connect            | connect     |
//! | creator   | notice     | withdraw (raised)  | notice      |
//! | backer    | contribute | notice             | claim refund|

use crate::phase::Phase;
use crate::role::ViewerRole;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Action kinds that move funds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// Backer donates
    Contribute,
    /// Creator withdraws the raised funds
    Withdraw,
    /// Backer reclaims a donation
    ClaimRefund,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ActionKind::Contribute => "contribute",
            ActionKind::Withdraw => "withdraw",
            ActionKind::ClaimRefund => "claim refund",
        };
        f.write_str(label)
    }
}

/// Informational message shown when no action is offered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Notice {
    /// Creator before a successful end
    WithdrawAfterSuccess,
    /// Backer after a successful end
    GoalReached,
}

impl Notice {
    /// Text for presentation
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Notice::WithdrawAfterSuccess => {
                "You are the creator. You can withdraw funds after the campaign ends successfully."
            }
            Notice::GoalReached => "This campaign has successfully reached its goal.",
        }
    }
}

/// What the caller should expose to the viewer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PermittedAction {
    /// Prompt to connect an identity
    ConnectIdentity,
    /// Donate
    Contribute,
    /// Withdraw the full amount raised
    Withdraw {
        /// Amount to withdraw
        amount: f64,
    },
    /// Reclaim a donation
    ClaimRefund,
    /// No action, informational notice only
    None(Notice),
}

impl PermittedAction {
    /// Map a role and phase to the single permitted action
    #[must_use]
    pub fn for_role(role: ViewerRole, phase: Phase, amount_raised: f64) -> Self {
        match (role, phase) {
            (ViewerRole::Anonymous, _) => PermittedAction::ConnectIdentity,
            (ViewerRole::Creator, Phase::SuccessfulEnd) => PermittedAction::Withdraw {
                amount: amount_raised,
            },
            (ViewerRole::Creator, Phase::Ongoing | Phase::FailedEnd) => {
                PermittedAction::None(Notice::WithdrawAfterSuccess)
            }
            (ViewerRole::Backer, Phase::Ongoing) => PermittedAction::Contribute,
            (ViewerRole::Backer, Phase::SuccessfulEnd) => PermittedAction::None(Notice::GoalReached),
            (ViewerRole::Backer, Phase::FailedEnd) => PermittedAction::ClaimRefund,
        }
    }

    /// Fund-moving kind of this action, if any
    #[must_use]
    pub fn kind(&self) -> Option<ActionKind> {
        match self {
            PermittedAction::Contribute => Some(ActionKind::Contribute),
            PermittedAction::Withdraw { .. } => Some(ActionKind::Withdraw),
            PermittedAction::ClaimRefund => Some(ActionKind::ClaimRefund),
            PermittedAction::ConnectIdentity | PermittedAction::None(_) => None,
        }
    }

    /// Check whether this action allows `kind`
    #[inline]
    #[must_use]
    pub fn permits(&self, kind: ActionKind) -> bool {
        self.kind() == Some(kind)
    }
}

impl fmt::Display for PermittedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermittedAction::ConnectIdentity => f.write_str("connect wallet to participate"),
            PermittedAction::Contribute => f.write_str("back this project"),
            PermittedAction::Withdraw { amount } => write!(f, "withdraw {amount} ETH"),
            PermittedAction::ClaimRefund => f.write_str("claim refund"),
            PermittedAction::None(notice) => f.write_str(notice.message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn anonymous_only_ever_connects() {
        for phase in [Phase::Ongoing, Phase::SuccessfulEnd, Phase::FailedEnd] {
            assert_eq!(
                PermittedAction::for_role(ViewerRole::Anonymous, phase, 10.0),
                PermittedAction::ConnectIdentity
            );
        }
    }

    #[test]
    fn creator_row() {
        assert_eq!(
            PermittedAction::for_role(ViewerRole::Creator, Phase::Ongoing, 10.0),
            PermittedAction::None(Notice::WithdrawAfterSuccess)
        );
        assert_eq!(
            PermittedAction::for_role(ViewerRole::Creator, Phase::SuccessfulEnd, 85.0),
            PermittedAction::Withdraw { amount: 85.0 }
        );
        assert_eq!(
            PermittedAction::for_role(ViewerRole::Creator, Phase::FailedEnd, 30.0),
            PermittedAction::None(Notice::WithdrawAfterSuccess)
        );
    }

    #[test]
    fn backer_row() {
        assert_eq!(
            PermittedAction::for_role(ViewerRole::Backer, Phase::Ongoing, 10.0),
            PermittedAction::Contribute
        );
        assert_eq!(
            PermittedAction::for_role(ViewerRole::Backer, Phase::SuccessfulEnd, 10.0),
            PermittedAction::None(Notice::GoalReached)
        );
        assert_eq!(
            PermittedAction::for_role(ViewerRole::Backer, Phase::FailedEnd, 10.0),
            PermittedAction::ClaimRefund
        );
    }

    #[test]
    fn kinds() {
        assert!(PermittedAction::Withdraw { amount: 1.0 }.permits(ActionKind::Withdraw));
        assert!(!PermittedAction::Contribute.permits(ActionKind::ClaimRefund));
        assert_eq!(PermittedAction::ConnectIdentity.kind(), None);
        assert_eq!(PermittedAction::None(Notice::GoalReached).kind(), None);
    }
}
