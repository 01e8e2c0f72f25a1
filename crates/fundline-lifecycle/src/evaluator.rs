//! Campaign lifecycle evaluator
//!
//! `(campaign snapshot, viewer, now) -> Evaluation`. Pure, no side effects
//! beyond a debug trace.

use crate::action::PermittedAction;
use crate::phase::Phase;
use crate::role::{Viewer, ViewerRole};
use chrono::{DateTime, Utc};
use fundline_campaign::Campaign;
use serde::{Deserialize, Serialize};

/// Result of evaluating one campaign for one viewer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Derived phase
    pub phase: Phase,
    /// Viewer role
    pub role: ViewerRole,
    /// Whether the viewer is the creator
    pub is_creator: bool,
    /// Action to expose
    pub action: PermittedAction,
    /// Display progress in `[0, 100]`
    pub progress: f64,
}

/// Evaluate a campaign for a viewer at `now`
#[must_use]
pub fn evaluate(campaign: &Campaign, viewer: &Viewer, now: DateTime<Utc>) -> Evaluation {
    let phase = Phase::derive(campaign.goal, campaign.amount_raised, campaign.deadline, now);
    let role = ViewerRole::derive(viewer, &campaign.creator);
    let action = PermittedAction::for_role(role, phase, campaign.amount_raised);

    tracing::debug!(
        campaign = %campaign.id,
        ?phase,
        ?role,
        "evaluated campaign"
    );

    Evaluation {
        phase,
        role,
        is_creator: role.is_creator(),
        action,
        progress: progress_percent(campaign.amount_raised, campaign.goal),
    }
}

/// Funding progress in percent, clamped to `[0, 100]`
///
/// Display only; phase derivation uses the unclamped comparison.
#[must_use]
pub fn progress_percent(amount_raised: f64, goal: f64) -> f64 {
    if goal <= 0.0 || goal.is_nan() {
        return if amount_raised > 0.0 { 100.0 } else { 0.0 };
    }
    let ratio = amount_raised / goal;
    if ratio.is_nan() {
        return 0.0;
    }
    ratio.clamp(0.0, 1.0) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use crate::Notice;
    use fundline_campaign::{Address, CampaignId};
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 7, 4, 12, 0, 0).unwrap()
    }

    fn campaign(goal: f64, raised: f64, deadline: DateTime<Utc>) -> Campaign {
        Campaign::new(
            CampaignId::from("1"),
            Address::from("0xCreator"),
            "Test",
            goal,
            deadline,
        )
        .with_amount_raised(raised)
    }

    #[test]
    fn progress_clamps_over_funding() {
        assert_eq!(progress_percent(85.0, 80.0), 100.0);
        assert_eq!(progress_percent(75.0, 100.0), 75.0);
        assert_eq!(progress_percent(0.0, 100.0), 0.0);
    }

    #[test]
    fn progress_tolerates_degenerate_goal() {
        assert_eq!(progress_percent(1.0, 0.0), 100.0);
        assert_eq!(progress_percent(0.0, 0.0), 0.0);
    }

    #[test]
    fn evaluation_carries_creator_flag() {
        let c = campaign(80.0, 85.0, now() - Duration::days(1));
        let eval = evaluate(&c, &Viewer::connected("0xcreator"), now());

        assert!(eval.is_creator);
        assert_eq!(eval.phase, Phase::SuccessfulEnd);
        assert_eq!(eval.action, PermittedAction::Withdraw { amount: 85.0 });
        assert_eq!(eval.progress, 100.0);
    }

    #[test]
    fn anonymous_evaluation() {
        let c = campaign(100.0, 75.0, now() + Duration::days(30));
        let eval = evaluate(&c, &Viewer::Anonymous, now());

        assert!(!eval.is_creator);
        assert_eq!(eval.role, ViewerRole::Anonymous);
        assert_eq!(eval.action, PermittedAction::ConnectIdentity);
    }

    #[test]
    fn evaluation_serde_shape() {
        let c = campaign(80.0, 85.0, now() - Duration::days(1));
        let eval = evaluate(&c, &Viewer::connected("0xCREATOR"), now());

        let json = serde_json::to_value(eval).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "phase": "SuccessfulEnd",
                "role": "Creator",
                "is_creator": true,
                "action": { "Withdraw": { "amount": 85.0 } },
                "progress": 100.0,
            })
        );
        assert_eq!(serde_json::from_value::<Evaluation>(json).unwrap(), eval);

        let notice = PermittedAction::None(Notice::WithdrawAfterSuccess);
        let text = serde_json::to_string(&notice).unwrap();
        assert_eq!(text, r#"{"None":"WithdrawAfterSuccess"}"#);
        assert_eq!(serde_json::from_str::<PermittedAction>(&text).unwrap(), notice);
    }
}
