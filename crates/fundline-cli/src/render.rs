//! Text and JSON rendering for CLI output

use chrono::{DateTime, Utc};
use fundline_campaign::{Address, Campaign, CampaignComment, CampaignId, TimeLeft, CURRENCY};
use fundline_core::{CreatorProfile, Receipt};
use fundline_lifecycle::{evaluate, Evaluation, Viewer};
use serde::Serialize;
use std::fmt::Write;

/// Campaign together with its evaluation, as emitted by `--json`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignView<'a> {
    pub campaign: &'a Campaign,
    pub evaluation: Evaluation,
    pub time_left: String,
}

impl<'a> CampaignView<'a> {
    #[must_use]
    pub fn new(campaign: &'a Campaign, viewer: &Viewer, now: DateTime<Utc>) -> Self {
        Self {
            campaign,
            evaluation: evaluate(campaign, viewer, now),
            time_left: TimeLeft::render(campaign.deadline, now),
        }
    }
}

/// Amount with two decimals and the currency label
#[must_use]
pub fn amount(value: f64) -> String {
    format!("{value:.2} {CURRENCY}")
}

/// One line per campaign: id, phase, progress, funding, countdown, title
#[must_use]
pub fn campaign_table(campaigns: &[Campaign], now: DateTime<Utc>) -> String {
    let mut out = format!(
        "{:<4} {:<11} {:>5}  {:<22} {:<10} {}\n",
        "ID", "PHASE", "PROG", "RAISED / GOAL", "TIME LEFT", "TITLE"
    );
    for campaign in campaigns {
        let view = CampaignView::new(campaign, &Viewer::Anonymous, now);
        let funding = format!("{:.2} / {}", campaign.amount_raised, amount(campaign.goal));
        let _ = writeln!(
            out,
            "{:<4} {:<11} {:>4.0}%  {:<22} {:<10} {}",
            campaign.id,
            view.evaluation.phase,
            view.evaluation.progress,
            funding,
            view.time_left,
            campaign.title
        );
    }
    out
}

/// Full campaign page for one viewer
#[must_use]
pub fn campaign_detail(campaign: &Campaign, evaluation: &Evaluation, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} (#{})", campaign.title, campaign.id);
    let _ = writeln!(out, "Creator:   {}", campaign.creator.short());
    let _ = writeln!(out, "Category:  {}", campaign.category);
    let _ = writeln!(
        out,
        "Raised:    {:.2} / {} ({:.0}%)",
        campaign.amount_raised,
        amount(campaign.goal),
        evaluation.progress
    );
    let _ = writeln!(out, "Time left: {}", TimeLeft::render(campaign.deadline, now));
    let _ = writeln!(out, "Phase:     {}", evaluation.phase);
    let _ = writeln!(out, "Viewer:    {}", evaluation.role);
    let _ = writeln!(out, "Action:    {}", evaluation.action);

    if !campaign.description.is_empty() {
        let _ = writeln!(out, "\n{}", campaign.description);
    }
    if !campaign.rewards.is_empty() {
        out.push_str("\nRewards:\n");
        for tier in &campaign.rewards {
            let _ = writeln!(out, "  {:<6} {:<28} from {}", tier.id, tier.title, amount(tier.pledge_amount));
        }
    }
    if !campaign.milestones.is_empty() {
        out.push_str("\nMilestones:\n");
        for milestone in &campaign.milestones {
            let _ = writeln!(
                out,
                "  [{:?}] {} (due {})",
                milestone.status,
                milestone.title,
                milestone.target_date.format("%Y-%m-%d")
            );
        }
    }
    if !campaign.updates.is_empty() {
        let _ = writeln!(out, "\nUpdates: {}", campaign.updates.len());
    }
    if !campaign.comments.is_empty() {
        let _ = writeln!(out, "Comments: {}", campaign.comments.len());
    }
    out
}

/// Summary of an applied transfer
#[must_use]
pub fn receipt_line(receipt: &Receipt) -> String {
    format!(
        "{} {} on campaign #{} by {} (transfer {})",
        receipt.kind,
        amount(receipt.amount),
        receipt.campaign,
        receipt.party.short(),
        receipt.id
    )
}

/// Confirmation for a posted comment
#[must_use]
pub fn comment_line(campaign: &CampaignId, comment: &CampaignComment) -> String {
    format!(
        "comment {} posted on campaign #{} by {}: {}",
        comment.id,
        campaign,
        Address::from(comment.author.as_str()).short(),
        comment.comment
    )
}

/// Creator statistics and their campaigns
#[must_use]
pub fn creator_profile(profile: &CreatorProfile, campaigns: &[Campaign], now: DateTime<Utc>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Creator:      {}", profile.creator.short());
    let _ = writeln!(out, "Campaigns:    {}", profile.total_campaigns);
    let _ = writeln!(
        out,
        "Successful:   {} ({:.0}%)",
        profile.successful_campaigns, profile.success_rate
    );
    let _ = writeln!(out, "Total raised: {}", amount(profile.total_raised));
    let _ = writeln!(out, "Reputation:   {}/100\n", profile.reputation);
    out.push_str(&campaign_table(campaigns, now));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use fundline_core::reference_campaigns;
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 0, 0, 0).unwrap()
    }

    #[test]
    fn table_lists_every_campaign() {
        let table = campaign_table(&reference_campaigns(now()), now());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 7);
        assert!(lines[1].contains("ongoing"));
        assert!(lines[1].contains("75.00 / 100.00 ETH"));
        assert!(lines[1].contains("30d 00h"));
        assert!(lines[5].contains("failed"));
        assert!(lines[6].contains("successful"));
        assert!(lines[6].contains("00:00:00"));
    }

    #[test]
    fn detail_shows_action_for_viewer() {
        let campaigns = reference_campaigns(now());
        let withdrawable = &campaigns[5];
        let evaluation = evaluate(
            withdrawable,
            &Viewer::connected("0xz1a2b3c4d5e6f7g8h9i0"),
            now(),
        );

        let page = campaign_detail(withdrawable, &evaluation, now());
        assert!(page.contains("Viewer:    creator"));
        assert!(page.contains("Action:    withdraw 85 ETH"));
        assert!(page.contains("Creator:   0xZ1A2...H9I0"));
    }

    #[test]
    fn detail_lists_rewards_and_milestones() {
        let campaigns = reference_campaigns(now());
        let evaluation = evaluate(&campaigns[0], &Viewer::Anonymous, now());
        let page = campaign_detail(&campaigns[0], &evaluation, now());

        assert!(page.contains("r1-2"));
        assert!(page.contains("from 0.50 ETH"));
        assert!(page.contains("[InProgress] Protocol Whitepaper"));
        assert!(page.contains("Action:    connect wallet to participate"));
    }

    #[test]
    fn json_view_is_camel_case() {
        let campaigns = reference_campaigns(now());
        let view = CampaignView::new(&campaigns[1], &Viewer::Anonymous, now());
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["campaign"]["amountRaised"], 55.0);
        assert_eq!(json["timeLeft"], "2d 00h");
        assert!(json["evaluation"]["progress"].is_number());
    }

    #[test]
    fn comment_line_shortens_author() {
        let comment = CampaignComment {
            id: "c2-2".to_string(),
            author: "0xB7C8D9E0F1A2B3C4D5E6".to_string(),
            comment: "Great work".to_string(),
            timestamp: now(),
        };
        assert_eq!(
            comment_line(&CampaignId::from("2"), &comment),
            "comment c2-2 posted on campaign #2 by 0xB7C8...D5E6: Great work"
        );
    }
}
