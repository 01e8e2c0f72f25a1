//! Reference campaigns
//!
//! Six campaigns covering every phase, laid out relative to `now` so they
//! stay in the same phase whenever they are loaded.

use chrono::{DateTime, Duration, Utc};
use fundline_campaign::{
    Address, Campaign, CampaignComment, CampaignId, CampaignUpdate, Category, Milestone,
    MilestoneStatus, RewardTier,
};

/// Build the reference catalog relative to `now`
#[must_use]
pub fn reference_campaigns(now: DateTime<Utc>) -> Vec<Campaign> {
    vec![
        ai_network(now),
        nft_gallery(now),
        solidity_course(now),
        vr_game(now),
        refundable(now),
        withdrawable(now),
    ]
}

/// Backer contributions already counted in the reference campaigns'
/// `amount_raised`; the rest of each opening balance stays unattributed.
#[must_use]
pub fn reference_backers() -> Vec<(CampaignId, Address, f64)> {
    [
        ("1", "0xB7C8D9E0F1A2B3C4D5E6", 20.0),
        ("1", "0x4E5F6A7B8C9D0E1F2A3B", 5.5),
        ("5", "0xB7C8D9E0F1A2B3C4D5E6", 12.5),
        ("5", "0x0F1E2D3C4B5A69788796", 7.5),
    ]
    .into_iter()
    .map(|(id, backer, amount)| (CampaignId::from(id), Address::from(backer), amount))
    .collect()
}

fn ai_network(now: DateTime<Utc>) -> Campaign {
    Campaign::new(
        CampaignId::from("1"),
        Address::from("0x1A2B3C4D5E6F7G8H9I0J"),
        "Decentralized AI Network",
        100.0,
        now + Duration::days(30),
    )
    .with_description(
        "Building a peer-to-peer network for distributed AI computation, ensuring privacy and \
         censorship resistance. Our goal is to democratize access to powerful AI models.",
    )
    .with_amount_raised(75.0)
    .with_image("campaign-1")
    .with_category(Category::Tech)
    .with_updates(vec![
        CampaignUpdate {
            id: "u1-1".to_string(),
            title: "Project Kick-off!".to_string(),
            content: "We've officially started development. The team is excited and we're \
                      making great progress on the core protocol."
                .to_string(),
            timestamp: now - Duration::days(5),
        },
        CampaignUpdate {
            id: "u1-2".to_string(),
            title: "Alpha version coming soon".to_string(),
            content: "We're putting the finishing touches on our internal alpha. We expect to \
                      release it for testing to early backers in the next few weeks."
                .to_string(),
            timestamp: now - Duration::days(1),
        },
    ])
    .with_comments(vec![
        CampaignComment {
            id: "c1-1".to_string(),
            author: "0x...aBcDeF".to_string(),
            comment: "This is revolutionary! Can't wait to see the alpha.".to_string(),
            timestamp: now - Duration::hours(20),
        },
        CampaignComment {
            id: "c1-2".to_string(),
            author: "0x...123456".to_string(),
            comment: "Happy to be a backer. How can I contribute to the code?".to_string(),
            timestamp: now - Duration::hours(10),
        },
    ])
    .with_rewards(vec![
        RewardTier::new(
            "r1-1",
            "Bronze Supporter NFT",
            "A unique NFT acknowledging your early support.",
            0.1,
        ),
        RewardTier::new(
            "r1-2",
            "Silver Contributor NFT",
            "Receive a special edition NFT and early access to the alpha.",
            0.5,
        ),
        RewardTier::new(
            "r1-3",
            "Gold Partner NFT",
            "A rare animated NFT, alpha access, and your name in the genesis block.",
            2.0,
        ),
    ])
    .with_milestones(vec![
        Milestone {
            id: "m1-1".to_string(),
            title: "Protocol Whitepaper".to_string(),
            description: "Publish the technical whitepaper detailing the network architecture."
                .to_string(),
            target_date: now + Duration::days(15),
            status: MilestoneStatus::InProgress,
        },
        Milestone {
            id: "m1-2".to_string(),
            title: "Testnet Launch".to_string(),
            description: "Deploy the first public testnet for developers to experiment with."
                .to_string(),
            target_date: now + Duration::days(45),
            status: MilestoneStatus::Pending,
        },
        Milestone {
            id: "m1-3".to_string(),
            title: "Mainnet Launch".to_string(),
            description: "Full public launch of the Decentralized AI Network.".to_string(),
            target_date: now + Duration::days(90),
            status: MilestoneStatus::Pending,
        },
    ])
}

fn nft_gallery(now: DateTime<Utc>) -> Campaign {
    Campaign::new(
        CampaignId::from("2"),
        Address::from("0xK1L2M3N4O5P6Q7R8S9T0"),
        "NFT Art Gallery in the Metaverse",
        50.0,
        now + Duration::hours(48),
    )
    .with_description(
        "Creating a virtual gallery to showcase and auction digital art from emerging artists. \
         A portion of proceeds will go to a charity supporting arts education.",
    )
    .with_amount_raised(55.0)
    .with_image("campaign-2")
    .with_category(Category::Art)
    .with_rewards(vec![
        RewardTier::new(
            "r2-1",
            "Founder Token",
            "An NFT that grants you a permanent \"Founder\" role in our Discord.",
            0.05,
        ),
        RewardTier::new(
            "r2-2",
            "First Exhibit Access",
            "An NFT that acts as a VIP pass to our opening exhibit.",
            0.25,
        ),
    ])
}

fn solidity_course(now: DateTime<Utc>) -> Campaign {
    Campaign::new(
        CampaignId::from("3"),
        Address::from("0xU1V2W3X4Y5Z6A7B8C9D0"),
        "Learn Solidity Interactive Course",
        20.0,
        now + Duration::days(10),
    )
    .with_description(
        "An interactive, gamified platform to learn Solidity from scratch. The course will \
         feature code sandboxes, real-world projects, and quizzes to test knowledge.",
    )
    .with_amount_raised(15.0)
    .with_image("campaign-3")
    .with_category(Category::Education)
}

fn vr_game(now: DateTime<Utc>) -> Campaign {
    Campaign::new(
        CampaignId::from("4"),
        Address::from("0xE1F2G3H4I5J6K7L8M9N0"),
        "VR Blockchain-based Game",
        250.0,
        now + Duration::days(90),
    )
    .with_description(
        "Developing a massive multiplayer online role-playing game (MMORPG) with true asset \
         ownership on the blockchain. All in-game items will be tradable NFTs.",
    )
    .with_amount_raised(80.0)
    .with_image("campaign-4")
    .with_category(Category::Games)
}

fn refundable(now: DateTime<Utc>) -> Campaign {
    Campaign::new(
        CampaignId::from("5"),
        Address::from("0xP1Q2R3S4T5U6V7W8X9Y0"),
        "Goal Not Met - Refundable",
        100.0,
        now - Duration::days(2),
    )
    .with_description(
        "This is a sample campaign where the funding goal was not met by the deadline, \
         allowing donors to claim a refund.",
    )
    .with_amount_raised(30.0)
    .with_image("campaign-5")
    .with_category(Category::Art)
}

fn withdrawable(now: DateTime<Utc>) -> Campaign {
    Campaign::new(
        CampaignId::from("6"),
        Address::from("0xZ1A2B3C4D5E6F7G8H9I0"),
        "Goal Met - Withdrawable",
        80.0,
        now - Duration::days(1),
    )
    .with_description(
        "This is a sample campaign where the funding goal has been successfully met, allowing \
         the creator to withdraw the funds.",
    )
    .with_amount_raised(85.0)
    .with_image("campaign-6")
    .with_category(Category::Tech)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use fundline_lifecycle::{Phase, Viewer};

    #[test]
    fn fixtures_cover_every_phase() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 0, 0, 0).unwrap();
        let phases: Vec<Phase> = reference_campaigns(now)
            .iter()
            .map(|c| fundline_lifecycle::evaluate(c, &Viewer::Anonymous, now).phase)
            .collect();

        assert_eq!(
            phases,
            vec![
                Phase::Ongoing,
                Phase::Ongoing,
                Phase::Ongoing,
                Phase::Ongoing,
                Phase::FailedEnd,
                Phase::SuccessfulEnd,
            ]
        );
    }
}
