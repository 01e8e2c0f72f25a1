//! Fundline CLI
//!
//! Loads the campaign catalog, then either renders campaigns or runs one
//! funding action against the simulated ledger and reports the outcome.

#![allow(missing_docs)]

pub mod render;

use anyhow::{bail, Context};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use fundline_campaign::{Address, CampaignId};
use fundline_core::{
    ActionError, ActionService, FundlineConfig, PendingAction, Receipt, SystemClock,
    WalletSession,
};
use fundline_lifecycle::{DonationForm, Viewer};
use render::CampaignView;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Command-line definition
#[must_use]
pub fn command() -> Command {
    Command::new("fundline")
        .version(fundline_core::VERSION)
        .about("Inspect crowdfunding campaigns and run funding actions")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("latency-ms")
                .long("latency-ms")
                .global(true)
                .value_parser(value_parser!(u64))
                .help("Override the simulated ledger latency"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Output as JSON"),
        )
        .subcommand(Command::new("list").about("List campaigns with phase, progress and countdown"))
        .subcommand(
            Command::new("show")
                .about("Show one campaign as seen by a viewer")
                .arg(campaign_arg())
                .arg(
                    Arg::new("viewer")
                        .long("viewer")
                        .help("Connected address to evaluate for; anonymous if omitted"),
                ),
        )
        .subcommand(
            Command::new("donate")
                .about("Contribute to an ongoing campaign")
                .arg(campaign_arg())
                .arg(address_arg("from", "Backer address"))
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .help("Amount to contribute; defaults to the tier minimum with --tier"),
                )
                .arg(Arg::new("tier").long("tier").help("Reward tier id")),
        )
        .subcommand(
            Command::new("withdraw")
                .about("Withdraw the funds of a successful campaign")
                .arg(campaign_arg())
                .arg(address_arg("as", "Creator address")),
        )
        .subcommand(
            Command::new("refund")
                .about("Claim back a contribution to a failed campaign")
                .arg(campaign_arg())
                .arg(address_arg("as", "Backer address")),
        )
        .subcommand(
            Command::new("comment")
                .about("Post a comment on a campaign")
                .arg(campaign_arg())
                .arg(address_arg("as", "Author address"))
                .arg(Arg::new("text").required(true).help("Comment text")),
        )
        .subcommand(
            Command::new("creator")
                .about("Show a creator's profile and campaigns")
                .arg(Arg::new("address").required(true).help("Creator address")),
        )
}

fn campaign_arg() -> Arg {
    Arg::new("id").required(true).help("Campaign id")
}

fn address_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).required(true).help(help)
}

/// Configuration from `--config`, with `--latency-ms` applied on top
///
/// # Errors
/// Unreadable or invalid configuration file
pub fn load_config(matches: &ArgMatches) -> anyhow::Result<FundlineConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => FundlineConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => FundlineConfig::default(),
    };
    if let Some(latency) = matches.get_one::<u64>("latency-ms") {
        config = config.with_latency(Duration::from_millis(*latency));
    }
    Ok(config)
}

/// Execute the selected subcommand, writing results to `out`
///
/// # Errors
/// Any refused or failed action, unknown campaign, or output failure
pub async fn run(
    matches: &ArgMatches,
    config: &FundlineConfig,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let service = ActionService::from_config(config, Arc::new(SystemClock))
        .await
        .context("opening ledger accounts")?;
    let json = matches.get_flag("json");
    let now = chrono::Utc::now();

    match matches.subcommand() {
        Some(("list", _)) => {
            let campaigns = service.catalog().list();
            if json {
                let views: Vec<CampaignView<'_>> = campaigns
                    .iter()
                    .map(|c| CampaignView::new(c, &Viewer::Anonymous, now))
                    .collect();
                writeln!(out, "{}", serde_json::to_string_pretty(&views)?)?;
            } else {
                write!(out, "{}", render::campaign_table(&campaigns, now))?;
            }
        }
        Some(("show", args)) => {
            let id = campaign_id(args)?;
            let session = args
                .get_one::<String>("viewer")
                .map_or_else(WalletSession::new, |a| WalletSession::connected_as(a.as_str()));
            let (campaign, evaluation) = service.evaluate(&session, &id)?;
            if json {
                let view = CampaignView::new(&campaign, &session.viewer(), now);
                writeln!(out, "{}", serde_json::to_string_pretty(&view)?)?;
            } else {
                write!(out, "{}", render::campaign_detail(&campaign, &evaluation, now))?;
            }
        }
        Some(("donate", args)) => {
            let id = campaign_id(args)?;
            let session = session_for(args, "from")?;
            let form = donation_form(&service, &id, args)?;
            let pending = service.donate(&session, &id, &form)?;
            let receipt = settle(pending).await?;
            report(out, &service, &receipt, json)?;
        }
        Some(("withdraw", args)) => {
            let id = campaign_id(args)?;
            let pending = service.withdraw(&session_for(args, "as")?, &id)?;
            let receipt = settle(pending).await?;
            report(out, &service, &receipt, json)?;
        }
        Some(("refund", args)) => {
            let id = campaign_id(args)?;
            let pending = service.refund(&session_for(args, "as")?, &id)?;
            let receipt = settle(pending).await?;
            report(out, &service, &receipt, json)?;
        }
        Some(("comment", args)) => {
            let id = campaign_id(args)?;
            let comment = service.comment(&session_for(args, "as")?, &id, required(args, "text")?)?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&comment)?)?;
            } else {
                writeln!(out, "{}", render::comment_line(&id, &comment))?;
            }
        }
        Some(("creator", args)) => {
            let address = Address::new(required(args, "address")?);
            let Some(profile) = service.catalog().creator_profile(&address) else {
                bail!("no campaigns found for creator {address}");
            };
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&profile)?)?;
            } else {
                let campaigns = service.catalog().by_creator(&address);
                write!(out, "{}", render::creator_profile(&profile, &campaigns, now))?;
            }
        }
        Some((other, _)) => bail!("unknown command: {other}"),
        None => bail!("no command given"),
    }
    Ok(())
}

fn required<'a>(args: &'a ArgMatches, name: &str) -> anyhow::Result<&'a str> {
    args.get_one::<String>(name)
        .map(String::as_str)
        .with_context(|| format!("missing --{name}"))
}

fn campaign_id(args: &ArgMatches) -> anyhow::Result<CampaignId> {
    required(args, "id").map(CampaignId::from)
}

fn session_for(args: &ArgMatches, name: &str) -> anyhow::Result<WalletSession> {
    required(args, name).map(|address| WalletSession::connected_as(address))
}

fn donation_form(
    service: &ActionService,
    id: &CampaignId,
    args: &ArgMatches,
) -> Result<DonationForm, ActionError> {
    let mut form = match args.get_one::<String>("tier") {
        Some(tier_id) => {
            let tier = service
                .catalog()
                .get(id)
                .ok_or_else(|| ActionError::CampaignNotFound(id.clone()))?
                .reward(tier_id)
                .cloned()
                .ok_or_else(|| ActionError::TierNotFound {
                    campaign: id.clone(),
                    tier: tier_id.clone(),
                })?;
            DonationForm::for_tier(tier)
        }
        None => DonationForm::new(),
    };
    if let Some(amount) = args.get_one::<String>("amount") {
        form = form.with_amount(amount.as_str());
    }
    Ok(form)
}

/// Wait for an action, cancelling it on Ctrl-C
async fn settle(pending: PendingAction) -> Result<Receipt, ActionError> {
    eprintln!("processing {} on campaign #{}...", pending.kind(), pending.campaign());
    tokio::select! {
        result = pending.wait() => result,
        _ = tokio::signal::ctrl_c() => Err(ActionError::Cancelled),
    }
}

fn report(
    out: &mut dyn Write,
    service: &ActionService,
    receipt: &Receipt,
    json: bool,
) -> anyhow::Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(receipt)?)?;
        return Ok(());
    }
    writeln!(out, "{}", render::receipt_line(receipt))?;
    if let Some(campaign) = service.catalog().get(&receipt.campaign) {
        writeln!(
            out,
            "Raised: {:.2} / {}",
            campaign.amount_raised,
            render::amount(campaign.goal)
        )?;
    }
    Ok(())
}
