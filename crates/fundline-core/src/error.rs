//! Error types for Fundline Core
//!
//! Provides error handling for:
//! - Ledger transfers (insufficient funds, double withdrawal, deadlines, network)
//! - Funding actions (permission checks, input validation, cancellation)
//! - Configuration loading

use fundline_campaign::{Address, CampaignId, DraftError};
use fundline_lifecycle::{ActionKind, DonationError, Phase, ViewerRole};
use std::path::PathBuf;

/// Ledger transfer errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LedgerError {
    /// No account opened for this campaign
    #[error("no ledger account for campaign {0}")]
    AccountNotFound(CampaignId),

    /// Not enough escrowed funds
    #[error("insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: f64, available: f64 },

    /// Backer has no outstanding contribution to refund
    #[error("nothing to refund for {backer} on campaign {campaign}")]
    NothingToRefund { campaign: CampaignId, backer: Address },

    /// Funds already withdrawn for this campaign
    #[error("funds already withdrawn for campaign {0}")]
    AlreadyWithdrawn(CampaignId),

    /// Operation requires the deadline to have passed
    #[error("campaign deadline has not been reached")]
    DeadlineNotReached,

    /// Operation requires the deadline not to have passed
    #[error("campaign deadline has passed")]
    DeadlinePassed,

    /// Refund requested on a campaign that reached its goal
    #[error("campaign reached its goal; contributions are not refundable")]
    NotRefundable,

    /// Caller is not allowed to move these funds
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Transfer amount is not a positive finite number
    #[error("invalid transfer amount: {0}")]
    InvalidAmount(f64),

    /// Transport failure talking to the ledger
    #[error("network error: {0}")]
    NetworkError(String),

    /// Ledger rejected the transaction for another reason
    #[error("transaction failed: {0}")]
    TransactionFailed(String),
}

/// Funding action errors
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    /// No wallet connected in the session
    #[error("wallet not connected")]
    NotConnected,

    /// Unknown campaign
    #[error("campaign not found: {0}")]
    CampaignNotFound(CampaignId),

    /// Unknown reward tier
    #[error("reward tier {tier} not found on campaign {campaign}")]
    TierNotFound { campaign: CampaignId, tier: String },

    /// The lifecycle rules do not offer this action to this viewer
    #[error("{kind} is not permitted for {role} while the campaign is {phase}")]
    NotPermitted {
        kind: ActionKind,
        role: ViewerRole,
        phase: Phase,
    },

    /// Donation input rejected
    #[error(transparent)]
    Donation(#[from] DonationError),

    /// Comment text is empty or only whitespace
    #[error("comment must not be empty")]
    EmptyComment,

    /// Campaign draft rejected
    #[error(transparent)]
    Draft(#[from] DraftError),

    /// Ledger rejected or failed the transfer
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// Cancelled before the transfer was applied
    #[error("action cancelled")]
    Cancelled,

    /// Background task died
    #[error("action task failed: {0}")]
    TaskFailed(String),
}

impl ActionError {
    /// Check if the error comes from local input validation
    #[inline]
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Donation(_) | Self::Draft(_) | Self::EmptyComment)
    }

    /// Check if retrying the same request may succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Ledger(LedgerError::NetworkError(_)) | Self::TaskFailed(_)
        )
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Value out of range
    #[error("invalid config value: {0}")]
    Invalid(String),
}
