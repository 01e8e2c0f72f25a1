//! Ledger collaborator
//!
//! The ledger owns escrowed funds and is the only component that moves
//! them. Implementations must guarantee:
//! - concurrent contributions to a campaign are additive, none lost
//! - a campaign's funds are withdrawn at most once
//! - a backer's contribution is refunded at most once

use crate::clock::Clock;
use crate::error::LedgerError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use fundline_campaign::{Address, Campaign, CampaignId};
use fundline_lifecycle::ActionKind;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;
use ulid::Ulid;

/// Unique transfer identifier (ULID for sortability)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TransferId(pub Ulid);

impl TransferId {
    /// Generate new transfer ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for TransferId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TransferId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Acknowledgement of an applied transfer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    /// Transfer identifier
    pub id: TransferId,
    /// Campaign concerned
    pub campaign: CampaignId,
    /// Backer or creator who moved funds
    pub party: Address,
    /// What kind of transfer
    pub kind: ActionKind,
    /// Amount moved
    pub amount: f64,
    /// When the ledger applied it
    pub at: DateTime<Utc>,
}

/// Point-in-time view of a campaign account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    /// Funds currently held
    pub escrow: f64,
    /// Cumulative contributions, never decreases
    pub raised: f64,
    /// Whether the creator has withdrawn
    pub withdrawn: bool,
    /// Backers with an outstanding contribution
    pub backers: usize,
}

/// Ledger holding campaign funds
#[async_trait]
pub trait Ledger: Send + Sync + Debug {
    /// Register a campaign; `opening_balance` covers funds raised before the
    /// ledger knew about it. Re-opening an existing account is a no-op.
    async fn open_account(&self, campaign: &Campaign, opening_balance: f64)
        -> Result<(), LedgerError>;

    /// Attribute part of the opening balance to a backer
    ///
    /// Moves no funds; the attributed total may not exceed what was raised.
    async fn seed_contribution(
        &self,
        campaign: &CampaignId,
        backer: &Address,
        amount: f64,
    ) -> Result<(), LedgerError>;

    /// Add a backer contribution
    async fn contribute(
        &self,
        campaign: &CampaignId,
        backer: &Address,
        amount: f64,
    ) -> Result<Receipt, LedgerError>;

    /// Release escrow to the creator, at most once
    async fn withdraw(
        &self,
        campaign: &CampaignId,
        creator: &Address,
        amount: f64,
    ) -> Result<Receipt, LedgerError>;

    /// Return a backer's whole contribution
    async fn refund(&self, campaign: &CampaignId, backer: &Address)
        -> Result<Receipt, LedgerError>;

    /// Current account state
    async fn balance(&self, campaign: &CampaignId) -> Result<AccountSnapshot, LedgerError>;

    /// Outstanding contribution of one backer
    async fn contribution_of(
        &self,
        campaign: &CampaignId,
        backer: &Address,
    ) -> Result<f64, LedgerError>;
}

#[derive(Debug)]
struct Account {
    creator: Address,
    goal: f64,
    deadline: DateTime<Utc>,
    escrow: f64,
    raised: f64,
    contributions: HashMap<Address, f64>,
    withdrawn: bool,
}

impl Account {
    fn snapshot(&self) -> AccountSnapshot {
        AccountSnapshot {
            escrow: self.escrow,
            raised: self.raised,
            withdrawn: self.withdrawn,
            backers: self.contributions.len(),
        }
    }
}

/// In-process ledger
///
/// One `DashMap` entry per campaign. Every mutation runs under that entry's
/// guard without awaiting, so operations on one campaign are serialized.
#[derive(Debug)]
pub struct InMemoryLedger {
    accounts: DashMap<CampaignId, Account>,
    clock: Arc<dyn Clock>,
}

impl InMemoryLedger {
    /// Create an empty ledger
    #[inline]
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            accounts: DashMap::new(),
            clock,
        }
    }

    fn receipt(
        &self,
        campaign: &CampaignId,
        party: &Address,
        kind: ActionKind,
        amount: f64,
    ) -> Receipt {
        Receipt {
            id: TransferId::new(),
            campaign: campaign.clone(),
            party: party.clone(),
            kind,
            amount,
            at: self.clock.now(),
        }
    }
}

#[async_trait]
impl Ledger for InMemoryLedger {
    async fn open_account(
        &self,
        campaign: &Campaign,
        opening_balance: f64,
    ) -> Result<(), LedgerError> {
        if !opening_balance.is_finite() || opening_balance < 0.0 {
            return Err(LedgerError::InvalidAmount(opening_balance));
        }
        self.accounts
            .entry(campaign.id.clone())
            .or_insert_with(|| Account {
                creator: campaign.creator.clone(),
                goal: campaign.goal,
                deadline: campaign.deadline,
                escrow: opening_balance,
                raised: opening_balance,
                contributions: HashMap::new(),
                withdrawn: false,
            });
        Ok(())
    }

    async fn seed_contribution(
        &self,
        campaign: &CampaignId,
        backer: &Address,
        amount: f64,
    ) -> Result<(), LedgerError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(LedgerError::InvalidAmount(amount));
        }
        let mut account = self
            .accounts
            .get_mut(campaign)
            .ok_or_else(|| LedgerError::AccountNotFound(campaign.clone()))?;

        let attributed: f64 = account.contributions.values().sum();
        let available = account.raised - attributed;
        if amount > available {
            return Err(LedgerError::InsufficientFunds {
                requested: amount,
                available,
            });
        }
        *account.contributions.entry(backer.clone()).or_insert(0.0) += amount;
        Ok(())
    }

    async fn contribute(
        &self,
        campaign: &CampaignId,
        backer: &Address,
        amount: f64,
    ) -> Result<Receipt, LedgerError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(LedgerError::InvalidAmount(amount));
        }
        let now = self.clock.now();
        let mut account = self
            .accounts
            .get_mut(campaign)
            .ok_or_else(|| LedgerError::AccountNotFound(campaign.clone()))?;

        if now > account.deadline {
            return Err(LedgerError::DeadlinePassed);
        }

        account.escrow += amount;
        account.raised += amount;
        *account.contributions.entry(backer.clone()).or_insert(0.0) += amount;
        drop(account);

        tracing::debug!(%campaign, %backer, amount, "contribution recorded");
        Ok(self.receipt(campaign, backer, ActionKind::Contribute, amount))
    }

    async fn withdraw(
        &self,
        campaign: &CampaignId,
        creator: &Address,
        amount: f64,
    ) -> Result<Receipt, LedgerError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(LedgerError::InvalidAmount(amount));
        }
        let now = self.clock.now();
        let mut account = self
            .accounts
            .get_mut(campaign)
            .ok_or_else(|| LedgerError::AccountNotFound(campaign.clone()))?;

        if !account.creator.matches(creator) {
            return Err(LedgerError::Unauthorized(format!(
                "{creator} is not the creator of campaign {campaign}"
            )));
        }
        if now <= account.deadline {
            return Err(LedgerError::DeadlineNotReached);
        }
        if account.withdrawn {
            return Err(LedgerError::AlreadyWithdrawn(campaign.clone()));
        }
        if account.raised < account.goal || amount > account.escrow {
            return Err(LedgerError::InsufficientFunds {
                requested: amount,
                available: account.escrow,
            });
        }

        account.escrow -= amount;
        account.withdrawn = true;
        drop(account);

        tracing::debug!(%campaign, %creator, amount, "escrow released");
        Ok(self.receipt(campaign, creator, ActionKind::Withdraw, amount))
    }

    async fn refund(
        &self,
        campaign: &CampaignId,
        backer: &Address,
    ) -> Result<Receipt, LedgerError> {
        let now = self.clock.now();
        let mut account = self
            .accounts
            .get_mut(campaign)
            .ok_or_else(|| LedgerError::AccountNotFound(campaign.clone()))?;

        if now <= account.deadline {
            return Err(LedgerError::DeadlineNotReached);
        }
        if account.raised >= account.goal {
            return Err(LedgerError::NotRefundable);
        }
        let Some(amount) = account.contributions.remove(backer) else {
            return Err(LedgerError::NothingToRefund {
                campaign: campaign.clone(),
                backer: backer.clone(),
            });
        };

        account.escrow -= amount;
        drop(account);

        tracing::debug!(%campaign, %backer, amount, "contribution refunded");
        Ok(self.receipt(campaign, backer, ActionKind::ClaimRefund, amount))
    }

    async fn balance(&self, campaign: &CampaignId) -> Result<AccountSnapshot, LedgerError> {
        self.accounts
            .get(campaign)
            .map(|account| account.snapshot())
            .ok_or_else(|| LedgerError::AccountNotFound(campaign.clone()))
    }

    async fn contribution_of(
        &self,
        campaign: &CampaignId,
        backer: &Address,
    ) -> Result<f64, LedgerError> {
        self.accounts
            .get(campaign)
            .map(|account| account.contributions.get(backer).copied().unwrap_or(0.0))
            .ok_or_else(|| LedgerError::AccountNotFound(campaign.clone()))
    }
}

/// Ledger wrapper that simulates a remote backend
///
/// Transfers wait `latency` before reaching the inner ledger and fail with
/// `NetworkError` with probability `failure_rate`. Reads are not delayed.
#[derive(Debug)]
pub struct SimulatedLedger<L> {
    inner: L,
    latency: Duration,
    failure_rate: f64,
}

impl<L: Ledger> SimulatedLedger<L> {
    /// Wrap `inner` with a fixed latency and no injected failures
    #[inline]
    #[must_use]
    pub fn new(inner: L, latency: Duration) -> Self {
        Self {
            inner,
            latency,
            failure_rate: 0.0,
        }
    }

    /// With probability of an injected network failure, clamped to `[0, 1]`
    #[inline]
    #[must_use]
    pub fn with_failure_rate(mut self, failure_rate: f64) -> Self {
        self.failure_rate = if failure_rate.is_nan() {
            0.0
        } else {
            failure_rate.clamp(0.0, 1.0)
        };
        self
    }

    /// Borrow the wrapped ledger
    #[inline]
    #[must_use]
    pub fn inner(&self) -> &L {
        &self.inner
    }

    async fn round_trip(&self) -> Result<(), LedgerError> {
        tokio::time::sleep(self.latency).await;
        if self.should_fail() {
            tracing::warn!("simulated network failure");
            return Err(LedgerError::NetworkError(
                "simulated connection reset".to_string(),
            ));
        }
        Ok(())
    }

    fn should_fail(&self) -> bool {
        self.failure_rate > 0.0 && rand::rng().random_bool(self.failure_rate)
    }
}

#[async_trait]
impl<L: Ledger> Ledger for SimulatedLedger<L> {
    async fn open_account(
        &self,
        campaign: &Campaign,
        opening_balance: f64,
    ) -> Result<(), LedgerError> {
        self.inner.open_account(campaign, opening_balance).await
    }

    async fn seed_contribution(
        &self,
        campaign: &CampaignId,
        backer: &Address,
        amount: f64,
    ) -> Result<(), LedgerError> {
        self.inner.seed_contribution(campaign, backer, amount).await
    }

    async fn contribute(
        &self,
        campaign: &CampaignId,
        backer: &Address,
        amount: f64,
    ) -> Result<Receipt, LedgerError> {
        self.round_trip().await?;
        self.inner.contribute(campaign, backer, amount).await
    }

    async fn withdraw(
        &self,
        campaign: &CampaignId,
        creator: &Address,
        amount: f64,
    ) -> Result<Receipt, LedgerError> {
        self.round_trip().await?;
        self.inner.withdraw(campaign, creator, amount).await
    }

    async fn refund(
        &self,
        campaign: &CampaignId,
        backer: &Address,
    ) -> Result<Receipt, LedgerError> {
        self.round_trip().await?;
        self.inner.refund(campaign, backer).await
    }

    async fn balance(&self, campaign: &CampaignId) -> Result<AccountSnapshot, LedgerError> {
        self.inner.balance(campaign).await
    }

    async fn contribution_of(
        &self,
        campaign: &CampaignId,
        backer: &Address,
    ) -> Result<f64, LedgerError> {
        self.inner.contribution_of(campaign, backer).await
    }
}
