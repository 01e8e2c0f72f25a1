//! Funding actions
//!
//! Donate, withdraw and refund run as cancellable background tasks over an
//! injected [`Ledger`]:
//! - the lifecycle table is consulted first; anything it does not offer the
//!   viewer is refused before the ledger is touched
//! - donation input is validated inline
//! - each accepted request returns a [`PendingAction`] that can be awaited
//!   or cancelled
//!
//! Dropping an unfinished [`PendingAction`] cancels it.

use crate::catalog::CampaignCatalog;
use crate::clock::Clock;
use crate::config::FundlineConfig;
use crate::error::{ActionError, LedgerError};
use crate::ledger::{InMemoryLedger, Ledger, Receipt, SimulatedLedger};
use crate::session::WalletSession;
use dashmap::DashMap;
use fundline_campaign::{Address, Campaign, CampaignComment, CampaignDraft, CampaignId};
use fundline_lifecycle::{evaluate, ActionKind, DonationForm, Evaluation, PermittedAction};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use ulid::Ulid;

/// Unique action identifier (ULID for sortability)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActionId(pub Ulid);

impl ActionId {
    /// Generate new action ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for ActionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

type InFlight = DashMap<(CampaignId, ActionKind), usize>;

/// Handle to an in-flight action
#[derive(Debug)]
pub struct PendingAction {
    id: ActionId,
    campaign: CampaignId,
    kind: ActionKind,
    cancel: CancellationToken,
    handle: Option<JoinHandle<Result<Receipt, ActionError>>>,
}

impl PendingAction {
    /// Action identifier
    #[inline]
    #[must_use]
    pub fn id(&self) -> ActionId {
        self.id
    }

    /// Campaign the action targets
    #[inline]
    #[must_use]
    pub fn campaign(&self) -> &CampaignId {
        &self.campaign
    }

    /// What the action does
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    /// Request cancellation
    ///
    /// Has no effect once the ledger has applied the transfer.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Check if the background task has completed
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Wait for the outcome
    ///
    /// # Errors
    /// - `ActionError::Cancelled` if cancelled before the transfer applied
    /// - `ActionError::Ledger` if the ledger refused or failed the transfer
    /// - `ActionError::TaskFailed` if the task panicked
    pub async fn wait(mut self) -> Result<Receipt, ActionError> {
        let Some(handle) = self.handle.as_mut() else {
            return Err(ActionError::TaskFailed("action already awaited".to_string()));
        };
        let joined = handle.await;
        self.handle = None;

        match joined {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Err(ActionError::Cancelled),
            Err(e) => Err(ActionError::TaskFailed(e.to_string())),
        }
    }
}

impl Drop for PendingAction {
    fn drop(&mut self) {
        if self.handle.is_some() {
            self.cancel.cancel();
        }
    }
}

/// Decrements the in-flight count for its key when dropped
#[derive(Debug)]
struct InFlightGuard {
    table: Arc<InFlight>,
    key: (CampaignId, ActionKind),
}

impl InFlightGuard {
    fn enter(table: Arc<InFlight>, key: (CampaignId, ActionKind)) -> Self {
        *table.entry(key.clone()).or_insert(0) += 1;
        Self { table, key }
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let drained = self
            .table
            .get_mut(&self.key)
            .map(|mut count| {
                *count = count.saturating_sub(1);
                *count == 0
            })
            .unwrap_or(false);
        if drained {
            self.table.remove_if(&self.key, |_, count| *count == 0);
        }
    }
}

#[derive(Debug, Clone)]
enum Transfer {
    Contribute { backer: Address, amount: f64 },
    Withdraw { creator: Address, amount: f64 },
    Refund { backer: Address },
}

impl Transfer {
    fn kind(&self) -> ActionKind {
        match self {
            Self::Contribute { .. } => ActionKind::Contribute,
            Self::Withdraw { .. } => ActionKind::Withdraw,
            Self::Refund { .. } => ActionKind::ClaimRefund,
        }
    }

    async fn apply(
        &self,
        ledger: &dyn Ledger,
        campaign: &CampaignId,
    ) -> Result<Receipt, LedgerError> {
        match self {
            Self::Contribute { backer, amount } => {
                ledger.contribute(campaign, backer, *amount).await
            }
            Self::Withdraw { creator, amount } => ledger.withdraw(campaign, creator, *amount).await,
            Self::Refund { backer } => ledger.refund(campaign, backer).await,
        }
    }
}

/// Runs funding actions against the catalog and a ledger
#[derive(Debug, Clone)]
pub struct ActionService {
    catalog: Arc<CampaignCatalog>,
    ledger: Arc<dyn Ledger>,
    clock: Arc<dyn Clock>,
    in_flight: Arc<InFlight>,
}

impl ActionService {
    /// Create new action service
    #[must_use]
    pub fn new(
        catalog: Arc<CampaignCatalog>,
        ledger: Arc<dyn Ledger>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            catalog,
            ledger,
            clock,
            in_flight: Arc::new(DashMap::new()),
        }
    }

    /// Build a service over a simulated ledger as configured
    ///
    /// Seeds the reference campaigns when `seed_fixtures` is set and opens
    /// their ledger accounts.
    ///
    /// # Errors
    /// `LedgerError` if an account cannot be opened
    pub async fn from_config(
        config: &FundlineConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, LedgerError> {
        let now = clock.now();
        let catalog = if config.seed_fixtures {
            CampaignCatalog::with_fixtures(now)
        } else {
            CampaignCatalog::new()
        };
        let ledger = SimulatedLedger::new(InMemoryLedger::new(clock.clone()), config.latency())
            .with_failure_rate(config.ledger.network_failure_rate);

        let service = Self::new(Arc::new(catalog), Arc::new(ledger), clock);
        service.open_accounts().await?;
        Ok(service)
    }

    /// Open a ledger account for every catalog campaign
    ///
    /// Each account starts with the campaign's recorded `amount_raised`, and
    /// the catalog's opening backers are attributed their share of it.
    ///
    /// # Errors
    /// First ledger error encountered
    pub async fn open_accounts(&self) -> Result<(), LedgerError> {
        for campaign in self.catalog.list() {
            self.ledger
                .open_account(&campaign, campaign.amount_raised)
                .await?;
            for (backer, amount) in self.catalog.opening_backers(&campaign.id) {
                self.ledger
                    .seed_contribution(&campaign.id, &backer, amount)
                    .await?;
            }
        }
        Ok(())
    }

    /// Shared catalog
    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &Arc<CampaignCatalog> {
        &self.catalog
    }

    /// Shared ledger
    #[inline]
    #[must_use]
    pub fn ledger(&self) -> &Arc<dyn Ledger> {
        &self.ledger
    }

    /// Evaluate a campaign for the session's viewer at the current time
    ///
    /// # Errors
    /// `ActionError::CampaignNotFound` for an unknown id
    pub fn evaluate(
        &self,
        session: &WalletSession,
        id: &CampaignId,
    ) -> Result<(Campaign, Evaluation), ActionError> {
        let campaign = self
            .catalog
            .get(id)
            .ok_or_else(|| ActionError::CampaignNotFound(id.clone()))?;
        let evaluation = evaluate(&campaign, &session.viewer(), self.clock.now());
        Ok((campaign, evaluation))
    }

    /// Check if an action of `kind` is in flight for `campaign`
    #[must_use]
    pub fn is_processing(&self, campaign: &CampaignId, kind: ActionKind) -> bool {
        self.in_flight
            .get(&(campaign.clone(), kind))
            .is_some_and(|count| *count > 0)
    }

    /// Contribute to an ongoing campaign
    ///
    /// # Errors
    /// - `NotConnected` / `NotPermitted` if the viewer may not contribute now
    /// - `TierNotFound` if the form names a tier the campaign does not offer
    /// - `Donation` if the amount is invalid or below the tier minimum
    pub fn donate(
        &self,
        session: &WalletSession,
        id: &CampaignId,
        form: &DonationForm,
    ) -> Result<PendingAction, ActionError> {
        let (campaign, evaluation) = self.evaluate(session, id)?;
        let backer = self.permitted(session, &evaluation, ActionKind::Contribute)?;

        if let Some(tier) = &form.tier {
            if campaign.reward(&tier.id).is_none() {
                return Err(ActionError::TierNotFound {
                    campaign: campaign.id.clone(),
                    tier: tier.id.clone(),
                });
            }
        }
        let amount = form.validate().map_err(|e| {
            tracing::warn!(campaign = %id, error = %e, "donation rejected");
            e
        })?;

        Ok(self.spawn(campaign.id, Transfer::Contribute { backer, amount }))
    }

    /// Withdraw the raised funds of a successful campaign
    ///
    /// # Errors
    /// `NotConnected` / `NotPermitted` unless the viewer is the creator and
    /// the campaign ended successfully
    pub fn withdraw(
        &self,
        session: &WalletSession,
        id: &CampaignId,
    ) -> Result<PendingAction, ActionError> {
        let (campaign, evaluation) = self.evaluate(session, id)?;
        let creator = self.permitted(session, &evaluation, ActionKind::Withdraw)?;

        let PermittedAction::Withdraw { amount } = evaluation.action else {
            return Err(not_permitted(&evaluation, ActionKind::Withdraw));
        };

        Ok(self.spawn(campaign.id, Transfer::Withdraw { creator, amount }))
    }

    /// Claim back a contribution to a failed campaign
    ///
    /// # Errors
    /// `NotConnected` / `NotPermitted` unless the viewer is a backer and the
    /// campaign failed
    pub fn refund(
        &self,
        session: &WalletSession,
        id: &CampaignId,
    ) -> Result<PendingAction, ActionError> {
        let (campaign, evaluation) = self.evaluate(session, id)?;
        let backer = self.permitted(session, &evaluation, ActionKind::ClaimRefund)?;

        Ok(self.spawn(campaign.id, Transfer::Refund { backer }))
    }

    /// Publish a new campaign owned by the session's address
    ///
    /// # Errors
    /// - `NotConnected` for an anonymous session
    /// - `Draft` listing every rule the draft breaks
    /// - `Ledger` if the account cannot be opened
    pub async fn create_campaign(
        &self,
        session: &WalletSession,
        draft: CampaignDraft,
    ) -> Result<Campaign, ActionError> {
        let creator = session.address().cloned().ok_or(ActionError::NotConnected)?;
        let campaign = self.catalog.create(draft, creator, self.clock.now())?;
        self.ledger.open_account(&campaign, 0.0).await?;
        Ok(campaign)
    }

    /// Post a comment on a campaign as the session's address
    ///
    /// # Errors
    /// - `NotConnected` for an anonymous session
    /// - `EmptyComment` if the text is blank
    /// - `CampaignNotFound` for an unknown id
    pub fn comment(
        &self,
        session: &WalletSession,
        id: &CampaignId,
        text: &str,
    ) -> Result<CampaignComment, ActionError> {
        let author = session.address().ok_or(ActionError::NotConnected)?;
        if text.trim().is_empty() {
            return Err(ActionError::EmptyComment);
        }
        let comment = self
            .catalog
            .add_comment(id, author, text, self.clock.now())
            .ok_or_else(|| ActionError::CampaignNotFound(id.clone()))?;

        tracing::info!(campaign = %id, %author, comment = %comment.id, "comment posted");
        Ok(comment)
    }

    fn permitted(
        &self,
        session: &WalletSession,
        evaluation: &Evaluation,
        kind: ActionKind,
    ) -> Result<Address, ActionError> {
        let address = session.address().cloned().ok_or(ActionError::NotConnected)?;
        if !evaluation.action.permits(kind) {
            let err = not_permitted(evaluation, kind);
            tracing::warn!(%address, error = %err, "action refused");
            return Err(err);
        }
        Ok(address)
    }

    fn spawn(&self, campaign: CampaignId, transfer: Transfer) -> PendingAction {
        let id = ActionId::new();
        let kind = transfer.kind();
        let cancel = CancellationToken::new();

        let guard = InFlightGuard::enter(self.in_flight.clone(), (campaign.clone(), kind));
        let token = cancel.clone();
        let ledger = self.ledger.clone();
        let catalog = self.catalog.clone();
        let target = campaign.clone();

        let handle = tokio::spawn(async move {
            let _guard = guard;

            let result = tokio::select! {
                biased;
                () = token.cancelled() => Err(ActionError::Cancelled),
                applied = transfer.apply(ledger.as_ref(), &target) => applied.map_err(ActionError::from),
            };

            match &result {
                Ok(receipt) => {
                    tracing::info!(action = %id, campaign = %target, %kind, amount = receipt.amount, "action applied");
                    if kind == ActionKind::Contribute {
                        match ledger.balance(&target).await {
                            Ok(snapshot) => catalog.record_raised(&target, snapshot.raised),
                            Err(e) => tracing::warn!(campaign = %target, error = %e, "balance refresh failed"),
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(action = %id, campaign = %target, %kind, error = %e, "action failed");
                }
            }
            result
        });

        tracing::info!(action = %id, %campaign, %kind, "action accepted");
        PendingAction {
            id,
            campaign,
            kind,
            cancel,
            handle: Some(handle),
        }
    }
}

fn not_permitted(evaluation: &Evaluation, kind: ActionKind) -> ActionError {
    ActionError::NotPermitted {
        kind,
        role: evaluation.role,
        phase: evaluation.phase,
    }
}
