//! Fundline Core - funding actions over a ledger
//!
//! Ties the lifecycle evaluator to the outside world:
//! - An explicit wallet session supplying the viewer identity
//! - A ledger collaborator holding escrowed funds (in-memory or simulated remote)
//! - Cancellable donate / withdraw / refund actions gated by the lifecycle table
//! - Campaign comments from connected viewers
//! - The campaign catalog and creator profiles
//! - TOML configuration
//!
//! # Example
//!
//! ```rust,ignore
//! use fundline_core::prelude::*;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = ActionService::from_config(&FundlineConfig::new(), Arc::new(SystemClock)).await?;
//! let session = WalletSession::connected_as("0xbacker");
//!
//! let pending = service.donate(&session, &CampaignId::from("1"), &DonationForm::new().with_amount("0.5"))?;
//! let receipt = pending.wait().await?;
//! println!("transfer {} applied", receipt.id);
//! # Ok(())
//! # }
//! ```

pub mod actions;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod ledger;
pub mod session;

pub use actions::{ActionId, ActionService, PendingAction};
pub use catalog::{CampaignCatalog, CreatorProfile};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{FundlineConfig, LedgerConfig};
pub use error::{ActionError, ConfigError, LedgerError};
pub use fixtures::{reference_backers, reference_campaigns};
pub use ledger::{AccountSnapshot, InMemoryLedger, Ledger, Receipt, SimulatedLedger, TransferId};
pub use session::WalletSession;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for running funding actions
    pub use crate::{
        ActionError, ActionService, CampaignCatalog, Clock, FundlineConfig, InMemoryLedger,
        Ledger, LedgerError, PendingAction, Receipt, SimulatedLedger, SystemClock, WalletSession,
    };
    pub use fundline_campaign::{Address, Campaign, CampaignDraft, CampaignId};
    pub use fundline_lifecycle::{ActionKind, DonationForm, PermittedAction, Phase};
    pub use std::sync::Arc;
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
