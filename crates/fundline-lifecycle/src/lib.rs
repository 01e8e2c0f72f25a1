//! Fundline Lifecycle - campaign lifecycle evaluator
//!
//! Derives, from raw campaign fields, the viewing identity and the current
//! instant:
//! - the campaign phase (`Ongoing`, `SuccessfulEnd`, `FailedEnd`)
//! - the viewer role (anonymous, creator, backer)
//! - the single action the caller should expose
//!
//! Nothing here is cached or mutated. Every call recomputes from its inputs.
//!
//! # Example
//!
//! ```rust,ignore
//! use fundline_lifecycle::{evaluate, PermittedAction, Phase, Viewer};
//!
//! let eval = evaluate(&campaign, &Viewer::connected("0xabc"), now);
//! if let PermittedAction::Withdraw { amount } = eval.action {
//!     println!("creator may withdraw {amount}");
//! }
//! ```

pub mod action;
pub mod donation;
pub mod error;
pub mod evaluator;
pub mod phase;
pub mod role;

pub use action::{ActionKind, Notice, PermittedAction};
pub use donation::{validate_donation, DonationForm};
pub use error::DonationError;
pub use evaluator::{evaluate, progress_percent, Evaluation};
pub use phase::Phase;
pub use role::{Viewer, ViewerRole};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the lifecycle evaluator
    pub use crate::{
        evaluate, validate_donation, ActionKind, DonationError, Evaluation, PermittedAction,
        Phase, Viewer, ViewerRole,
    };
}
