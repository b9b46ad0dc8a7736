//! Signup Wizard Core
//!
//! The flow engine behind the multi-path registration wizard:
//!
//! - [`planner`] derives the ordered step sequence from the branch
//!   selections - re-derived in full after every branch mutation, never
//!   patched incrementally
//! - [`rules`] validates the active step against accumulated data,
//!   surfacing exactly one blocker at a time
//! - [`controller`] owns the mutable [`state::WizardState`] and keeps the
//!   step position consistent with whatever the planner currently returns
//! - [`payload`] assembles the normalized submission record from terminal
//!   state
//!
//! The whole crate is synchronous and side-effect free; external calls
//! (organization-type lookup, submission) live in the integration layer.

pub mod controller;
pub mod payload;
pub mod planner;
pub mod rules;
pub mod state;

pub use controller::{AdvanceOutcome, WizardController};
pub use rules::{validate, Blocker};
pub use state::{StepTransition, TransitionTrigger, WizardState};

use thiserror::Error;

/// Errors for wizard operations that reject the call outright, as opposed
/// to step validation failures which are ordinary [`rules::Blocker`]
/// outcomes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WizardError {
    /// Payment confirmation was reported before any method was chosen.
    #[error("a payment method must be chosen before payment can be confirmed")]
    PaymentMethodNotChosen,
}
