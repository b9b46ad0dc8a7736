//! Wizard State
//!
//! The single mutable aggregate for a registration session: branch
//! selections, free-form field values, uploaded file references, payment
//! state and the current step position. Created once at session start,
//! mutated through the controller, and finally consumed by the payload
//! builder.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use signup_types::{BranchSelections, FieldData, FileRef, PaymentSelections, StepId};

/// What caused a recorded step change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionTrigger {
    /// Forward navigation that passed validation.
    Advance,
    /// Backward navigation (never validated).
    Retreat,
    /// The plan changed shape under the current index.
    Replan,
}

/// Audit record of one step change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepTransition {
    pub from: StepId,
    pub to: StepId,
    pub trigger: TransitionTrigger,
    pub at: DateTime<Utc>,
}

/// Mutable aggregate for one wizard session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardState {
    /// Unique session ID.
    pub session_id: Uuid,

    /// Flow-shaping choices.
    pub selections: BranchSelections,
    /// Typed field values.
    pub fields: FieldData,
    /// Payment method + confirmation.
    pub payment: PaymentSelections,
    /// Terms of service acceptance, checked on the final step.
    pub terms_accepted: bool,
    /// Whether field data was pre-filled from an uploaded certificate.
    pub auto_filled: bool,

    /// Primary certificate uploads (first one is submitted).
    pub certificate_files: Vec<FileRef>,
    /// Company registration / deed document.
    pub company_deed: Option<FileRef>,
    /// Administrator certificates, required for joint administration.
    pub admin_certificates: Vec<FileRef>,

    /// Position within the currently planned step list.
    pub current_step_index: usize,

    /// History of step changes.
    pub history: Vec<StepTransition>,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl WizardState {
    /// Create a fresh session: all selections unset, position at the first
    /// step.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            session_id: Uuid::new_v4(),
            selections: BranchSelections::default(),
            fields: FieldData::default(),
            payment: PaymentSelections::default(),
            terms_accepted: false,
            auto_filled: false,
            certificate_files: Vec::new(),
            company_deed: None,
            admin_certificates: Vec::new(),
            current_step_index: 0,
            history: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Record a step change in the audit trail.
    pub fn record_transition(&mut self, from: StepId, to: StepId, trigger: TransitionTrigger) {
        let now = Utc::now();
        self.history.push(StepTransition {
            from,
            to,
            trigger,
            at: now,
        });
        self.updated_at = now;
    }

    /// Bump the mutation timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}
