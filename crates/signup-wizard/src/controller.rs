//! Wizard Controller
//!
//! Owns the [`WizardState`] and keeps the step position consistent with the
//! currently planned step list. Every branch mutation re-derives the full
//! plan and clamps the position into it in the same call - there is no
//! incremental patching of a cached list, and no window in which the index
//! can point past the end of the plan or at a stale step's semantics.

use tracing::{debug, info};

use signup_types::{
    BranchPatch, CertificateIdentity, FieldData, FileRef, OrgType, PaymentMethod, StepDefinition,
    StepId,
};

use crate::planner;
use crate::rules;
use crate::state::{TransitionTrigger, WizardState};
use crate::WizardError;

/// Result of a forward-navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Validation passed and the position moved.
    Advanced { to: StepId },
    /// Validation failed; the position is unchanged and the message has
    /// been surfaced.
    Blocked { message: String },
    /// Already at the terminal step; advancing is a no-op, not an error.
    AtTerminal,
}

/// The wizard flow controller.
pub struct WizardController {
    state: WizardState,
    plan: Vec<StepDefinition>,
    last_error: Option<String>,
}

impl WizardController {
    /// Start a fresh session. The initial plan is the certificate question
    /// alone.
    pub fn new() -> Self {
        let state = WizardState::new();
        let plan = planner::plan(&state.selections);
        Self {
            state,
            plan,
            last_error: None,
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    /// The authoritative step list for the current selections.
    pub fn plan(&self) -> &[StepDefinition] {
        &self.plan
    }

    pub fn current_step(&self) -> &StepDefinition {
        // The clamp in `select_branch` guarantees the index is in range.
        debug_assert!(self.state.current_step_index < self.plan.len());
        &self.plan[self.state.current_step_index]
    }

    pub fn current_step_id(&self) -> StepId {
        self.current_step().id
    }

    /// Whether submission should be offered instead of `advance()`.
    pub fn is_at_terminal(&self) -> bool {
        self.current_step_id().is_terminal()
    }

    /// The single currently surfaced error message, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Merge a branch selection, re-plan, and clamp the position into the
    /// fresh plan - one atomic operation.
    pub fn select_branch(&mut self, patch: BranchPatch) {
        let from = self.current_step_id();
        self.state.selections.merge(patch);
        self.state.touch();
        self.last_error = None;

        self.plan = planner::plan(&self.state.selections);
        let last = self.plan.len() - 1;
        if self.state.current_step_index > last {
            self.state.current_step_index = last;
        }

        let to = self.current_step_id();
        if to != from {
            self.state
                .record_transition(from, to, TransitionTrigger::Replan);
            info!(from = %from, to = %to, steps = self.plan.len(), "plan reshaped");
        }
    }

    /// Validate the active step and move forward on success.
    pub fn advance(&mut self) -> AdvanceOutcome {
        self.last_error = None;
        let step = self.current_step_id();

        if let Some(blocker) = rules::validate(step, &self.state) {
            debug!(step = %step, message = %blocker.message, "step blocked");
            self.last_error = Some(blocker.message.clone());
            return AdvanceOutcome::Blocked {
                message: blocker.message,
            };
        }

        if self.state.current_step_index >= self.plan.len() - 1 {
            return AdvanceOutcome::AtTerminal;
        }

        self.state.current_step_index += 1;
        let to = self.current_step_id();
        self.state
            .record_transition(step, to, TransitionTrigger::Advance);
        info!(from = %step, to = %to, "step advanced");
        AdvanceOutcome::Advanced { to }
    }

    /// Move backward. Never validated, clamped at the first step.
    pub fn retreat(&mut self) -> Option<StepId> {
        self.last_error = None;
        if self.state.current_step_index == 0 {
            return None;
        }

        let from = self.current_step_id();
        self.state.current_step_index -= 1;
        let to = self.current_step_id();
        self.state
            .record_transition(from, to, TransitionTrigger::Retreat);
        info!(from = %from, to = %to, "step retreated");
        Some(to)
    }

    // ------------------------------------------------------------------
    // Field and file mutations - each clears the surfaced error
    // ------------------------------------------------------------------

    /// Mutate field values through a closure.
    pub fn update_fields(&mut self, update: impl FnOnce(&mut FieldData)) {
        update(&mut self.state.fields);
        self.state.touch();
        self.last_error = None;
    }

    /// Replace the primary certificate uploads.
    pub fn set_certificate_files(&mut self, files: Vec<FileRef>) {
        self.state.certificate_files = files;
        self.state.touch();
        self.last_error = None;
    }

    /// Apply identity details extracted from an uploaded certificate and
    /// mark the session auto-filled.
    pub fn apply_certificate_identity(&mut self, identity: CertificateIdentity) {
        self.state.fields.name = identity.name;
        self.state.fields.email = identity.email;
        self.state.fields.tax_id = identity.tax_id;
        self.state.auto_filled = true;
        self.state.touch();
        self.last_error = None;
    }

    pub fn set_company_deed(&mut self, deed: Option<FileRef>) {
        self.state.company_deed = deed;
        self.state.touch();
        self.last_error = None;
    }

    pub fn set_admin_certificates(&mut self, files: Vec<FileRef>) {
        self.state.admin_certificates = files;
        self.state.touch();
        self.last_error = None;
    }

    /// Resolve an organization type by id from the lookup result and store
    /// both id and name. An unknown id is a no-op.
    pub fn select_org_type(&mut self, available: &[OrgType], id: i64) {
        let Some(org_type) = available.iter().find(|t| t.id == id) else {
            debug!(id, "ignoring unknown organization type");
            return;
        };
        self.state.fields.organization.type_id = Some(org_type.id);
        self.state.fields.organization.type_name = org_type.name.clone();
        self.state.touch();
        self.last_error = None;
    }

    pub fn choose_payment_method(&mut self, method: PaymentMethod) {
        self.state.payment.choose(method);
        self.state.touch();
        self.last_error = None;
    }

    /// Record the provider's confirmation. Rejected while no method is
    /// chosen.
    pub fn confirm_payment(&mut self) -> Result<(), WizardError> {
        if !self.state.payment.can_confirm() {
            return Err(WizardError::PaymentMethodNotChosen);
        }
        self.state.payment.confirmed = true;
        self.state.touch();
        self.last_error = None;
        Ok(())
    }

    pub fn set_terms_accepted(&mut self, accepted: bool) {
        self.state.terms_accepted = accepted;
        self.state.touch();
        self.last_error = None;
    }

    /// Surface an error from outside the validator (e.g. a submission
    /// failure). Replaces whatever message was surfaced before.
    pub fn report_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }
}

impl Default for WizardController {
    fn default() -> Self {
        Self::new()
    }
}
