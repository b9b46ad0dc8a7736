//! Registration Session
//!
//! One live wizard session: the flow controller plus its collaborators.
//! The session fetches organization types once at start (tolerating
//! failure), delegates wizard operations to the controller, and guards the
//! final submission against concurrent re-entry.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use signup_types::OrgType;
use signup_wizard::controller::WizardController;
use signup_wizard::payload;

use crate::clients::org_types::OrgTypeLookup;
use crate::clients::registration::{RegistrationSubmitter, SubmissionError};

const TERMS_REQUIRED: &str = "Please accept the Terms of Service and Privacy Policy";
const GENERIC_ERROR: &str = "An error occurred during registration.";

#[derive(Debug, Error)]
pub enum SessionError {
    /// A submission is already outstanding; retry after it settles.
    #[error("a submission is already in progress")]
    SubmissionInFlight,

    #[error("{TERMS_REQUIRED}")]
    TermsNotAccepted,

    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

/// A single user's registration session.
pub struct RegistrationSession {
    controller: WizardController,
    org_types: Vec<OrgType>,
    submitter: Arc<dyn RegistrationSubmitter>,
    submitting: bool,
}

impl RegistrationSession {
    /// Start a session: fresh wizard state plus the organization-type
    /// lookup. A failed lookup degrades to an empty list.
    pub async fn start(
        lookup: &dyn OrgTypeLookup,
        submitter: Arc<dyn RegistrationSubmitter>,
    ) -> Self {
        let org_types = match lookup.fetch_org_types().await {
            Ok(types) => types,
            Err(err) => {
                warn!(error = %err, "organization type lookup failed, continuing with none");
                Vec::new()
            }
        };

        Self {
            controller: WizardController::new(),
            org_types,
            submitter,
            submitting: false,
        }
    }

    pub fn controller(&self) -> &WizardController {
        &self.controller
    }

    /// Wizard operations (branch selection, navigation, field updates) go
    /// through here.
    pub fn controller_mut(&mut self) -> &mut WizardController {
        &mut self.controller
    }

    pub fn org_types(&self) -> &[OrgType] {
        &self.org_types
    }

    /// Resolve an organization type by id from the cached lookup result.
    pub fn select_org_type(&mut self, id: i64) {
        self.controller.select_org_type(&self.org_types, id);
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Submit the assembled registration.
    ///
    /// Rejected while a previous attempt is outstanding. On failure the
    /// wizard position is preserved, the in-flight flag is cleared, and the
    /// user-facing message is surfaced through the controller; retries are
    /// user-initiated.
    pub async fn submit(&mut self) -> Result<(), SessionError> {
        if self.submitting {
            return Err(SessionError::SubmissionInFlight);
        }
        if !self.controller.state().terms_accepted {
            self.controller.report_error(TERMS_REQUIRED);
            return Err(SessionError::TermsNotAccepted);
        }

        self.submitting = true;
        let record = payload::build(self.controller.state());
        info!(
            session = %self.controller.state().session_id,
            flow = %record.registration_flow,
            "submitting registration"
        );

        let result = self.submitter.submit(&record).await;
        self.submitting = false;

        match result {
            Ok(()) => {
                info!(session = %self.controller.state().session_id, "registration complete");
                Ok(())
            }
            Err(err) => {
                let message = match &err {
                    SubmissionError::Rejected(message) => message.clone(),
                    _ => GENERIC_ERROR.to_string(),
                };
                warn!(error = %err, "registration submission failed");
                self.controller.report_error(message);
                Err(SessionError::Submission(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use signup_types::{
        BranchPatch, CertificateChoice, PaymentMethod, ProfileType, SubmissionRecord,
    };
    use signup_wizard::controller::AdvanceOutcome;

    use crate::clients::org_types::LookupError;

    struct FixedLookup(Vec<OrgType>);

    #[async_trait]
    impl OrgTypeLookup for FixedLookup {
        async fn fetch_org_types(&self) -> Result<Vec<OrgType>, LookupError> {
            Ok(self.0.clone())
        }
    }

    struct FailingLookup;

    #[async_trait]
    impl OrgTypeLookup for FailingLookup {
        async fn fetch_org_types(&self) -> Result<Vec<OrgType>, LookupError> {
            Err(LookupError::UnexpectedStatus(503))
        }
    }

    /// Records submissions; fails each attempt until `fail_first` runs out.
    struct ScriptedSubmitter {
        fail_first: AtomicUsize,
        submitted: AtomicUsize,
    }

    impl ScriptedSubmitter {
        fn succeeding() -> Arc<Self> {
            Arc::new(Self {
                fail_first: AtomicUsize::new(0),
                submitted: AtomicUsize::new(0),
            })
        }

        fn failing_once() -> Arc<Self> {
            Arc::new(Self {
                fail_first: AtomicUsize::new(1),
                submitted: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl RegistrationSubmitter for ScriptedSubmitter {
        async fn submit(&self, _record: &SubmissionRecord) -> Result<(), SubmissionError> {
            self.submitted.fetch_add(1, Ordering::SeqCst);
            if self
                .fail_first
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
            {
                Err(SubmissionError::Rejected(
                    "Email already registered".to_string(),
                ))
            } else {
                Ok(())
            }
        }
    }

    async fn completed_personal_session(submitter: Arc<ScriptedSubmitter>) -> RegistrationSession {
        let mut session = RegistrationSession::start(&FixedLookup(Vec::new()), submitter).await;
        let c = session.controller_mut();
        c.select_branch(BranchPatch::certificate(CertificateChoice::No));
        c.advance();
        c.select_branch(BranchPatch::profile(ProfileType::Personal));
        c.update_fields(|f| {
            f.name = "Jane Roe".to_string();
            f.tax_id = "87654321B".to_string();
            f.email = "jane@example.com".to_string();
            f.phone = "+34 611 111 111".to_string();
            f.bank_iban = "ES9121000418450200051332".to_string();
            f.bank_account_holder = "Jane Roe".to_string();
        });
        c.advance();
        c.choose_payment_method(PaymentMethod::Stripe);
        c.confirm_payment().unwrap();
        c.advance();
        c.advance();
        c.set_terms_accepted(true);
        session
    }

    #[tokio::test]
    async fn test_failed_lookup_degrades_to_empty_list() {
        let session =
            RegistrationSession::start(&FailingLookup, ScriptedSubmitter::succeeding()).await;
        assert!(session.org_types().is_empty());
    }

    #[tokio::test]
    async fn test_select_org_type_uses_cached_lookup() {
        let lookup = FixedLookup(vec![OrgType {
            id: 7,
            name: "S.Coop.".to_string(),
        }]);
        let mut session =
            RegistrationSession::start(&lookup, ScriptedSubmitter::succeeding()).await;
        session.select_org_type(7);
        assert_eq!(
            session.controller().state().fields.organization.type_name,
            "S.Coop."
        );
    }

    #[tokio::test]
    async fn test_submit_requires_terms() {
        let submitter = ScriptedSubmitter::succeeding();
        let mut session = completed_personal_session(submitter.clone()).await;
        session.controller_mut().set_terms_accepted(false);

        let err = session.submit().await.unwrap_err();
        assert!(matches!(err, SessionError::TermsNotAccepted));
        assert_eq!(session.controller().last_error(), Some(TERMS_REQUIRED));
        assert_eq!(submitter.submitted.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_submit_success() {
        let submitter = ScriptedSubmitter::succeeding();
        let mut session = completed_personal_session(submitter.clone()).await;

        session.submit().await.unwrap();
        assert!(!session.is_submitting());
        assert_eq!(submitter.submitted.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_submit_preserves_position_and_allows_retry() {
        let submitter = ScriptedSubmitter::failing_once();
        let mut session = completed_personal_session(submitter.clone()).await;
        let index_before = session.controller().state().current_step_index;

        let err = session.submit().await.unwrap_err();
        assert!(matches!(err, SessionError::Submission(_)));
        assert!(!session.is_submitting());
        assert_eq!(
            session.controller().state().current_step_index,
            index_before
        );
        assert_eq!(
            session.controller().last_error(),
            Some("Email already registered")
        );

        // User-initiated retry succeeds.
        session.submit().await.unwrap();
        assert_eq!(submitter.submitted.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_terminal_advance_still_noop_before_submit() {
        let submitter = ScriptedSubmitter::succeeding();
        let mut session = completed_personal_session(submitter).await;
        assert!(session.controller().is_at_terminal());
        assert_eq!(
            session.controller_mut().advance(),
            AdvanceOutcome::AtTerminal
        );
    }
}
