//! Flow Planner
//!
//! Pure derivation of the ordered step list from the branch selections.
//! The planner is total over every reachable selection combination and
//! always returns a non-empty sequence starting at the certificate
//! question. Callers re-invoke it after every branch-affecting mutation;
//! the fresh list is authoritative and is never diffed against the
//! previous one.

use signup_types::{BranchSelections, CertificateChoice, ProfileType, StepDefinition, StepId};

/// Compute the step sequence for the given selections.
///
/// Certificate holders get the short verify-and-done flow; everyone else
/// picks a profile and the profile choice decides the details step.
pub fn plan(selections: &BranchSelections) -> Vec<StepDefinition> {
    match selections.has_certificate {
        CertificateChoice::Unset => vec![StepDefinition::new(StepId::CertQuestion)],
        CertificateChoice::Yes => vec![
            StepDefinition::new(StepId::CertQuestion),
            StepDefinition::new(StepId::CertUpload),
            StepDefinition::new(StepId::EditableForm),
            StepDefinition::new(StepId::Dashboard),
        ],
        CertificateChoice::No => {
            let mut steps = vec![
                StepDefinition::new(StepId::CertQuestion),
                StepDefinition::new(StepId::ProfileSelect),
            ];
            match selections.profile_type {
                ProfileType::Unset => {}
                ProfileType::Personal => steps.extend([
                    StepDefinition::new(StepId::PersonalDetails),
                    StepDefinition::new(StepId::Payment),
                    StepDefinition::new(StepId::Complete),
                ]),
                ProfileType::Company => steps.extend([
                    StepDefinition::new(StepId::CompanyDetails),
                    StepDefinition::new(StepId::Payment),
                    StepDefinition::new(StepId::Complete),
                ]),
            }
            steps
        }
    }
}
