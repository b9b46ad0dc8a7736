//! Wizard Steps
//!
//! Step identifiers plus their display labels. [`StepDefinition`] values are
//! produced only by the flow planner; nothing else constructs or mutates
//! them.

use serde::{Deserialize, Serialize};

/// Identifier of a wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepId {
    CertQuestion,
    CertUpload,
    EditableForm,
    Dashboard,
    ProfileSelect,
    PersonalDetails,
    CompanyDetails,
    Payment,
    Complete,
}

impl StepId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CertQuestion => "cert-question",
            Self::CertUpload => "cert-upload",
            Self::EditableForm => "editable-form",
            Self::Dashboard => "dashboard",
            Self::ProfileSelect => "profile-select",
            Self::PersonalDetails => "personal-details",
            Self::CompanyDetails => "company-details",
            Self::Payment => "payment",
            Self::Complete => "complete",
        }
    }

    /// Display label shown in the stepper.
    pub fn label(&self) -> &'static str {
        match self {
            Self::CertQuestion => "Certificate",
            Self::CertUpload => "Upload/Connect",
            Self::EditableForm => "Verify Details",
            Self::Dashboard => "Complete",
            Self::ProfileSelect => "Profile Type",
            Self::PersonalDetails => "Personal Info",
            Self::CompanyDetails => "Company Info",
            Self::Payment => "Payment",
            Self::Complete => "Complete",
        }
    }

    /// Steps at which submission is offered instead of further advancement.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::Dashboard)
    }
}

impl std::fmt::Display for StepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A planned step: identifier plus display label. Only the planner
/// constructs these; nothing parses them back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepDefinition {
    pub id: StepId,
    pub label: &'static str,
}

impl StepDefinition {
    pub fn new(id: StepId) -> Self {
        Self {
            id,
            label: id.label(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_id_serializes_kebab_case() {
        let json = serde_json::to_string(&StepId::CertQuestion).unwrap();
        assert_eq!(json, "\"cert-question\"");
        let back: StepId = serde_json::from_str("\"company-details\"").unwrap();
        assert_eq!(back, StepId::CompanyDetails);
    }

    #[test]
    fn test_terminal_steps() {
        assert!(StepId::Complete.is_terminal());
        assert!(StepId::Dashboard.is_terminal());
        assert!(!StepId::Payment.is_terminal());
    }

    #[test]
    fn test_definition_carries_label() {
        let step = StepDefinition::new(StepId::CertUpload);
        assert_eq!(step.label, "Upload/Connect");
    }
}
