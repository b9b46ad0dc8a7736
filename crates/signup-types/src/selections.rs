//! Branch Selections
//!
//! The small set of choices that determine the shape of the wizard flow,
//! as opposed to field values that only change step content.

use serde::{Deserialize, Serialize};

/// Whether the user already holds a digital certificate.
///
/// Tri-state: the question starts unanswered and the planner only branches
/// once an answer exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificateChoice {
    #[default]
    Unset,
    Yes,
    No,
}

impl CertificateChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unset => "unset",
            Self::Yes => "yes",
            Self::No => "no",
        }
    }

    /// The question has been answered either way.
    pub fn is_set(&self) -> bool {
        !matches!(self, Self::Unset)
    }
}

impl std::fmt::Display for CertificateChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Personal vs. company registration, meaningful only in the no-certificate
/// flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileType {
    #[default]
    Unset,
    Personal,
    Company,
}

impl ProfileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unset => "unset",
            Self::Personal => "personal",
            Self::Company => "company",
        }
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, Self::Unset)
    }
}

impl std::fmt::Display for ProfileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a company is administered, meaningful only for company profiles.
///
/// Joint administration requires a certificate from every administrator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdministrationType {
    #[default]
    Individual,
    Joint,
}

impl AdministrationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::Joint => "joint",
        }
    }
}

impl std::fmt::Display for AdministrationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The complete set of flow-shaping choices.
///
/// `profile_type` is only meaningful while `has_certificate` is `No`, and
/// the administration fields only while the profile is `Company`. Stale
/// values may linger after the user backtracks; the planner and the payload
/// builder must ignore them whenever the governing choice does not select
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchSelections {
    pub has_certificate: CertificateChoice,
    pub profile_type: ProfileType,
    pub administration_type: AdministrationType,
    pub is_administrator: bool,
}

impl Default for BranchSelections {
    fn default() -> Self {
        Self {
            has_certificate: CertificateChoice::Unset,
            profile_type: ProfileType::Unset,
            administration_type: AdministrationType::Individual,
            // Sessions start assuming the person filling the form is an
            // administrator; the company-details step re-asks explicitly.
            is_administrator: true,
        }
    }
}

impl BranchSelections {
    /// Apply a partial update, leaving unmentioned choices untouched.
    pub fn merge(&mut self, patch: BranchPatch) {
        if let Some(choice) = patch.has_certificate {
            self.has_certificate = choice;
        }
        if let Some(profile) = patch.profile_type {
            self.profile_type = profile;
        }
        if let Some(admin_type) = patch.administration_type {
            self.administration_type = admin_type;
        }
        if let Some(is_admin) = patch.is_administrator {
            self.is_administrator = is_admin;
        }
    }

    /// Company profile in the no-certificate flow.
    pub fn is_company_flow(&self) -> bool {
        self.has_certificate == CertificateChoice::No && self.profile_type == ProfileType::Company
    }
}

/// Partial update to [`BranchSelections`]; `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_certificate: Option<CertificateChoice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_type: Option<ProfileType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub administration_type: Option<AdministrationType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_administrator: Option<bool>,
}

impl BranchPatch {
    pub fn certificate(choice: CertificateChoice) -> Self {
        Self {
            has_certificate: Some(choice),
            ..Self::default()
        }
    }

    pub fn profile(profile: ProfileType) -> Self {
        Self {
            profile_type: Some(profile),
            ..Self::default()
        }
    }

    pub fn with_administration_type(mut self, admin_type: AdministrationType) -> Self {
        self.administration_type = Some(admin_type);
        self
    }

    pub fn with_is_administrator(mut self, is_admin: bool) -> Self {
        self.is_administrator = Some(is_admin);
        self
    }
}
