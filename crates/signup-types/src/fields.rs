//! Free-Form Field Data
//!
//! Everything the user types or uploads during the wizard. All fields are
//! optional at rest (empty string / empty collection); which of them are
//! required, and on which step, is a validator concern.

use serde::{Deserialize, Serialize};

/// Reference to an uploaded file binary.
///
/// The wizard core never owns file bytes; it carries the original file name
/// plus a blob reference that the submission layer resolves through its
/// blob store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    /// Original file name as picked by the user.
    pub name: String,
    /// MIME type reported at upload time.
    pub content_type: String,
    /// Storage reference (e.g. `file://...`), if the binary has been staged.
    #[serde(default)]
    pub blob_ref: Option<String>,
}

impl FileRef {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            blob_ref: None,
        }
    }

    pub fn with_blob_ref(mut self, blob_ref: impl Into<String>) -> Self {
        self.blob_ref = Some(blob_ref.into());
        self
    }
}

/// Identity details extracted from an uploaded certificate by the
/// certificate-parsing collaborator, used to pre-fill the verify step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateIdentity {
    pub name: String,
    pub email: String,
    pub tax_id: String,
}

/// Organization details collected on the company step.
///
/// `type_id`/`type_name` come from the organization-type lookup service and
/// are set together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationInfo {
    pub company_name: String,
    pub type_id: Option<i64>,
    pub type_name: String,
    pub address: String,
}

/// Accumulated identity, banking and organization values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldData {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    /// DNI/NIE for individuals, VAT number for companies.
    pub tax_id: String,
    pub bank_iban: String,
    pub bank_account_holder: String,
    pub organization: OrganizationInfo,
}

impl FieldData {
    /// Both bank details present; they are validated as a pair.
    pub fn has_bank_details(&self) -> bool {
        !self.bank_iban.is_empty() && !self.bank_account_holder.is_empty()
    }
}
