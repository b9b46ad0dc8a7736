//! Submission Record
//!
//! The normalized, flow-independent record handed to the registration
//! service. Every value is already stringified the way the service expects;
//! the mapping from wizard state to these fields lives in the payload
//! builder, not here.

use serde::{Deserialize, Serialize};

use crate::fields::FileRef;

/// Entry of the `other_certificate` JSON list: one administrator
/// certificate reference. The service fills `url_` after upload, so it is
/// always sent empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherCertificate {
    pub name: String,
    pub url_: String,
}

impl OtherCertificate {
    pub fn from_file(file: &FileRef) -> Self {
        Self {
            name: file.name.clone(),
            url_: String::new(),
        }
    }
}

/// The registration form as submitted, one field per service form key.
///
/// `status` is a server-side activation flag and is always `"false"` from
/// the client. The primary certificate travels as a binary part, not a
/// string field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "type")]
    pub user_type: String,
    pub phone: String,
    pub tax_id: String,
    pub registration_flow: String,
    pub role: String,
    pub has_digital_certificate: String,
    pub auto_fill: String,
    pub dni_nie: String,
    pub iban: String,
    pub account_holder: String,
    pub connect_to_fnmt: String,
    pub connect_to_aeat: String,
    pub status: String,
    pub administrator_check: String,
    pub type_of_administration: String,
    /// JSON-serialized list of [`OtherCertificate`], or empty string.
    pub other_certificate: String,
    pub payment_method: String,
    /// Primary certificate attached as binary content at transport time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate: Option<FileRef>,
}

impl SubmissionRecord {
    /// The string fields in the order the service expects them appended to
    /// the multipart form.
    pub fn form_fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("name", &self.name),
            ("email", &self.email),
            ("password", &self.password),
            ("type", &self.user_type),
            ("phone", &self.phone),
            ("tax_id", &self.tax_id),
            ("registration_flow", &self.registration_flow),
            ("role", &self.role),
            ("has_digital_certificate", &self.has_digital_certificate),
            ("auto_fill", &self.auto_fill),
            ("dni_nie", &self.dni_nie),
            ("iban", &self.iban),
            ("account_holder", &self.account_holder),
            ("connect_to_fnmt", &self.connect_to_fnmt),
            ("connect_to_aeat", &self.connect_to_aeat),
            ("status", &self.status),
            ("administrator_check", &self.administrator_check),
            ("type_of_administration", &self.type_of_administration),
            ("other_certificate", &self.other_certificate),
            ("payment_method", &self.payment_method),
        ]
    }
}
