//! Payload Builder
//!
//! Deterministic assembly of the normalized [`SubmissionRecord`] from
//! terminal wizard state. Every business rule in the mapping is written out
//! here as one declarative assignment per output field, so the encoding is
//! auditable independent of the transport that ships it.
//!
//! Flow-dependent fields are guarded on the governing branch choice, never
//! on a subordinate choice alone: a profile type left over from an
//! abandoned no-certificate flow must not leak an organization payload into
//! the certificate flow.

use signup_types::{CertificateChoice, OtherCertificate, SubmissionRecord};

use crate::state::WizardState;

/// Build the submission record for the given state.
///
/// Pure and total: any reachable terminal state maps to a record, and equal
/// states map to identical records.
pub fn build(state: &WizardState) -> SubmissionRecord {
    let has_certificate = state.selections.has_certificate == CertificateChoice::Yes;
    let is_organization = state.selections.is_company_flow();

    let user_type = if is_organization {
        "organization"
    } else {
        "individual"
    };

    // Certificate holders arrive with their details already on file, so the
    // backend skips the FNMT/AEAT auto-connection it performs for everyone
    // else.
    let auto_connect = if has_certificate { "false" } else { "true" };
    let auto_fill = if has_certificate { "true" } else { "false" };

    let other_certificate = if state.admin_certificates.is_empty() {
        String::new()
    } else {
        let refs: Vec<OtherCertificate> = state
            .admin_certificates
            .iter()
            .map(OtherCertificate::from_file)
            .collect();
        serde_json::to_string(&refs).unwrap_or_default()
    };

    SubmissionRecord {
        name: state.fields.name.clone(),
        email: state.fields.email.clone(),
        password: state.fields.password.clone(),
        user_type: user_type.to_string(),
        phone: state.fields.phone.clone(),
        tax_id: state.fields.tax_id.clone(),
        registration_flow: if is_organization {
            "company_flow".to_string()
        } else {
            "personal_flow".to_string()
        },
        role: "user".to_string(),
        has_digital_certificate: match state.selections.has_certificate {
            CertificateChoice::Yes => "yes_flow".to_string(),
            CertificateChoice::No => "no_flow".to_string(),
            CertificateChoice::Unset => String::new(),
        },
        auto_fill: auto_fill.to_string(),
        dni_nie: if is_organization {
            String::new()
        } else {
            state.fields.tax_id.clone()
        },
        iban: state.fields.bank_iban.clone(),
        account_holder: state.fields.bank_account_holder.clone(),
        connect_to_fnmt: auto_connect.to_string(),
        connect_to_aeat: auto_connect.to_string(),
        // Server-side activation flag, not settable from the client.
        status: "false".to_string(),
        administrator_check: if is_organization {
            state.selections.is_administrator.to_string()
        } else {
            "false".to_string()
        },
        type_of_administration: if is_organization {
            state.selections.administration_type.as_str().to_string()
        } else {
            String::new()
        },
        other_certificate,
        payment_method: if state.payment.confirmed {
            // The service expects this fixed provider label; the chosen
            // method id is not forwarded.
            "Stripe".to_string()
        } else {
            String::new()
        },
        certificate: state.certificate_files.first().cloned(),
    }
}
