//! Offline smoke walk of the wizard flows.
//!
//! Drives the flow controller through both the certificate and the company
//! flow without touching the network, printing the planned steps and the
//! assembled submission record. Useful as a quick sanity check after
//! changing planner or validation rules.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use signup_types::{
    AdministrationType, BranchPatch, CertificateChoice, CertificateIdentity, FileRef,
    PaymentMethod, ProfileType,
};
use signup_wizard::controller::{AdvanceOutcome, WizardController};
use signup_wizard::payload;

fn print_plan(label: &str, controller: &WizardController) {
    let steps: Vec<String> = controller
        .plan()
        .iter()
        .map(|s| s.id.to_string())
        .collect();
    println!("{label}: [{}]", steps.join(", "));
}

fn advance_or_report(controller: &mut WizardController) {
    match controller.advance() {
        AdvanceOutcome::Advanced { to } => println!("  -> advanced to {to}"),
        AdvanceOutcome::Blocked { message } => println!("  -> blocked: {message}"),
        AdvanceOutcome::AtTerminal => println!("  -> at terminal step"),
    }
}

fn certificate_flow() -> Result<()> {
    println!("== certificate flow ==");
    let mut c = WizardController::new();
    print_plan("initial plan", &c);

    c.select_branch(BranchPatch::certificate(CertificateChoice::Yes));
    print_plan("after yes", &c);

    advance_or_report(&mut c);
    c.set_certificate_files(vec![FileRef::new("cert.p12", "application/x-pkcs12")]);
    c.apply_certificate_identity(CertificateIdentity {
        name: "John Doe".to_string(),
        email: "john.doe@example.com".to_string(),
        tax_id: "12345678A".to_string(),
    });
    advance_or_report(&mut c);
    c.update_fields(|f| {
        f.phone = "+34 600 000 000".to_string();
        f.bank_iban = "ES9121000418450200051332".to_string();
        f.bank_account_holder = "John Doe".to_string();
    });
    advance_or_report(&mut c);

    let record = payload::build(c.state());
    println!("record: {}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

fn company_flow() -> Result<()> {
    println!("== company flow ==");
    let mut c = WizardController::new();

    c.select_branch(BranchPatch::certificate(CertificateChoice::No));
    advance_or_report(&mut c);
    c.select_branch(
        BranchPatch::profile(ProfileType::Company)
            .with_administration_type(AdministrationType::Joint),
    );
    print_plan("after company", &c);

    advance_or_report(&mut c);
    c.update_fields(|f| {
        f.email = "billing@acme.example".to_string();
        f.phone = "+34 900 000 000".to_string();
        f.bank_iban = "ES9121000418450200051332".to_string();
        f.bank_account_holder = "Acme S.L.".to_string();
        f.organization.company_name = "Acme S.L.".to_string();
        f.organization.type_id = Some(1);
        f.organization.type_name = "S.L.".to_string();
    });
    c.set_company_deed(Some(FileRef::new("deed.pdf", "application/pdf")));
    c.set_admin_certificates(vec![FileRef::new("admin.p12", "application/x-pkcs12")]);
    advance_or_report(&mut c);

    c.choose_payment_method(PaymentMethod::Stripe);
    advance_or_report(&mut c);
    c.confirm_payment()?;
    advance_or_report(&mut c);
    c.set_terms_accepted(true);

    let record = payload::build(c.state());
    println!("record: {}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    certificate_flow()?;
    company_flow()?;
    Ok(())
}
