//! Shared Domain Types for the Signup Wizard
//!
//! This crate is the single source of truth for every type that crosses a
//! boundary: wizard core <-> session layer <-> registration service.
//!
//! ## Rules
//!
//! 1. All boundary types live here - no inline struct definitions in the
//!    flow engine or the HTTP clients
//! 2. Required-ness is never encoded in these types; every field a user can
//!    type into is optional/empty at rest and enforced per step by the
//!    validator
//! 3. String enums carry `as_str()` and kebab/snake serde renames so the
//!    wire shape matches the registration service

pub mod fields;
pub mod org;
pub mod payment;
pub mod selections;
pub mod step;
pub mod submission;

pub use fields::{CertificateIdentity, FieldData, FileRef, OrganizationInfo};
pub use org::OrgType;
pub use payment::{PaymentMethod, PaymentSelections};
pub use selections::{AdministrationType, BranchPatch, BranchSelections, CertificateChoice, ProfileType};
pub use step::{StepDefinition, StepId};
pub use submission::{OtherCertificate, SubmissionRecord};
