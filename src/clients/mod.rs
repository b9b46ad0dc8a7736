//! External Collaborators
//!
//! HTTP clients for the two service calls the wizard makes: fetching the
//! organization-type list at session start and submitting the final
//! registration form. Both are defined as traits so the session layer can
//! run against in-memory fakes in tests.

pub mod org_types;
pub mod registration;
