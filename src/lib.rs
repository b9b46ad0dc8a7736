//! Signup Service Integration
//!
//! Wires the pure wizard core (`signup-wizard`) to its external
//! collaborators: the organization-type lookup, the registration submission
//! endpoint, and blob storage for uploaded document binaries.
//!
//! The core stays synchronous; everything async lives here.

pub mod blob;
pub mod clients;
pub mod config;
pub mod session;

pub use blob::{BlobStore, BlobStoreError, LocalBlobStore};
pub use clients::org_types::{HttpOrgTypeLookup, LookupError, OrgTypeLookup};
pub use clients::registration::{
    HttpRegistrationSubmitter, RegistrationSubmitter, SubmissionError,
};
pub use config::SignupConfig;
pub use session::{RegistrationSession, SessionError};
