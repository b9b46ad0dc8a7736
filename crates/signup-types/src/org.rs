//! Organization Types
//!
//! Records returned by the organization-type lookup collaborator. The
//! lookup is best-effort: callers must tolerate an empty list.

use serde::{Deserialize, Serialize};

/// One selectable organization type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgType {
    pub id: i64,
    pub name: String,
}
