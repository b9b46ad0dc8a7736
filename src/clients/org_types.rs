//! Organization-Type Lookup
//!
//! No-argument call returning the selectable organization types. The
//! lookup is best-effort: the session degrades to an empty list when it
//! fails, so company signups can still proceed manually later.

use async_trait::async_trait;
use thiserror::Error;

use signup_types::OrgType;

use crate::config::SignupConfig;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("lookup returned status {0}")]
    UnexpectedStatus(u16),
}

/// The organization-type lookup collaborator.
#[async_trait]
pub trait OrgTypeLookup: Send + Sync {
    async fn fetch_org_types(&self) -> Result<Vec<OrgType>, LookupError>;
}

/// reqwest-backed lookup against the registration service.
pub struct HttpOrgTypeLookup {
    base_url: String,
    client: reqwest::Client,
}

impl HttpOrgTypeLookup {
    pub fn new(config: &SignupConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            base_url: config.api_base_url.clone(),
            client,
        })
    }
}

#[async_trait]
impl OrgTypeLookup for HttpOrgTypeLookup {
    async fn fetch_org_types(&self) -> Result<Vec<OrgType>, LookupError> {
        let url = format!("{}/auth/organization-types", self.base_url);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::UnexpectedStatus(status.as_u16()));
        }

        Ok(response.json().await?)
    }
}
