//! Registration Submission
//!
//! Ships the assembled [`SubmissionRecord`] to the registration service as
//! a multipart form: one text part per string field plus the primary
//! certificate binary, resolved through the blob store at send time.
//!
//! Success is exactly HTTP 200 or 201. Anything else is a rejection whose
//! message comes from the response body's `detail` or `message` field,
//! falling back to a generic string.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use thiserror::Error;
use tracing::info;

use signup_types::SubmissionRecord;

use crate::blob::{BlobStore, BlobStoreError};
use crate::config::SignupConfig;

const GENERIC_FAILURE: &str = "Registration failed. Please try again.";

#[derive(Debug, Error)]
pub enum SubmissionError {
    /// The service refused the registration; the message is user-facing.
    #[error("{0}")]
    Rejected(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Blob(#[from] BlobStoreError),
}

/// The registration submission collaborator.
#[async_trait]
pub trait RegistrationSubmitter: Send + Sync {
    async fn submit(&self, record: &SubmissionRecord) -> Result<(), SubmissionError>;
}

/// reqwest-backed submitter posting the multipart signup form.
pub struct HttpRegistrationSubmitter {
    base_url: String,
    client: reqwest::Client,
    blobs: Arc<dyn BlobStore>,
}

impl HttpRegistrationSubmitter {
    pub fn new(config: &SignupConfig, blobs: Arc<dyn BlobStore>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            base_url: config.api_base_url.clone(),
            client,
            blobs,
        })
    }
}

#[async_trait]
impl RegistrationSubmitter for HttpRegistrationSubmitter {
    async fn submit(&self, record: &SubmissionRecord) -> Result<(), SubmissionError> {
        let mut form = Form::new();
        for (key, value) in record.form_fields() {
            form = form.text(key, value.to_string());
        }

        if let Some(certificate) = &record.certificate {
            let bytes = self.blobs.fetch(certificate).await?;
            let part = Part::bytes(bytes)
                .file_name(certificate.name.clone())
                .mime_str(&certificate.content_type)?;
            form = form.part("certificate", part);
        }

        let url = format!("{}/auth/signup", self.base_url);
        let response = self.client.post(&url).multipart(form).send().await?;
        let status = response.status();

        if status == StatusCode::OK || status == StatusCode::CREATED {
            info!(status = status.as_u16(), "registration accepted");
            return Ok(());
        }

        let body: serde_json::Value = response.json().await.unwrap_or(serde_json::Value::Null);
        Err(SubmissionError::Rejected(rejection_message(&body)))
    }
}

/// Extract the user-facing rejection message from a failure body.
fn rejection_message(body: &serde_json::Value) -> String {
    body.get("detail")
        .and_then(|v| v.as_str())
        .or_else(|| body.get("message").and_then(|v| v.as_str()))
        .unwrap_or(GENERIC_FAILURE)
        .to_string()
}
