// src/core/service_client.rs
//! HTTP client for the CV rewrite service

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::types::{CvUpload, InvalidResult, RewriteResult};

pub const REWRITE_ENDPOINT: &str = "/api/rewrite";
pub const CV_FILE_FIELD: &str = "cv_file";
pub const JOB_DESCRIPTION_FIELD: &str = "job_description";

pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Service returned error status {status}: {body}")]
    Http { status: StatusCode, body: String },

    #[error("Could not reach rewrite service: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Rewrite request timed out")]
    Timeout,

    #[error("Failed to parse rewrite response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid rewrite response: {0}")]
    InvalidResponse(#[from] InvalidResult),

    #[error("Failed to build request: {0}")]
    Request(#[source] reqwest::Error),
}

impl TransportError {
    fn from_send(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout
        } else {
            TransportError::Network(e)
        }
    }
}

/// Anything that can turn a CV and a job description into a [`RewriteResult`].
#[async_trait]
pub trait RewriteTransport: Send + Sync {
    async fn submit(
        &self,
        upload: &CvUpload,
        job_description: &str,
    ) -> Result<RewriteResult, TransportError>;
}

pub struct ServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl ServiceClient {
    /// Create new service client with configuration
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(TransportError::Request)?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, REWRITE_ENDPOINT)
    }

    fn build_form(upload: &CvUpload, job_description: &str) -> Result<Form, TransportError> {
        let part = Part::bytes(upload.content.clone())
            .file_name(upload.file_name.clone())
            .mime_str(upload.content_type())
            .map_err(TransportError::Request)?;

        Ok(Form::new()
            .part(CV_FILE_FIELD, part)
            .text(JOB_DESCRIPTION_FIELD, job_description.to_string()))
    }
}

#[async_trait]
impl RewriteTransport for ServiceClient {
    async fn submit(
        &self,
        upload: &CvUpload,
        job_description: &str,
    ) -> Result<RewriteResult, TransportError> {
        let url = self.endpoint();
        let form = Self::build_form(upload, job_description)?;

        info!(
            "Calling CV rewrite service: {} ({}, {} bytes)",
            url,
            upload.file_name,
            upload.content.len()
        );

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(TransportError::from_send)?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            error!("CV rewrite service error {}: {}", status, body);
            return Err(TransportError::Http { status, body });
        }

        let body = response.text().await.map_err(TransportError::from_send)?;

        let result: RewriteResult = serde_json::from_str(&body)?;
        result.validate()?;

        info!(
            "Rewrite completed: score {:.3}, {} before / {} after lines",
            result.match_score,
            result.before.len(),
            result.after.len()
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let client =
            ServiceClient::new("http://localhost:8000/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8000/api/rewrite");
    }

    #[test]
    fn test_build_form_accepts_unknown_extension() {
        let upload = CvUpload::new("resume", b"plain".to_vec());
        assert!(ServiceClient::build_form(&upload, "").is_ok());
    }
}
