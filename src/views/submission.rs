// src/views/submission.rs
//! Upload form: collects a CV and a job description and hands the result to
//! the results view.

use anyhow::Result;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::{Navigator, Route};
use crate::core::{ResultStore, RewriteTransport, StoredResult};
use crate::types::CvUpload;
use crate::utils::validate_file_extension;

pub const VALIDATION_MESSAGE: &str = "Please upload a CV and paste a job description.";
pub const FAILURE_MESSAGE: &str = "Failed to process CV. Please try again.";

pub const SUBMIT_LABEL: &str = "Tailor My CV";
pub const SUBMITTING_LABEL: &str = "Processing...";

pub const ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "docx"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
    Idle,
    Validating,
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Missing input; nothing was sent.
    Invalid,
    /// Result stored and the results view requested.
    Navigated(Uuid),
    Failed,
}

/// Marks a request as in flight; the phase returns to `Idle` however the
/// submission ends, including when its future is dropped.
struct InFlight<'a> {
    phase: &'a mut SubmissionPhase,
}

impl<'a> InFlight<'a> {
    fn enter(phase: &'a mut SubmissionPhase) -> Self {
        *phase = SubmissionPhase::Submitting;
        Self { phase }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.phase = SubmissionPhase::Idle;
    }
}

#[derive(Debug)]
pub struct SubmissionView {
    file: Option<CvUpload>,
    job_description: String,
    phase: SubmissionPhase,
    error: Option<String>,
}

impl Default for SubmissionView {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionView {
    pub fn new() -> Self {
        Self {
            file: None,
            job_description: String::new(),
            phase: SubmissionPhase::Idle,
            error: None,
        }
    }

    /// File picker filter: only `.pdf` and `.docx` names are accepted. A
    /// rejected file leaves nothing selected.
    pub fn select_file(&mut self, upload: Option<CvUpload>) -> Result<()> {
        self.file = None;
        if let Some(upload) = upload {
            validate_file_extension(&upload.file_name, ACCEPTED_EXTENSIONS)?;
            self.file = Some(upload);
        }
        Ok(())
    }

    pub fn set_job_description(&mut self, text: impl Into<String>) {
        self.job_description = text.into();
    }

    pub fn selected_file(&self) -> Option<&CvUpload> {
        self.file.as_ref()
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Both a CV and a non-empty job description are present.
    pub fn has_required_input(&self) -> bool {
        self.file.is_some() && !self.job_description.is_empty()
    }

    pub fn is_submit_enabled(&self) -> bool {
        self.phase != SubmissionPhase::Submitting
    }

    pub fn submit_label(&self) -> &'static str {
        match self.phase {
            SubmissionPhase::Submitting => SUBMITTING_LABEL,
            _ => SUBMIT_LABEL,
        }
    }

    pub async fn submit<T, S, N>(
        &mut self,
        transport: &T,
        store: &S,
        navigator: &mut N,
    ) -> SubmitOutcome
    where
        T: RewriteTransport + ?Sized,
        S: ResultStore + ?Sized,
        N: Navigator + ?Sized,
    {
        let Self {
            file,
            job_description,
            phase,
            error: message,
        } = self;

        *phase = SubmissionPhase::Validating;
        *message = None;

        let upload = match file.as_ref() {
            Some(upload) if !job_description.is_empty() => upload,
            _ => {
                info!("Submission rejected: CV or job description missing");
                *message = Some(VALIDATION_MESSAGE.to_string());
                *phase = SubmissionPhase::Idle;
                return SubmitOutcome::Invalid;
            }
        };

        let _in_flight = InFlight::enter(phase);

        let result = match transport.submit(upload, job_description).await {
            Ok(result) => result,
            Err(e) => {
                warn!("CV rewrite failed: {}", e);
                *message = Some(FAILURE_MESSAGE.to_string());
                return SubmitOutcome::Failed;
            }
        };

        let entry = StoredResult::new(result);
        let submission_id = entry.submission_id;

        if let Err(e) = store.save(&entry).await {
            error!("Failed to store rewrite result: {}", e);
            *message = Some(FAILURE_MESSAGE.to_string());
            return SubmitOutcome::Failed;
        }

        if let Err(e) = navigator.navigate(Route::Results) {
            error!("Failed to open results: {}", e);
            *message = Some(FAILURE_MESSAGE.to_string());
            return SubmitOutcome::Failed;
        }

        info!("Submission {} stored", submission_id);
        SubmitOutcome::Navigated(submission_id)
    }
}
