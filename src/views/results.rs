// src/views/results.rs
//! Results screen: match score, before/after comparison, download control

use serde::Serialize;
use std::process::Command;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::core::{ResultStore, StoredResult};
use crate::render::{render, Comparison, TextStyle};

pub const NO_RESULT_MESSAGE: &str = "No result found. Please upload your CV first.";
pub const DOWNLOAD_LABEL: &str = "Download Tailored CV (.docx)";

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("No tailored document is available for download")]
    Disabled,

    #[error("Failed to open {url}: {source}")]
    Open {
        url: String,
        #[source]
        source: std::io::Error,
    },
}

/// Opens a URL in a new browsing context.
pub trait UrlOpener {
    fn open(&self, url: &str) -> std::io::Result<()>;
}

/// Hands the URL to the platform's default handler.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl UrlOpener for SystemOpener {
    fn open(&self, url: &str) -> std::io::Result<()> {
        let mut command = if cfg!(target_os = "macos") {
            let mut c = Command::new("open");
            c.arg(url);
            c
        } else if cfg!(target_os = "windows") {
            // Not through `cmd`: it would treat `&` in a query string as a separator.
            let mut c = Command::new("rundll32");
            c.args(["url.dll,FileProtocolHandler", url]);
            c
        } else {
            let mut c = Command::new("xdg-open");
            c.arg(url);
            c
        };

        let status = command.status()?;
        if !status.success() {
            return Err(std::io::Error::other(format!(
                "opener exited with {}",
                status
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadControl {
    url: Option<String>,
}

impl DownloadControl {
    pub fn new(url: Option<String>) -> Self {
        Self { url }
    }

    pub fn label(&self) -> &'static str {
        DOWNLOAD_LABEL
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn is_enabled(&self) -> bool {
        self.url.is_some()
    }

    pub fn invoke<O: UrlOpener + ?Sized>(&self, opener: &O) -> Result<(), DownloadError> {
        let url = self.url.as_deref().ok_or(DownloadError::Disabled)?;
        info!("Opening tailored CV: {}", url);
        opener.open(url).map_err(|source| DownloadError::Open {
            url: url.to_string(),
            source,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultsPage {
    pub submission_id: Uuid,
    pub score_percent: u32,
    pub comparison: Comparison,
    pub download: DownloadControl,
}

impl ResultsPage {
    pub fn from_stored(entry: &StoredResult) -> Self {
        let result = &entry.result;
        Self {
            submission_id: entry.submission_id,
            score_percent: result.score_percent(),
            comparison: render(&result.before, &result.after),
            download: DownloadControl::new(result.download_url.clone()),
        }
    }

    pub fn to_text(&self, style: TextStyle) -> String {
        let mut out = String::new();
        out.push_str("Match Score\n");
        out.push_str(&format!("  {}%\n\n", self.score_percent));
        out.push_str("Before vs After\n");
        out.push_str(&self.comparison.to_text(style));
        out.push('\n');

        match self.download.url() {
            Some(url) => out.push_str(&format!("[{}] {}\n", self.download.label(), url)),
            None => out.push_str(&format!("[{}] (unavailable)\n", self.download.label())),
        }

        out
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ResultsState {
    Loading,
    Missing { message: String },
    Ready(ResultsPage),
}

#[derive(Debug)]
pub struct ResultsView {
    state: ResultsState,
    max_age: Option<chrono::Duration>,
}

impl ResultsView {
    pub fn new(max_age: Option<chrono::Duration>) -> Self {
        Self {
            state: ResultsState::Loading,
            max_age,
        }
    }

    pub fn state(&self) -> &ResultsState {
        &self.state
    }

    pub fn page(&self) -> Option<&ResultsPage> {
        match &self.state {
            ResultsState::Ready(page) => Some(page),
            _ => None,
        }
    }

    /// Read the stored result once. Store failures land in the same error
    /// state as a missing entry.
    pub async fn activate<S: ResultStore + ?Sized>(&mut self, store: &S) -> &ResultsState {
        self.state = match store.load(self.max_age).await {
            Ok(Some(entry)) => ResultsState::Ready(ResultsPage::from_stored(&entry)),
            Ok(None) => ResultsState::Missing {
                message: NO_RESULT_MESSAGE.to_string(),
            },
            Err(e) => {
                warn!("Failed to read stored result: {}", e);
                ResultsState::Missing {
                    message: NO_RESULT_MESSAGE.to_string(),
                }
            }
        };
        &self.state
    }

    pub fn download<O: UrlOpener + ?Sized>(&self, opener: &O) -> Result<(), DownloadError> {
        match self.page() {
            Some(page) => page.download.invoke(opener),
            None => Err(DownloadError::Disabled),
        }
    }
}
