// src/views/mod.rs
//! Control logic of the two screens, independent of how they are drawn

use anyhow::Result;

pub mod results;
pub mod submission;

pub use results::{
    DownloadControl, DownloadError, ResultsPage, ResultsState, ResultsView, SystemOpener,
    UrlOpener,
};
pub use submission::{SubmissionPhase, SubmissionView, SubmitOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Submission,
    Results,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Submission => "/",
            Route::Results => "/result",
        }
    }
}

pub trait Navigator: Send {
    fn navigate(&mut self, route: Route) -> Result<()>;
}

/// Records the requested route so the caller can switch screens afterwards.
#[derive(Debug, Default)]
pub struct PendingNavigation {
    pub route: Option<Route>,
}

impl Navigator for PendingNavigation {
    fn navigate(&mut self, route: Route) -> Result<()> {
        tracing::debug!("Navigating to {}", route.path());
        self.route = Some(route);
        Ok(())
    }
}
