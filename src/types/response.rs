use reqwest::Url;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

// ===== Service Response Types =====

/// Body returned by the rewrite service on success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewriteResult {
    pub match_score: f64,
    pub before: Vec<String>,
    pub after: Vec<String>,
    /// The service sends `""` when no document could be stored; that reads as absent.
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub download_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidResult {
    #[error("match_score {0} is outside [0, 1]")]
    ScoreOutOfRange(f64),

    #[error("download_url {url:?} is not an absolute http(s) URL: {reason}")]
    DownloadUrl { url: String, reason: String },
}

impl RewriteResult {
    /// Checks the invariants serde cannot express.
    pub fn validate(&self) -> Result<(), InvalidResult> {
        if !self.match_score.is_finite() || !(0.0..=1.0).contains(&self.match_score) {
            return Err(InvalidResult::ScoreOutOfRange(self.match_score));
        }

        if let Some(url) = &self.download_url {
            let parsed = Url::parse(url).map_err(|e| InvalidResult::DownloadUrl {
                url: url.clone(),
                reason: e.to_string(),
            })?;

            // The URL is handed to the OS opener; only web documents qualify.
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(InvalidResult::DownloadUrl {
                    url: url.clone(),
                    reason: format!("scheme {:?} is not allowed", parsed.scheme()),
                });
            }
        }

        Ok(())
    }

    /// Match score as a rounded whole percentage.
    pub fn score_percent(&self) -> u32 {
        (self.match_score * 100.0).round() as u32
    }
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|url| !url.trim().is_empty()))
}
