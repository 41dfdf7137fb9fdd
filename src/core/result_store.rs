// src/core/result_store.rs
//! Single-slot handoff between the submission and results views

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::types::RewriteResult;

/// Key the latest rewrite result is stored under.
pub const RESULT_KEY: &str = "tmcv_result";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredResult {
    pub submission_id: Uuid,
    pub stored_at: DateTime<Utc>,
    pub result: RewriteResult,
}

impl StoredResult {
    pub fn new(result: RewriteResult) -> Self {
        Self {
            submission_id: Uuid::new_v4(),
            stored_at: Utc::now(),
            result,
        }
    }

    pub fn is_expired(&self, max_age: Option<Duration>, now: DateTime<Utc>) -> bool {
        match max_age {
            Some(max_age) => now - self.stored_at > max_age,
            None => false,
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access result store at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize stored result: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Raw key/value storage. Typed access goes through [`ResultStore::save`] and
/// [`ResultStore::load`].
#[async_trait]
pub trait ResultStore: Send + Sync {
    async fn put_raw(&self, key: &str, value: String) -> Result<(), StoreError>;

    async fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn save(&self, entry: &StoredResult) -> Result<(), StoreError> {
        let value = serde_json::to_string(entry)?;
        self.put_raw(RESULT_KEY, value).await
    }

    /// Entries that fail to parse, fail validation, or are older than `max_age`
    /// read as absent.
    async fn load(&self, max_age: Option<Duration>) -> Result<Option<StoredResult>, StoreError> {
        let Some(raw) = self.get_raw(RESULT_KEY).await? else {
            debug!("No stored result under {}", RESULT_KEY);
            return Ok(None);
        };

        let entry: StoredResult = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Discarding unreadable stored result: {}", e);
                return Ok(None);
            }
        };

        if let Err(e) = entry.result.validate() {
            warn!("Discarding invalid stored result: {}", e);
            return Ok(None);
        }

        if entry.is_expired(max_age, Utc::now()) {
            warn!(
                "Stored result {} from {} has expired",
                entry.submission_id, entry.stored_at
            );
            return Ok(None);
        }

        Ok(Some(entry))
    }
}

/// In-process store, lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResultStore for MemoryStore {
    async fn put_raw(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.lock().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }
}

/// One JSON file per key inside a state directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn io_error(path: &Path, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[async_trait]
impl ResultStore for FileStore {
    async fn put_raw(&self, key: &str, value: String) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| Self::io_error(&self.dir, e))?;

        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");

        tokio::fs::write(&tmp, value)
            .await
            .map_err(|e| Self::io_error(&tmp, e))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| Self::io_error(&path, e))?;

        debug!("Stored {} at {}", key, path.display());
        Ok(())
    }

    async fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_error(&path, e)),
        }
    }
}
