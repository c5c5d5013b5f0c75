//! Persisted incremental cursor
//!
//! The cursor is the instant the last fully successful run started. It is
//! loaded at the beginning of a run to bound the feed query and written
//! back only after every stage completed. A missing record means no
//! successful run has happened yet; callers fall back to the Unix epoch
//! for a full backfill.

use crate::domain::{Result, SyncError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Storage for the last-run-time cursor.
#[async_trait]
pub trait CursorStore: Send + Sync {
    /// Loads the cursor, `None` when no run has been recorded.
    async fn load(&self) -> Result<Option<DateTime<Utc>>>;

    /// Persists the cursor, replacing any previous value.
    async fn store(&self, last_run_time: DateTime<Utc>) -> Result<()>;
}

#[derive(Debug, Serialize, Deserialize)]
struct CursorRecord {
    last_run_time: DateTime<Utc>,
}

/// Cursor store backed by a single JSON file.
pub struct FileCursorStore {
    path: PathBuf,
}

impl FileCursorStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl CursorStore for FileCursorStore {
    async fn load(&self) -> Result<Option<DateTime<Utc>>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => {
                let record: CursorRecord = serde_json::from_str(&contents)
                    .map_err(|e| SyncError::State(format!("Invalid cursor record: {e}")))?;
                Ok(Some(record.last_run_time))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SyncError::State(format!(
                "Failed to read cursor at {}: {e}",
                self.path.display()
            ))),
        }
    }

    async fn store(&self, last_run_time: DateTime<Utc>) -> Result<()> {
        let record = CursorRecord { last_run_time };
        let contents = serde_json::to_string_pretty(&record)?;
        tokio::fs::write(&self.path, contents).await.map_err(|e| {
            SyncError::State(format!(
                "Failed to write cursor at {}: {e}",
                self.path.display()
            ))
        })?;
        tracing::debug!(path = %self.path.display(), cursor = %last_run_time, "Cursor persisted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[tokio::test]
    async fn test_missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCursorStore::new(dir.path().join("cursor.json"));
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_store_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCursorStore::new(dir.path().join("cursor.json"));
        let ts = Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap();

        store.store(ts).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(ts));
    }

    #[tokio::test]
    async fn test_store_replaces_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCursorStore::new(dir.path().join("cursor.json"));
        let first = Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2024, 3, 16, 8, 0, 0).unwrap();

        store.store(first).await.unwrap();
        store.store(second).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(second));
    }

    #[tokio::test]
    async fn test_corrupt_record_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cursor.json");
        tokio::fs::write(&path, "not json").await.unwrap();

        let store = FileCursorStore::new(&path);
        let err = store.load().await.unwrap_err();
        assert!(matches!(err, SyncError::State(_)));
    }
}
