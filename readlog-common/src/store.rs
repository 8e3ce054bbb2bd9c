//! Entry storage
//!
//! Entries live in a flat JSON array, rewritten in full on every append.
//! There is no cross-process locking and no integrity check; appends from
//! one process are serialized by an async mutex.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::entry::ReadingEntry;
use crate::{Error, Result};

/// Default entries file name inside the root folder
pub const DEFAULT_DATA_FILE: &str = "saved_entries.json";

/// Append-only reading entry storage
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Load all entries in insertion order
    async fn load(&self) -> Result<Vec<ReadingEntry>>;

    /// Append one entry, returning its index
    async fn append(&self, entry: ReadingEntry) -> Result<usize>;
}

/// JSON file store
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_entries(&self) -> Result<Vec<ReadingEntry>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Entries file missing, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(Error::CorruptStore {
                    path: self.path.display().to_string(),
                    reason: e.to_string(),
                })
            }
        };

        serde_json::from_str(&content).map_err(|e| Error::CorruptStore {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })
    }

    async fn write_entries(&self, entries: &[ReadingEntry]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_string_pretty(entries)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[async_trait]
impl EntryStore for JsonFileStore {
    async fn load(&self) -> Result<Vec<ReadingEntry>> {
        self.read_entries().await
    }

    async fn append(&self, entry: ReadingEntry) -> Result<usize> {
        let _guard = self.write_lock.lock().await;

        let mut entries = match self.read_entries().await {
            Ok(entries) => entries,
            Err(Error::CorruptStore { path, reason }) => {
                // The unreadable file is replaced by the new list
                warn!(path = %path, reason = %reason, "Entries file unreadable, starting with empty data");
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        entries.push(entry);
        self.write_entries(&entries).await?;

        let index = entries.len() - 1;
        info!(index, path = %self.path.display(), "Entry saved");
        Ok(index)
    }
}

/// In-memory store for tests and throwaway sessions
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<Vec<ReadingEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<ReadingEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }
}

#[async_trait]
impl EntryStore for MemoryStore {
    async fn load(&self) -> Result<Vec<ReadingEntry>> {
        Ok(self.entries.lock().await.clone())
    }

    async fn append(&self, entry: ReadingEntry) -> Result<usize> {
        let mut entries = self.entries.lock().await;
        entries.push(entry);
        Ok(entries.len() - 1)
    }
}
