//! Where roster snapshots are persisted between sessions.
//!
//! The store saves after every mutation and treats the result as
//! best-effort, so implementations should not retry on their own.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::types::RosterSnapshot;

pub trait Storage {
    /// Load the last saved snapshot, or `None` if nothing was saved yet.
    fn load(&self) -> Result<Option<RosterSnapshot>, StorageError>;

    fn save(&self, snapshot: &RosterSnapshot) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn load(&self) -> Result<Option<RosterSnapshot>, StorageError> {
        (**self).load()
    }

    fn save(&self, snapshot: &RosterSnapshot) -> Result<(), StorageError> {
        (**self).save(snapshot)
    }
}

/// In-memory storage. Clones share the same slot, so a test can keep a
/// handle and inspect what the store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Arc<Mutex<Option<RosterSnapshot>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: RosterSnapshot) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(snapshot))),
        }
    }

    /// The last saved snapshot.
    pub fn saved(&self) -> Option<RosterSnapshot> {
        self.slot.lock().ok().and_then(|s| s.clone())
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> Result<Option<RosterSnapshot>, StorageError> {
        let slot = self.slot.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(slot.clone())
    }

    fn save(&self, snapshot: &RosterSnapshot) -> Result<(), StorageError> {
        let mut slot = self.slot.lock().map_err(|_| StorageError::Poisoned)?;
        *slot = Some(snapshot.clone());
        Ok(())
    }
}

/// Stores the snapshot as a single JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for JsonFileStorage {
    fn load(&self) -> Result<Option<RosterSnapshot>, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&contents)?))
    }

    fn save(&self, snapshot: &RosterSnapshot) -> Result<(), StorageError> {
        let contents = serde_json::to_string_pretty(snapshot)?;
        // Replace the old snapshot only once the new one is fully written.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("Snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Storage lock was poisoned")]
    Poisoned,
}
