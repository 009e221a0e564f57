/// In-process snapshot storage for tests and sessions that should not touch disk.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;

use super::{validate_key, SnapshotStorage, StorageError};

#[derive(Default)]
pub struct MemoryStorage {
    records: RwLock<HashMap<String, String>>,
    saves: AtomicUsize,
    fail_saves: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with one record.
    pub fn with_record(key: &str, contents: &str) -> Self {
        let storage = Self::new();
        storage
            .records
            .write()
            .unwrap_or_else(|p| p.into_inner())
            .insert(key.to_string(), contents.to_string());
        storage
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Current raw record for `key`.
    pub fn record(&self, key: &str) -> Option<String> {
        self.records
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .get(key)
            .cloned()
    }

    /// Make every subsequent save fail with an IO error (simulates a full disk).
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }
}

impl SnapshotStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        Ok(self.record(key))
    }

    fn save(&self, key: &str, contents: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "simulated write failure",
            )));
        }
        self.records
            .write()
            .unwrap_or_else(|p| p.into_inner())
            .insert(key.to_string(), contents.to_string());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
