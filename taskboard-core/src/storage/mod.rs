pub mod local;
pub mod memory;

/// Durable key-value blob store holding whole snapshots.
/// Implementations: LocalStorage (filesystem), MemoryStorage (tests, ephemeral sessions).
///
/// `save` must replace the record atomically: a reader sees either the old
/// or the new contents, never a partial write.
pub trait SnapshotStorage: Send + Sync {
    /// Read the record stored under `key`. `Ok(None)` means nothing was saved yet.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the record stored under `key`.
    fn save(&self, key: &str, contents: &str) -> Result<(), StorageError>;
}

impl<S: SnapshotStorage + ?Sized> SnapshotStorage for std::sync::Arc<S> {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, contents: &str) -> Result<(), StorageError> {
        (**self).save(key, contents)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("Refusing to overwrite non-empty record {0:?} with empty content")]
    RefusedEmptyWrite(String),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Keys become file names, so only a conservative character set is allowed.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
