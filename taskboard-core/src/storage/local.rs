/// Local filesystem snapshot storage.
///
/// One file per key (`<dir>/<key>.json`) with:
/// - Atomic writes (write to .tmp, fsync, rename, fsync directory)
/// - SHA-256 fingerprint of the last write per key, identical rewrites are skipped
/// - Mutex-guarded writes to prevent concurrent modification

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use sha2::{Digest, Sha256};

use super::{validate_key, SnapshotStorage, StorageError};

pub struct LocalStorage {
    dir: PathBuf,
    /// key -> SHA-256 of the last content written (or read) for that key.
    /// Holding this lock also serializes writes.
    fingerprints: Mutex<HashMap<String, String>>,
}

impl LocalStorage {
    /// Storage rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            fingerprints: Mutex::new(HashMap::new()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }

    /// Compute SHA-256 hash of content (for change detection).
    fn content_hash(content: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content.replace("\r\n", "\n").as_bytes());
        hex::encode(hasher.finalize())
    }

    fn lock_fingerprints(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map only holds hashes; recovering it is always safe.
        self.fingerprints
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Atomic write with fsync: write to .tmp, fsync, rename, fsync directory.
    /// Refuses to write empty content over a non-empty file (data safety).
    fn atomic_write(path: &Path, content: &str) -> Result<(), StorageError> {
        if content.trim().is_empty() {
            if let Ok(existing) = fs::read_to_string(path) {
                if !existing.trim().is_empty() {
                    return Err(StorageError::RefusedEmptyWrite(
                        path.to_string_lossy().to_string(),
                    ));
                }
            }
        }

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let tmp_path = path.with_extension("taskboard.tmp");
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp_path, path)?;

        // fsync directory for rename durability
        if let Some(dir) = path.parent() {
            if let Ok(d) = fs::File::open(dir) {
                let _ = d.sync_all();
            }
        }
        Ok(())
    }
}

impl SnapshotStorage for LocalStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => {
                self.lock_fingerprints()
                    .insert(key.to_string(), Self::content_hash(&content));
                Ok(Some(content))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &str, contents: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let hash = Self::content_hash(contents);

        let mut fingerprints = self.lock_fingerprints();
        if fingerprints.get(key) == Some(&hash) && path.exists() {
            log::debug!("[taskboard.storage] Unchanged content for {}, skipping write", key);
            return Ok(());
        }

        Self::atomic_write(&path, contents)?;
        fingerprints.insert(key.to_string(), hash);
        log::debug!(
            "[taskboard.storage] Wrote {} bytes to {:?}",
            contents.len(),
            path
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_is_none() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());
        assert!(storage.load("boards").unwrap().is_none());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().join("nested"));
        storage.save("boards", "[1,2,3]").unwrap();

        assert_eq!(storage.load("boards").unwrap().as_deref(), Some("[1,2,3]"));
        let on_disk = fs::read_to_string(dir.path().join("nested").join("boards.json")).unwrap();
        assert_eq!(on_disk, "[1,2,3]");
        assert!(!dir.path().join("nested").join("boards.taskboard.tmp").exists());
    }

    #[test]
    fn test_overwrite_replaces_record() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());
        storage.save("boards", "first").unwrap();
        storage.save("boards", "second").unwrap();
        assert_eq!(storage.load("boards").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_identical_save_rewrites_deleted_file() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());
        storage.save("boards", "same").unwrap();
        fs::remove_file(storage.path_for("boards").unwrap()).unwrap();

        storage.save("boards", "same").unwrap();
        assert_eq!(storage.load("boards").unwrap().as_deref(), Some("same"));
    }

    #[test]
    fn test_refuses_empty_over_non_empty() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());
        storage.save("boards", "data").unwrap();

        let result = storage.save("boards", "  ");
        assert!(matches!(result, Err(StorageError::RefusedEmptyWrite(_))));
        assert_eq!(storage.load("boards").unwrap().as_deref(), Some("data"));
    }

    #[test]
    fn test_invalid_key_rejected() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());
        assert!(matches!(
            storage.save("../outside", "x"),
            Err(StorageError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_content_hash_normalizes_line_endings() {
        assert_eq!(
            LocalStorage::content_hash("a\nb"),
            LocalStorage::content_hash("a\r\nb")
        );
        assert_ne!(LocalStorage::content_hash("a"), LocalStorage::content_hash("b"));
    }
}
