//! Directory-backed store: one `<key>.json` file per key

use crate::error::StoreError;
use crate::store::{validate_key, ProfileStore, StoreChange, CHANGE_CHANNEL_CAPACITY};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::sync::broadcast;

/// Store persisting each key to a file under a root directory
///
/// Writes go to a temporary file in the same directory and are renamed into
/// place, so readers never observe a partially written value.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
    changes: broadcast::Sender<StoreChange>,
}

impl FileStore {
    /// Create store rooted at `root`; the directory is created on first write
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            root: root.into(),
            changes,
        }
    }

    /// Root directory
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing `key`
    #[inline]
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl ProfileStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        validate_key(key)?;
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) if e.kind() == ErrorKind::InvalidData => Err(StoreError::NotText {
                key: key.to_string(),
            }),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        std::fs::create_dir_all(&self.root).map_err(|e| StoreError::io(&self.root, e))?;

        let path = self.path_for(key);
        let mut tmp = NamedTempFile::new_in(&self.root).map_err(|e| StoreError::io(&self.root, e))?;
        tmp.write_all(value.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| StoreError::io(tmp.path(), e))?;
        tmp.persist(&path).map_err(|e| StoreError::io(&path, e.error))?;

        tracing::debug!(key, path = %path.display(), bytes = value.len(), "store write");
        let _ = self.changes.send(StoreChange {
            key: key.to_string(),
        });
        Ok(())
    }

    fn subscribe(&self) -> Option<broadcast::Receiver<StoreChange>> {
        Some(self.changes.subscribe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.get("profiles").unwrap(), None);
    }

    #[test]
    fn write_creates_root_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("nested").join("data");
        let store = FileStore::new(&root);

        store.set("profiles", "[]").unwrap();
        assert!(store.path_for("profiles").exists());
        assert_eq!(store.get("profiles").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn overwrite_replaces_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.set("profiles", "first").unwrap();
        store.set("profiles", "second").unwrap();
        assert_eq!(store.get("profiles").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn non_utf8_content_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        std::fs::write(store.path_for("profiles"), [0xff, 0xfe, 0x00]).unwrap();

        assert!(matches!(store.get("profiles"), Err(StoreError::NotText { .. })));
    }
}
