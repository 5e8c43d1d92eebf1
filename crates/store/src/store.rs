//! Fixed-key durable storage under the platform data directory.
//!
//! Each key maps to one file. Writes go through a temporary file and a
//! rename so a crash never leaves a half-written value behind.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Key for the raw bytes of the loaded document
pub const DOCUMENT_KEY: &str = "document.pdf";

/// Key for the serialized annotation list
pub const ANNOTATIONS_KEY: &str = "annotations.json";

/// Key for the last viewed page number
pub const LAST_PAGE_KEY: &str = "last-page.json";

/// Key for the serialized user profile
pub const USER_INFO_KEY: &str = "user-info.json";

/// Errors for storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),

    /// The platform exposes no data directory
    #[error("no data directory available")]
    NoDataDir,
}

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Durable key/value store rooted at a directory.
///
/// Cheap to clone; holds only the root path. All methods take `&self` and
/// callers on the UI thread are the only writers.
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    /// Open the store at the platform default location.
    ///
    /// - macOS: ~/Library/Application Support/pagemark
    /// - Linux: ~/.local/share/pagemark
    /// - Windows: %APPDATA%\pagemark
    pub fn open_default() -> StoreResult<Self> {
        let root = dirs::data_dir().ok_or(StoreError::NoDataDir)?.join("pagemark");
        Self::at(root)
    }

    /// Open the store at an explicit directory, creating it if needed.
    pub fn at<P: AsRef<Path>>(root: P) -> StoreResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Directory the store writes into.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }

    /// Persist raw bytes under a key, atomically.
    pub fn save_bytes(&self, key: &str, bytes: &[u8]) -> StoreResult<()> {
        let path = self.key_path(key);
        let temp = path.with_extension("tmp");
        fs::write(&temp, bytes)?;
        fs::rename(&temp, &path)?;
        Ok(())
    }

    /// Load raw bytes for a key, or `None` if nothing is stored.
    pub fn load_bytes(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read(&path)?))
    }

    /// Persist a value as pretty-printed JSON under a key.
    pub fn save_json<T: Serialize>(&self, key: &str, value: &T) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.save_bytes(key, json.as_bytes())
    }

    /// Load and deserialize a JSON value, or `None` if nothing is stored.
    pub fn load_json<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        let Some(bytes) = self.load_bytes(key)? else {
            return Ok(None);
        };
        let value = serde_json::from_slice(&bytes)
            .map_err(|e| StoreError::Deserialization(e.to_string()))?;
        Ok(Some(value))
    }

    /// Remove a key. Succeeds when the key is absent.
    pub fn remove(&self, key: &str) -> StoreResult<()> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Whether a key currently holds a value.
    pub fn contains(&self, key: &str) -> bool {
        self.key_path(key).exists()
    }

    /// Remove the persisted document, annotation list and last viewed page.
    ///
    /// Succeeds when nothing is stored. The user profile is kept.
    pub fn clear(&self) -> StoreResult<()> {
        self.remove(DOCUMENT_KEY)?;
        self.remove(ANNOTATIONS_KEY)?;
        self.remove(LAST_PAGE_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        page: u32,
        text: String,
    }

    fn temp_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::at(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn bytes_roundtrip() {
        let (_dir, store) = temp_store();

        store.save_bytes(DOCUMENT_KEY, b"%PDF-1.4 fake").unwrap();
        let loaded = store.load_bytes(DOCUMENT_KEY).unwrap();
        assert_eq!(loaded.as_deref(), Some(b"%PDF-1.4 fake".as_slice()));
    }

    #[test]
    fn load_missing_key_is_none() {
        let (_dir, store) = temp_store();

        assert!(store.load_bytes(DOCUMENT_KEY).unwrap().is_none());
        assert!(store.load_json::<Note>(ANNOTATIONS_KEY).unwrap().is_none());
    }

    #[test]
    fn json_roundtrip_preserves_order() {
        let (_dir, store) = temp_store();

        let notes = vec![
            Note {
                page: 2,
                text: "second".into(),
            },
            Note {
                page: 1,
                text: "first".into(),
            },
            Note {
                page: 2,
                text: "third".into(),
            },
        ];
        store.save_json(ANNOTATIONS_KEY, &notes).unwrap();

        let loaded: Vec<Note> = store.load_json(ANNOTATIONS_KEY).unwrap().unwrap();
        assert_eq!(loaded, notes);
    }

    #[test]
    fn corrupt_json_reports_deserialization_error() {
        let (_dir, store) = temp_store();

        store.save_bytes(ANNOTATIONS_KEY, b"{not json").unwrap();
        let result = store.load_json::<Vec<Note>>(ANNOTATIONS_KEY);
        assert!(matches!(result, Err(StoreError::Deserialization(_))));
    }

    #[test]
    fn overwrite_replaces_value() {
        let (_dir, store) = temp_store();

        store.save_json(LAST_PAGE_KEY, &3u32).unwrap();
        store.save_json(LAST_PAGE_KEY, &7u32).unwrap();
        let page: u32 = store.load_json(LAST_PAGE_KEY).unwrap().unwrap();
        assert_eq!(page, 7);
    }

    #[test]
    fn remove_missing_key_is_ok() {
        let (_dir, store) = temp_store();
        assert!(store.remove(DOCUMENT_KEY).is_ok());
    }

    #[test]
    fn clear_on_empty_store_succeeds() {
        let (_dir, store) = temp_store();
        assert!(store.clear().is_ok());
    }

    #[test]
    fn clear_removes_document_keys_but_keeps_user() {
        let (_dir, store) = temp_store();

        store.save_bytes(DOCUMENT_KEY, b"pdf").unwrap();
        store.save_json(LAST_PAGE_KEY, &2u32).unwrap();
        store.save_json(ANNOTATIONS_KEY, &Vec::<Note>::new()).unwrap();
        store
            .save_json(USER_INFO_KEY, &Note {
                page: 0,
                text: "admin".into(),
            })
            .unwrap();

        store.clear().unwrap();

        assert!(!store.contains(DOCUMENT_KEY));
        assert!(!store.contains(LAST_PAGE_KEY));
        assert!(!store.contains(ANNOTATIONS_KEY));
        assert!(store.contains(USER_INFO_KEY));
    }
}
