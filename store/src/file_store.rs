//! # File-backed preference store
//!
//! [`FilePrefs`] is a [`PrefStore`] implementation that persists preferences
//! to a single TOML document on the local filesystem. It is used on desktop
//! platforms to retain the session across app restarts.
//!
//! ## Layout
//!
//! ```toml
//! isSignedIn = true
//! userId = "u1"
//! name = "Ann"
//! image = "<base64 blob>"
//! ```
//!
//! Every write reloads the document, applies the change, and rewrites the
//! whole file; preferences are small (a handful of keys) so this keeps the
//! implementation simple without a meaningful cost. A missing file reads as
//! an empty store.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use crate::error::StoreError;
use crate::models::PrefValue;
use crate::prefs::PrefStore;

/// TOML-file-backed PrefStore for desktop persistence.
#[derive(Clone, Debug)]
pub struct FilePrefs {
    path: PathBuf,
}

impl FilePrefs {
    /// Create a store backed by the file at `path`. The file and its parent
    /// directory are created on first write.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn load(&self) -> Result<HashMap<String, PrefValue>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(toml::from_str(&raw)?),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, values: &HashMap<String, PrefValue>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, toml::to_string_pretty(values)?)?;
        Ok(())
    }

    fn put(&self, key: &str, value: PrefValue) -> Result<(), StoreError> {
        let mut values = self.load()?;
        values.insert(key.to_string(), value);
        self.save(&values)
    }
}

impl PrefStore for FilePrefs {
    async fn put_bool(&self, key: &str, value: bool) -> Result<(), StoreError> {
        self.put(key, PrefValue::Bool(value))
    }

    async fn put_string(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.put(key, PrefValue::String(value.to_string()))
    }

    async fn get_bool(&self, key: &str) -> Result<Option<bool>, StoreError> {
        match self.load()?.remove(key) {
            None => Ok(None),
            Some(PrefValue::Bool(value)) => Ok(Some(value)),
            Some(PrefValue::String(_)) => Err(StoreError::WrongType {
                key: key.to_string(),
            }),
        }
    }

    async fn get_string(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self.load()?.remove(key) {
            None => Ok(None),
            Some(PrefValue::String(value)) => Ok(Some(value)),
            Some(PrefValue::Bool(_)) => Err(StoreError::WrongType {
                key: key.to_string(),
            }),
        }
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut values = self.load()?;
        if values.remove(key).is_some() {
            self.save(&values)?;
        }
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{keys, Session};
    use crate::prefs::Preferences;

    #[tokio::test]
    async fn test_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");

        let prefs = Preferences::new(FilePrefs::new(path.clone()));
        prefs
            .store_session(&Session {
                user_id: "u1".to_string(),
                name: "Ann".to_string(),
                image: Some("aGVsbG8=".to_string()),
            })
            .await
            .unwrap();

        // A second instance over the same file sees the session
        let reopened = Preferences::new(FilePrefs::new(path));
        let session = reopened.session().await.unwrap().unwrap();
        assert_eq!(session.user_id, "u1");
        assert_eq!(session.name, "Ann");
        assert_eq!(session.image.as_deref(), Some("aGVsbG8="));
    }

    #[tokio::test]
    async fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePrefs::new(dir.path().join("never-written.toml"));

        assert!(store.get_bool(keys::IS_SIGNED_IN).await.unwrap().is_none());
        assert!(store.get_string(keys::NAME).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePrefs::new(dir.path().join("nested/dir/prefs.toml"));

        store.put_bool(keys::IS_SIGNED_IN, true).await.unwrap();
        assert_eq!(store.get_bool(keys::IS_SIGNED_IN).await.unwrap(), Some(true));
    }

    #[tokio::test]
    async fn test_clear_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        let store = FilePrefs::new(path.clone());

        store.put_string(keys::NAME, "Ann").await.unwrap();
        assert!(path.exists());

        store.clear().await.unwrap();
        assert!(!path.exists());
        // Clearing an already-missing file is fine
        store.clear().await.unwrap();
    }
}
