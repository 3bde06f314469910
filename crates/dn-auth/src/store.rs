//! Persisted key-value storage for the session.
//!
//! Two keys are used: [`TOKEN_KEY`] holds the raw bearer token and
//! [`USER_KEY`] the JSON-serialized user record. No transaction spans both;
//! the session manager restores prior values itself when a write fails.

use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::error::StoreError;

pub const TOKEN_KEY: &str = "authToken";
pub const USER_KEY: &str = "user";

/// Asynchronous string key-value store that survives restarts.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StoreError>> + Send;

    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Remove every key in `keys`. Missing keys are not an error.
    fn delete(&self, keys: &[&str]) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Read several keys at once. Absent keys are left out of the map.
    fn get_many(
        &self,
        keys: &[&str],
    ) -> impl Future<Output = Result<HashMap<String, String>, StoreError>> + Send;
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-process store for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the given entries already present.
    #[must_use]
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self {
            entries: Mutex::new(entries),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, keys: &[&str]) -> Result<(), StoreError> {
        let mut entries = self.lock();
        for key in keys {
            entries.remove(*key);
        }
        Ok(())
    }

    async fn get_many(&self, keys: &[&str]) -> Result<HashMap<String, String>, StoreError> {
        let entries = self.lock();
        Ok(keys
            .iter()
            .filter_map(|key| entries.get(*key).map(|v| ((*key).to_string(), v.clone())))
            .collect())
    }
}

// ---------------------------------------------------------------------------
// FileStore
// ---------------------------------------------------------------------------

/// A JSON object on disk, one string value per key.
///
/// Writes go to a sibling temp file that is renamed over the original. On
/// Unix the directory is `0700` and the file `0600`. Read-modify-write cycles
/// are serialized by an async mutex.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: tokio::sync::Mutex<()>,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: tokio::sync::Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_map(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&contents).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    /// Read for a write cycle. A corrupt file is discarded rather than
    /// blocking every later write; the flag reports that it needs rewriting.
    async fn read_map_for_update(&self) -> Result<(BTreeMap<String, String>, bool), StoreError> {
        match self.read_map().await {
            Ok(map) => Ok((map, false)),
            Err(StoreError::Corrupt { path, reason }) => {
                tracing::warn!(path = %path.display(), %reason, "discarding corrupt session store");
                Ok((BTreeMap::new(), true))
            }
            Err(error) => Err(error),
        }
    }

    async fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source| StoreError::Io { path, source }
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(io_err(parent))?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Err(e) =
                    tokio::fs::set_permissions(parent, std::fs::Permissions::from_mode(0o700)).await
                {
                    tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
                }
            }
        }

        let contents = serde_json::to_string_pretty(map).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, contents).await.map_err(io_err(&tmp))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(&tmp, std::fs::Permissions::from_mode(0o600))
                .await
                .map_err(io_err(&tmp))?;
        }
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(io_err(&self.path))
    }
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let _guard = self.lock.lock().await;
        Ok(self.read_map().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let (mut map, _) = self.read_map_for_update().await?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map).await
    }

    async fn delete(&self, keys: &[&str]) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let (mut map, repaired) = self.read_map_for_update().await?;
        let before = map.len();
        for key in keys {
            map.remove(*key);
        }
        if map.len() == before && !repaired {
            return Ok(());
        }
        self.write_map(&map).await
    }

    async fn get_many(&self, keys: &[&str]) -> Result<HashMap<String, String>, StoreError> {
        let _guard = self.lock.lock().await;
        let mut map = self.read_map().await?;
        Ok(keys
            .iter()
            .filter_map(|key| map.remove(*key).map(|v| ((*key).to_string(), v)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn memory_store_round_trip() {
        let store = MemoryStore::new();
        store.set(TOKEN_KEY, "abc123").await.unwrap();
        assert_eq!(store.get(TOKEN_KEY).await.unwrap().as_deref(), Some("abc123"));

        store.delete(&[TOKEN_KEY, USER_KEY]).await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn get_many_skips_absent_keys() {
        let store = MemoryStore::with_entries([(TOKEN_KEY, "abc123")]);
        let found = store.get_many(&[TOKEN_KEY, USER_KEY]).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[TOKEN_KEY], "abc123");
    }

    #[tokio::test]
    async fn file_store_persists_across_instances() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("nested").join("session.json");

        FileStore::new(&path).set(TOKEN_KEY, "abc123").await.unwrap();
        FileStore::new(&path).set(USER_KEY, "{}").await.unwrap();

        let reopened = FileStore::new(&path);
        let found = reopened.get_many(&[TOKEN_KEY, USER_KEY]).await.unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[TOKEN_KEY], "abc123");
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn file_store_missing_file_reads_empty() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = FileStore::new(tmp.path().join("session.json"));
        assert_eq!(store.get(TOKEN_KEY).await.unwrap(), None);
        store.delete(&[TOKEN_KEY]).await.unwrap();
    }

    #[tokio::test]
    async fn file_store_delete_removes_keys() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = FileStore::new(tmp.path().join("session.json"));
        store.set(TOKEN_KEY, "abc123").await.unwrap();
        store.set(USER_KEY, "{}").await.unwrap();
        store.set("theme", "dark").await.unwrap();

        store.delete(&[TOKEN_KEY, USER_KEY]).await.unwrap();
        let found = store.get_many(&[TOKEN_KEY, USER_KEY, "theme"]).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found["theme"], "dark");
    }

    #[tokio::test]
    async fn corrupt_file_fails_reads_but_not_writes() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("session.json");
        std::fs::write(&path, "{not json").expect("write");
        let store = FileStore::new(&path);

        assert!(matches!(
            store.get(TOKEN_KEY).await,
            Err(StoreError::Corrupt { .. })
        ));

        store.delete(&[TOKEN_KEY, USER_KEY]).await.unwrap();
        assert_eq!(store.get(TOKEN_KEY).await.unwrap(), None);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn file_store_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let dir = tmp.path().join(".dailyneeds");
        let path = dir.join("session.json");
        FileStore::new(&path).set(TOKEN_KEY, "abc123").await.unwrap();

        let file_mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        let dir_mode = std::fs::metadata(&dir).unwrap().permissions().mode() & 0o777;
        assert_eq!(file_mode, 0o600, "session file should be 0600");
        assert_eq!(dir_mode, 0o700, "session dir should be 0700");
    }
}
