//! File-backed local key-value store
//!
//! Production adapter for device-local persistence: one JSON object in a
//! file on disk. Values survive process restarts but not removal of the
//! storage file, which matches the lifetime the device identity needs.

use notifly_common::services::{BoxFuture, BoxedError, LocalKeyValueStore};
use serde_json::{Map, Value};
use std::io;
use std::path::{Path, PathBuf};

/// Key-value store persisted as a single JSON object file.
pub struct FileKeyValueStore {
    path: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_entries(path: &Path) -> io::Result<Map<String, Value>> {
        match std::fs::read(path) {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Map::new()),
            Err(err) => Err(err),
        }
    }

    fn write_entries(path: &Path, entries: &Map<String, Value>) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let bytes = serde_json::to_vec_pretty(entries)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        std::fs::write(path, bytes)
    }
}

impl LocalKeyValueStore for FileKeyValueStore {
    type Error = BoxedError;

    fn get(&self, key: &str) -> BoxFuture<'_, Option<String>, Self::Error> {
        let path = self.path.clone();
        let key = key.to_string();
        Box::pin(async move {
            let entries = tokio::task::spawn_blocking(move || Self::read_entries(&path))
                .await
                .map_err(BoxedError::new)?
                .map_err(BoxedError::new)?;
            Ok(entries
                .get(&key)
                .and_then(Value::as_str)
                .map(str::to_string))
        })
    }

    fn set(&self, key: &str, value: &str) -> BoxFuture<'_, (), Self::Error> {
        let path = self.path.clone();
        let key = key.to_string();
        let value = value.to_string();
        Box::pin(async move {
            tokio::task::spawn_blocking(move || {
                let mut entries = Self::read_entries(&path)?;
                entries.insert(key, Value::String(value));
                Self::write_entries(&path, &entries)
            })
            .await
            .map_err(BoxedError::new)?
            .map_err(BoxedError::new)?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn values_survive_reopening_the_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("device.json");

        let store = FileKeyValueStore::new(&path);
        assert!(store.get("device_id").await.unwrap().is_none());
        store.set("device_id", "abc-123").await.unwrap();

        // A new instance over the same file sees the value, the way a
        // relaunched process would.
        let reopened = FileKeyValueStore::new(&path);
        assert_eq!(
            reopened.get("device_id").await.unwrap().as_deref(),
            Some("abc-123")
        );
    }

    #[tokio::test]
    async fn set_overwrites_and_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::new(dir.path().join("device.json"));

        store.set("device_id", "abc-123").await.unwrap();
        store.set("last_handle", "ExponentPushToken[xyz]").await.unwrap();
        store.set("device_id", "def-456").await.unwrap();

        assert_eq!(store.get("device_id").await.unwrap().as_deref(), Some("def-456"));
        assert_eq!(
            store.get("last_handle").await.unwrap().as_deref(),
            Some("ExponentPushToken[xyz]")
        );
    }
}
