//! Device identity handling
//!
//! A device identity is a random UUID created once on first launch,
//! persisted in device-local storage and reused on every subsequent
//! launch. The workflow never deletes it; only wiping local storage does.

use notifly_common::services::{BoxedError, LocalKeyValueStore};
use std::sync::Arc;
use uuid::Uuid;

/// Storage key the device identity lives under.
pub const DEVICE_ID_KEY: &str = "device_id";

/// Loads or creates the stable per-device identifier.
pub struct DeviceIdentityStore {
    storage: Arc<dyn LocalKeyValueStore<Error = BoxedError>>,
}

impl DeviceIdentityStore {
    pub fn new(storage: Arc<dyn LocalKeyValueStore<Error = BoxedError>>) -> Self {
        Self { storage }
    }

    /// Return the stored device identifier, minting and persisting a new
    /// UUID when none exists yet. The write happens only on that first
    /// run; afterwards this is a pure read.
    pub async fn load_or_create(&self) -> Result<String, BoxedError> {
        if let Some(existing) = self.storage.get(DEVICE_ID_KEY).await? {
            return Ok(existing);
        }
        let device_id = Uuid::new_v4().to_string();
        self.storage.set(DEVICE_ID_KEY, &device_id).await?;
        Ok(device_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notifly_common::memory::InMemoryKeyValueStore;

    #[tokio::test]
    async fn first_call_mints_and_persists_one_identifier() {
        let storage = Arc::new(InMemoryKeyValueStore::new());
        let identity = DeviceIdentityStore::new(storage.clone());

        let created = identity.load_or_create().await.unwrap();
        assert!(Uuid::parse_str(&created).is_ok());
        assert_eq!(
            storage.get(DEVICE_ID_KEY).await.unwrap().as_deref(),
            Some(created.as_str())
        );
    }

    #[tokio::test]
    async fn later_calls_reuse_the_stored_identifier() {
        let storage = Arc::new(InMemoryKeyValueStore::new());
        let identity = DeviceIdentityStore::new(storage);

        let first = identity.load_or_create().await.unwrap();
        let second = identity.load_or_create().await.unwrap();
        assert_eq!(first, second);
    }
}
