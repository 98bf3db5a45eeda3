//! In-memory adapters for the capability traits.
//!
//! These are the test doubles the workflow is designed against: a
//! registration store backed by a map of JSON documents (so merge
//! semantics are observable field by field) and a key-value store backed
//! by a plain map. They are public rather than test-gated because every
//! crate in the workspace, plus downstream demos, drives the workflow
//! through them.

use crate::services::{
    BoxFuture, BoxedError, LocalKeyValueStore, RegistrationRecord, RegistrationStore,
};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

fn lock_or_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // A poisoned lock only means another test thread panicked; the data
    // is still a plain map, so keep going with it.
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// An in-memory registration store.
///
/// Documents are stored as JSON field maps keyed by device identifier, so
/// tests can seed unrelated fields and assert that upserts merge rather
/// than replace.
#[derive(Debug, Default)]
pub struct InMemoryRegistrationStore {
    documents: Mutex<HashMap<String, Map<String, Value>>>,
}

impl InMemoryRegistrationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw document, including fields outside the registration
    /// record. Useful for merge-semantics assertions.
    pub fn insert_document(&self, device_id: &str, fields: Map<String, Value>) {
        lock_or_recover(&self.documents).insert(device_id.to_string(), fields);
    }

    /// Read the raw document for a device identifier, if any.
    pub fn document(&self, device_id: &str) -> Option<Map<String, Value>> {
        lock_or_recover(&self.documents).get(device_id).cloned()
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        lock_or_recover(&self.documents).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn record_from_fields(fields: &Map<String, Value>) -> Option<RegistrationRecord> {
        let device_id = fields.get("deviceId")?.as_str()?.to_string();
        let push_handle = fields.get("pushHandle")?.as_str()?.to_string();
        let created_at = fields
            .get("createdAt")
            .and_then(Value::as_str)
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|ts| ts.with_timezone(&Utc))
            .unwrap_or_else(Utc::now);
        Some(RegistrationRecord {
            device_id,
            push_handle,
            created_at,
        })
    }
}

impl RegistrationStore for InMemoryRegistrationStore {
    type Error = BoxedError;

    fn fetch_registration(
        &self,
        device_id: &str,
    ) -> BoxFuture<'_, Option<RegistrationRecord>, Self::Error> {
        let device_id = device_id.to_string();
        Box::pin(async move {
            let documents = lock_or_recover(&self.documents);
            Ok(documents
                .get(&device_id)
                .and_then(Self::record_from_fields))
        })
    }

    fn upsert_registration(
        &self,
        record: RegistrationRecord,
    ) -> BoxFuture<'_, RegistrationRecord, Self::Error> {
        Box::pin(async move {
            let mut documents = lock_or_recover(&self.documents);
            let fields = documents.entry(record.device_id.clone()).or_default();
            // Merge, not replace: only the record's own fields are written.
            fields.insert("deviceId".into(), Value::String(record.device_id.clone()));
            fields.insert(
                "pushHandle".into(),
                Value::String(record.push_handle.clone()),
            );
            fields.insert(
                "createdAt".into(),
                Value::String(record.created_at.to_rfc3339()),
            );
            Ok(record)
        })
    }
}

/// An in-memory key-value store standing in for device-local persistence.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalKeyValueStore for InMemoryKeyValueStore {
    type Error = BoxedError;

    fn get(&self, key: &str) -> BoxFuture<'_, Option<String>, Self::Error> {
        let key = key.to_string();
        Box::pin(async move { Ok(lock_or_recover(&self.entries).get(&key).cloned()) })
    }

    fn set(&self, key: &str, value: &str) -> BoxFuture<'_, (), Self::Error> {
        let key = key.to_string();
        let value = value.to_string();
        Box::pin(async move {
            lock_or_recover(&self.entries).insert(key, value);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(device_id: &str, push_handle: &str) -> RegistrationRecord {
        RegistrationRecord {
            device_id: device_id.to_string(),
            push_handle: push_handle.to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn fetch_returns_none_for_unknown_device() {
        let store = InMemoryRegistrationStore::new();
        let found = store.fetch_registration("unknown-999").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn upsert_then_fetch_round_trips_the_record() {
        let store = InMemoryRegistrationStore::new();
        store
            .upsert_registration(record("abc-123", "ExponentPushToken[xyz]"))
            .await
            .unwrap();

        let found = store
            .fetch_registration("abc-123")
            .await
            .unwrap()
            .expect("record should exist");
        assert_eq!(found.device_id, "abc-123");
        assert_eq!(found.push_handle, "ExponentPushToken[xyz]");
    }

    #[tokio::test]
    async fn upsert_merges_and_preserves_unrelated_fields() {
        let store = InMemoryRegistrationStore::new();
        let mut seeded = Map::new();
        seeded.insert("name".into(), json!("Notification User"));
        seeded.insert("deviceId".into(), json!("abc-123"));
        seeded.insert("pushHandle".into(), json!("ExponentPushToken[old]"));
        store.insert_document("abc-123", seeded);

        store
            .upsert_registration(record("abc-123", "ExponentPushToken[new]"))
            .await
            .unwrap();

        let fields = store.document("abc-123").expect("document should exist");
        assert_eq!(fields["name"], json!("Notification User"));
        assert_eq!(fields["pushHandle"], json!("ExponentPushToken[new]"));
        assert!(fields.contains_key("createdAt"));
    }

    #[tokio::test]
    async fn kv_store_get_set_round_trips() {
        let store = InMemoryKeyValueStore::new();
        assert!(store.get("device_id").await.unwrap().is_none());
        store.set("device_id", "abc-123").await.unwrap();
        assert_eq!(
            store.get("device_id").await.unwrap().as_deref(),
            Some("abc-123")
        );
    }
}
