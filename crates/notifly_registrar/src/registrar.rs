//! The push registration workflow
//!
//! Runs once during application startup: obtain or create the device
//! identity, ask the platform for notification permission, acquire a push
//! handle scoped to the configured project, and upsert the registration
//! record into the shared store. A denied permission ends the run without
//! writing anything; every failure is a distinguishable typed error and
//! nothing retries automatically. The caller decides whether to try
//! again on the next launch.

use crate::identity::DeviceIdentityStore;
use chrono::Utc;
use notifly_common::services::{
    BoxedError, LocalKeyValueStore, PermissionStatus, PushPlatform, RegistrationRecord,
    RegistrationStore,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur during device registration
///
/// Each step fails with its own kind, so the caller can tell a local
/// identity problem from a platform or store failure.
#[derive(Error, Debug)]
pub enum RegistrationError {
    /// Device identity could not be read or persisted locally
    #[error("Device identity error: {0}")]
    Identity(String),

    /// The permission API itself failed (distinct from a denial)
    #[error("Permission request error: {0}")]
    Permission(String),

    /// The platform refused to issue a push handle
    #[error("Push handle error: {0}")]
    PushHandle(String),

    /// The registration record could not be written to the store
    #[error("Registration store write error: {0}")]
    StoreWrite(String),
}

/// Result of a completed registration run
#[derive(Debug, Clone, PartialEq)]
pub enum RegistrationOutcome {
    /// Permission granted, handle acquired, record upserted
    Registered(RegistrationRecord),

    /// The user declined notification permission; no record was written
    PermissionDenied,
}

/// The device-side registrar.
///
/// All collaborators are injected capabilities; the registrar owns no
/// vendor SDK state of its own.
pub struct PushRegistrar {
    identity: DeviceIdentityStore,
    platform: Arc<dyn PushPlatform<Error = BoxedError>>,
    store: Arc<dyn RegistrationStore<Error = BoxedError>>,
    push_project_id: String,
}

impl PushRegistrar {
    pub fn new(
        storage: Arc<dyn LocalKeyValueStore<Error = BoxedError>>,
        platform: Arc<dyn PushPlatform<Error = BoxedError>>,
        store: Arc<dyn RegistrationStore<Error = BoxedError>>,
        push_project_id: impl Into<String>,
    ) -> Self {
        Self {
            identity: DeviceIdentityStore::new(storage),
            platform,
            store,
            push_project_id: push_project_id.into(),
        }
    }

    /// Run the registration sequence once.
    ///
    /// Side effects: at most one local write (the device identity, first
    /// run only) and at most one remote upsert.
    pub async fn register_device(&self) -> Result<RegistrationOutcome, RegistrationError> {
        let device_id = self
            .identity
            .load_or_create()
            .await
            .map_err(|err| RegistrationError::Identity(err.to_string()))?;

        let permission = self
            .platform
            .request_permission()
            .await
            .map_err(|err| RegistrationError::Permission(err.to_string()))?;
        if permission == PermissionStatus::Denied {
            warn!(device_id = %device_id, "notification permission denied");
            return Ok(RegistrationOutcome::PermissionDenied);
        }

        let push_handle = self
            .platform
            .acquire_push_handle(&self.push_project_id)
            .await
            .map_err(|err| RegistrationError::PushHandle(err.to_string()))?;

        let record = self
            .store
            .upsert_registration(RegistrationRecord {
                device_id: device_id.clone(),
                push_handle,
                created_at: Utc::now(),
            })
            .await
            .map_err(|err| RegistrationError::StoreWrite(err.to_string()))?;

        info!(device_id = %device_id, "device registered for push notifications");
        Ok(RegistrationOutcome::Registered(record))
    }
}
