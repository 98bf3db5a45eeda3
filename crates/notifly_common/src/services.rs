//! Capability abstractions for the registration and dispatch workflow.
//!
//! This module defines trait seams for the external collaborators the
//! workflow depends on: the registration store (a document database), the
//! push relay (a third-party delivery gateway), the device-local key-value
//! store, and the platform push subsystem. The traits allow dependency
//! injection and easier testing by decoupling the workflow logic from
//! vendor SDKs; each has one production adapter and one in-memory double.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A wrapper error type that implements std::error::Error for Box<dyn std::error::Error + Send + Sync>
#[derive(Debug)]
pub struct BoxedError(pub Box<dyn StdError + Send + Sync>);

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StdError for BoxedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl From<Box<dyn StdError + Send + Sync>> for BoxedError {
    fn from(err: Box<dyn StdError + Send + Sync>) -> Self {
        BoxedError(err)
    }
}

impl BoxedError {
    /// Wrap any error into a `BoxedError`.
    pub fn new<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        BoxedError(Box::new(err))
    }
}

/// A device-to-push-handle registration record.
///
/// One record per device identifier, keyed by `device_id` in the store.
/// The push handle may change across reinstalls or permission resets, in
/// which case an upsert overwrites the previous value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRecord {
    /// Stable per-device random identifier used as the registration key.
    pub device_id: String,
    /// Opaque token issued by the platform push subsystem, used by the
    /// relay to address this device.
    pub push_handle: String,
    /// When this registration was created or last refreshed.
    pub created_at: DateTime<Utc>,
}

/// The fixed-shape payload forwarded to the push relay.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PushMessage {
    /// Push handle addressing the target device.
    pub to: String,
    /// The title of the notification.
    pub title: String,
    /// The body text of the notification.
    pub body: String,
}

/// The relay's provider-specific response to a delivery attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayReceipt {
    /// The relay's JSON response body, passed through verbatim.
    pub response: serde_json::Value,
}

/// Outcome of a platform notification-permission prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// A trait for registration store operations.
///
/// The store is an external document database keyed by device identifier.
/// Only its read and upsert-with-merge contract is consumed; upserting a
/// record must not delete unrelated fields in the stored document.
pub trait RegistrationStore: Send + Sync {
    /// Error type returned by store operations.
    type Error: StdError + Send + Sync + 'static;

    /// Read the registration record for a device identifier, if any.
    fn fetch_registration(
        &self,
        device_id: &str,
    ) -> BoxFuture<'_, Option<RegistrationRecord>, Self::Error>;

    /// Create or overwrite the registration record for a device, with
    /// merge semantics.
    fn upsert_registration(
        &self,
        record: RegistrationRecord,
    ) -> BoxFuture<'_, RegistrationRecord, Self::Error>;
}

/// A trait for push relay operations.
///
/// The relay is a third-party gateway that performs the actual delivery.
/// One call corresponds to one best-effort attempt; a non-success status
/// from the gateway is an error, not a silent drop.
pub trait PushRelayClient: Send + Sync {
    /// Error type returned by relay operations.
    type Error: StdError + Send + Sync + 'static;

    /// Send a single push message to the relay.
    fn send_push(&self, message: PushMessage) -> BoxFuture<'_, RelayReceipt, Self::Error>;
}

/// A trait for device-scoped key-value persistence.
///
/// Holds the device identity across restarts. Cleared only by wiping
/// local storage, never by the workflow itself.
pub trait LocalKeyValueStore: Send + Sync {
    /// Error type returned by local persistence operations.
    type Error: StdError + Send + Sync + 'static;

    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> BoxFuture<'_, Option<String>, Self::Error>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> BoxFuture<'_, (), Self::Error>;
}

/// A trait for the platform push subsystem.
///
/// The permission prompt and handle minting live in the host platform's
/// SDK; this seam is what the registrar calls in their place.
pub trait PushPlatform: Send + Sync {
    /// Error type returned by platform operations.
    type Error: StdError + Send + Sync + 'static;

    /// Prompt for (or look up) notification permission.
    fn request_permission(&self) -> BoxFuture<'_, PermissionStatus, Self::Error>;

    /// Obtain a push handle scoped to the given push project identifier.
    fn acquire_push_handle(&self, project_id: &str) -> BoxFuture<'_, String, Self::Error>;
}
