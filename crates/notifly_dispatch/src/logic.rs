//! Core dispatch logic
//!
//! One dispatch is a single pass through the state machine
//! `Received → Validated → Lookup → {NotFound | RelayAttempt →
//! {RelaySuccess | RelayFailure}}` with no retries, no queuing and no
//! shared mutable in-process state. The HTTP layer in `handlers` only
//! translates the typed outcome into a response.

use notifly_common::services::{BoxedError, PushMessage, PushRelayClient, RegistrationStore};
use notifly_common::HttpStatusCode;
use notifly_config::DispatchConfig;
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// A user-triggered request to send one notification to one device.
///
/// A missing `deviceId` field deserializes to an empty string so it takes
/// the same validation path as an explicitly empty one.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DispatchRequest {
    /// Stable device identifier the registration record is keyed by
    #[serde(default)]
    pub device_id: String,
}

/// The relay response body for a successfully relayed notification.
#[derive(Debug)]
pub struct DispatchOutcome {
    pub relay_response: serde_json::Value,
}

/// Terminal failure states of a dispatch attempt
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The request never reached the store (empty or missing identifier).
    #[error("Validation error: {0}")]
    Validation(String),

    /// No registration record exists for the identifier.
    #[error("User not found")]
    NotFound,

    /// The registration store read failed.
    #[error("Registration store error: {0}")]
    Store(String),

    /// The relay call failed or returned a non-success status.
    #[error("{0}")]
    Relay(String),
}

impl HttpStatusCode for DispatchError {
    fn status_code(&self) -> u16 {
        match self {
            DispatchError::Validation(_) => 400,
            DispatchError::NotFound => 404,
            DispatchError::Store(_) => 500,
            DispatchError::Relay(_) => 500,
        }
    }
}

/// The fixed notification content sent on every dispatch.
#[derive(Debug, Clone)]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
}

impl From<&DispatchConfig> for NotificationContent {
    fn from(config: &DispatchConfig) -> Self {
        Self {
            title: config.title().to_string(),
            body: config.body().to_string(),
        }
    }
}

impl Default for NotificationContent {
    fn default() -> Self {
        Self::from(&DispatchConfig::default())
    }
}

/// Stateless dispatcher over injected store and relay capabilities.
///
/// All state lives in the registration store; concurrent dispatches do
/// not coordinate, matching the read-then-forward contract.
pub struct Dispatcher {
    store: Arc<dyn RegistrationStore<Error = BoxedError>>,
    relay: Arc<dyn PushRelayClient<Error = BoxedError>>,
    content: NotificationContent,
}

impl Dispatcher {
    pub fn new(
        store: Arc<dyn RegistrationStore<Error = BoxedError>>,
        relay: Arc<dyn PushRelayClient<Error = BoxedError>>,
        content: NotificationContent,
    ) -> Self {
        Self {
            store,
            relay,
            content,
        }
    }

    /// Perform one best-effort dispatch for the given request.
    pub async fn dispatch(&self, request: DispatchRequest) -> Result<DispatchOutcome, DispatchError> {
        let device_id = request.device_id.trim();
        if device_id.is_empty() {
            return Err(DispatchError::Validation(
                "deviceId must be present and non-empty".to_string(),
            ));
        }

        let record = self
            .store
            .fetch_registration(device_id)
            .await
            .map_err(|err| DispatchError::Store(err.to_string()))?
            .ok_or(DispatchError::NotFound)?;

        debug!(device_id = %device_id, "registration found, relaying");

        let message = PushMessage {
            to: record.push_handle,
            title: self.content.title.clone(),
            body: self.content.body.clone(),
        };

        let receipt = self
            .relay
            .send_push(message)
            .await
            .map_err(|err| DispatchError::Relay(err.to_string()))?;

        info!(device_id = %device_id, "notification relayed");
        Ok(DispatchOutcome {
            relay_response: receipt.response,
        })
    }
}
