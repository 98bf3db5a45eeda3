//! Adapter construction for the backend service.
//!
//! The capabilities the dispatch service needs (registration store, push
//! relay) are built here from the loaded configuration, once at startup,
//! and injected into the routes. Nothing downstream reads configuration
//! as ambient state.

use notifly_common::services::{BoxedError, PushRelayClient, RegistrationStore};
use notifly_common::{config_error, NotiflyError};
use notifly_config::{AppConfig, RelayConfig};
use notifly_dispatch::ExpoPushClient;
use notifly_firestore::FirestoreRegistrationStore;
use std::sync::Arc;
use tracing::info;

/// Build the production registration store from config.
///
/// Requires the `[firestore]` section with a project id.
pub fn build_registration_store(
    config: &AppConfig,
) -> Result<Arc<dyn RegistrationStore<Error = BoxedError>>, NotiflyError> {
    let firestore = config
        .firestore
        .clone()
        .ok_or_else(|| config_error("Missing [firestore] configuration"))?;
    if firestore.project_id.is_none() {
        return Err(config_error("Missing firestore.project_id"));
    }
    info!(collection = firestore.collection(), "registration store: Firestore");
    Ok(Arc::new(FirestoreRegistrationStore::new(firestore)))
}

/// Build the production push relay client from config.
///
/// The `[relay]` section is optional; defaults point at the Expo push
/// gateway with a bounded timeout.
pub fn build_push_relay(
    config: &AppConfig,
) -> Result<Arc<dyn PushRelayClient<Error = BoxedError>>, NotiflyError> {
    let relay = config.relay.clone().unwrap_or_else(RelayConfig::default);
    info!(url = relay.url(), timeout_secs = relay.timeout_secs(), "push relay: Expo gateway");
    let client = ExpoPushClient::from_config(&relay)
        .map_err(|err| NotiflyError::HttpError(err.to_string()))?;
    Ok(Arc::new(client))
}
