use axum::{routing::post, Router};
use notifly_common::services::{BoxedError, PushRelayClient, RegistrationStore};
use notifly_config::DispatchConfig;
use std::sync::Arc;
use tracing::info;

use crate::handlers::{send_notification_handler, DispatchState};
use crate::logic::{Dispatcher, NotificationContent};

/// Create the dispatch routes
///
/// Wires the injected registration store and push relay into a
/// [`Dispatcher`] and mounts the send endpoint. Both capabilities come in
/// as trait objects so callers can pass the production adapters or the
/// in-memory doubles.
///
/// # Arguments
///
/// * `config` - Dispatch tunables (notification title and body)
/// * `store` - Registration store the lookups go to
/// * `relay` - Push relay the notifications are forwarded to
///
/// # Returns
///
/// An Axum router with the dispatch endpoint
pub fn routes(
    config: &DispatchConfig,
    store: Arc<dyn RegistrationStore<Error = BoxedError>>,
    relay: Arc<dyn PushRelayClient<Error = BoxedError>>,
) -> Router {
    let dispatcher = Dispatcher::new(store, relay, NotificationContent::from(config));

    info!("Dispatch routes initialized");

    let state = Arc::new(DispatchState {
        dispatcher: Arc::new(dispatcher),
    });

    Router::new()
        .route("/send-notification", post(send_notification_handler))
        .with_state(state)
}
