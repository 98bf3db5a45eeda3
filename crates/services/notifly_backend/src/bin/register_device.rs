//! Registers this machine as a push-notification device.
//!
//! The push handle is supplied as an argument because only the host
//! platform's notification SDK can mint one; everything else (device
//! identity, registration upsert) runs through the same workflow the
//! embedded registrar uses.

use notifly_config::load_config;
use notifly_firestore::FirestoreRegistrationStore;
use notifly_registrar::{
    FileKeyValueStore, PushRegistrar, RegistrationOutcome, StaticPushPlatform,
};
use std::env;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    notifly_common::logging::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        info!("Usage: register_device <push-handle>");
        info!("Example: register_device 'ExponentPushToken[xxxxxxxxxxxxxxxxxxxxxx]'");
        return;
    }
    let push_handle = args[1].clone();

    let config = load_config().expect("Failed to load config");
    let registrar_config = config.registrar.clone().unwrap_or_default();
    let firestore_config = config.firestore.clone().expect("Missing [firestore] configuration");

    let storage_path = registrar_config
        .storage_path
        .unwrap_or_else(|| "device_store.json".to_string());
    let push_project_id = registrar_config.push_project_id.unwrap_or_default();

    let registrar = PushRegistrar::new(
        Arc::new(FileKeyValueStore::new(storage_path)),
        Arc::new(StaticPushPlatform::granted(push_handle)),
        Arc::new(FirestoreRegistrationStore::new(firestore_config)),
        push_project_id,
    );

    match registrar.register_device().await {
        Ok(RegistrationOutcome::Registered(record)) => {
            info!(
                device_id = %record.device_id,
                "device registered; dispatch with {{\"deviceId\":\"{}\"}}",
                record.device_id
            );
        }
        Ok(RegistrationOutcome::PermissionDenied) => {
            info!("notification permission denied; nothing was written");
        }
        Err(err) => {
            error!("registration failed: {err}");
            std::process::exit(1);
        }
    }
}
