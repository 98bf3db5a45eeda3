// Declare modules within this crate
pub mod error; // Error taxonomy shared across the workflow
pub mod http; // Shared outbound HTTP client
pub mod logging; // Logging utilities
pub mod memory; // In-memory capability adapters (test doubles)
pub mod services; // Capability trait seams and shared models

// Re-export error types and utilities for easier access
pub use error::{
    config_error, not_found, relay_error, store_error, validation_error, HttpStatusCode,
    NotiflyError,
};

// Re-export HTTP utilities for easier access
pub use http::{create_client, HTTP_CLIENT};

// Re-export the capability seams and shared models
pub use services::{
    BoxFuture, BoxedError, LocalKeyValueStore, PermissionStatus, PushMessage, PushPlatform,
    PushRelayClient, RegistrationRecord, RegistrationStore, RelayReceipt,
};
