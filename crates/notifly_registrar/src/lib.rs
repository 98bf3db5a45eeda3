//! Device registration workflow for notifly
//!
//! This crate implements the client-side half of the workflow: a stable
//! device identity kept in local storage, and the startup registration
//! sequence that requests notification permission, obtains a push handle
//! and upserts the device's registration record into the shared store.
//!
//! The registrar runs once per application lifecycle; a failed run never
//! blocks the rest of the host application, and nothing retries
//! automatically.

pub mod identity;
pub mod platform;
pub mod registrar;
pub mod storage;

pub use identity::{DeviceIdentityStore, DEVICE_ID_KEY};
pub use platform::StaticPushPlatform;
pub use registrar::{PushRegistrar, RegistrationError, RegistrationOutcome};
pub use storage::FileKeyValueStore;
