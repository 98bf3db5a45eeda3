use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Registration Store (Firestore) Config ---
// Holds non-secret Firestore config. The service account key stays in the
// file referenced by key_path.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct FirestoreConfig {
    pub project_id: Option<String>,
    pub key_path: Option<String>,
    /// Collection holding the registration documents. Defaults to "devices".
    pub collection: Option<String>,
}

impl FirestoreConfig {
    pub fn collection(&self) -> &str {
        self.collection.as_deref().unwrap_or("devices")
    }
}

// --- Push Relay Config ---
// Holds non-secret relay config. The bearer credential is loaded directly
// from the env var: RELAY_ACCESS_TOKEN
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct RelayConfig {
    /// Gateway endpoint. Defaults to the Expo push send endpoint.
    pub url: Option<String>,
    /// Upper bound on the relay call duration.
    pub timeout_secs: Option<u64>,
}

pub const DEFAULT_RELAY_URL: &str = "https://exp.host/--/api/v2/push/send";
pub const DEFAULT_RELAY_TIMEOUT_SECS: u64 = 10;

impl RelayConfig {
    pub fn url(&self) -> &str {
        self.url.as_deref().unwrap_or(DEFAULT_RELAY_URL)
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(DEFAULT_RELAY_TIMEOUT_SECS)
    }
}

// --- Registrar Config ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct RegistrarConfig {
    /// Push project identifier the platform scopes handles to.
    pub push_project_id: Option<String>,
    /// Where the file-backed local store keeps the device identity.
    pub storage_path: Option<String>,
}

// --- Dispatch Config ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct DispatchConfig {
    /// Notification title sent on every dispatch.
    pub title: Option<String>,
    /// Notification body sent on every dispatch.
    pub body: Option<String>,
}

pub const DEFAULT_NOTIFICATION_TITLE: &str = "Test Notification";
pub const DEFAULT_NOTIFICATION_BODY: &str = "You got a notification!";

impl DispatchConfig {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_NOTIFICATION_TITLE)
    }

    pub fn body(&self) -> &str {
        self.body.as_deref().unwrap_or(DEFAULT_NOTIFICATION_BODY)
    }
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub firestore: Option<FirestoreConfig>,
    #[serde(default)]
    pub relay: Option<RelayConfig>,
    #[serde(default)]
    pub registrar: Option<RegistrarConfig>,
    #[serde(default)]
    pub dispatch: Option<DispatchConfig>,
}
