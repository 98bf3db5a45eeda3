use config::{Config, ConfigError, Environment, File};
use std::env;
use std::sync::Once;

pub mod models;
pub use models::{
    AppConfig, DispatchConfig, FirestoreConfig, RegistrarConfig, RelayConfig, ServerConfig,
    DEFAULT_NOTIFICATION_BODY, DEFAULT_NOTIFICATION_TITLE, DEFAULT_RELAY_TIMEOUT_SECS,
    DEFAULT_RELAY_URL,
};

static DOTENV: Once = Once::new();

/// Load `.env` once per process, so secrets referenced via env vars are
/// available before the config sources are read.
pub fn ensure_dotenv_loaded() {
    DOTENV.call_once(|| {
        let _ = dotenv::dotenv();
    });
}

/// Loads the application configuration.
///
/// Sources, later ones overriding earlier ones:
/// 1. `config/default.(toml|yaml|json)`
/// 2. `config/{RUN_ENV}.(toml|yaml|json)` when `RUN_ENV` is set
/// 3. Environment variables prefixed with `APP_`, `__` as the section
///    separator (e.g. `APP_SERVER__PORT=8086`).
///
/// The resulting `AppConfig` is constructed once at startup and injected
/// into the components that need it; nothing reads it as ambient state.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "default".to_string());

    let mut builder = Config::builder().add_source(File::with_name("config/default").required(false));
    if run_env != "default" {
        builder = builder.add_source(File::with_name(&format!("config/{run_env}")).required(false));
    }

    builder
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_in_unset_tunables() {
        let relay = RelayConfig::default();
        assert_eq!(relay.url(), DEFAULT_RELAY_URL);
        assert_eq!(relay.timeout_secs(), DEFAULT_RELAY_TIMEOUT_SECS);

        let dispatch = DispatchConfig::default();
        assert_eq!(dispatch.title(), "Test Notification");
        assert_eq!(dispatch.body(), "You got a notification!");

        let firestore = FirestoreConfig::default();
        assert_eq!(firestore.collection(), "devices");
    }

    #[test]
    fn app_config_deserializes_with_optional_sections_absent() {
        let config: AppConfig = serde_json::from_str(
            r#"{ "server": { "host": "127.0.0.1", "port": 8086 } }"#,
        )
        .unwrap();
        assert_eq!(config.server.port, 8086);
        assert!(config.firestore.is_none());
        assert!(config.relay.is_none());
    }

    #[test]
    fn env_overrides_reach_nested_sections() {
        std::env::set_var("APP_SERVER__HOST", "0.0.0.0");
        std::env::set_var("APP_SERVER__PORT", "9090");

        let config: AppConfig = Config::builder()
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9090);

        std::env::remove_var("APP_SERVER__HOST");
        std::env::remove_var("APP_SERVER__PORT");
    }
}
