use std::time::Duration;

use serde::Deserialize;

/// Top-level configuration settings for the bridge.
///
/// Includes settings for the backing-store pool and the reconnecting
/// listener.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub backend: BackendSettings,
    pub listener: ListenerSettings,
}

/// Connection parameters for the backing-store pool.
///
/// The bridge itself only consumes these as a contract: whoever constructs
/// the concrete `ConnectionProvider` reads them. A minimum pool size of zero
/// means no connection is held while the bridge is idle.
#[derive(Debug, Deserialize, Clone)]
pub struct BackendSettings {
    pub url: String,
    pub min_pool_size: usize,
    pub max_pool_size: usize,
}

/// Configuration settings for the reconnecting listener.
///
/// Controls the exponential backoff applied between failed connection
/// attempts: the delay starts at the base, doubles per consecutive failure,
/// and is capped at the maximum.
#[derive(Debug, Deserialize, Clone)]
pub struct ListenerSettings {
    pub backoff_base_ms: u64,
    pub backoff_max_ms: u64,
}

impl ListenerSettings {
    pub fn backoff_base(&self) -> Duration {
        Duration::from_millis(self.backoff_base_ms)
    }

    pub fn backoff_max(&self) -> Duration {
        Duration::from_millis(self.backoff_max_ms)
    }
}

/// Partial configuration settings loaded from files or environment.
///
/// Allows partial specification of settings. Missing values can be filled using defaults.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub backend: Option<PartialBackendSettings>,
    pub listener: Option<PartialListenerSettings>,
}

/// Partial backend settings.
///
/// Used when loading pool configuration from external sources with optional values.
#[derive(Debug, Deserialize)]
pub struct PartialBackendSettings {
    pub url: Option<String>,
    pub min_pool_size: Option<usize>,
    pub max_pool_size: Option<usize>,
}

/// Partial listener settings.
///
/// Used for backoff configuration from external sources with optional values.
#[derive(Debug, Deserialize)]
pub struct PartialListenerSettings {
    pub backoff_base_ms: Option<u64>,
    pub backoff_max_ms: Option<u64>,
}

/// Provides default values for `Settings`.
///
/// Ensures the bridge has sensible defaults if no configuration is provided.
impl Default for Settings {
    fn default() -> Self {
        Self {
            backend: BackendSettings {
                url: "postgres://127.0.0.1:5432".to_string(),
                min_pool_size: 0,
                max_pool_size: 4,
            },
            listener: ListenerSettings {
                backoff_base_ms: 1000,
                backoff_max_ms: 64_000,
            },
        }
    }
}

impl Default for ListenerSettings {
    fn default() -> Self {
        Settings::default().listener
    }
}
