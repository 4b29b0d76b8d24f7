mod settings;

use crate::config::settings::PartialSettings;
use config::{Config, ConfigError, Environment, File};

pub use settings::{BackendSettings, ListenerSettings, Settings};

/// Loads the configuration from the default file and environment variables
/// Merges the configuration with default values
/// Returns a `Settings` struct containing the backend and listener configurations
pub fn load_config() -> Result<Settings, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(Environment::default().separator("_"));

    let config = builder.build()?;

    // Try to deserialize what is available
    let partial: PartialSettings = config.try_deserialize()?;

    // Merge with defaults
    let default = Settings::default();

    Ok(Settings {
        backend: BackendSettings {
            url: partial
                .backend
                .as_ref()
                .and_then(|b| b.url.clone())
                .unwrap_or(default.backend.url),
            min_pool_size: partial
                .backend
                .as_ref()
                .and_then(|b| b.min_pool_size)
                .unwrap_or(default.backend.min_pool_size),
            max_pool_size: partial
                .backend
                .as_ref()
                .and_then(|b| b.max_pool_size)
                .unwrap_or(default.backend.max_pool_size),
        },
        listener: ListenerSettings {
            backoff_base_ms: partial
                .listener
                .as_ref()
                .and_then(|l| l.backoff_base_ms)
                .unwrap_or(default.listener.backoff_base_ms),
            backoff_max_ms: partial
                .listener
                .as_ref()
                .and_then(|l| l.backoff_max_ms)
                .unwrap_or(default.listener.backoff_max_ms),
        },
    })
}

#[cfg(test)]
mod tests;
