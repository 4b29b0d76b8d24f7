use std::time::Duration;

use serial_test::serial;

use super::load_config;
use super::settings::Settings;

#[test]
fn test_default_settings() {
    let settings = Settings::default();
    assert_eq!(settings.backend.url, "postgres://127.0.0.1:5432");
    assert_eq!(settings.backend.min_pool_size, 0);
    assert_eq!(settings.backend.max_pool_size, 4);
    assert_eq!(settings.listener.backoff_base_ms, 1000);
    assert_eq!(settings.listener.backoff_max_ms, 64_000);
}

#[test]
fn test_backoff_durations() {
    let settings = Settings::default();
    assert_eq!(settings.listener.backoff_base(), Duration::from_secs(1));
    assert_eq!(settings.listener.backoff_max(), Duration::from_secs(64));
}

#[test]
#[serial]
fn test_environment_overrides_defaults() {
    temp_env::with_vars(
        [("BACKEND_URL", Some("postgres://db.internal:5432/app"))],
        || {
            let settings = load_config().expect("load_config");
            assert_eq!(settings.backend.url, "postgres://db.internal:5432/app");
            // Untouched values fall back to defaults.
            assert_eq!(settings.backend.min_pool_size, 0);
            assert_eq!(settings.listener.backoff_max_ms, 64_000);
        },
    );
}
