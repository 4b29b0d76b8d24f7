//! The `error` module defines the error types used within the bridge.
//!
//! Upstream failures are transient by design: the reconnecting listener
//! absorbs them and retries, so these errors circulate between the bridge and
//! the backend seam but are never surfaced to a session-facing caller.

use thiserror::Error;

/// Result type for bridge operations.
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Errors that can occur while talking to the backing store.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("connection failed: {0}")]
    Connection(String),

    #[error("command failed: {0}")]
    Command(String),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
