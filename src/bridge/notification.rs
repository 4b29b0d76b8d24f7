use serde::{Deserialize, Serialize};

/// A single notification emitted by the backing store.
///
/// A notification consists of the channel it was published on and an opaque
/// payload. It is ephemeral: the bridge never persists it, and a delivery
/// attempt that is dropped is never retried.
///
/// # Fields
///
/// - `channel` - The pub/sub channel this notification belongs to.
/// - `payload` - The notification content, usually a JSON-encoded string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub channel: String,
    pub payload: String,
}

impl Notification {
    pub fn new(channel: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            payload: payload.into(),
        }
    }
}
