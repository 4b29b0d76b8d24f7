use std::sync::Arc;

use async_trait::async_trait;

use crate::bridge::notification::Notification;
use crate::utils::error::Result;

/// A command executed on the backing connection.
///
/// The upstream protocol the bridge consumes is exactly these two verbs; a
/// channel name is an opaque identifier in the store's pub/sub namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Listen(String),
    Unlisten(String),
}

/// One pooled connection to the backing store.
///
/// A fresh connection remembers no prior Listens, so the listener replays the
/// registry's channel set on every connection it attaches.
#[async_trait]
pub trait BackingConnection: Send + Sync {
    /// Execute a Listen/Unlisten command on this connection.
    async fn execute(&self, command: Command) -> Result<()>;

    /// Wait for the next inbound notification.
    ///
    /// Returns `None` when the stream has ended. Notifications for a single
    /// channel arrive in the order the store emitted them.
    async fn next_notification(&self) -> Option<Notification>;

    /// Resolves exactly once, when the connection becomes unusable.
    ///
    /// How closure is detected (event, callback, poll loop) is the driver's
    /// business; the bridge only relies on this contract.
    async fn closed(&self);
}

/// Hands out pooled backing connections.
///
/// Acquisition suspends until a connection is available or fails with a
/// transient error; the pool is expected to hold no connection while idle
/// (minimum size zero).
#[async_trait]
pub trait ConnectionProvider: Send + Sync {
    async fn acquire(&self) -> Result<Arc<dyn BackingConnection>>;
}
