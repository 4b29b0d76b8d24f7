//! Subscription bookkeeping
//!
//! The registry maps channel names to the set of subscribed sessions and is
//! the single source of truth for "who wants what". A channel has an entry
//! iff it currently has at least one subscriber; the entry is removed the
//! instant the last session leaves.
//!
//! Concurrency note: a single async lock guards both the map and the
//! issuance of Listen/Unlisten, because a map mutation and its upstream
//! command must be atomic relative to the listener's reconnect replay. This
//! serializes command issuance against replay at the cost of blocking other
//! subscribe/unsubscribe calls for the duration of a command round-trip.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::backend::connection::{BackingConnection, Command};
use crate::session::SessionId;
use crate::utils::error::Result;

/// Connection-facing state of the reconnecting listener.
///
/// Governs whether a new subscription immediately issues an upstream Listen
/// (only when `Ready`) or is merely recorded for replay on the next
/// connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListenerState {
    #[default]
    Disconnected,
    Connecting,
    Ready,
}

#[derive(Default)]
struct RegistryInner {
    channels: HashMap<String, HashSet<SessionId>>,
    state: ListenerState,
    upstream: Option<Arc<dyn BackingConnection>>,
}

impl RegistryInner {
    /// Issue Unlisten for a channel whose last subscriber just left.
    ///
    /// Failure is logged, not surfaced: a dying connection will be replaced
    /// and the fresh one never knew about the channel anyway.
    async fn unlisten(&self, channel: &str) {
        if self.state != ListenerState::Ready {
            return;
        }
        if let Some(conn) = &self.upstream {
            if let Err(e) = conn.execute(Command::Unlisten(channel.to_string())).await {
                warn!(channel, error = %e, "unlisten failed; upstream resyncs on reconnect");
            }
        }
    }
}

/// Maps channels to subscribed sessions and keeps the upstream Listen set in
/// step with the map.
#[derive(Default)]
pub struct SubscriptionRegistry {
    inner: Mutex<RegistryInner>,
}

impl SubscriptionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a (session, channel) subscription. Idempotent.
    ///
    /// On the channel's 0→1 subscriber transition while the listener is
    /// ready, issues exactly one upstream Listen. While not ready the channel
    /// is only recorded; the next replay picks it up.
    pub async fn subscribe(&self, session: &SessionId, channel: &str) {
        let mut inner = self.inner.lock().await;
        let first = {
            let subscribers = inner.channels.entry(channel.to_string()).or_default();
            subscribers.insert(session.clone()) && subscribers.len() == 1
        };
        if !first {
            return;
        }
        if inner.state != ListenerState::Ready {
            debug!(channel, "channel recorded for replay");
            return;
        }
        if let Some(conn) = inner.upstream.clone() {
            if let Err(e) = conn.execute(Command::Listen(channel.to_string())).await {
                warn!(channel, error = %e, "listen failed; channel is replayed on reconnect");
            }
        }
    }

    /// Remove a (session, channel) subscription. A pair that was never
    /// present is a no-op, not an error.
    ///
    /// On the channel's 1→0 transition the entry is deleted and exactly one
    /// Unlisten issued.
    pub async fn unsubscribe(&self, session: &SessionId, channel: &str) {
        let mut inner = self.inner.lock().await;
        let emptied = match inner.channels.get_mut(channel) {
            Some(subscribers) => subscribers.remove(session) && subscribers.is_empty(),
            None => false,
        };
        if !emptied {
            return;
        }
        inner.channels.remove(channel);
        inner.unlisten(channel).await;
    }

    /// Remove a session from every channel it belongs to, applying the same
    /// 1→0 Unlisten rule per channel. Called on session teardown.
    pub async fn unsubscribe_all(&self, session: &SessionId) {
        let mut inner = self.inner.lock().await;
        let mut emptied = Vec::new();
        inner.channels.retain(|channel, subscribers| {
            if subscribers.remove(session) && subscribers.is_empty() {
                emptied.push(channel.clone());
                false
            } else {
                true
            }
        });
        for channel in &emptied {
            inner.unlisten(channel).await;
        }
    }

    /// Copy of the current subscriber set for a channel. Empty if the channel
    /// is untracked.
    pub async fn subscribers_of(&self, channel: &str) -> Vec<SessionId> {
        let inner = self.inner.lock().await;
        inner
            .channels
            .get(channel)
            .map(|subscribers| subscribers.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// The current channel set.
    pub async fn snapshot(&self) -> Vec<String> {
        let inner = self.inner.lock().await;
        inner.channels.keys().cloned().collect()
    }

    pub async fn state(&self) -> ListenerState {
        self.inner.lock().await.state
    }

    /// Note that the listener has started a connection attempt.
    pub async fn mark_connecting(&self) {
        self.inner.lock().await.state = ListenerState::Connecting;
    }

    /// Install a fresh connection: replay every tracked channel as a Listen,
    /// then flip to `Ready`.
    ///
    /// The lock is held across the whole replay so a subscribe racing with
    /// the reconnect cannot be silently dropped. On a replay error the
    /// connection is not installed and the state falls back to
    /// `Disconnected`.
    pub async fn attach(&self, conn: Arc<dyn BackingConnection>) -> Result<()> {
        let mut inner = self.inner.lock().await;
        let channels: Vec<String> = inner.channels.keys().cloned().collect();
        for channel in channels {
            if let Err(e) = conn.execute(Command::Listen(channel.clone())).await {
                warn!(channel, error = %e, "replay failed");
                inner.state = ListenerState::Disconnected;
                return Err(e);
            }
        }
        inner.upstream = Some(conn);
        inner.state = ListenerState::Ready;
        Ok(())
    }

    /// Discard the installed connection and return to `Disconnected`.
    pub async fn detach(&self) {
        let mut inner = self.inner.lock().await;
        inner.upstream = None;
        inner.state = ListenerState::Disconnected;
    }
}
