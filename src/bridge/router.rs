//! Notification delivery path
//!
//! The router consumes each inbound notification, looks up the current
//! subscribers for its channel, and pushes the notification to each of them.
//! Delivery is fire-and-forget: backpressure or a closed session channel is
//! that session's concern.

use std::sync::Arc;

use tracing::debug;

use super::notification::Notification;
use super::registry::SubscriptionRegistry;
use crate::session::SessionSet;

/// Fans one notification out to the sessions currently subscribed to its
/// channel.
pub struct NotificationRouter {
    registry: Arc<SubscriptionRegistry>,
    sessions: Arc<SessionSet>,
}

impl NotificationRouter {
    pub fn new(registry: Arc<SubscriptionRegistry>, sessions: Arc<SessionSet>) -> Self {
        Self { registry, sessions }
    }

    /// Deliver a notification to its channel's subscribers.
    ///
    /// The subscriber set is copied under the registry lock and the lock
    /// released before any push, so a session may still receive a
    /// notification moments after its own unsubscribe returned while the
    /// Unlisten is in flight upstream. That window is accepted; closing it
    /// would mean holding the lock across every push.
    pub async fn route(&self, notification: Notification) {
        let targets = self.registry.subscribers_of(&notification.channel).await;
        if targets.is_empty() {
            // Mid-flight Unlisten, or a channel nobody here asked for.
            debug!(channel = %notification.channel, "no local subscribers; notification dropped");
            return;
        }
        for id in targets {
            if let Some(session) = self.sessions.get(&id) {
                session.deliver(notification.clone());
            }
        }
    }
}
