//! Endpoint
//!
//! The composition root the transport layer talks to. It owns the registry,
//! the live session set, and the listener task, and it wires
//! listener → registry → router together. The whole graph is an explicitly
//! constructed, explicitly owned value built once at process start; there is
//! no global state.

use std::sync::{Arc, Mutex};

use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::listener::ReconnectingListener;
use super::registry::SubscriptionRegistry;
use super::router::NotificationRouter;
use crate::backend::connection::ConnectionProvider;
use crate::config::ListenerSettings;
use crate::session::{Session, SessionId, SessionSet};

pub struct Endpoint {
    provider: Arc<dyn ConnectionProvider>,
    settings: ListenerSettings,
    registry: Arc<SubscriptionRegistry>,
    sessions: Arc<SessionSet>,
    listener: Mutex<Option<JoinHandle<()>>>,
}

impl Endpoint {
    pub fn new(provider: Arc<dyn ConnectionProvider>, settings: ListenerSettings) -> Self {
        Self {
            provider,
            settings,
            registry: Arc::new(SubscriptionRegistry::new()),
            sessions: Arc::new(SessionSet::new()),
            listener: Mutex::new(None),
        }
    }

    /// Spawn the reconnecting listener task. A second call is a no-op.
    pub fn start(&self) {
        let mut listener = self.listener.lock().unwrap();
        if listener.is_some() {
            return;
        }
        let task = ReconnectingListener::new(
            self.provider.clone(),
            self.registry.clone(),
            NotificationRouter::new(self.registry.clone(), self.sessions.clone()),
            self.sessions.clone(),
            self.settings.clone(),
        );
        *listener = Some(tokio::spawn(task.run()));
        info!("bridge started");
    }

    /// Cancel the listener task and tell every session the bridge is down.
    ///
    /// The registry lock is only ever held inside guard scopes, so aborting
    /// the listener mid-replay cannot leave it locked.
    pub fn shutdown(&self) {
        if let Some(handle) = self.listener.lock().unwrap().take() {
            handle.abort();
        }
        self.sessions.broadcast_ready(false);
        info!("bridge stopped");
    }

    /// Whether the bridge currently has a live upstream connection.
    pub fn is_ready(&self) -> bool {
        self.sessions.is_ready()
    }

    /// Track a newly connected session.
    ///
    /// The session is told the readiness state it joined in, so a client
    /// arriving between transitions gates itself correctly.
    pub fn on_session_connected(&self, session: Session) {
        session.set_ready(self.sessions.is_ready());
        debug!(session = %session.id, "session connected");
        self.sessions.insert(session);
    }

    /// Drop a session: remove it from every channel, then forget the handle.
    pub async fn on_session_disconnected(&self, id: &SessionId) {
        self.registry.unsubscribe_all(id).await;
        if self.sessions.remove(id).is_some() {
            debug!(session = %id, "session disconnected");
        }
    }

    /// Subscribe a session to a channel. Always succeeds from the caller's
    /// point of view; any upstream command happens inside the registry call.
    pub async fn subscribe(&self, id: &SessionId, channel: &str) {
        self.registry.subscribe(id, channel).await;
    }

    /// Unsubscribe a session from a channel. Idempotent.
    pub async fn unsubscribe(&self, id: &SessionId, channel: &str) {
        self.registry.unsubscribe(id, channel).await;
    }
}

impl Drop for Endpoint {
    fn drop(&mut self) {
        if let Some(handle) = self.listener.lock().unwrap().take() {
            handle.abort();
        }
    }
}
