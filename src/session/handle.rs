use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use crate::bridge::notification::Notification;

pub type SessionId = String;

/// An event pushed from the bridge to a session's transport task.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// A notification for a channel the session is subscribed to.
    Notification(Notification),
    /// The bridge gained or lost its upstream connection.
    Ready(bool),
}

/// Represents a connected client session in the bridge.
///
/// Each session is uniquely identified by an `id` and has a channel (`sender`)
/// for pushing events to the transport task that owns the client. The handle
/// is non-owning: dropping it never tears the client down, and a send to a
/// closed channel is that session's concern, not the bridge's.
#[derive(Debug, Clone)]
pub struct Session {
    /// Unique identifier for the session (e.g. UUID or connection ID).
    pub id: SessionId,

    /// Channel to push events to the session's transport task.
    pub sender: UnboundedSender<SessionEvent>,
}

impl Session {
    pub fn new(id: impl Into<SessionId>, sender: UnboundedSender<SessionEvent>) -> Self {
        Self {
            id: id.into(),
            sender,
        }
    }

    /// Push a notification to the session. Fire-and-forget.
    pub fn deliver(&self, notification: Notification) {
        if self
            .sender
            .send(SessionEvent::Notification(notification))
            .is_err()
        {
            debug!(session = %self.id, "dropped notification for closed session");
        }
    }

    /// Tell the session whether the bridge currently has a live upstream.
    pub fn set_ready(&self, ready: bool) {
        if self.sender.send(SessionEvent::Ready(ready)).is_err() {
            debug!(session = %self.id, "dropped readiness update for closed session");
        }
    }
}

/// The live set of sessions, shared by the endpoint and the router.
///
/// Also records the current readiness flag so sessions that connect between
/// transitions can be told the state they joined in.
#[derive(Debug, Default)]
pub struct SessionSet {
    sessions: Mutex<HashMap<SessionId, Session>>,
    ready: AtomicBool,
}

impl SessionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, session: Session) {
        self.sessions
            .lock()
            .unwrap()
            .insert(session.id.clone(), session);
    }

    pub fn remove(&self, id: &str) -> Option<Session> {
        self.sessions.lock().unwrap().remove(id)
    }

    pub fn get(&self, id: &str) -> Option<Session> {
        self.sessions.lock().unwrap().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.lock().unwrap().is_empty()
    }

    /// Whether the bridge currently has a live upstream connection.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    /// Record a readiness transition and push it to every live session.
    pub fn broadcast_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
        let sessions = self.sessions.lock().unwrap();
        for session in sessions.values() {
            session.set_ready(ready);
        }
    }
}
