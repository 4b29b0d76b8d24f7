//! Scripted in-memory backend for exercising the bridge without a real store.
//!
//! `MockBackend` plays back a queue of acquire outcomes (connections or
//! refusals), and `MockConnectionHandle` drives one connection from the test
//! side: injecting notifications, failing commands, and tripping the closure
//! signal.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex as StdMutex};

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc, watch};

use super::connection::{BackingConnection, Command, ConnectionProvider};
use crate::bridge::notification::Notification;
use crate::utils::error::{BridgeError, Result};

/// A backing connection that records every command it executes.
pub struct MockConnection {
    commands: StdMutex<Vec<Command>>,
    fail_commands: AtomicBool,
    inbound: Mutex<mpsc::UnboundedReceiver<Notification>>,
    closed_rx: watch::Receiver<bool>,
}

impl MockConnection {
    /// Every command executed so far, in order.
    pub fn commands(&self) -> Vec<Command> {
        self.commands.lock().unwrap().clone()
    }

    /// Make subsequent `execute` calls fail (or succeed again).
    pub fn fail_commands(&self, fail: bool) {
        self.fail_commands.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl BackingConnection for MockConnection {
    async fn execute(&self, command: Command) -> Result<()> {
        if self.fail_commands.load(Ordering::SeqCst) {
            return Err(BridgeError::Command("scripted command failure".into()));
        }
        self.commands.lock().unwrap().push(command);
        Ok(())
    }

    async fn next_notification(&self) -> Option<Notification> {
        let mut inbound = self.inbound.lock().await;
        inbound.recv().await
    }

    async fn closed(&self) {
        let mut rx = self.closed_rx.clone();
        while !*rx.borrow_and_update() {
            // Sender dropped counts as closure too.
            if rx.changed().await.is_err() {
                return;
            }
        }
    }
}

/// Test-side handle to a `MockConnection`.
pub struct MockConnectionHandle {
    pub connection: Arc<MockConnection>,
    notify_tx: mpsc::UnboundedSender<Notification>,
    closed_tx: watch::Sender<bool>,
}

impl MockConnectionHandle {
    pub fn new() -> Self {
        let (notify_tx, notify_rx) = mpsc::unbounded_channel();
        let (closed_tx, closed_rx) = watch::channel(false);
        let connection = Arc::new(MockConnection {
            commands: StdMutex::new(Vec::new()),
            fail_commands: AtomicBool::new(false),
            inbound: Mutex::new(notify_rx),
            closed_rx,
        });
        Self {
            connection,
            notify_tx,
            closed_tx,
        }
    }

    /// Inject an inbound notification, as if the store emitted it.
    pub fn emit(&self, channel: &str, payload: &str) {
        let _ = self.notify_tx.send(Notification::new(channel, payload));
    }

    /// Trip the liveness signal: the connection is now unusable.
    pub fn close(&self) {
        let _ = self.closed_tx.send(true);
    }
}

impl Default for MockConnectionHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of one scripted acquire attempt.
enum AcquireOutcome {
    Connect(Arc<MockConnection>),
    Refuse,
}

/// A connection provider that plays back a scripted queue of outcomes.
///
/// Once the script is exhausted, `acquire` suspends forever, pinning the
/// listener in its connect state for the rest of the test.
#[derive(Default)]
pub struct MockBackend {
    script: StdMutex<VecDeque<AcquireOutcome>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a refused connection attempt.
    pub fn push_failure(&self) {
        self.script
            .lock()
            .unwrap()
            .push_back(AcquireOutcome::Refuse);
    }

    /// Script a successful connection attempt.
    pub fn push_connection(&self, connection: Arc<MockConnection>) {
        self.script
            .lock()
            .unwrap()
            .push_back(AcquireOutcome::Connect(connection));
    }
}

#[async_trait]
impl ConnectionProvider for MockBackend {
    async fn acquire(&self) -> Result<Arc<dyn BackingConnection>> {
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(AcquireOutcome::Connect(connection)) => Ok(connection),
            Some(AcquireOutcome::Refuse) => {
                Err(BridgeError::Connection("scripted connection refusal".into()))
            }
            None => std::future::pending().await,
        }
    }
}
