//! Reconnecting listener
//!
//! Owns the connect/retry state machine for the single upstream connection:
//! `Disconnected → Connecting → Ready`, and back to `Disconnected` on
//! closure. On every transition into `Ready` the registry's channel set is
//! replayed first, so a fresh connection (which remembers no prior Listens)
//! is caught up before readiness is announced to sessions.
//!
//! No failure here is fatal: connect and replay errors back off
//! exponentially and the loop retries until the owning task is cancelled.

use std::sync::Arc;
use std::time::Duration;

use backon::{BackoffBuilder, ExponentialBuilder};
use tokio::time::sleep;
use tracing::{info, warn};

use super::registry::SubscriptionRegistry;
use super::router::NotificationRouter;
use crate::backend::connection::ConnectionProvider;
use crate::config::ListenerSettings;
use crate::session::SessionSet;

/// Long-lived task that keeps one upstream connection alive and drains its
/// notification stream.
pub struct ReconnectingListener {
    provider: Arc<dyn ConnectionProvider>,
    registry: Arc<SubscriptionRegistry>,
    router: NotificationRouter,
    sessions: Arc<SessionSet>,
    settings: ListenerSettings,
}

impl ReconnectingListener {
    pub fn new(
        provider: Arc<dyn ConnectionProvider>,
        registry: Arc<SubscriptionRegistry>,
        router: NotificationRouter,
        sessions: Arc<SessionSet>,
        settings: ListenerSettings,
    ) -> Self {
        Self {
            provider,
            registry,
            router,
            sessions,
            settings,
        }
    }

    /// Delay sequence for consecutive failures: base, doubling, capped.
    fn backoff(&self) -> impl Iterator<Item = Duration> {
        ExponentialBuilder::default()
            .with_min_delay(self.settings.backoff_base())
            .with_max_delay(self.settings.backoff_max())
            .without_max_times()
            .build()
    }

    /// Run until the owning task is aborted.
    pub async fn run(self) {
        let cap = self.settings.backoff_max();
        let mut backoff = self.backoff();
        loop {
            self.registry.mark_connecting().await;

            let conn = match self.provider.acquire().await {
                Ok(conn) => conn,
                Err(e) => {
                    self.registry.detach().await;
                    let delay = backoff.next().unwrap_or(cap);
                    warn!(error = %e, delay_ms = delay.as_millis() as u64, "connection attempt failed");
                    sleep(delay).await;
                    continue;
                }
            };

            // Replay under the registry lock, then announce readiness.
            if let Err(e) = self.registry.attach(conn.clone()).await {
                let delay = backoff.next().unwrap_or(cap);
                warn!(error = %e, delay_ms = delay.as_millis() as u64, "replay failed; discarding connection");
                sleep(delay).await;
                continue;
            }
            info!("upstream connection ready");
            self.sessions.broadcast_ready(true);
            backoff = self.backoff();

            // Drain the inbound stream until the connection dies. Both arms
            // suspend on the same connection.
            loop {
                tokio::select! {
                    notification = conn.next_notification() => match notification {
                        Some(notification) => self.router.route(notification).await,
                        None => break,
                    },
                    _ = conn.closed() => break,
                }
            }

            self.registry.detach().await;
            self.sessions.broadcast_ready(false);
            let delay = backoff.next().unwrap_or(cap);
            info!(delay_ms = delay.as_millis() as u64, "upstream connection closed; reconnecting");
            sleep(delay).await;
        }
    }
}
