//! The `bridge` module is the core of the notification bridge.
//!
//! It contains:
//! - `SubscriptionRegistry`: channel → subscriber bookkeeping, the single
//!   source of truth for "who wants what"
//! - `ReconnectingListener`: the connect/retry state machine that owns the
//!   backing connection
//! - `NotificationRouter`: the delivery path from the inbound stream to
//!   subscribed sessions
//! - `Endpoint`: the composition root the transport layer talks to
//!
//! Concurrency note: one async lock inside the registry guards both the
//! subscription map and Listen/Unlisten issuance, so subscribe/unsubscribe
//! calls serialize against the listener's reconnect replay. Nothing else in
//! the bridge suspends while holding shared state.

pub mod endpoint;
pub mod listener;
pub mod notification;
pub mod registry;
pub mod router;

pub use endpoint::Endpoint;
pub use listener::ReconnectingListener;
pub use notification::Notification;
pub use registry::{ListenerState, SubscriptionRegistry};
pub use router::NotificationRouter;
