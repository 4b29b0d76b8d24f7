//! The `backend` module is the seam between the bridge and the backing
//! store's driver.
//!
//! The bridge needs exactly three things from a backing connection: a way to
//! execute the two-verb Listen/Unlisten protocol, the inbound stream of
//! notifications, and a liveness signal that resolves once when the
//! connection becomes unusable. Pool internals stay behind the
//! `ConnectionProvider` trait.

pub mod connection;
pub mod mock;

pub use connection::{BackingConnection, Command, ConnectionProvider};
