//! # Notibridge
//!
//! `notibridge` is a notification bridge: a long-lived component that holds a
//! single connection to a backing store's channel-based LISTEN/NOTIFY
//! primitive and fans incoming notifications out to any number of connected
//! client sessions, each of which can subscribe to and unsubscribe from
//! channels independently and at any time.
//!
//! The client transport (sockets, framing) and the backing store's driver are
//! external collaborators: the transport hands the bridge non-owning session
//! handles, and the driver side is reached through the `backend` traits.
//!
//! ## Core Modules
//!
//! - `bridge`: The core — subscription registry, reconnecting listener,
//!   notification router, and the `Endpoint` composition root.
//! - `backend`: The seam to the backing store: connection acquisition,
//!   Listen/Unlisten command execution, and the inbound notification stream.
//! - `session`: Non-owning handles to connected clients and the live session
//!   set used for fan-out and readiness broadcasts.
//! - `config`: Handles loading and managing bridge configuration.
//! - `utils`: Contains shared utilities, such as error handling and logging.

pub mod backend;
pub mod bridge;
pub mod config;
pub mod session;
pub mod utils;
