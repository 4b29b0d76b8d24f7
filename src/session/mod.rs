//! The `session` module defines the representation of a client session in the
//! bridge.
//!
//! It provides the `Session` struct, a non-owning handle to one connected
//! client, and the `SessionSet`, the live set of sessions shared between the
//! endpoint (lifecycle, readiness broadcasts) and the router (fan-out). The
//! transport layer owns the sessions themselves; the bridge only pushes.

pub mod handle;
pub use handle::{Session, SessionEvent, SessionId, SessionSet};
