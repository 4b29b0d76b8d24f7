//! The `utils` module provides a collection of utility functions and common
//! definitions used across the `notibridge` library.
//!
//! This module centralizes the error types and the tracing setup so the rest
//! of the crate stays focused on bridge behavior.

pub mod error;
pub mod logging;
