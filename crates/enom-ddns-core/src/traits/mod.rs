//! Core traits for the updater
//!
//! This module defines the two seams every implementation plugs into.
//!
//! - [`IpResolver`]: discover the caller's current public address
//! - [`HostUpdater`]: push that address to the registrar

pub mod ip_resolver;
pub mod host_updater;

pub use ip_resolver::IpResolver;
pub use host_updater::{HostUpdater, UpdateOutcome};
