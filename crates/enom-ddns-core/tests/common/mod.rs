//! Test doubles and common utilities for behavior contract tests
//!
//! This module provides minimal test doubles that verify engine behavior
//! without any real network traffic.

use async_trait::async_trait;
use enom_ddns_core::config::{Config, Credentials, DomainTarget};
use enom_ddns_core::error::{Error, Result};
use enom_ddns_core::traits::{HostUpdater, IpResolver, UpdateOutcome};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// An IpResolver that returns a fixed address and counts calls
pub struct FixedResolver {
    /// The address every resolve() returns
    address: String,
    /// Call counter for resolve()
    resolve_call_count: Arc<AtomicUsize>,
}

impl FixedResolver {
    pub fn new(address: &str) -> Self {
        Self {
            address: address.to_string(),
            resolve_call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get the number of times resolve() was called
    pub fn resolve_call_count(&self) -> usize {
        self.resolve_call_count.load(Ordering::SeqCst)
    }

    /// Create a new FixedResolver that shares counters with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            address: other.address.clone(),
            resolve_call_count: Arc::clone(&other.resolve_call_count),
        }
    }
}

#[async_trait]
impl IpResolver for FixedResolver {
    async fn resolve(&self) -> Result<String> {
        self.resolve_call_count.fetch_add(1, Ordering::SeqCst);
        Ok(self.address.clone())
    }

    fn source_name(&self) -> &'static str {
        "fixed"
    }
}

/// An IpResolver that always fails and counts calls
pub struct FailingResolver {
    /// Call counter for resolve()
    resolve_call_count: Arc<AtomicUsize>,
}

impl FailingResolver {
    pub fn new() -> Self {
        Self {
            resolve_call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get the number of times resolve() was called
    pub fn resolve_call_count(&self) -> usize {
        self.resolve_call_count.load(Ordering::SeqCst)
    }

    /// Create a new FailingResolver that shares counters with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            resolve_call_count: Arc::clone(&other.resolve_call_count),
        }
    }
}

#[async_trait]
impl IpResolver for FailingResolver {
    async fn resolve(&self) -> Result<String> {
        self.resolve_call_count.fetch_add(1, Ordering::SeqCst);
        Err(Error::network("echo service unreachable"))
    }

    fn source_name(&self) -> &'static str {
        "failing"
    }
}

/// A HostUpdater that records every address it is handed
pub struct RecordingUpdater {
    /// Call counter for update_host()
    update_call_count: Arc<AtomicUsize>,
    /// Addresses passed to update_host(), in order
    updated_addresses: Arc<Mutex<Vec<String>>>,
}

impl RecordingUpdater {
    pub fn new() -> Self {
        Self {
            update_call_count: Arc::new(AtomicUsize::new(0)),
            updated_addresses: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get the number of times update_host() was called
    pub fn update_call_count(&self) -> usize {
        self.update_call_count.load(Ordering::SeqCst)
    }

    /// Get the addresses that were pushed, in order
    pub fn updated_addresses(&self) -> Vec<String> {
        self.updated_addresses.lock().unwrap().clone()
    }

    /// Create a new RecordingUpdater that shares counters with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            update_call_count: Arc::clone(&other.update_call_count),
            updated_addresses: Arc::clone(&other.updated_addresses),
        }
    }
}

#[async_trait]
impl HostUpdater for RecordingUpdater {
    async fn update_host(
        &self,
        _target: &DomainTarget,
        address: &str,
    ) -> Result<UpdateOutcome> {
        self.update_call_count.fetch_add(1, Ordering::SeqCst);
        self.updated_addresses
            .lock()
            .unwrap()
            .push(address.to_string());

        Ok(UpdateOutcome::Updated {
            previous: None,
            address: address.to_string(),
        })
    }

    fn strategy_name(&self) -> &'static str {
        "recording"
    }
}

/// A HostUpdater that always fails and counts calls
pub struct FailingUpdater {
    /// Call counter for update_host()
    update_call_count: Arc<AtomicUsize>,
}

impl FailingUpdater {
    pub fn new() -> Self {
        Self {
            update_call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get the number of times update_host() was called
    pub fn update_call_count(&self) -> usize {
        self.update_call_count.load(Ordering::SeqCst)
    }

    /// Create a new FailingUpdater that shares counters with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            update_call_count: Arc::clone(&other.update_call_count),
        }
    }
}

#[async_trait]
impl HostUpdater for FailingUpdater {
    async fn update_host(
        &self,
        _target: &DomainTarget,
        _address: &str,
    ) -> Result<UpdateOutcome> {
        self.update_call_count.fetch_add(1, Ordering::SeqCst);
        Err(Error::rejected("Invalid Login"))
    }

    fn strategy_name(&self) -> &'static str {
        "failing"
    }
}

/// Helper to create a config with a test-friendly poll interval
pub fn test_config(domain: &str) -> Config {
    Config::new(
        DomainTarget::parse(domain).expect("test domain is well-formed"),
        Credentials::new("operator", "secret"),
    )
    .with_poll_interval(Duration::from_millis(20))
}
