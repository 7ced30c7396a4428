//! Core update engine
//!
//! The DdnsEngine is responsible for:
//! - Resolving the current public address via IpResolver
//! - Pushing it to the registrar via HostUpdater
//! - Repeating on a fixed interval in polling mode
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐   address    ┌────────────┐   update_host   ┌─────────────┐
//! │ IpResolver │ ───────────▶ │ DdnsEngine │ ──────────────▶ │ HostUpdater │
//! └────────────┘              └────────────┘                 └─────────────┘
//! ```
//!
//! ## Cycle Flow
//!
//! 1. Resolve the public address
//! 2. Hand it to the updater (which decides whether anything is written)
//! 3. Log the outcome
//! 4. Sleep for the poll interval
//!
//! A cycle is strictly sequential: one resolver call, then one updater
//! call, never more than one request in flight. Either failure aborts the
//! cycle; in polling mode the failure is logged and the next cycle runs
//! on schedule. There is no retry inside a cycle and no backoff between
//! cycles.

use crate::config::{Config, DomainTarget};
use crate::error::Result;
use crate::traits::{HostUpdater, IpResolver, UpdateOutcome};
use std::time::Duration;
use tracing::{debug, error, info};

/// Core update engine
///
/// The engine owns one resolver and one updater and drives the
/// resolve → update cycle. It holds no mutable state; every cycle starts
/// from scratch and trusts the registrar as the single source of truth.
///
/// ## Lifecycle
///
/// 1. Create with [`DdnsEngine::new()`]
/// 2. Either [`DdnsEngine::run_once()`] for a single cycle, or
///    [`DdnsEngine::run()`] for the polling loop
/// 3. The polling loop runs until a shutdown signal is received
pub struct DdnsEngine {
    /// Resolver for the current public address
    resolver: Box<dyn IpResolver>,

    /// Updater that talks to the registrar
    updater: Box<dyn HostUpdater>,

    /// The managed domain
    target: DomainTarget,

    /// Time between polling cycles
    poll_interval: Duration,
}

impl DdnsEngine {
    /// Create a new engine
    ///
    /// # Parameters
    ///
    /// - `resolver`: IP resolver implementation
    /// - `updater`: Registrar update strategy
    /// - `config`: Updater configuration (validated here)
    pub fn new(
        resolver: Box<dyn IpResolver>,
        updater: Box<dyn HostUpdater>,
        config: &Config,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            resolver,
            updater,
            target: config.target.clone(),
            poll_interval: config.poll_interval,
        })
    }

    /// Run one update cycle
    ///
    /// Resolves the public address and hands it to the updater. A resolver
    /// failure aborts the cycle before the registrar is contacted.
    ///
    /// # Returns
    ///
    /// - `Ok(UpdateOutcome)`: What happened to the managed record
    /// - `Err(Error)`: If either step failed
    pub async fn run_once(&self) -> Result<UpdateOutcome> {
        let address = self.resolver.resolve().await?;
        debug!(
            "Resolved public address {} via {}",
            address,
            self.resolver.source_name()
        );

        self.updater.update_host(&self.target, &address).await
    }

    /// Run the polling loop
    ///
    /// Cycles immediately on startup and then on every poll interval.
    /// Cycle failures are logged and never terminate the loop; the loop
    /// ends only on SIGINT.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Clean shutdown
    pub async fn run(&self) -> Result<()> {
        self.run_internal(None).await
    }

    /// Internal run implementation that accepts an optional shutdown signal
    ///
    /// # Parameters
    ///
    /// - `shutdown_rx`: Optional oneshot receiver to trigger shutdown
    async fn run_internal(
        &self,
        shutdown_rx: Option<tokio::sync::oneshot::Receiver<()>>,
    ) -> Result<()> {
        info!(
            "Engine started for {} ({} strategy, polling every {}s)",
            self.target,
            self.updater.strategy_name(),
            self.poll_interval.as_secs()
        );

        if let Some(mut rx) = shutdown_rx {
            // Externally managed shutdown: wait for the provided signal
            loop {
                self.poll_cycle().await;

                tokio::select! {
                    _ = tokio::time::sleep(self.poll_interval) => {}

                    _ = &mut rx => {
                        info!("Shutdown signal received");
                        break;
                    }
                }
            }
        } else {
            // Self-managed shutdown: wait for SIGINT
            loop {
                self.poll_cycle().await;

                tokio::select! {
                    _ = tokio::time::sleep(self.poll_interval) => {}

                    _ = tokio::signal::ctrl_c() => {
                        info!("Shutdown signal received");
                        break;
                    }
                }
            }
        }

        info!("Engine stopped");
        Ok(())
    }

    /// Run one cycle inside the polling loop, logging instead of failing
    async fn poll_cycle(&self) {
        match self.run_once().await {
            Ok(outcome) => self.log_outcome(&outcome),
            Err(e) => {
                error!("Update cycle failed: {}", e);
                // Nothing to clean up; the next cycle starts fresh
            }
        }
    }

    /// Log a completed cycle's outcome
    fn log_outcome(&self, outcome: &UpdateOutcome) {
        match outcome {
            UpdateOutcome::Updated { previous, address } => {
                info!(
                    "Updated {} -> {} (previous: {})",
                    self.target,
                    address,
                    previous.as_deref().unwrap_or("unknown")
                );
            }
            UpdateOutcome::Unchanged { address } => {
                debug!("Record {} unchanged at {}", self.target, address);
            }
            UpdateOutcome::Created { address } => {
                info!("Created record {} -> {}", self.target, address);
            }
        }
    }

    /// Run the polling loop with an externally controlled shutdown signal
    ///
    /// # Visibility
    ///
    /// This is `pub` for callers that manage their own signals (the daemon
    /// listens for SIGTERM as well as SIGINT) and for behavior contract
    /// tests that need deterministic shutdown. Callers without such needs
    /// should use `run()`, which handles SIGINT itself.
    pub async fn run_with_shutdown(
        &self,
        shutdown_rx: Option<tokio::sync::oneshot::Receiver<()>>,
    ) -> Result<()> {
        self.run_internal(shutdown_rx).await
    }
}
