//! Registrar update strategies
//!
//! Both strategies end in the same place, a host record carrying the
//! resolved address, but differ in what they touch on the way:
//!
//! - [`BlindUpdater`] issues one `SetDNSHost` per cycle, unconditionally.
//!   One request, no reads, and the registrar sees a write even when
//!   nothing changed.
//! - [`DiffReplaceUpdater`] lists the zone first and only rewrites it when
//!   the managed record is missing or stale. Idle cycles cost one read and
//!   zero writes; changed cycles cost a read plus a full-set rewrite.
//!
//! [`updater_from_config`] picks between them from the configuration.

use crate::EnomClient;
use async_trait::async_trait;
use enom_ddns_core::{
    Config, DomainTarget, HostUpdater, PlanOutcome, Result, UpdateOutcome, UpdateStrategy,
    plan_update,
};

/// Unconditional single-record update strategy
///
/// Fires `SetDNSHost` every cycle without reading the zone first. The
/// registrar's answer never distinguishes "changed" from "already there",
/// so every successful cycle reports an update with no known previous
/// address.
#[derive(Debug, Clone)]
pub struct BlindUpdater {
    client: EnomClient,
}

impl BlindUpdater {
    /// Create a blind updater over an existing client
    pub fn new(client: EnomClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HostUpdater for BlindUpdater {
    async fn update_host(&self, target: &DomainTarget, address: &str) -> Result<UpdateOutcome> {
        self.client.set_dns_host(target, address).await?;

        Ok(UpdateOutcome::Updated {
            previous: None,
            address: address.to_string(),
        })
    }

    fn strategy_name(&self) -> &'static str {
        "blind"
    }
}

/// Read-before-write full-zone update strategy
///
/// Fetches the zone's records, plans the rewrite, and submits `SetHosts`
/// only when the plan says the zone must change. The rewrite always
/// carries the complete record set: the registrar deletes anything the
/// submission leaves out.
#[derive(Debug, Clone)]
pub struct DiffReplaceUpdater {
    client: EnomClient,
}

impl DiffReplaceUpdater {
    /// Create a diff-and-replace updater over an existing client
    pub fn new(client: EnomClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HostUpdater for DiffReplaceUpdater {
    async fn update_host(&self, target: &DomainTarget, address: &str) -> Result<UpdateOutcome> {
        let existing = self.client.get_hosts(target).await?;
        let plan = plan_update(&existing, target.host(), address);

        match plan.outcome {
            PlanOutcome::Unchanged => {
                tracing::debug!("{} already points at {}", target.fqdn(), address);
                Ok(UpdateOutcome::Unchanged {
                    address: address.to_string(),
                })
            }
            PlanOutcome::Rewrite { previous } => {
                self.client.set_hosts(target, &plan.records).await?;
                Ok(UpdateOutcome::Updated {
                    previous: Some(previous),
                    address: address.to_string(),
                })
            }
            PlanOutcome::Append => {
                self.client.set_hosts(target, &plan.records).await?;
                Ok(UpdateOutcome::Created {
                    address: address.to_string(),
                })
            }
        }
    }

    fn strategy_name(&self) -> &'static str {
        "diff"
    }
}

/// Build the configured update strategy
///
/// Validates the configuration, builds one [`EnomClient`] from its
/// credentials and TLS setting, and wraps it in the strategy the
/// configuration names.
///
/// # Errors
///
/// Returns [`Error::Config`](enom_ddns_core::Error::Config) when the
/// configuration fails validation.
pub fn updater_from_config(config: &Config) -> Result<Box<dyn HostUpdater>> {
    config.validate()?;

    let client = EnomClient::new(config.credentials.clone(), config.insecure_tls);

    Ok(match config.strategy {
        UpdateStrategy::Blind => Box::new(BlindUpdater::new(client)),
        UpdateStrategy::DiffReplace => Box::new(DiffReplaceUpdater::new(client)),
    })
}
