// # Host Updater Trait
//
// Defines the interface for pushing a resolved address to the registrar.
//
// ## Implementations
//
// - eNom blind update (`SetDNSHost`): `enom-ddns-registrar` crate
// - eNom diff-and-replace (`GetHosts`/`SetHosts`): `enom-ddns-registrar` crate
//
// ## Usage
//
// ```rust,ignore
// use enom_ddns_core::{DomainTarget, HostUpdater};
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let updater = /* HostUpdater implementation */;
//     let target = DomainTarget::parse("home.example.com")?;
//
//     let outcome = updater.update_host(&target, "203.0.113.5").await?;
//     println!("outcome: {:?}", outcome);
//
//     Ok(())
// }
// ```

use crate::config::DomainTarget;
use async_trait::async_trait;

/// Result of one update attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The record existed and now carries the resolved address
    Updated {
        /// The address the record held before, when the strategy knows it
        previous: Option<String>,
        /// The address written
        address: String,
    },
    /// The record already carried the resolved address; nothing was written
    Unchanged {
        /// The address the record already held
        address: String,
    },
    /// No record existed for the host; one was created
    Created {
        /// The address written
        address: String,
    },
}

impl UpdateOutcome {
    /// The address the record carries after this attempt
    pub fn address(&self) -> &str {
        match self {
            Self::Updated { address, .. }
            | Self::Unchanged { address }
            | Self::Created { address } => address,
        }
    }
}

/// Trait for registrar update strategies
///
/// One call covers one full update attempt for the managed host, however
/// many registrar round trips that takes. Implementations must be
/// thread-safe, must not retry internally (the poll loop is the retry
/// policy), and must not cache anything between calls.
#[async_trait]
pub trait HostUpdater: Send + Sync {
    /// Bring the managed host record in line with the resolved address
    ///
    /// # Parameters
    ///
    /// - `target`: The managed domain
    /// - `address`: The resolved public address, forwarded verbatim
    ///
    /// # Returns
    ///
    /// - `Ok(UpdateOutcome)`: What happened to the record
    /// - `Err(Error)`: If any registrar call failed
    async fn update_host(
        &self,
        target: &DomainTarget,
        address: &str,
    ) -> Result<UpdateOutcome, crate::Error>;

    /// Get the strategy name (for logging/debugging)
    fn strategy_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_exposes_final_address() {
        let outcome = UpdateOutcome::Updated {
            previous: Some("198.51.100.7".to_string()),
            address: "203.0.113.5".to_string(),
        };
        assert_eq!(outcome.address(), "203.0.113.5");

        let outcome = UpdateOutcome::Unchanged {
            address: "203.0.113.5".to_string(),
        };
        assert_eq!(outcome.address(), "203.0.113.5");
    }
}
