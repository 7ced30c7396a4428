//! Update planning for the diff-and-replace strategy
//!
//! [`plan_update`] decides what a zone rewrite must contain. It is pure:
//! records in, records out, no I/O. The registrar only accepts complete
//! record sets, so the plan always carries every record of the zone, not
//! just the managed one.

use crate::record::{DnsRecord, RECORD_TYPE_A};

/// What a planned rewrite would change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanOutcome {
    /// The managed record already carries the resolved address
    Unchanged,
    /// The managed record exists with a different address
    Rewrite {
        /// The address it held before
        previous: String,
    },
    /// No record exists for the managed host; one gets appended
    Append,
}

/// A computed zone rewrite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePlan {
    /// The complete record set to write, in fetch order
    pub records: Vec<DnsRecord>,
    /// What the rewrite changes
    pub outcome: PlanOutcome,
}

impl UpdatePlan {
    /// Whether the zone must actually be written
    ///
    /// The only no-op the updater ever detects: the managed record exists
    /// and already holds the resolved address.
    pub fn needs_write(&self) -> bool {
        !matches!(self.outcome, PlanOutcome::Unchanged)
    }
}

/// Compute the rewrite for one zone
///
/// Scans the fetched records in order. Every record is copied into the
/// plan; a record whose name matches `host` gets the resolved address,
/// and its type is forced to `A` only when the address actually changes.
/// Records the updater does not manage pass through untouched, in their
/// original positions.
pub fn plan_update(existing: &[DnsRecord], host: &str, address: &str) -> UpdatePlan {
    let mut found = false;
    let mut previous: Option<String> = None;
    let mut records = Vec::with_capacity(existing.len() + 1);

    for fetched in existing {
        let mut record = fetched.clone();

        if record.name == host {
            found = true;
            if record.address != address {
                if previous.is_none() {
                    previous = Some(record.address.clone());
                }
                record.address = address.to_string();
                record.record_type = RECORD_TYPE_A.to_string();
            }
        }

        // The registrar reports the zone apex as an empty name but expects
        // it written back as "@". The rename must stay below the host
        // comparison: matching always sees the name exactly as fetched.
        if record.name.is_empty() {
            record.name = "@".to_string();
        }

        records.push(record);
    }

    if !found {
        records.push(DnsRecord::a_record(host, address));
    }

    let outcome = if !found {
        PlanOutcome::Append
    } else if let Some(previous) = previous {
        PlanOutcome::Rewrite { previous }
    } else {
        PlanOutcome::Unchanged
    };

    UpdatePlan { records, outcome }
}
