//! The DNS record model
//!
//! One zone's records are always handled as a complete set: fetched in one
//! call, rewritten in one call. The registrar API has no partial update,
//! so a record the updater does not manage still travels through every
//! rewrite and must survive it byte for byte.

/// Type value for IPv4 address records
pub const RECORD_TYPE_A: &str = "A";

/// One host record inside the managed zone
///
/// Fields mirror what the registrar returns: the bare record name relative
/// to the zone, the record type, the address (or target, for types like
/// CNAME and MX), and the MX preference when the registrar sent one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsRecord {
    /// Record name relative to the zone (the registrar reports the zone
    /// apex as an empty name but expects it written back as `@`)
    pub name: String,

    /// Record type as the registrar spells it (`A`, `CNAME`, `MX`, ...)
    pub record_type: String,

    /// Record value: an address for `A` records, a target otherwise
    pub address: String,

    /// MX preference, present only when the registrar sent one
    pub mx_pref: Option<String>,
}

impl DnsRecord {
    /// Create a new record
    pub fn new(
        name: impl Into<String>,
        record_type: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            record_type: record_type.into(),
            address: address.into(),
            mx_pref: None,
        }
    }

    /// Create an `A` record
    pub fn a_record(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self::new(name, RECORD_TYPE_A, address)
    }

    /// Set the MX preference
    pub fn with_mx_pref(mut self, mx_pref: impl Into<String>) -> Self {
        self.mx_pref = Some(mx_pref.into());
        self
    }

    /// Whether this is an `A` record
    pub fn is_a_record(&self) -> bool {
        self.record_type == RECORD_TYPE_A
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_record_constructor_sets_type() {
        let record = DnsRecord::a_record("home", "203.0.113.5");
        assert!(record.is_a_record());
        assert_eq!(record.name, "home");
        assert_eq!(record.address, "203.0.113.5");
        assert_eq!(record.mx_pref, None);
    }

    #[test]
    fn mx_pref_is_carried() {
        let record = DnsRecord::new("", "MX", "mail.example.com").with_mx_pref("10");
        assert_eq!(record.mx_pref.as_deref(), Some("10"));
        assert!(!record.is_a_record());
    }
}
