//! Registrar response envelope decoding
//!
//! Every `interface.asp` command answers with the same XML envelope:
//!
//! ```text
//! <interface-response>
//!   <Command>SETDNSHOST</Command>
//!   <Language>eng</Language>
//!   <ErrCount>0</ErrCount>
//!   <errors><Err1>...</Err1></errors>
//!   <host>           (GetHosts only, repeated)
//!     <name>@</name>
//!     <type>A</type>
//!     <address>203.0.113.5</address>
//!     <hostid>12345678</hostid>
//!     <mxpref>10</mxpref>
//!   </host>
//! </interface-response>
//! ```
//!
//! Success is decided by one field alone: `ErrCount` of zero means the
//! command worked, whatever else the body says. A nonzero count means the
//! registrar rejected the command and `Err1` carries its first message.
//! A body that does not decode at all is a different failure kind, so
//! callers can tell a rejection from garbage.

use enom_ddns_core::{DnsRecord, Error, Result};
use serde::Deserialize;

/// The registrar's response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct CommandResult {
    /// Echo of the executed command
    #[serde(rename = "Command", default)]
    pub command: String,

    /// Response language
    #[serde(rename = "Language", default)]
    pub language: String,

    /// Number of errors the registrar reports; zero means success
    #[serde(rename = "ErrCount", default)]
    pub err_count: u32,

    /// Error block; only the first message is ever used
    #[serde(rename = "errors", default)]
    pub errors: ErrorBlock,

    /// Host records, present on the listing response
    #[serde(rename = "host", default)]
    pub hosts: Vec<HostEntry>,
}

/// The `errors` element of the envelope
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBlock {
    /// The registrar's first error message
    #[serde(rename = "Err1", default)]
    pub err1: String,
}

/// One `host` element of the listing response
#[derive(Debug, Clone, Deserialize)]
pub struct HostEntry {
    /// Record name relative to the zone; empty for the zone apex
    #[serde(rename = "name", default)]
    pub name: String,

    /// Record type as the registrar spells it
    #[serde(rename = "type", default)]
    pub record_type: String,

    /// Record value
    #[serde(rename = "address", default)]
    pub address: String,

    /// Registrar-side record id; carried for completeness, never written back
    #[serde(rename = "hostid", default)]
    pub host_id: String,

    /// MX preference, when the registrar sent one
    #[serde(rename = "mxpref")]
    pub mx_pref: Option<String>,
}

impl HostEntry {
    /// Convert into the core record model
    ///
    /// An empty `mxpref` element is normalized to "no preference" so the
    /// bulk-replace serializer can omit the parameter entirely.
    pub fn into_record(self) -> DnsRecord {
        DnsRecord {
            name: self.name,
            record_type: self.record_type,
            address: self.address,
            mx_pref: self.mx_pref.filter(|pref| !pref.is_empty()),
        }
    }
}

impl CommandResult {
    /// Decode a response body
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedResponse`] when the body is not a
    /// decodable envelope.
    pub fn from_xml(body: &str) -> Result<Self> {
        quick_xml::de::from_str(body)
            .map_err(|e| Error::malformed_response(format!("{e} in registrar response")))
    }

    /// Fail when the registrar reported an error
    ///
    /// # Errors
    ///
    /// Returns [`Error::Rejected`] carrying `Err1` when `ErrCount` is
    /// nonzero. An envelope the registrar marked successful passes
    /// through untouched, whatever its other fields hold.
    pub fn ensure_success(self) -> Result<Self> {
        if self.err_count > 0 {
            let message = if self.errors.err1.is_empty() {
                format!("registrar reported {} error(s)", self.err_count)
            } else {
                self.errors.err1.clone()
            };
            return Err(Error::rejected(message));
        }
        Ok(self)
    }

    /// The listed host records, converted to the core model
    pub fn into_records(self) -> Vec<DnsRecord> {
        self.hosts
            .into_iter()
            .map(HostEntry::into_record)
            .collect()
    }
}
