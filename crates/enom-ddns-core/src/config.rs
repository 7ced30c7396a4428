//! Configuration types for the updater
//!
//! This module defines the configuration structures and the pure parsing
//! rules behind them. Nothing here touches the process environment; the
//! daemon assembles a [`Config`] from whatever source it likes and hands
//! it over by reference.

use crate::error::{Error, Result};
use std::fmt;
use std::time::Duration;

/// Default polling interval in seconds
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 600;

/// The managed domain, split into its three labels
///
/// The updater manages exactly one host record inside one zone, named by a
/// three-label string `<host>.<sld>.<tld>` (for example `home.example.com`
/// manages the `home` record in the `example.com` zone). Anything that
/// does not split into exactly three labels is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainTarget {
    host: String,
    sld: String,
    tld: String,
}

impl DomainTarget {
    /// Parse a three-label domain string
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the input does not contain exactly
    /// three dot-separated labels.
    pub fn parse(domain: &str) -> Result<Self> {
        let labels: Vec<&str> = domain.split('.').collect();
        if labels.len() != 3 {
            return Err(Error::config(format!(
                "domain must have the form <host>.<sld>.<tld>, got {domain:?}"
            )));
        }

        Ok(Self {
            host: labels[0].to_string(),
            sld: labels[1].to_string(),
            tld: labels[2].to_string(),
        })
    }

    /// The host label (the record this updater manages)
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The second-level domain label
    pub fn sld(&self) -> &str {
        &self.sld
    }

    /// The top-level domain label
    pub fn tld(&self) -> &str {
        &self.tld
    }

    /// The zone the host record lives in (`<sld>.<tld>`)
    pub fn zone(&self) -> String {
        format!("{}.{}", self.sld, self.tld)
    }

    /// The full managed name (`<host>.<sld>.<tld>`)
    pub fn fqdn(&self) -> String {
        format!("{}.{}.{}", self.host, self.sld, self.tld)
    }
}

impl fmt::Display for DomainTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.host, self.sld, self.tld)
    }
}

/// Registrar account credentials
///
/// The secret never appears in debug output; [`Config`] and the engine log
/// themselves freely, so the redaction has to live here.
#[derive(Clone)]
pub struct Credentials {
    /// Account identifier (the registrar calls this `UID`)
    pub username: String,
    /// Account secret (the registrar calls this `PW`)
    pub password: String,
}

impl Credentials {
    /// Create credentials from an account identifier and secret
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<REDACTED>")
            .finish()
    }
}

/// How an update cycle talks to the registrar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateStrategy {
    /// One `SetDNSHost` call per cycle, unconditionally
    #[default]
    Blind,
    /// Fetch the zone's records, rewrite the full set only when the
    /// managed record actually changed
    DiffReplace,
}

impl UpdateStrategy {
    /// Parse a strategy name (`blind` or `diff`)
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for any other value.
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "blind" => Ok(Self::Blind),
            "diff" => Ok(Self::DiffReplace),
            other => Err(Error::config(format!(
                "unknown update strategy {other:?} (expected \"blind\" or \"diff\")"
            ))),
        }
    }

    /// The canonical name of this strategy
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blind => "blind",
            Self::DiffReplace => "diff",
        }
    }
}

/// Main updater configuration
///
/// Built once at startup, passed by reference, never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    /// The managed domain
    pub target: DomainTarget,

    /// Registrar account credentials
    pub credentials: Credentials,

    /// Time between update cycles in polling mode
    pub poll_interval: Duration,

    /// Update strategy for each cycle
    pub strategy: UpdateStrategy,

    /// Skip registrar TLS certificate verification
    ///
    /// Off by default. Exists for registrar endpoints with broken
    /// certificate chains; enabling it trades away transport security.
    pub insecure_tls: bool,
}

impl Config {
    /// Create a configuration with default interval and strategy
    pub fn new(target: DomainTarget, credentials: Credentials) -> Self {
        Self {
            target,
            credentials,
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            strategy: UpdateStrategy::default(),
            insecure_tls: false,
        }
    }

    /// Set the polling interval
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Set the update strategy
    pub fn with_strategy(mut self, strategy: UpdateStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Enable or disable registrar certificate verification
    pub fn with_insecure_tls(mut self, insecure_tls: bool) -> Self {
        self.insecure_tls = insecure_tls;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.credentials.username.is_empty() {
            return Err(Error::config("registrar username cannot be empty"));
        }
        if self.credentials.password.is_empty() {
            return Err(Error::config("registrar password cannot be empty"));
        }
        if self.poll_interval.is_zero() {
            return Err(Error::config("poll interval cannot be zero"));
        }
        Ok(())
    }
}

/// Resolve the polling interval from an optional raw setting
///
/// Absent, unparsable, and zero values all silently fall back to the
/// 600 second default. Operators who set `INTERVAL=ten` get the default,
/// not an error; that behavior is long-standing and scripts rely on it.
pub fn poll_interval_from(raw: Option<&str>) -> Duration {
    let secs = raw
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(DEFAULT_POLL_INTERVAL_SECS);

    Duration::from_secs(secs)
}
