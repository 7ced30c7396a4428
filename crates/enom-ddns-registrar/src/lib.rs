// # eNom Registrar Client
//
// This crate talks to the eNom dynamic DNS API (`interface.asp`) and
// provides the update strategies built on top of it.
//
// ## API Shape
//
// Every command goes to one fixed endpoint and answers with the same XML
// envelope. Three commands are used:
//
// - `SetDNSHost` (GET): point one host record at an address
// - `GetHosts` (POST): list every record in a zone
// - `SetHosts` (POST): replace every record in a zone
//
// There is no partial update. A zone rewrite must carry the full record
// set; anything left out is deleted on the registrar side.
//
// ## Error Reporting
//
// The registrar reports failure in-band through the envelope's `ErrCount`
// field, not through the HTTP status line. The status is never consulted:
// a 500 with a decodable success envelope is a success, and an HTML error
// page surfaces as a malformed response when decoding fails.
//
// ## Scope
//
// - One HTTP request per client call, no retries (owned by `DdnsEngine`)
// - No caching, no background tasks
// - HTTP timeout configured (30 seconds)
//
// ## Security
//
// - The account password NEVER appears in logs or debug output
// - TLS verification can be disabled for broken registrar certificate
//   chains, but only through an explicit off-by-default flag

use enom_ddns_core::{Credentials, DnsRecord, DomainTarget, Error, Result};
use std::time::Duration;

pub mod response;
pub mod updaters;

pub use response::CommandResult;
pub use updaters::{BlindUpdater, DiffReplaceUpdater, updater_from_config};

/// The dynamic DNS API endpoint
const ENOM_ENDPOINT: &str = "https://dynamic.name-services.com/interface.asp";

/// Default HTTP timeout for API requests (30 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the eNom dynamic DNS API
///
/// One instance wraps one set of account credentials and a pooled HTTP
/// client; it is cheap to clone and safe to share across strategies.
///
/// # Security
///
/// The contained [`Credentials`] redact the password in debug output, so
/// this type derives `Debug` safely.
#[derive(Debug, Clone)]
pub struct EnomClient {
    /// Command endpoint; overridable for tests
    endpoint: String,

    /// Account credentials sent with every command
    credentials: Credentials,

    /// HTTP client for API requests
    client: reqwest::Client,
}

impl EnomClient {
    /// Create a client against the live registrar endpoint
    ///
    /// # Parameters
    ///
    /// - `credentials`: registrar account credentials (`UID`/`PW`)
    /// - `insecure_tls`: skip TLS certificate verification when true
    pub fn new(credentials: Credentials, insecure_tls: bool) -> Self {
        Self::with_endpoint(ENOM_ENDPOINT, credentials, insecure_tls)
    }

    /// Create a client against an arbitrary endpoint
    ///
    /// Exists so tests can point the client at a local mock server; live
    /// callers should use [`EnomClient::new`].
    pub fn with_endpoint(
        endpoint: impl Into<String>,
        credentials: Credentials,
        insecure_tls: bool,
    ) -> Self {
        if insecure_tls {
            tracing::warn!("TLS certificate verification is DISABLED for registrar requests");
        }

        // Build HTTP client with timeout
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .danger_accept_invalid_certs(insecure_tls)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            endpoint: endpoint.into(),
            credentials,
            client,
        }
    }

    /// The endpoint this client sends commands to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Point one host record at an address
    ///
    /// # Parameters
    ///
    /// - `target`: the managed domain
    /// - `address`: the value to write into the record
    ///
    /// # API Call
    ///
    /// ```http
    /// GET /interface.asp?Command=SetDNSHost&ResponseType=XML&UID=...&PW=...
    ///     &HostName=home&Zone=example.com&Address=203.0.113.5
    /// ```
    ///
    /// # Errors
    ///
    /// - [`Error::Network`]: the request could not be sent or read
    /// - [`Error::MalformedResponse`]: the body is not a decodable envelope
    /// - [`Error::Rejected`]: the registrar reported a nonzero error count
    pub async fn set_dns_host(&self, target: &DomainTarget, address: &str) -> Result<()> {
        let mut params = self.command_params("SetDNSHost");
        params.push(("HostName".to_string(), target.host().to_string()));
        params.push(("Zone".to_string(), target.zone()));
        params.push(("Address".to_string(), address.to_string()));

        tracing::debug!("SetDNSHost {} -> {}", target.fqdn(), address);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&params)
            .send()
            .await
            .map_err(|e| Error::network(format!("SetDNSHost request failed: {e}")))?;

        self.read_envelope("SetDNSHost", response).await?;
        Ok(())
    }

    /// List every record in the target's zone
    ///
    /// # API Call
    ///
    /// ```http
    /// POST /interface.asp
    /// Command=GetHosts&ResponseType=XML&UID=...&PW=...&TLD=com&SLD=example
    /// ```
    ///
    /// # Returns
    ///
    /// The zone's records in the registrar's order. Apex records come back
    /// with an empty name; callers rename them before writing back.
    pub async fn get_hosts(&self, target: &DomainTarget) -> Result<Vec<DnsRecord>> {
        let mut params = self.command_params("GetHosts");
        params.push(("TLD".to_string(), target.tld().to_string()));
        params.push(("SLD".to_string(), target.sld().to_string()));

        tracing::debug!("GetHosts for zone {}", target.zone());

        let response = self
            .client
            .post(&self.endpoint)
            .form(&params)
            .send()
            .await
            .map_err(|e| Error::network(format!("GetHosts request failed: {e}")))?;

        let result = self.read_envelope("GetHosts", response).await?;
        Ok(result.into_records())
    }

    /// Replace the target zone's full record set
    ///
    /// Records are serialized as 1-based indexed parameter groups in the
    /// order given. The registrar treats the submitted set as the complete
    /// zone, so the caller must pass every record that should survive.
    ///
    /// # API Call
    ///
    /// ```http
    /// POST /interface.asp
    /// Command=SetHosts&ResponseType=XML&UID=...&PW=...&TLD=com&SLD=example
    /// &RecordName1=@&RecordType1=A&Address1=203.0.113.5
    /// &RecordName2=mail&RecordType2=MX&Address2=mx.example.com&MXPref2=10
    /// ```
    pub async fn set_hosts(&self, target: &DomainTarget, records: &[DnsRecord]) -> Result<()> {
        let mut params = self.command_params("SetHosts");
        params.push(("TLD".to_string(), target.tld().to_string()));
        params.push(("SLD".to_string(), target.sld().to_string()));
        params.extend(Self::record_params(records));

        tracing::debug!(
            "SetHosts rewriting {} record(s) in {}",
            records.len(),
            target.zone()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .form(&params)
            .send()
            .await
            .map_err(|e| Error::network(format!("SetHosts request failed: {e}")))?;

        self.read_envelope("SetHosts", response).await?;
        Ok(())
    }

    /// The parameters every command starts from
    fn command_params(&self, command: &str) -> Vec<(String, String)> {
        vec![
            ("Command".to_string(), command.to_string()),
            ("ResponseType".to_string(), "XML".to_string()),
            ("UID".to_string(), self.credentials.username.clone()),
            ("PW".to_string(), self.credentials.password.clone()),
        ]
    }

    /// Serialize records as indexed parameter groups
    ///
    /// Indexes are 1-based over the slice order. `MXPref<i>` is omitted
    /// for any record without an MX preference.
    fn record_params(records: &[DnsRecord]) -> Vec<(String, String)> {
        let mut params = Vec::with_capacity(records.len() * 4);

        for (index, record) in records.iter().enumerate() {
            let position = index + 1;
            params.push((format!("RecordName{position}"), record.name.clone()));
            params.push((format!("RecordType{position}"), record.record_type.clone()));
            params.push((format!("Address{position}"), record.address.clone()));

            if let Some(pref) = record.mx_pref.as_deref().filter(|p| !p.is_empty()) {
                params.push((format!("MXPref{position}"), pref.to_string()));
            }
        }

        params
    }

    /// Read and decode a command response
    ///
    /// The HTTP status line is intentionally not consulted; `ErrCount` in
    /// the envelope is the only failure signal the registrar honors.
    async fn read_envelope(
        &self,
        command: &str,
        response: reqwest::Response,
    ) -> Result<CommandResult> {
        let body = response
            .text()
            .await
            .map_err(|e| Error::network(format!("{command} response could not be read: {e}")))?;

        CommandResult::from_xml(&body)?.ensure_success()
    }
}
