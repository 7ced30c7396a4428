// # HTTP Echo IP Resolver
//
// This crate provides the HTTP-based IP resolver for the updater.
//
// ## Architecture
//
// One unauthenticated GET against an echo service whose response body is
// the caller's public address in plain text. The trimmed body is returned
// verbatim:
//
// - No syntax validation. The address string flows through comparison and
//   update untouched, and a nonsense answer surfaces later as a registrar
//   rejection instead of a local error.
// - No status inspection. The body is read on every status; echo services
//   answer 200 in practice.

use enom_ddns_core::{Error, IpResolver, Result};
use std::time::Duration;
use tracing::debug;

/// Default echo service
pub const DEFAULT_ECHO_URL: &str = "http://checkip.amazonaws.com";

/// Request timeout for the echo call
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP echo based IP resolver
pub struct HttpIpResolver {
    /// URL of the echo service
    url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpIpResolver {
    /// Create a resolver against the default echo service
    pub fn new() -> Self {
        Self::with_url(DEFAULT_ECHO_URL)
    }

    /// Create a resolver against a specific echo URL
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::builder()
                .timeout(HTTP_TIMEOUT)
                .build()
                .unwrap_or_default(),
        }
    }

    /// The echo URL this resolver queries
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for HttpIpResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IpResolver for HttpIpResolver {
    async fn resolve(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::network(format!("echo request failed: {e}")))?;

        let status = response.status();

        let body = response
            .text()
            .await
            .map_err(|e| Error::network(format!("failed to read echo response: {e}")))?;

        let address = body.trim().to_string();
        debug!("Echo service answered {} (status {})", address, status);

        Ok(address)
    }

    fn source_name(&self) -> &'static str {
        "http-echo"
    }
}
