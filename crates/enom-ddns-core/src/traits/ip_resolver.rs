// # IP Resolver Trait
//
// Defines the interface for discovering the caller's current public
// IP address.
//
// ## Implementations
//
// - HTTP echo service: `enom-ddns-ip-http` crate
//
// ## Usage
//
// ```rust,ignore
// use enom_ddns_core::IpResolver;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let resolver = /* IpResolver implementation */;
//
//     let address = resolver.resolve().await?;
//     println!("public address: {}", address);
//
//     Ok(())
// }
// ```

use async_trait::async_trait;

/// Trait for public address discovery
///
/// Implementations must be thread-safe and usable across async tasks.
///
/// The resolved address is an opaque string. No syntax validation happens
/// anywhere in the pipeline; whatever the resolver returns is compared and
/// forwarded verbatim, and a bad answer surfaces as a registrar rejection
/// rather than a local parse error.
#[async_trait]
pub trait IpResolver: Send + Sync {
    /// Resolve the current public address
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: The address, already trimmed of surrounding whitespace
    /// - `Err(Error)`: If the resolver could not produce an answer
    async fn resolve(&self) -> Result<String, crate::Error>;

    /// Get the resolver name (for logging/debugging)
    fn source_name(&self) -> &'static str;
}
