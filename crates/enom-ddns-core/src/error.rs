//! Error types for the updater
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for updater operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the updater
///
/// Four kinds cover every failure the system distinguishes. Callers that
/// need finer detail get it from the message, not from new variants.
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or malformed configuration (always fatal, always pre-network)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connectivity or transport failure talking to the IP echo service
    /// or the registrar
    #[error("Network error: {0}")]
    Network(String),

    /// The registrar answered with a body that does not decode as a
    /// command result envelope
    #[error("Malformed registrar response: {0}")]
    MalformedResponse(String),

    /// The registrar decoded fine and reported a failure of its own
    /// (carries the provider's first error message)
    #[error("Registrar rejected the request: {0}")]
    Rejected(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a malformed response error
    pub fn malformed_response(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    /// Create a rejection error from the registrar's own message
    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::Rejected(msg.into())
    }

    /// Whether this error is fatal to the process in polling mode
    ///
    /// Only configuration errors are; anything that happens on the wire
    /// is retried implicitly on the next poll cycle.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}
