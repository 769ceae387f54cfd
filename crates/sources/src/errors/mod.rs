//! Error types for the sources crate.
//!
//! Every adapter failure is represented by [`SourceError`]. The collection
//! engine treats any of these as a recoverable per-task failure: the task
//! logs the error and contributes zero records, the batch proceeds.

use thiserror::Error;

/// Errors that can occur while querying a balance source.
#[derive(Error, Debug)]
pub enum SourceError {
    /// A network error occurred while talking to a source endpoint.
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success HTTP status.
    #[error("Unexpected status {status} from {url}")]
    Status {
        /// The request URL
        url: String,
        /// The HTTP status code returned
        status: u16,
    },

    /// A response body could not be decoded into the expected shape.
    #[error("Decode error ({context}): {message}")]
    Decode {
        /// What was being decoded (e.g. "bank balances")
        context: String,
        /// The underlying decode failure
        message: String,
    },

    /// A remote API reported an application-level error.
    #[error("API error from {provider}: {message}")]
    Api {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// An on-wire amount could not be parsed into a decimal quantity.
    #[error("Invalid amount: {value}")]
    InvalidAmount {
        /// The raw amount string
        value: String,
    },

    /// An address failed bech32 decoding or re-encoding.
    #[error("Invalid address {address}: {message}")]
    InvalidAddress {
        /// The offending address
        address: String,
        /// Why it was rejected
        message: String,
    },

    /// The chain registry had no usable entry for a network.
    #[error("Chain registry error for {network}: {message}")]
    Registry {
        /// The network being looked up
        network: String,
        /// What went wrong
        message: String,
    },

    /// No REST endpoint for a network answered the health probe.
    #[error("No active endpoint for {network}")]
    NoEndpoint {
        /// The network with no responsive endpoint
        network: String,
    },
}

impl SourceError {
    /// Shorthand for a decode failure with a context tag.
    pub fn decode(context: &str, err: impl std::fmt::Display) -> Self {
        Self::Decode {
            context: context.to_string(),
            message: err.to_string(),
        }
    }
}
