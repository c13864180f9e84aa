use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Capability, Provider};

/// Unified error type for the reelprice workspace.
///
/// Variants fall into three groups that drive retry decisions:
/// transient upstream failures (retried with backoff), fatal errors (abort
/// the current operation), and the domain-level `NotFound` outcome.
/// Aggregates describe multi-attempt or multi-provider failures.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ReelError {
    /// Network-level failure talking to a provider (connect, reset, body read).
    #[error("{provider} transport error: {msg}")]
    Transport {
        /// Provider that was being called.
        provider: Provider,
        /// Human-readable error message.
        msg: String,
    },

    /// A provider answered with a non-200 status.
    #[error("{provider} returned HTTP {status}")]
    Status {
        /// Provider that answered.
        provider: Provider,
        /// HTTP status code.
        status: u16,
    },

    /// A provider answered 200 but the payload could not be decoded.
    #[error("{provider} sent a malformed payload: {msg}")]
    Decode {
        /// Provider that answered.
        provider: Provider,
        /// Decoder message.
        msg: String,
    },

    /// An individual provider call exceeded the configured timeout.
    #[error("provider timed out: {capability} via {provider}")]
    ProviderTimeout {
        /// Provider that timed out.
        provider: Provider,
        /// Capability that was being fetched.
        capability: Capability,
    },

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// Client-side misconfiguration (bad base URL, unusable token, ...).
    #[error("invalid configuration: {0}")]
    Config(String),

    /// An individual connector failed in a way that retrying cannot fix.
    #[error("{connector} failed: {msg}")]
    Connector {
        /// Connector name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),

    /// A title is absent from every catalog, or no provider offered a usable price.
    #[error("not found: {what}")]
    NotFound {
        /// Description of the missing resource, e.g. "price for star wars".
        what: String,
    },

    /// The retry stop condition was reached while the call kept failing transiently.
    #[error("{capability} still failing after {attempts} attempts: {last}")]
    RetriesExhausted {
        /// Capability being retried.
        capability: Capability,
        /// Number of attempts made.
        attempts: u32,
        /// The last transient failure observed.
        last: Box<ReelError>,
    },

    /// The overall request exceeded the configured deadline.
    #[error("request timed out: {capability}")]
    RequestTimeout {
        /// Capability for which the request timed out.
        capability: Capability,
    },

    /// All selected providers failed; contains the individual failures.
    #[error("all providers failed: {0:?}")]
    AllProvidersFailed(Vec<ReelError>),
}

impl ReelError {
    /// Helper: build a `Transport` error.
    pub fn transport(provider: Provider, msg: impl Into<String>) -> Self {
        Self::Transport {
            provider,
            msg: msg.into(),
        }
    }

    /// Helper: build a `Decode` error.
    pub fn decode(provider: Provider, msg: impl Into<String>) -> Self {
        Self::Decode {
            provider,
            msg: msg.into(),
        }
    }

    /// Helper: build a `Connector` error with the connector name and message.
    pub fn connector(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Connector {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build a `ProviderTimeout` error.
    #[must_use]
    pub const fn provider_timeout(provider: Provider, capability: Capability) -> Self {
        Self::ProviderTimeout {
            provider,
            capability,
        }
    }

    /// Helper: build a `RequestTimeout` error.
    #[must_use]
    pub const fn request_timeout(capability: Capability) -> Self {
        Self::RequestTimeout { capability }
    }

    /// Whether a retry of the same call may succeed.
    ///
    /// Timeouts, transport failures, non-200 statuses and malformed payloads
    /// are transient. Everything else, including `NotFound`, is not.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. }
                | Self::Status { .. }
                | Self::Decode { .. }
                | Self::ProviderTimeout { .. }
        )
    }

    /// Returns true for the domain-level not-found outcome.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Flatten nested `AllProvidersFailed` structures into a plain vector.
    #[must_use]
    pub fn flatten(self) -> Vec<Self> {
        match self {
            Self::AllProvidersFailed(list) => list.into_iter().flat_map(Self::flatten).collect(),
            other => vec![other],
        }
    }
}
