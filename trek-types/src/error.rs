use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the trek workspace.
///
/// Distinguishes upstream unavailability (which the resilient wrapper
/// suppresses) from defects and precondition violations (which always
/// propagate to the caller).
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TrekError {
    /// Invalid input argument or builder configuration.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// Issues with returned or produced data (undecodable body, unserializable query).
    #[error("data issue: {0}")]
    Data(String),

    /// The upstream could not be reached (connection refused, timeout, DNS failure).
    #[error("request to '{target}' via {provider} failed: {msg}")]
    Transport {
        /// Provider name that failed.
        provider: String,
        /// Request target (method and URL).
        target: String,
        /// Human-readable transport error.
        msg: String,
    },

    /// The upstream answered with a non-success status code.
    #[error(
        "request to '{target}' via {provider} has failed with status code '{status}'. Response content: {body}"
    )]
    Status {
        /// Provider name that failed.
        provider: String,
        /// Request target (method and URL).
        target: String,
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        body: String,
    },

    /// An individual provider failed in a way that is not an availability problem.
    #[error("{provider} failed: {msg}")]
    Connector {
        /// Provider name that failed.
        provider: String,
        /// Human-readable error message.
        msg: String,
    },

    /// The caller cancelled the operation before it completed.
    #[error("operation cancelled")]
    Cancelled,
}

impl TrekError {
    /// Helper: build a `Connector` error with the provider name and message.
    pub fn connector(provider: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Connector {
            provider: provider.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `Transport` error.
    pub fn transport(
        provider: impl Into<String>,
        target: impl Into<String>,
        msg: impl Into<String>,
    ) -> Self {
        Self::Transport {
            provider: provider.into(),
            target: target.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `Status` error for a non-success upstream response.
    pub fn status(
        provider: impl Into<String>,
        target: impl Into<String>,
        status: u16,
        body: impl Into<String>,
    ) -> Self {
        Self::Status {
            provider: provider.into(),
            target: target.into(),
            status,
            body: body.into(),
        }
    }

    /// Returns true for failures that mean "this upstream is not available right now".
    ///
    /// Only these are suppressed by the resilient wrapper; everything else is
    /// treated as a defect and propagated.
    #[must_use]
    pub const fn is_upstream_unavailable(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Status { .. })
    }

    /// Request target for upstream failures, if any.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Transport { target, .. } | Self::Status { target, .. } => Some(target),
            _ => None,
        }
    }
}
