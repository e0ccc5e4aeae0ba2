//! Error types exposed by the review feed layers.
//!
//! The synchronizer itself never surfaces these to its callers: remote
//! failures degrade to "no data" or "no-op" and are logged. The gateway,
//! cache, configuration and CLI layers use them to report what went wrong.

use thiserror::Error;

/// Errors raised while configuring the feed or talking to its collaborators.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FeedError {
    /// Configuration could not be loaded or is incomplete.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// The remote store endpoint could not be parsed.
    #[error("review store endpoint is invalid: {0}")]
    InvalidUrl(String),

    /// Networking failed while calling the remote store.
    #[error("network error talking to the review store: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// The remote store answered with a non-success status.
    #[error("review store error: {message}")]
    Api {
        /// Status and body excerpt describing the failure.
        message: String,
    },

    /// A payload could not be decoded or encoded.
    #[error("failed to decode review data: {message}")]
    Decode {
        /// Error detail from the JSON layer.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}

impl FeedError {
    /// Wraps an I/O error from a writer or the filesystem.
    #[must_use]
    pub fn io(error: &std::io::Error) -> Self {
        Self::Io {
            message: error.to_string(),
        }
    }
}
