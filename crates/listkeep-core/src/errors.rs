//! Error hierarchy for the synchronization client.
//!
//! A single [`StoreError`] enum covers the whole taxonomy:
//!
//! - [`StoreError::Validation`]: a required field is empty, rejected before
//!   any network call
//! - [`StoreError::Transport`]: the request could not complete, or the
//!   server answered with a non-2xx status
//! - [`StoreError::MalformedResponse`]: a response body did not decode into
//!   the expected shape
//! - [`StoreError::NoActiveEdit`]: a commit was requested with no edit
//!   buffer active
//!
//! None of these are fatal: local state is preserved per the per-operation
//! policy in the synchronizer, and the caller may retry.

use thiserror::Error;

/// Errors produced by the remote store client and the list synchronizer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A required field was empty (after trimming). Raised before any
    /// network traffic.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The network call could not complete, or the server returned a
    /// non-2xx status. `status` is `None` for connection-level failures.
    #[error("transport failure{}: {message}", fmt_status(.status))]
    Transport {
        /// HTTP status code, when a response was received at all.
        status: Option<u16>,
        /// Human-readable description of the failure.
        message: String,
    },

    /// A response body did not decode into the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// A commit was requested while no record was in editing mode.
    #[error("no record is currently being edited")]
    NoActiveEdit,
}

fn fmt_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (status {code})"),
        None => String::new(),
    }
}

impl StoreError {
    /// Transport error for a connection-level failure (no HTTP status).
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Transport {
            status: None,
            message: message.into(),
        }
    }

    /// Transport error for a non-2xx HTTP response.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Transport {
            status: Some(status),
            message: message.into(),
        }
    }

    /// True when the error came from the transport layer (retryable).
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

/// Result type for store and synchronizer operations.
pub type Result<T> = std::result::Result<T, StoreError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
