//! Error taxonomy for the search engine and README viewer.
//!
//! Structured errors via `thiserror`, composing with `?` and `From`.
//! Staleness is deliberately *not* an error: a superseded pipeline call
//! resolves to a dedicated outcome (`SearchOutcome::Superseded`) and is
//! discarded silently, never surfaced to the user.
//!
//! # Recovery strategy
//!
//! No failure here is fatal to the process. Search failures surface as the
//! session's `Errored` status and are retried only by an explicit user
//! trigger; README failures leave the viewer errored without disrupting the
//! result list. Config/logging/terminal failures abort startup via
//! [`AppError`].

use thiserror::Error;

// ===== SearchError =====

/// Failure of a repository-search request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Local contract violation: page numbers are 1-based. Nothing is sent
    /// to the network.
    #[error("Page number must be >= 1, got {0}")]
    InvalidPage(u32),

    /// Transport-level failure (DNS, connect, TLS, mid-body disconnect).
    #[error("Network failure: {reason}")]
    Network {
        /// Human-readable cause from the transport layer.
        reason: String,
    },

    /// The backend answered with a non-success status.
    #[error("Backend returned {status}: {message}")]
    Backend {
        /// HTTP status code.
        status: u16,
        /// Error message extracted from the response body, if any.
        message: String,
    },

    /// The request exceeded the configured timeout.
    #[error("Search request timed out")]
    TimedOut,

    /// The response body did not match the expected shape.
    #[error("Malformed search response: {reason}")]
    Decode {
        /// What failed to decode.
        reason: String,
    },
}

// ===== ReadmeError =====

/// Failure of a README fetch or render.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReadmeError {
    /// Transport-level failure.
    #[error("Network failure: {reason}")]
    Network {
        /// Human-readable cause from the transport layer.
        reason: String,
    },

    /// The backend answered with a non-success status (404 is the common
    /// case: repository without a README).
    #[error("Backend returned {status}")]
    Backend {
        /// HTTP status code.
        status: u16,
    },

    /// The document could not be decoded or rendered.
    #[error("Unrenderable document: {reason}")]
    Render {
        /// What made the document unrenderable.
        reason: String,
    },

    /// The request exceeded the configured timeout.
    #[error("README request timed out")]
    TimedOut,
}

// ===== AppError =====

/// Top-level error for the binary's startup and event loop.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded or parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Tracing subscriber could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// The HTTP client could not be constructed at startup.
    #[error("Search client error: {0}")]
    Search(#[from] SearchError),

    /// Terminal I/O failure in the crossterm/ratatui layer.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}
