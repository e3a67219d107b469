//! Unified error handling for the glossa crate
//!
//! Every failure in the translation pipeline is represented here. The
//! overarching policy is "always render something": loader and session
//! absorb these errors at the orchestration boundary and log them instead
//! of surfacing an error state to the page.

use crate::locale::Language;
use std::io;
use thiserror::Error;

/// Unified error type for the glossa crate
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport errors while fetching a dictionary candidate
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A candidate URL answered with a non-success status
    #[error("candidate returned HTTP status {0}")]
    CandidateStatus(u16),

    /// A candidate body was not valid dictionary JSON
    #[error("dictionary JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Every candidate and the English secondary fallback failed
    #[error("all dictionary sources failed for '{requested}'")]
    AllSourcesFailed { requested: Language },

    /// I/O errors (page files, config files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Preference store read/write failures
    #[error("preference store error: {0}")]
    PrefStore(String),

    /// Configuration errors
    #[error("config error: {0}")]
    Config(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Check if this error is recoverable (worth retrying on a later switch)
    ///
    /// Transport-level failures are often transient; parse and config
    /// failures are not.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Http(_) | Self::Io(_) | Self::AllSourcesFailed { .. } => true,
            Self::CandidateStatus(status) => matches!(*status, 429 | 500 | 502 | 503 | 504),
            Self::Json(_) | Self::PrefStore(_) | Self::Config(_) => false,
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
