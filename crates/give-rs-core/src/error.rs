//! Core error types for give-rs.
//!
//! Rendering never fails on empty data: empty option lists and empty store
//! results degrade to fallback entries. The variants here cover the cases
//! that genuinely cannot produce markup, such as a malformed dropdown
//! configuration or a failing data store.

use thiserror::Error;

/// The primary error type for give-rs.
#[derive(Error, Debug)]
pub enum GiveError {
    // ── Configuration ────────────────────────────────────────────────

    /// A configuration value is missing, malformed, or inconsistent.
    ///
    /// Raised for render configurations whose selection shape does not match
    /// the `multiple` flag, and for unreadable settings files.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    // ── Data sources ─────────────────────────────────────────────────

    /// A record store backing an option list failed.
    #[error("Data source error: {0}")]
    DataSourceError(String),

    // ── i18n ─────────────────────────────────────────────────────────

    /// A translation catalog could not be loaded.
    #[error("Translation error: {0}")]
    TranslationError(String),

    // ── Serialization ────────────────────────────────────────────────

    /// An error occurred during serialization or deserialization.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl GiveError {
    /// Returns `true` if the error was caused by caller-supplied configuration
    /// rather than by a collaborator.
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::ConfigurationError(_))
    }
}

impl From<serde_json::Error> for GiveError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// A convenience type alias for `Result<T, GiveError>`.
pub type GiveResult<T> = Result<T, GiveError>;
