//! Unified error types for E2E-Oxide

use thiserror::Error;

/// Unified Result type
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for E2E-Oxide
#[derive(Error, Debug)]
pub enum Error {
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors (unrecognized engine, malformed env values)
    ///
    /// Fatal: aborts the run before any test executes.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A wait, navigation or action exceeded its bound
    #[error("Operation timeout: {0}")]
    Timeout(String),

    /// Errors surfaced by the underlying browser driver
    #[error("Driver error: {0}")]
    Driver(String),

    /// Navigation failed
    #[error("Navigation failed: {0}")]
    Navigation(String),

    /// Element not found
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Screenshot or trace write failure
    ///
    /// Logged as a warning; never overrides the original test outcome.
    #[error("Artifact capture error: {0}")]
    ArtifactCapture(String),

    /// A test assertion did not hold within its bound
    ///
    /// Distinct from [`Error::Timeout`] even though assertions are
    /// implemented as bounded waits.
    #[error("Assertion failed: {0}")]
    Assertion(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Test-data format errors (YAML/JSON files)
    #[error("Data format error: {0}")]
    DataFormat(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new configuration error
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Error::Configuration(msg.into())
    }

    /// Create a new timeout error
    pub fn timeout<S: Into<String>>(msg: S) -> Self {
        Error::Timeout(msg.into())
    }

    /// Create a new driver error
    pub fn driver<S: Into<String>>(msg: S) -> Self {
        Error::Driver(msg.into())
    }

    /// Create a new navigation error
    pub fn navigation<S: Into<String>>(msg: S) -> Self {
        Error::Navigation(msg.into())
    }

    /// Create a new element not found error
    pub fn element_not_found<S: Into<String>>(selector: S) -> Self {
        Error::ElementNotFound(selector.into())
    }

    /// Create a new artifact capture error
    pub fn artifact_capture<S: Into<String>>(msg: S) -> Self {
        Error::ArtifactCapture(msg.into())
    }

    /// Create a new assertion error
    pub fn assertion<S: Into<String>>(msg: S) -> Self {
        Error::Assertion(msg.into())
    }

    /// Create a new data format error
    pub fn data_format<S: Into<String>>(msg: S) -> Self {
        Error::DataFormat(msg.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Error::Internal(msg.into())
    }

    /// Whether this error represents an expired wait bound
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout(_))
    }
}
