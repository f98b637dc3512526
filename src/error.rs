//! Error types for the ujaran library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`UjaranError`] enum. The variants follow the failure classes of the
//! training pipeline:
//!
//! - [`UjaranError::Input`] - malformed records, unmapped labels, empty corpus
//! - [`UjaranError::Dimension`] - a feature matrix does not match a fitted model
//! - [`UjaranError::NumericPrecondition`] - negative features, empty classes, bad alpha
//!
//! # Examples
//!
//! ```
//! use ujaran::error::{UjaranError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(UjaranError::input("corpus is empty"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for ujaran operations.
#[derive(Error, Debug)]
pub enum UjaranError {
    /// I/O errors (reading datasets, writing artifacts)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid input data (missing columns, unmapped label, empty corpus)
    #[error("Input error: {0}")]
    Input(String),

    /// Feature count mismatch between a matrix and a fitted model
    #[error("Dimension error: expected {expected} features, got {actual}")]
    Dimension { expected: usize, actual: usize },

    /// Numeric precondition violated at fit time
    #[error("Numeric precondition violated: {0}")]
    NumericPrecondition(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Model artifact is incomplete or inconsistent
    #[error("Artifact error: {0}")]
    Artifact(String),

    /// Training exceeded the caller's wall-clock limit
    #[error("Timeout: {0}")]
    Timeout(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV parsing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Error with added context, printed with its whole cause chain
    #[error("{0:#}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with UjaranError.
pub type Result<T> = std::result::Result<T, UjaranError>;

impl UjaranError {
    /// Create a new input error.
    pub fn input<S: Into<String>>(msg: S) -> Self {
        UjaranError::Input(msg.into())
    }

    /// Create a new dimension error.
    pub fn dimension(expected: usize, actual: usize) -> Self {
        UjaranError::Dimension { expected, actual }
    }

    /// Create a new numeric precondition error.
    pub fn numeric<S: Into<String>>(msg: S) -> Self {
        UjaranError::NumericPrecondition(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        UjaranError::InvalidConfig(msg.into())
    }

    /// Create a new artifact error.
    pub fn artifact<S: Into<String>>(msg: S) -> Self {
        UjaranError::Artifact(msg.into())
    }

    /// Create a new timeout error.
    pub fn timeout<S: Into<String>>(msg: S) -> Self {
        UjaranError::Timeout(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        UjaranError::Other(msg.into())
    }
}
