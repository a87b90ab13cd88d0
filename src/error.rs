//! # Error Types
//!
//! This module defines error types used throughout the struk library.
//!
//! | Type | Raised by | Surfaced as |
//! |------|-----------|-------------|
//! | [`MalformedItem`] | receipt item parsing | logged, item skipped |
//! | [`BackendError`] | OS printer backends | folded into discovery / dispatch |
//! | [`DispatchError`] | [`crate::transport::PrintDispatcher`] | returned to caller |
//! | [`ValidationError`] | [`crate::validate`] | HTTP 400 |
//! | [`ConfigError`] | [`crate::config::SettingsStore`] | returned to caller |

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Main error type for struk operations
#[derive(Debug, Error)]
pub enum StrukError {
    /// Print dispatch failed
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// Input data failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Settings could not be persisted
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No printer selected in the settings and none given explicitly
    #[error("No printer configured. Select one with `struk printers` and `--printer`")]
    PrinterNotConfigured,

    /// JSON input could not be decoded
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP server failure
    #[error("Server error: {0}")]
    Server(String),

    /// The tracing subscriber could not be installed
    #[error("Failed to initialise logging: {0}")]
    Logging(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Why a receipt item was left off the receipt.
///
/// Never fatal: the composer logs it and moves on to the next item.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MalformedItem {
    #[error("item is not an object")]
    NotAnObject,

    #[error("name is missing, empty or not text")]
    InvalidName,

    #[error("qty is missing or not a number")]
    InvalidQuantity,

    #[error("price is missing or not a number")]
    InvalidPrice,

    #[error("qty must be positive, got {0}")]
    NonPositiveQuantity(f64),

    #[error("price must not be negative, got {0}")]
    NegativePrice(f64),
}

/// Failure inside an OS printer backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The command could not be started at all
    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The command ran and reported failure
    #[error("'{program}' failed: {message}")]
    Failed { program: String, message: String },

    /// The command did not finish in time and was killed
    #[error("'{program}' did not finish within {after:?}")]
    Timeout { program: String, after: Duration },

    /// The mechanism does not exist on this platform
    #[error("{0} is not supported on this platform")]
    Unsupported(&'static str),

    /// A native API call failed
    #[error("native printer API error: {0}")]
    Native(String),
}

/// Print dispatch errors.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Discovery found nothing at all
    #[error("No printers available on this system")]
    NoPrintersAvailable,

    /// The target is not among the printers discovered just now
    #[error("Printer \"{printer}\" not found. Available printers: {}", .available.join(", "))]
    PrinterNotFound {
        printer: String,
        available: Vec<String>,
    },

    /// The staged job file could not be written
    #[error("Failed to stage print job: {0}")]
    TempFile(#[source] io::Error),

    /// The raw-print command failed
    #[error("Failed to send print job: {0}")]
    CommandExecution(String),

    /// The raw-print command hung past the dispatcher timeout
    #[error("Print command timed out after {0:?}")]
    Timeout(Duration),
}

impl From<BackendError> for DispatchError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Timeout { after, .. } => Self::Timeout(after),
            other => Self::CommandExecution(other.to_string()),
        }
    }
}

/// Input validation failure, carrying every problem found.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Invalid data: {}", .errors.join("; "))]
pub struct ValidationError {
    pub errors: Vec<String>,
}

/// Settings persistence errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to write settings to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to encode settings: {0}")]
    Encode(#[from] serde_json::Error),
}
