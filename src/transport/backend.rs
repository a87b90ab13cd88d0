//! # Printer Backends
//!
//! One implementation per OS family behind [`PrinterBackend`], chosen once at
//! startup by [`system_backend`]. Tests substitute their own backend.
//!
//! | Backend | Native listing | Fallback listing | Raw submission |
//! |---------|----------------|------------------|----------------|
//! | [`CupsBackend`] | `lpstat -e` | `lpstat -p` | `lpr -P <p> -o raw <file>` |
//! | [`Win32Backend`] | `EnumPrintersW` | `wmic printer get name` | `type <file> \| print /D:<p>` |

use std::fmt;
use std::path::Path;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::BackendError;

pub use super::cups::CupsBackend;
pub use super::win32::Win32Backend;

/// Upper bound for listing commands. Submission is bounded by the dispatcher.
pub const LISTING_TIMEOUT: Duration = Duration::from_secs(10);

/// OS-specific printer enumeration and raw submission.
#[async_trait]
pub trait PrinterBackend: fmt::Debug + Send + Sync {
    /// Platform identifier reported to clients (e.g. "linux", "windows")
    fn platform(&self) -> &'static str;

    /// Preferred enumeration mechanism.
    async fn native_printers(&self) -> Result<Vec<String>, BackendError>;

    /// Enumeration used when the native mechanism is unavailable or fails.
    async fn query_printers(&self) -> Result<Vec<String>, BackendError>;

    /// Submit the staged file verbatim to `printer`.
    async fn submit_raw(&self, file: &Path, printer: &str) -> Result<(), BackendError>;
}

/// The backend for the OS this binary runs on.
#[cfg(windows)]
pub fn system_backend() -> Arc<dyn PrinterBackend> {
    Arc::new(Win32Backend::new())
}

/// The backend for the OS this binary runs on.
#[cfg(not(windows))]
pub fn system_backend() -> Arc<dyn PrinterBackend> {
    Arc::new(CupsBackend::new())
}

// ============================================================================
// COMMAND EXECUTION
// ============================================================================

/// Run a command to completion, returning stdout.
///
/// A non-zero exit becomes [`BackendError::Failed`] carrying stderr (or the
/// exit status when stderr is empty). The child is killed if this future is
/// dropped, which is how callers' timeouts stop a hung spooler command.
pub(crate) async fn run(command: &mut Command) -> Result<String, BackendError> {
    let program = command
        .as_std()
        .get_program()
        .to_string_lossy()
        .into_owned();

    let output = command
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|source| BackendError::Spawn {
            program: program.clone(),
            source,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let message = if stderr.is_empty() {
            format!("exited with {}", output.status)
        } else {
            stderr
        };
        return Err(BackendError::Failed { program, message });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// [`run`] bounded by `limit`.
pub(crate) async fn run_within(
    command: &mut Command,
    limit: Duration,
) -> Result<String, BackendError> {
    let program = command
        .as_std()
        .get_program()
        .to_string_lossy()
        .into_owned();

    tokio::time::timeout(limit, run(command))
        .await
        .map_err(|_| BackendError::Timeout {
            program,
            after: limit,
        })?
}

/// Non-empty trimmed lines of command output.
pub(crate) fn non_empty_lines(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
