//! # Print Dispatcher
//!
//! Ships one byte buffer to one named printer:
//!
//! 1. Re-run discovery and check the printer is still there.
//! 2. Stage the buffer in a uniquely named temp file.
//! 3. Hand the file to the backend's raw-print command, bounded by a timeout.
//! 4. Delete the staged file, whatever happened.
//!
//! Each call is independent. Concurrent calls only share the OS spooler,
//! which serializes the actual printing.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::backend::PrinterBackend;
use super::discovery::PrinterDiscovery;
use crate::error::DispatchError;

/// Default bound on the raw-print command.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Sends raw buffers to printers through a [`PrinterBackend`].
///
/// ## Example
///
/// ```no_run
/// use struk::transport::{PrintDispatcher, system_backend};
///
/// # async fn example() -> Result<(), struk::error::DispatchError> {
/// let dispatcher = PrintDispatcher::new(system_backend());
/// let message = dispatcher.send(b"\x1b@hello\n\x1dV\x00", "POS-80").await?;
/// println!("{}", message);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PrintDispatcher {
    backend: Arc<dyn PrinterBackend>,
    discovery: PrinterDiscovery,
    timeout: Duration,
    staging_dir: PathBuf,
}

impl PrintDispatcher {
    /// Dispatcher staging jobs in the OS temp directory.
    pub fn new(backend: Arc<dyn PrinterBackend>) -> Self {
        Self {
            discovery: PrinterDiscovery::new(backend.clone()),
            backend,
            timeout: DEFAULT_TIMEOUT,
            staging_dir: std::env::temp_dir(),
        }
    }

    /// Set the raw-print command timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Stage job files in `dir` instead of the OS temp directory.
    pub fn with_staging_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging_dir = dir.into();
        self
    }

    /// The discovery this dispatcher validates against.
    pub fn discovery(&self) -> &PrinterDiscovery {
        &self.discovery
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Send `buffer` to `printer_name`.
    ///
    /// ## Errors
    ///
    /// - [`DispatchError::NoPrintersAvailable`] when discovery finds nothing
    /// - [`DispatchError::PrinterNotFound`] when the printer is not listed now
    /// - [`DispatchError::TempFile`] when the job cannot be staged
    /// - [`DispatchError::CommandExecution`] when the print command fails
    /// - [`DispatchError::Timeout`] when the print command hangs
    #[instrument(skip(self, buffer), fields(bytes = buffer.len()))]
    pub async fn send(&self, buffer: &[u8], printer_name: &str) -> Result<String, DispatchError> {
        let available = self.discovery.list().await;
        if available.is_empty() {
            return Err(DispatchError::NoPrintersAvailable);
        }
        if !available.iter().any(|p| p == printer_name) {
            return Err(DispatchError::PrinterNotFound {
                printer: printer_name.to_string(),
                available,
            });
        }

        let job = StagedJob::create(&self.staging_dir, buffer).await?;

        let outcome = tokio::time::timeout(
            self.timeout,
            self.backend.submit_raw(job.path(), printer_name),
        )
        .await;

        job.remove().await;

        match outcome {
            Ok(Ok(())) => {
                info!("Print job sent");
                Ok(format!("Job cetak berhasil dikirim ke {}", printer_name))
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Print command failed");
                Err(e.into())
            }
            Err(_) => {
                warn!(timeout = ?self.timeout, "Print command timed out");
                Err(DispatchError::Timeout(self.timeout))
            }
        }
    }
}

// ============================================================================
// STAGED JOB FILE
// ============================================================================

/// A print job written to disk for the spooler to pick up.
///
/// Removed explicitly after submission; the `Drop` impl covers a cancelled
/// dispatch future.
#[derive(Debug)]
struct StagedJob {
    path: PathBuf,
    removed: bool,
}

impl StagedJob {
    async fn create(dir: &Path, buffer: &[u8]) -> Result<Self, DispatchError> {
        let path = dir.join(job_file_name());

        if let Err(e) = tokio::fs::write(&path, buffer).await {
            let _ = tokio::fs::remove_file(&path).await;
            return Err(DispatchError::TempFile(e));
        }

        Ok(Self {
            path,
            removed: false,
        })
    }

    fn path(&self) -> &Path {
        &self.path
    }

    async fn remove(mut self) {
        if let Err(e) = tokio::fs::remove_file(&self.path).await {
            warn!(path = %self.path.display(), error = %e, "Could not delete staged print file");
        }
        self.removed = true;
    }
}

impl Drop for StagedJob {
    fn drop(&mut self) {
        if !self.removed {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}

/// `print_<epoch nanos>_<uuid>.bin`
fn job_file_name() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("print_{}_{}.bin", nanos, Uuid::new_v4().simple())
}
