//! Print job history, recorded as structured `tracing` events.

use tracing::info;

/// Target for activity events; filter on it to get the job history alone.
pub const TARGET: &str = "struk::activity";

/// Record a job that the spooler accepted.
pub fn print_job(printer: &str, items: usize, total: f64) {
    info!(target: TARGET, printer, items, total, "Print job");
}

/// Record a test page that the spooler accepted.
pub fn test_print(printer: &str) {
    info!(target: TARGET, printer, "Test print");
}
