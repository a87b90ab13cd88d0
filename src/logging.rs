//! # Logging
//!
//! `tracing` subscriber setup for the binary. Console output always; a
//! daily-rolling `struk.log.<date>` file as well when a log directory is
//! given. The filter comes from `RUST_LOG`, defaulting to `info`.
//!
//! Print jobs are recorded under the `struk::activity` target, so
//! `RUST_LOG=struk::activity=info` narrows output to the job history.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::StrukError;

pub const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber.
///
/// Keep the returned guard alive for the life of the process; dropping it
/// flushes and stops the file writer.
pub fn init(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>, StrukError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let console_layer = fmt::layer().with_target(true);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::daily(dir, "struk.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| StrukError::Logging(e.to_string()))?;

    Ok(guard)
}
