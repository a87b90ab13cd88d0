//! # CUPS Spooler Backend
//!
//! Printer access on Linux, macOS and other Unix-like systems through the
//! CUPS command-line tools.
//!
//! ## Enumeration
//!
//! 1. `lpstat -e` lists destination names, one per line.
//! 2. If that fails, `lpstat -p` is parsed instead:
//!
//! ```text
//! printer POS-80 is idle.  enabled since Sat 18 Oct 2026 09:12:03
//! printer Office_Laser disabled since Fri 17 Oct 2026 - reason unknown
//! ```
//!
//! ## Submission
//!
//! `lpr -P <printer> -o raw <file>` queues the file with the raw option so the
//! ESC/POS bytes reach the printer without filtering.

use std::path::Path;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::instrument;

use super::backend::{LISTING_TIMEOUT, PrinterBackend, non_empty_lines, run, run_within};
use crate::error::BackendError;

/// CUPS `lpstat` / `lpr` backend.
#[derive(Debug, Clone, Default)]
pub struct CupsBackend;

impl CupsBackend {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PrinterBackend for CupsBackend {
    fn platform(&self) -> &'static str {
        std::env::consts::OS
    }

    async fn native_printers(&self) -> Result<Vec<String>, BackendError> {
        let output = run_within(Command::new("lpstat").arg("-e"), LISTING_TIMEOUT).await?;
        Ok(non_empty_lines(&output))
    }

    async fn query_printers(&self) -> Result<Vec<String>, BackendError> {
        let output = run_within(Command::new("lpstat").arg("-p"), LISTING_TIMEOUT).await?;
        Ok(parse_lpstat_printers(&output))
    }

    #[instrument(skip(self, file), fields(file = %file.display()))]
    async fn submit_raw(&self, file: &Path, printer: &str) -> Result<(), BackendError> {
        run(Command::new("lpr")
            .arg("-P")
            .arg(printer)
            .arg("-o")
            .arg("raw")
            .arg(file))
        .await?;
        Ok(())
    }
}

/// Printer names from `lpstat -p` output.
///
/// Takes the second token of every line whose first token is `printer`.
pub fn parse_lpstat_printers(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| {
            let mut tokens = line.split_whitespace();
            match (tokens.next(), tokens.next()) {
                (Some("printer"), Some(name)) => Some(name.to_string()),
                _ => None,
            }
        })
        .collect()
}
