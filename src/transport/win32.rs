//! # Windows Spooler Backend
//!
//! ## Enumeration
//!
//! 1. `EnumPrintersW` over local printers and connections (Win32 API).
//! 2. If that fails, `wmic printer get name`, whose first line is the
//!    `Name` column header:
//!
//! ```text
//! Name
//! POS-80
//! Microsoft Print to PDF
//! ```
//!
//! ## Submission
//!
//! `cmd /C type "<file>" | print /D:"<printer>"` pipes the staged bytes to the
//! printer verbatim.

use std::path::Path;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::instrument;

use super::backend::{LISTING_TIMEOUT, PrinterBackend, run, run_within};
use crate::error::BackendError;

/// Win32 spooler backend.
#[derive(Debug, Clone, Default)]
pub struct Win32Backend;

impl Win32Backend {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PrinterBackend for Win32Backend {
    fn platform(&self) -> &'static str {
        "windows"
    }

    async fn native_printers(&self) -> Result<Vec<String>, BackendError> {
        tokio::task::spawn_blocking(enum_printers)
            .await
            .map_err(|e| BackendError::Native(format!("Task join failed: {}", e)))?
    }

    async fn query_printers(&self) -> Result<Vec<String>, BackendError> {
        let output = run_within(
            Command::new("wmic").args(["printer", "get", "name"]),
            LISTING_TIMEOUT,
        )
        .await?;
        Ok(parse_wmic_names(&output))
    }

    #[instrument(skip(self, file), fields(file = %file.display()))]
    async fn submit_raw(&self, file: &Path, printer: &str) -> Result<(), BackendError> {
        let mut command = print_command(file, printer);
        run(&mut command).await?;
        Ok(())
    }
}

/// The shell pipeline handing `file` to `printer`.
pub fn print_script(file: &Path, printer: &str) -> String {
    format!("type \"{}\" | print /D:\"{}\"", file.display(), printer)
}

#[cfg(windows)]
fn print_command(file: &Path, printer: &str) -> Command {
    let mut command = Command::new("cmd");
    // cmd.exe parses its own command line; pass the pipeline unescaped.
    command.arg("/C").raw_arg(print_script(file, printer));
    command
}

#[cfg(not(windows))]
fn print_command(file: &Path, printer: &str) -> Command {
    let mut command = Command::new("cmd");
    command.arg("/C").arg(print_script(file, printer));
    command
}

/// Printer names from `wmic printer get name` output, header row skipped.
pub fn parse_wmic_names(output: &str) -> Vec<String> {
    output
        .lines()
        .skip(1)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// List local and connected printers via `EnumPrintersW`.
#[cfg(windows)]
fn enum_printers() -> Result<Vec<String>, BackendError> {
    use windows::Win32::Graphics::Printing::{
        EnumPrintersW, PRINTER_ENUM_CONNECTIONS, PRINTER_ENUM_LOCAL, PRINTER_INFO_5W,
    };
    use windows::core::PWSTR;

    unsafe {
        let flags = PRINTER_ENUM_LOCAL | PRINTER_ENUM_CONNECTIONS;
        let mut needed: u32 = 0;
        let mut returned: u32 = 0;

        let _ = EnumPrintersW(flags, None, 5, None, &mut needed, &mut returned);

        if needed == 0 {
            return Ok(Vec::new());
        }

        let mut buf: Vec<u8> = vec![0; needed as usize];
        EnumPrintersW(
            flags,
            None,
            5,
            Some(buf.as_mut_slice()),
            &mut needed,
            &mut returned,
        )
        .map_err(|e| BackendError::Native(format!("EnumPrintersW failed: {}", e)))?;

        let ptr = buf.as_ptr() as *const PRINTER_INFO_5W;
        let entries = std::slice::from_raw_parts(ptr, returned as usize);

        Ok(entries
            .iter()
            .filter(|info| !info.pPrinterName.is_null())
            .filter_map(|info| PWSTR(info.pPrinterName.0).to_string().ok())
            .collect())
    }
}

#[cfg(not(windows))]
fn enum_printers() -> Result<Vec<String>, BackendError> {
    Err(BackendError::Unsupported("EnumPrintersW"))
}
