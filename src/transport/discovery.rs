//! # Printer Discovery
//!
//! Lists the printers the OS knows about right now. Tries the backend's
//! native mechanism, then its query fallback, and settles for an empty list
//! when both fail: no printers is a normal state, not an error.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, instrument, warn};

use super::backend::PrinterBackend;

/// A discovered printer as reported to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrinterDescriptor {
    pub name: String,
    /// Present in the enumeration this descriptor came from
    pub available: bool,
    /// Matches the configured printer
    pub is_selected: bool,
}

/// Enumerates printers through a [`PrinterBackend`].
#[derive(Debug, Clone)]
pub struct PrinterDiscovery {
    backend: Arc<dyn PrinterBackend>,
}

impl PrinterDiscovery {
    pub fn new(backend: Arc<dyn PrinterBackend>) -> Self {
        Self { backend }
    }

    /// Platform identifier of the underlying backend.
    pub fn platform(&self) -> &'static str {
        self.backend.platform()
    }

    /// Printer names in enumeration order. Never fails.
    #[instrument(skip(self), fields(platform = self.backend.platform()))]
    pub async fn list(&self) -> Vec<String> {
        match self.backend.native_printers().await {
            Ok(printers) => {
                debug!(count = printers.len(), "Native printer listing");
                return printers;
            }
            Err(e) => debug!(error = %e, "Native printer listing unavailable, querying"),
        }

        match self.backend.query_printers().await {
            Ok(printers) => {
                debug!(count = printers.len(), "Queried printer listing");
                printers
            }
            Err(e) => {
                warn!(error = %e, "Could not list printers");
                Vec::new()
            }
        }
    }

    /// Current printers with availability and selection flags.
    pub async fn describe(&self, configured: Option<&str>) -> Vec<PrinterDescriptor> {
        self.list()
            .await
            .into_iter()
            .map(|name| PrinterDescriptor {
                is_selected: configured == Some(name.as_str()),
                available: true,
                name,
            })
            .collect()
    }
}
