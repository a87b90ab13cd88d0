//! Server state and configuration.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::config::{DEFAULT_SETTINGS_FILE, SettingsStore};
use crate::transport::dispatch::DEFAULT_TIMEOUT;
use crate::transport::{PrintDispatcher, PrinterBackend, PrinterDiscovery, system_backend};

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "127.0.0.1:3000")
    pub listen_addr: String,
    /// Settings file (e.g., "printer-settings.json")
    pub settings_path: PathBuf,
    /// Bound on each raw-print command
    pub timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            settings_path: PathBuf::from(DEFAULT_SETTINGS_FILE),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Application state shared across handlers.
#[derive(Debug)]
pub struct AppState {
    pub config: ServerConfig,
    pub settings: RwLock<SettingsStore>,
    pub dispatcher: PrintDispatcher,
}

impl AppState {
    /// State using the backend for the running OS.
    pub fn new(config: ServerConfig) -> Self {
        let settings = SettingsStore::open(&config.settings_path);
        Self::with_parts(config, settings, system_backend())
    }

    /// State with an explicit settings store and backend.
    pub fn with_parts(
        config: ServerConfig,
        settings: SettingsStore,
        backend: Arc<dyn PrinterBackend>,
    ) -> Self {
        let dispatcher = PrintDispatcher::new(backend).with_timeout(config.timeout);
        Self {
            config,
            settings: RwLock::new(settings),
            dispatcher,
        }
    }

    pub fn discovery(&self) -> &PrinterDiscovery {
        self.dispatcher.discovery()
    }
}
