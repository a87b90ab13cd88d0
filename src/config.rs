//! # Settings Store
//!
//! The selected printer and the store profile, persisted as one pretty JSON
//! object:
//!
//! ```json
//! {
//!   "printer_name": "POS-80",
//!   "store_name": "TOKO ANDA",
//!   "store_address": "Jalan Kenangan No. 123",
//!   "store_phone": "08123456789",
//!   "store_footer": "Terima kasih atas kunjungan Anda!",
//!   "paper_size": "80mm"
//! }
//! ```
//!
//! Fields missing from the file take their defaults. The composers never see
//! this store; callers hand them a [`StoreProfile`] snapshot.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::error::{ConfigError, StrukError};
use crate::printer::{PaperSize, StoreProfile};
use crate::validate::validate_store_settings;

/// Default settings file, relative to the working directory.
pub const DEFAULT_SETTINGS_FILE: &str = "printer-settings.json";

/// Persisted settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub printer_name: Option<String>,
    pub store_name: String,
    pub store_address: String,
    pub store_phone: String,
    pub store_footer: String,
    pub paper_size: PaperSize,
}

impl Default for Settings {
    fn default() -> Self {
        let profile = StoreProfile::default();
        Self {
            printer_name: None,
            store_name: profile.store_name,
            store_address: profile.store_address,
            store_phone: profile.store_phone.unwrap_or_default(),
            store_footer: profile.store_footer,
            paper_size: profile.paper_size,
        }
    }
}

impl Settings {
    /// The profile handed to the composers.
    pub fn store_profile(&self) -> StoreProfile {
        StoreProfile {
            store_name: self.store_name.clone(),
            store_address: self.store_address.clone(),
            store_phone: Some(self.store_phone.clone()).filter(|p| !p.is_empty()),
            store_footer: self.store_footer.clone(),
            paper_size: self.paper_size,
        }
    }

    /// Configured printer, ignoring a blank name.
    pub fn printer(&self) -> Option<&str> {
        self.printer_name.as_deref().filter(|p| !p.trim().is_empty())
    }

    /// Both store name and address are set.
    pub fn store_configured(&self) -> bool {
        !self.store_name.trim().is_empty() && !self.store_address.trim().is_empty()
    }

    fn apply(&mut self, patch: SettingsPatch) {
        if let Some(printer_name) = patch.printer_name {
            self.printer_name = printer_name;
        }
        if let Some(v) = patch.store_name {
            self.store_name = v;
        }
        if let Some(v) = patch.store_address {
            self.store_address = v;
        }
        if let Some(v) = patch.store_phone {
            self.store_phone = v;
        }
        if let Some(v) = patch.store_footer {
            self.store_footer = v;
        }
        if let Some(v) = patch.paper_size {
            self.paper_size = v;
        }
    }
}

/// A partial settings update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsPatch {
    /// `Some(None)` clears the printer selection
    pub printer_name: Option<Option<String>>,
    pub store_name: Option<String>,
    pub store_address: Option<String>,
    pub store_phone: Option<String>,
    pub store_footer: Option<String>,
    pub paper_size: Option<PaperSize>,
}

impl SettingsPatch {
    /// Select a printer.
    pub fn printer(name: impl Into<String>) -> Self {
        Self {
            printer_name: Some(Some(name.into())),
            ..Default::default()
        }
    }

    /// Store fields present in a JSON object, trimmed.
    ///
    /// Wrong-typed fields are ignored; run the validator first.
    pub fn store_fields(value: &Value) -> Self {
        let text = |field: &str| {
            value
                .get(field)
                .and_then(Value::as_str)
                .map(|s| s.trim().to_string())
        };

        Self {
            printer_name: None,
            store_name: text("store_name"),
            store_address: text("store_address"),
            store_phone: text("store_phone"),
            store_footer: text("store_footer"),
            paper_size: value
                .get("paper_size")
                .and_then(Value::as_str)
                .and_then(|p| p.parse().ok()),
        }
    }

    /// Everything a backup object carries, including the printer selection.
    pub fn from_backup(value: &Value) -> Self {
        let printer_name = match value.get("printer_name") {
            None => None,
            Some(Value::String(name)) => Some(Some(name.clone())),
            Some(_) => Some(None),
        };

        Self {
            printer_name,
            ..Self::store_fields(value)
        }
    }
}

/// Settings loaded from, and written back to, one JSON file.
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    settings: Settings,
}

impl SettingsStore {
    /// Load settings from `path`.
    ///
    /// A missing file yields defaults. So does an unreadable or invalid one,
    /// with a warning; the file is left untouched until the next update.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let settings = load(&path);
        Self { path, settings }
    }

    /// In-memory store that writes to `path` on update.
    pub fn with_settings(path: impl Into<PathBuf>, settings: Settings) -> Self {
        Self {
            path: path.into(),
            settings,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Snapshot of the current settings.
    pub fn settings(&self) -> Settings {
        self.settings.clone()
    }

    pub fn store_profile(&self) -> StoreProfile {
        self.settings.store_profile()
    }

    pub fn printer(&self) -> Option<&str> {
        self.settings.printer()
    }

    /// Apply `patch` and persist.
    ///
    /// The in-memory settings only change once the file is written.
    pub async fn update(&mut self, patch: SettingsPatch) -> Result<Settings, ConfigError> {
        let mut next = self.settings.clone();
        next.apply(patch);
        save(&self.path, &next).await?;
        self.settings = next;
        info!(path = %self.path.display(), "Settings saved");
        Ok(self.settings.clone())
    }

    /// Validate a backup object and apply it.
    pub async fn restore(&mut self, backup: &Value) -> Result<Settings, StrukError> {
        validate_store_settings(backup)?;
        let settings = self.update(SettingsPatch::from_backup(backup)).await?;
        info!("Settings restored from backup");
        Ok(settings)
    }
}

fn load(path: &Path) -> Settings {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!(path = %path.display(), "Settings file not found, using defaults");
            return Settings::default();
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Could not read settings, using defaults");
            return Settings::default();
        }
    };

    match serde_json::from_str(&content) {
        Ok(settings) => {
            info!(path = %path.display(), "Settings loaded");
            settings
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Invalid settings file, using defaults");
            Settings::default()
        }
    }
}

async fn save(path: &Path, settings: &Settings) -> Result<(), ConfigError> {
    let content = serde_json::to_string_pretty(settings)?;
    tokio::fs::write(path, content)
        .await
        .map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
}
