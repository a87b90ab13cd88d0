//! Diagnostic test page.
//!
//! A fixed page confirming the printer is reachable, showing which store
//! profile, printer and paper the service is configured with.

use chrono::{DateTime, Local};

use super::Page;
use crate::printer::StoreProfile;
use crate::protocol::{commands, text};

/// Renders the test page for one store profile.
#[derive(Debug, Clone)]
pub struct TestPageComposer<'a> {
    profile: &'a StoreProfile,
    now: DateTime<Local>,
}

impl<'a> TestPageComposer<'a> {
    pub fn new(profile: &'a StoreProfile) -> Self {
        Self {
            profile,
            now: Local::now(),
        }
    }

    /// Use a fixed timestamp.
    pub fn at(mut self, now: DateTime<Local>) -> Self {
        self.now = now;
        self
    }

    /// Build the page for `printer_name`.
    pub fn compose(&self, printer_name: &str) -> Vec<u8> {
        let paper = self.profile.paper_size;
        let mut page = Page::new();

        page.command(commands::init());
        page.command(text::align_center());

        page.text(&paper.separator());
        page.line("   TEST PRINT PRINTER POS");
        page.text(&paper.separator());
        page.line("");

        page.command(text::align_left());
        page.line(&format!("Toko: {}", self.profile.store_name));
        page.line(&format!("Alamat: {}", self.profile.store_address));
        page.line(&format!("Printer: {}", printer_name));
        page.line(&format!("Paper Size: {}", paper));
        page.line(&format!("Platform: {}", std::env::consts::OS));
        page.line(&format!("Waktu: {}", self.now.format("%d/%m/%Y, %H.%M.%S")));
        page.line("");

        page.line("Status:");
        page.line("✓ Koneksi berhasil");
        page.line("✓ Printer siap digunakan");
        page.line("✓ Test print berhasil");
        page.line("");

        page.text(&paper.dash_separator());
        page.command(text::align_center());
        page.line(&self.profile.store_footer);
        page.text("\n\n");

        page.command(commands::cut_full());
        page.into_bytes()
    }
}

/// Compose the test page stamped with the current time.
pub fn compose(profile: &StoreProfile, printer_name: &str) -> Vec<u8> {
    TestPageComposer::new(profile).compose(printer_name)
}
