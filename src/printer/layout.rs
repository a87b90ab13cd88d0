//! # Paper Layout
//!
//! Maps a paper-size selector to a fixed character width and to the
//! separator lines the composers print between sections.
//!
//! ## Supported Paper
//!
//! | Paper | Width (chars) | Font |
//! |-------|---------------|------|
//! | 80mm  | 48            | A    |
//! | 58mm  | 32            | A    |
//!
//! Any other selector falls back to 80mm.
//!
//! ## Usage
//!
//! ```
//! use struk::printer::PaperSize;
//!
//! let paper = PaperSize::from_selector(Some("58mm"));
//! assert_eq!(paper.width(), 32);
//! assert_eq!(paper.separator(), format!("{}\n", "=".repeat(32)));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// # Paper Size
///
/// Thermal paper roll width. Serialized as its selector text (`"80mm"`,
/// `"58mm"`); deserializing an unknown selector yields [`PaperSize::Mm80`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaperSize {
    /// 80mm roll, 48 characters per line
    #[default]
    Mm80,
    /// 58mm roll, 32 characters per line
    Mm58,
}

impl PaperSize {
    /// All selectors accepted by [`FromStr`].
    pub const SELECTORS: [&'static str; 2] = ["80mm", "58mm"];

    /// Resolve a possibly-missing selector, defaulting to 80mm.
    pub fn from_selector(selector: Option<&str>) -> Self {
        match selector {
            Some("58mm") => Self::Mm58,
            _ => Self::Mm80,
        }
    }

    /// Printable characters per line.
    #[inline]
    pub const fn width(self) -> usize {
        match self {
            Self::Mm80 => 48,
            Self::Mm58 => 32,
        }
    }

    /// Selector text.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mm80 => "80mm",
            Self::Mm58 => "58mm",
        }
    }

    /// Full-width `=` line, newline terminated.
    pub fn separator(self) -> String {
        format!("{}\n", "=".repeat(self.width()))
    }

    /// Indented `-` line, newline terminated.
    ///
    /// Two leading spaces followed by `width - 2` dashes, so it spans the
    /// full line.
    pub fn dash_separator(self) -> String {
        format!("  {}\n", "-".repeat(self.width() - 2))
    }
}

impl fmt::Display for PaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaperSize {
    type Err = String;

    /// Strict parse, used where an unknown selector must be rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "80mm" => Ok(Self::Mm80),
            "58mm" => Ok(Self::Mm58),
            other => Err(format!(
                "Unknown paper size '{}'. Use 80mm or 58mm",
                other
            )),
        }
    }
}

impl From<String> for PaperSize {
    fn from(selector: String) -> Self {
        Self::from_selector(Some(&selector))
    }
}

impl From<PaperSize> for String {
    fn from(paper: PaperSize) -> Self {
        paper.as_str().to_string()
    }
}

// ============================================================================
// TESTS
// ============================================================================
