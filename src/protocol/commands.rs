//! # ESC/POS Control Commands
//!
//! Printer-level control sequences used by every composed page: initialize
//! and full cut. Text alignment lives in [`super::text`].
//!
//! ## Escape Sequence Structure
//!
//! Commands are short byte sequences starting with a prefix byte:
//! - `ESC` (0x1B) for printer state (`ESC @`, `ESC a n`)
//! - `GS` (0x1D) for mechanism control (`GS V m`)
//!
//! Everything that is not a command is UTF-8 text terminated by `LF`.

// ============================================================================
// ESCAPE SEQUENCE CONSTANTS
// ============================================================================

/// ESC (Escape) - Command prefix byte
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Mechanism command prefix
///
/// Used for paper cutting and other hardware actions.
/// - Hex: 0x1D, Decimal: 29
pub const GS: u8 = 0x1D;

/// LF (Line Feed) - Print the line buffer and advance one line
pub const LF: u8 = 0x0A;

// ============================================================================
// INITIALIZATION COMMANDS
// ============================================================================

/// # Initialize Printer (ESC @)
///
/// Clears the print buffer and resets the printer to its power-on state.
/// Every composed page starts with it.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC @ |
/// | Hex     | 1B 40 |
/// | Decimal | 27 64 |
///
/// ## Example
///
/// ```
/// use struk::protocol::commands;
///
/// assert_eq!(commands::init(), vec![0x1B, 0x40]);
/// ```
#[inline]
pub fn init() -> Vec<u8> {
    vec![ESC, b'@']
}

// ============================================================================
// CUTTER CONTROL COMMANDS
// ============================================================================

/// # Full Cut (GS V 0)
///
/// Cuts the paper completely at the current position. Composers feed a couple
/// of blank lines first so the last printed line clears the blade.
///
/// ## Protocol Details
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | ASCII   | GS V 0   |
/// | Hex     | 1D 56 00 |
/// | Decimal | 29 86 0  |
///
/// ## Example
///
/// ```
/// use struk::protocol::commands;
///
/// assert_eq!(commands::cut_full(), vec![0x1D, 0x56, 0x00]);
/// ```
#[inline]
pub fn cut_full() -> Vec<u8> {
    vec![GS, b'V', 0]
}

/// The bytes every composed page ends with.
pub const CUT_SEQUENCE: [u8; 3] = [GS, b'V', 0];

// ============================================================================
// TESTS
// ============================================================================
