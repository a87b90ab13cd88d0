//! # ESC/POS Protocol Implementation
//!
//! Low-level command builders for the subset of ESC/POS that receipt
//! printing needs.
//!
//! ## Module Structure
//!
//! - [`commands`]: Printer commands (init, cut)
//! - [`text`]: Line alignment
//!
//! ## Usage Example
//!
//! ```
//! use struk::protocol::{commands, text};
//!
//! let mut data = Vec::new();
//! data.extend(commands::init());
//! data.extend(text::align_center());
//! data.extend("TOKO ANDA\n".as_bytes());
//! data.extend(text::align_left());
//! data.extend(commands::cut_full());
//!
//! assert!(data.ends_with(&commands::CUT_SEQUENCE));
//! ```

pub mod commands;
pub mod text;
