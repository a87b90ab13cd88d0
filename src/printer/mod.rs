//! # Printer Module
//!
//! Paper geometry and the store profile the composers print from.
//!
//! ## Modules
//!
//! - [`layout`]: Paper size, line width and separators
//! - [`profile`]: Store identity printed on every page

pub mod layout;
pub mod profile;

pub use layout::PaperSize;
pub use profile::StoreProfile;
