//! # Struk - Receipt Printing for POS Thermal Printers
//!
//! Struk composes sale receipts into ESC/POS byte streams and delivers them
//! to thermal printers through the operating system's print spooler. It
//! provides:
//!
//! - **Composition**: fixed-width receipt and test-page layout for 80mm and
//!   58mm paper
//! - **Discovery**: printer enumeration via CUPS or the Win32 spooler, with
//!   command-line fallbacks
//! - **Dispatch**: raw submission through a staged temp file, timeout-bounded
//! - **Service**: an HTTP API and persisted store settings
//!
//! ## Quick Start
//!
//! ```no_run
//! use struk::{
//!     receipt::{LineItem, ReceiptComposer, ReceiptData},
//!     transport::{PrintDispatcher, system_backend},
//!     StoreProfile,
//! };
//!
//! # async fn example() -> Result<(), struk::StrukError> {
//! let profile = StoreProfile::default();
//! let data = ReceiptData::from_items([LineItem::new("Kopi", 2.0, 10000.0)]);
//!
//! // Compose the byte stream
//! let receipt = ReceiptComposer::new(&profile).compose(&data);
//! assert_eq!(receipt.total, 20000.0);
//!
//! // Send it to a printer known to the OS
//! let dispatcher = PrintDispatcher::new(system_backend());
//! dispatcher.send(&receipt.bytes, "POS-80").await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`protocol`] | ESC/POS command builders |
//! | [`printer`] | Paper sizes and store profile |
//! | [`receipt`] | Receipt and test-page composers |
//! | [`transport`] | Printer backends, discovery and dispatch |
//! | [`validate`] | Request validation |
//! | [`config`] | Persisted settings |
//! | [`activity`] | Print job history |
//! | [`server`] | HTTP API |
//! | [`logging`] | Subscriber setup |
//! | [`error`] | Error types |

pub mod activity;
pub mod config;
pub mod error;
pub mod logging;
pub mod printer;
pub mod protocol;
pub mod receipt;
pub mod server;
pub mod transport;
pub mod validate;

// Re-exports for convenience
pub use error::StrukError;
pub use printer::{PaperSize, StoreProfile};
pub use receipt::ReceiptComposer;
pub use transport::PrintDispatcher;
