//! # Printer Transport Layer
//!
//! Everything between a composed byte buffer and the OS print spooler.
//!
//! ## Modules
//!
//! - [`backend`]: the per-OS [`PrinterBackend`] capability and command runner
//! - [`cups`]: `lpstat` / `lpr` on Unix-like systems
//! - [`win32`]: `EnumPrintersW` / `wmic` / `print` on Windows
//! - [`discovery`]: printer enumeration with fallback
//! - [`dispatch`]: staging a job and submitting it

pub mod backend;
pub mod cups;
pub mod discovery;
pub mod dispatch;
pub mod win32;

pub use backend::{PrinterBackend, system_backend};
pub use cups::CupsBackend;
pub use discovery::{PrinterDescriptor, PrinterDiscovery};
pub use dispatch::PrintDispatcher;
pub use win32::Win32Backend;
