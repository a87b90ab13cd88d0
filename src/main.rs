//! # Struk CLI
//!
//! Command-line interface for receipt printing.
//!
//! ## Usage
//!
//! ```bash
//! # Run the HTTP API
//! struk serve --listen 127.0.0.1:3000
//!
//! # List printers the OS knows about
//! struk printers
//!
//! # Print a receipt from a JSON file (or - for stdin)
//! struk print sale.json --printer POS-80
//!
//! # Print the diagnostic page
//! struk test-print
//!
//! # Write the ESC/POS bytes to a file instead of printing
//! struk compose sale.json --output sale.bin --paper 58mm
//! ```

use clap::{Parser, Subcommand};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use struk::{
    PaperSize, StrukError, activity,
    config::{DEFAULT_SETTINGS_FILE, SettingsStore},
    logging,
    receipt::{ReceiptComposer, ReceiptData, TestPageComposer},
    server::{self, DEFAULT_LISTEN_ADDR, ServerConfig},
    transport::{PrintDispatcher, system_backend},
    validate::validate_receipt,
};

/// Struk - POS receipt printing via the OS print spooler
#[derive(Parser, Debug)]
#[command(name = "struk")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Settings file (printer selection and store profile)
    #[arg(long, global = true, env = "STRUK_SETTINGS", default_value = DEFAULT_SETTINGS_FILE)]
    settings: PathBuf,

    /// Also write logs to a daily-rolling file in this directory
    #[arg(long, global = true, env = "STRUK_LOG_DIR", value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// Seconds to wait for the print command before giving up
    #[arg(long, global = true, default_value = "30")]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP print service
    Serve {
        /// Address to listen on
        #[arg(long, default_value = DEFAULT_LISTEN_ADDR)]
        listen: String,
    },

    /// List printers and mark the configured one
    Printers,

    /// Compose a receipt from JSON and print it
    Print {
        /// Receipt JSON file, or - for stdin
        input: PathBuf,

        /// Printer name (defaults to the configured printer)
        #[arg(long)]
        printer: Option<String>,
    },

    /// Print the diagnostic test page
    TestPrint {
        /// Printer name (defaults to the configured printer)
        #[arg(long)]
        printer: Option<String>,
    },

    /// Compose a receipt from JSON without printing
    Compose {
        /// Receipt JSON file, or - for stdin
        input: PathBuf,

        /// Output file for the ESC/POS bytes (stdout if omitted)
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Override the configured paper size (80mm or 58mm)
        #[arg(long)]
        paper: Option<PaperSize>,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StrukError> {
    let cli = Cli::parse();
    let _log_guard = logging::init(cli.log_dir.as_deref())?;
    let timeout = Duration::from_secs(cli.timeout_secs);

    match cli.command {
        Commands::Serve { listen } => {
            server::serve(ServerConfig {
                listen_addr: listen,
                settings_path: cli.settings,
                timeout,
            })
            .await?;
        }

        Commands::Printers => {
            let store = SettingsStore::open(&cli.settings);
            let dispatcher = PrintDispatcher::new(system_backend());
            let discovery = dispatcher.discovery();
            let printers = discovery.describe(store.printer()).await;

            println!("Printers on {}:", discovery.platform());
            if printers.is_empty() {
                println!("  (none)");
            }
            for p in &printers {
                let marker = if p.is_selected { "*" } else { " " };
                println!("{} {}", marker, p.name);
            }
            if let Some(name) = store.printer()
                && !printers.iter().any(|p| p.is_selected)
            {
                println!("\nConfigured printer \"{}\" was not found", name);
            }
        }

        Commands::Print { input, printer } => {
            let store = SettingsStore::open(&cli.settings);
            let printer = resolve_printer(printer, &store)?;
            let data = read_receipt(&input)?;

            let receipt = ReceiptComposer::new(&store.store_profile()).compose(&data);
            if receipt.skipped_items > 0 {
                println!("Skipped {} malformed item(s)", receipt.skipped_items);
            }

            let dispatcher = PrintDispatcher::new(system_backend()).with_timeout(timeout);
            let message = dispatcher.send(&receipt.bytes, &printer).await?;
            activity::print_job(&printer, receipt.printed_items, receipt.total);
            println!("{}", message);
        }

        Commands::TestPrint { printer } => {
            let store = SettingsStore::open(&cli.settings);
            let printer = resolve_printer(printer, &store)?;

            let page = TestPageComposer::new(&store.store_profile()).compose(&printer);

            let dispatcher = PrintDispatcher::new(system_backend()).with_timeout(timeout);
            let message = dispatcher.send(&page, &printer).await?;
            activity::test_print(&printer);
            println!("{}", message);
        }

        Commands::Compose {
            input,
            output,
            paper,
        } => {
            let store = SettingsStore::open(&cli.settings);
            let mut profile = store.store_profile();
            if let Some(paper) = paper {
                profile.paper_size = paper;
            }

            let data = read_receipt(&input)?;
            let receipt = ReceiptComposer::new(&profile).compose(&data);

            match output {
                Some(path) => {
                    std::fs::write(&path, &receipt.bytes)?;
                    eprintln!(
                        "Wrote {} bytes to {} (total {})",
                        receipt.bytes.len(),
                        path.display(),
                        receipt.total
                    );
                }
                None => std::io::stdout().write_all(&receipt.bytes)?,
            }
        }
    }

    Ok(())
}

/// The explicit printer, else the configured one.
fn resolve_printer(explicit: Option<String>, store: &SettingsStore) -> Result<String, StrukError> {
    explicit
        .filter(|p| !p.trim().is_empty())
        .or_else(|| store.printer().map(str::to_string))
        .ok_or(StrukError::PrinterNotConfigured)
}

/// Read and validate receipt JSON from a file or stdin.
fn read_receipt(input: &Path) -> Result<ReceiptData, StrukError> {
    let text = if input == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        text
    } else {
        std::fs::read_to_string(input)?
    };

    let value: serde_json::Value = serde_json::from_str(&text)?;
    validate_receipt(&value)?;
    Ok(serde_json::from_value(value)?)
}
