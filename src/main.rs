//! # Starline CLI
//!
//! Command-line interface for encoding print jobs.
//!
//! ## Usage
//!
//! ```bash
//! # Encode a JSON job and write printer bytes to a file
//! starline encode receipt.json -o receipt.bin
//!
//! # Pipe straight to a printer device
//! starline encode receipt.json > /dev/usb/lp0
//!
//! # Override the paper width from a printer preset
//! starline encode receipt.json --printer sm-l200
//!
//! # List code pages and their printer ids
//! starline codepages
//!
//! # List printer presets usable with --printer
//! starline printers
//! ```
//!
//! Logs go to stderr; set `RUST_LOG` or pass `-v` for debug output.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::info;

use starline::PrinterConfig;
use starline::codepage::{Codepage, CodepageMapping};
use starline::json_api::{Job, JobError};

/// Starline - Star Line mode print job encoder
#[derive(Parser, Debug)]
#[command(name = "starline")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode a JSON print job
    Encode {
        /// Job file
        job: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Paper width in columns, overriding the job
        #[arg(long, conflicts_with = "printer")]
        width: Option<usize>,

        /// Printer preset for the paper width (see `starline printers`)
        #[arg(long, value_parser = PrinterConfig::parse)]
        printer: Option<PrinterConfig>,
    },

    /// List supported code pages with their Star ids
    Codepages,

    /// List printer presets
    Printers,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "starline=debug" } else { "starline=warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .init();
}

fn run(command: Commands) -> Result<(), JobError> {
    match command {
        Commands::Encode {
            job,
            output,
            width,
            printer,
        } => {
            let json = fs::read_to_string(&job)?;
            let mut parsed = Job::from_json(&json)?;
            if let Some(columns) = width.or(printer.map(|p| p.columns)) {
                parsed.options.width = Some(columns);
            }

            let base_dir = job.parent().unwrap_or(Path::new("."));
            let bytes = parsed.encode(base_dir)?;
            info!(bytes = bytes.len(), job = %job.display(), "encoded");

            match output {
                Some(path) => fs::write(path, &bytes)?,
                None => {
                    let mut stdout = std::io::stdout().lock();
                    stdout.write_all(&bytes)?;
                    stdout.flush()?;
                }
            }
            Ok(())
        }
        Commands::Codepages => {
            let mapping = CodepageMapping::default();
            println!("{:<10} {}", "codepage", "star id");
            for codepage in Codepage::ALL {
                match mapping.id(codepage) {
                    Some(id) => println!("{:<10} {}", codepage, id),
                    None => println!("{:<10} -", codepage),
                }
            }
            Ok(())
        }
        Commands::Printers => {
            println!(
                "{:<12} {:<20} {:>7} {:>10}",
                "key", "model", "columns", "paper"
            );
            for preset in PrinterConfig::built_in() {
                println!(
                    "{:<12} {:<20} {:>7} {:>4.0}mm@{}dpi",
                    preset.key,
                    preset.name,
                    preset.columns,
                    preset.width_mm(),
                    preset.dpi
                );
            }
            Ok(())
        }
    }
}
