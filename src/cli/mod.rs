//! Command-line interface for sigscan
//!
//! One positional argument, the directory to scan, plus flags that override
//! the layered configuration.

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;

mod output;

pub use output::Output;

use crate::config::{OutputFormat, SigscanConfig};
use crate::scanner::{ScanMode, Scanner};

/// Scan a directory's files for suspicious signatures
#[derive(Parser, Debug)]
#[command(name = "sigscan", version, about, long_about = None)]
pub struct Cli {
    /// Directory whose immediate files are scanned
    #[arg(value_name = "DIRECTORY")]
    pub directory: PathBuf,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Use custom configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<String>,

    /// Processing mode
    #[arg(long, value_enum)]
    pub mode: Option<ScanMode>,

    /// Size of the worker pool (0 = one per CPU core)
    #[arg(short = 'j', long, value_name = "N", env = "SIGSCAN_WORKERS")]
    pub workers: Option<usize>,

    /// Report format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// CLI flags in config shape; unset flags serialize as null and are dropped
#[derive(Serialize)]
struct CliOverrides {
    scanner: ScannerOverrides,
    output: OutputOverrides,
}

#[derive(Serialize)]
struct ScannerOverrides {
    mode: Option<ScanMode>,
    max_workers: Option<usize>,
}

#[derive(Serialize)]
struct OutputOverrides {
    format: Option<OutputFormat>,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            scanner: ScannerOverrides {
                mode: self.mode,
                max_workers: self.workers,
            },
            output: OutputOverrides {
                format: self.format,
            },
        }
    }

    /// Execute the scan and print the report
    pub fn run(self) -> Result<()> {
        setup_logging(self.verbose, self.quiet);

        let config = SigscanConfig::load(self.config.as_deref(), Some(self.overrides()))?;
        let scanner_config = config.scanner()?;
        let output_config = config.output()?;

        let scanner = Scanner::new(scanner_config)?;
        let report = scanner.scan(&self.directory)?;

        Output::new(output_config.format).report(&report)
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info"),
            2 => tracing_subscriber::EnvFilter::new("debug"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    // Logs go to stderr so the report on stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "sigscan", "-vv", "--mode", "sequential", "-j", "8", "--format", "json", "/tmp",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.mode, Some(ScanMode::Sequential));
        assert_eq!(cli.workers, Some(8));
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert_eq!(cli.directory, PathBuf::from("/tmp"));
    }

    #[test]
    fn test_directory_is_required() {
        assert!(Cli::try_parse_from(["sigscan"]).is_err());
        assert!(Cli::try_parse_from(["sigscan", "a", "b"]).is_err());
    }

    #[test]
    fn test_unset_flags_produce_no_overrides() {
        let cli = Cli::try_parse_from(["sigscan", "/tmp"]).unwrap();
        let value = crate::config::overrides::strip_nulls(cli.overrides()).unwrap();
        assert_eq!(value, serde_json::json!({}));
    }
}
