//! # sigscan - bounded-concurrency signature scanner
//!
//! sigscan inspects the immediate files of one directory for three hardcoded
//! suspicious signatures and tallies the matches by category:
//!
//! - **JS**: a fake `<script>` tag, only checked in `.js` files
//! - **Unix**: a destructive `rm -rf` command
//! - **macOS**: a `launchctl load` of a malicious launch agent
//!
//! Files are inspected on a fixed-size pool of worker threads. A capacity
//! gate blocks enumeration whenever every worker slot is busy, and all
//! workers are joined before the counters are read. A sequential mode runs
//! the same inspection on the calling thread.
//!
//! This is a best-effort scanner, not a security boundary.
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use sigscan::scanner::{Scanner, ScannerConfig};
//! use std::path::Path;
//!
//! let scanner = Scanner::new(ScannerConfig::default())?;
//! let report = scanner.scan(Path::new("downloads/"))?;
//!
//! println!(
//!     "{} files, {} detections, {} errors",
//!     report.counters.searched,
//!     report.counters.detections(),
//!     report.counters.errors
//! );
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod scanner;

pub use cli::{Cli, Output};
pub use config::SigscanConfig;

/// Result type alias for sigscan operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
