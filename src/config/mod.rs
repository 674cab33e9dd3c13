//! Configuration management for sigscan
//!
//! Settings are layered with figment: embedded defaults, an optional
//! `sigscan.toml`/`sigscan.json`, `SIGSCAN_` environment variables and
//! finally command-line flags.

pub mod core;
pub mod overrides;
pub mod smart_load;

use serde::{Deserialize, Serialize};

pub use self::core::SigscanConfig;

/// Report output format
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON format
    Json,
}

/// Output-related configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}
