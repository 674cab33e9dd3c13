use super::counters::CounterSnapshot;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// One item yielded by directory enumeration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    path: PathBuf,
}

impl DirectoryEntry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Final extension without the leading dot, if it is valid UTF-8
    pub fn extension(&self) -> Option<&str> {
        self.path.extension().and_then(|ext| ext.to_str())
    }
}

/// Scanning mode for determining parallelization strategy
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// Inspect entries one after another on the calling thread
    Sequential,
    /// Inspect entries on gate-bounded worker threads
    #[default]
    Parallel,
}

/// Wall-clock time split into the components shown in the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ElapsedParts {
    pub secs: u64,
    pub millis: u32,
    pub micros: u32,
}

impl From<Duration> for ElapsedParts {
    fn from(duration: Duration) -> Self {
        let sub_micros = duration.subsec_micros();
        Self {
            secs: duration.as_secs(),
            millis: sub_micros / 1000,
            micros: sub_micros % 1000,
        }
    }
}

/// Result of a directory scan
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub counters: CounterSnapshot,
    pub elapsed: Duration,
    pub mode: ScanMode,
    /// Configured size of the worker pool
    pub workers: usize,
    /// Most workers that held a slot at the same time
    pub peak_workers: usize,
}

impl ScanReport {
    pub fn elapsed_parts(&self) -> ElapsedParts {
        self.elapsed.into()
    }
}
