//! Scan orchestrator
//!
//! Enumerates a directory, hands each entry to a worker thread once the
//! capacity gate grants a slot, and joins every worker before reading the
//! counters. The sequential mode runs the same inspection inline.

use super::counters::ScanCounters;
use super::directory::{entries, validate_directory};
use super::gate::CapacityGate;
use super::types::{ScanMode, ScanReport};
use super::worker::{FileInspector, Inspect, run_worker};
use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;

/// Default size of the worker pool
pub const DEFAULT_MAX_WORKERS: usize = 4;

/// Configuration for the scanner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    pub mode: ScanMode,
    /// Maximum number of worker threads (0 = derive from CPU cores)
    pub max_workers: usize,
    /// Percentage of CPU cores to use when `max_workers` is 0 (1-100)
    pub thread_percentage: u8,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            mode: ScanMode::Parallel,
            max_workers: DEFAULT_MAX_WORKERS,
            thread_percentage: 100,
        }
    }
}

impl ScannerConfig {
    /// Resolve the worker pool size, falling back to the CPU count when unset
    pub fn worker_count(&self) -> Result<usize> {
        if !(1..=100).contains(&self.thread_percentage) {
            anyhow::bail!(
                "scanner.thread_percentage must be between 1 and 100, got {}",
                self.thread_percentage
            );
        }

        if self.max_workers > 0 {
            return Ok(self.max_workers);
        }

        let cpu_cores = num_cpus::get();
        Ok(std::cmp::max(
            1,
            (cpu_cores * self.thread_percentage as usize) / 100,
        ))
    }
}

/// Main scanner: orchestrates enumeration, dispatch and aggregation
pub struct Scanner<I = FileInspector> {
    config: ScannerConfig,
    workers: usize,
    inspector: I,
}

impl Scanner<FileInspector> {
    pub fn new(config: ScannerConfig) -> Result<Self> {
        Self::with_inspector(config, FileInspector::new()?)
    }
}

impl<I: Inspect> Scanner<I> {
    /// Create a scanner that classifies entries with a custom inspector
    pub fn with_inspector(config: ScannerConfig, inspector: I) -> Result<Self> {
        let workers = config.worker_count()?;
        Ok(Self {
            config,
            workers,
            inspector,
        })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Scan the immediate entries of `path`
    pub fn scan(&self, path: &Path) -> Result<ScanReport> {
        validate_directory(path)?;

        tracing::info!(
            "Scanning {} ({:?}, {} workers)",
            path.display(),
            self.config.mode,
            self.workers
        );

        let counters = ScanCounters::new();
        let start = Instant::now();

        let peak_workers = match self.config.mode {
            ScanMode::Sequential => self.scan_sequential(path, &counters)?,
            ScanMode::Parallel => self.scan_parallel(path, &counters)?,
        };

        let elapsed = start.elapsed();
        let snapshot = counters.snapshot();

        tracing::info!(
            "Scan finished in {:.3}s: {} searched, {} detections, {} errors",
            elapsed.as_secs_f64(),
            snapshot.searched,
            snapshot.detections(),
            snapshot.errors
        );

        Ok(ScanReport {
            counters: snapshot,
            elapsed,
            mode: self.config.mode,
            workers: self.workers,
            peak_workers,
        })
    }

    fn scan_sequential(&self, path: &Path, counters: &ScanCounters) -> Result<usize> {
        for entry in entries(path) {
            let entry = entry?;
            counters.increment_searched();
            counters.record(self.inspector.inspect(&entry));
        }

        Ok(usize::from(counters.snapshot().searched > 0))
    }

    fn scan_parallel(&self, path: &Path, counters: &ScanCounters) -> Result<usize> {
        let gate = CapacityGate::new(self.workers);
        let inspector = &self.inspector;

        // Leaving the scope joins every spawned worker.
        crossbeam::thread::scope(|s| -> Result<()> {
            for (index, entry) in entries(path).enumerate() {
                let entry = entry?;
                counters.increment_searched();

                let permit = gate.acquire();
                s.builder()
                    .name(format!("sigscan-worker-{index}"))
                    .spawn(move |_| run_worker(entry, inspector, counters, permit))
                    .context("Failed to spawn worker thread")?;
            }
            Ok(())
        })
        .map_err(|_| anyhow!("Worker thread panicked during scan"))??;

        debug_assert_eq!(gate.available(), gate.capacity());
        Ok(gate.peak_in_use())
    }
}
