//! Scan counters shared between the orchestrator and its workers

use super::signature::Category;
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Thread-safe counters for one scan
///
/// Zeroed at scan start, only ever incremented, and read once all workers
/// have been joined.
#[derive(Debug, Default)]
pub struct ScanCounters {
    searched: AtomicUsize,
    errors: AtomicUsize,
    js: AtomicUsize,
    unix: AtomicUsize,
    macos: AtomicUsize,
}

impl ScanCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one enumerated entry. Only the orchestrator calls this.
    pub fn increment_searched(&self) {
        self.searched.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the outcome of one inspected entry.
    pub fn record(&self, category: Category) {
        let counter = match category {
            Category::Error => &self.errors,
            Category::JsSuspicious => &self.js,
            Category::UnixSuspicious => &self.unix,
            Category::MacosSuspicious => &self.macos,
            Category::Clean => return,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            searched: self.searched.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
            js: self.js.load(Ordering::Relaxed),
            unix: self.unix.load(Ordering::Relaxed),
            macos: self.macos.load(Ordering::Relaxed),
        }
    }
}

/// Final, immutable counter values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CounterSnapshot {
    pub searched: usize,
    pub errors: usize,
    pub js: usize,
    pub unix: usize,
    pub macos: usize,
}

impl CounterSnapshot {
    pub fn detections(&self) -> usize {
        self.js + self.unix + self.macos
    }

    /// Entries inspected without error and without a detection
    pub fn clean(&self) -> usize {
        self.searched
            .saturating_sub(self.errors)
            .saturating_sub(self.detections())
    }
}
