//! Worker task: inspect one entry and record the outcome
//!
//! A worker never returns an error. Failing to open the entry is turned into
//! [`Category::Error`] locally, and the slot it was given is released on
//! every exit path because the permit is dropped when the worker returns
//! or unwinds.

use super::counters::ScanCounters;
use super::gate::SlotPermit;
use super::signature::{Category, SignatureSet};
use super::types::DirectoryEntry;
use anyhow::Result;
use std::fs::File;
use std::io::{BufRead, BufReader};

/// Classifies a single directory entry
pub trait Inspect: Send + Sync {
    fn inspect(&self, entry: &DirectoryEntry) -> Category;
}

/// Default inspector: reads the file line by line and runs the signature matcher
#[derive(Debug, Clone)]
pub struct FileInspector {
    signatures: SignatureSet,
}

impl FileInspector {
    pub fn new() -> Result<Self> {
        Ok(Self {
            signatures: SignatureSet::new()?,
        })
    }
}

impl Inspect for FileInspector {
    fn inspect(&self, entry: &DirectoryEntry) -> Category {
        let file = match File::open(entry.path()) {
            Ok(file) => file,
            Err(e) => {
                tracing::debug!("Failed to open {}: {}", entry.path().display(), e);
                return Category::Error;
            }
        };

        // A read error ends the line stream; the lines seen so far decide.
        let path = entry.path();
        let lines = BufReader::new(file)
            .split(b'\n')
            .map_while(|line| match line {
                Ok(line) => Some(line),
                Err(e) => {
                    tracing::debug!("Stopped reading {}: {}", path.display(), e);
                    None
                }
            });

        self.signatures.classify(lines, entry.extension())
    }
}

/// Inspect `entry`, record its category, then give the slot back.
pub fn run_worker<I>(entry: DirectoryEntry, inspector: &I, counters: &ScanCounters, permit: SlotPermit<'_>)
where
    I: Inspect + ?Sized,
{
    let category = inspector.inspect(&entry);
    tracing::trace!("{} -> {:?}", entry.path().display(), category);
    counters.record(category);
    drop(permit);
}
