//! Report output for the scan command
//!
//! The text layout mirrors the classic scanner banner; JSON output carries
//! the same numbers plus the scan mode and worker counts.

use crate::config::OutputFormat;
use crate::scanner::{ElapsedParts, ScanMode, ScanReport};
use anyhow::Result;
use console::style;
use serde::Serialize;
use std::io::{self, Write};

/// Output handler for scan reports
pub struct Output {
    format: OutputFormat,
}

#[derive(Serialize)]
struct JsonReport {
    searched: usize,
    errors: usize,
    js: usize,
    unix: usize,
    macos: usize,
    clean: usize,
    elapsed: ElapsedParts,
    mode: ScanMode,
    workers: usize,
}

impl From<&ScanReport> for JsonReport {
    fn from(report: &ScanReport) -> Self {
        let c = &report.counters;
        Self {
            searched: c.searched,
            errors: c.errors,
            js: c.js,
            unix: c.unix,
            macos: c.macos,
            clean: c.clean(),
            elapsed: report.elapsed_parts(),
            mode: report.mode,
            workers: report.workers,
        }
    }
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print the report to stdout
    pub fn report(&self, report: &ScanReport) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.write_report(&mut out, report)?;
        out.flush()?;
        Ok(())
    }

    pub fn write_report<W: Write>(&self, out: &mut W, report: &ScanReport) -> Result<()> {
        match self.format {
            OutputFormat::Text => write_text(out, report),
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, &JsonReport::from(report))?;
                writeln!(out)?;
                Ok(())
            }
        }
    }
}

fn write_text<W: Write>(out: &mut W, report: &ScanReport) -> Result<()> {
    let c = &report.counters;
    let time = report.elapsed_parts();

    writeln!(out, "{}", style("====== Scan result ===========").bold())?;
    writeln!(out, "Processed files: {}", c.searched)?;
    writeln!(out, "JS detects: {}", highlight(c.js))?;
    writeln!(out, "Unix detects: {}", highlight(c.unix))?;
    writeln!(out, "macOS detects: {}", highlight(c.macos))?;
    writeln!(out, "Errors: {}", c.errors)?;
    writeln!(
        out,
        "Execution time: {}s:{}ms:{}us",
        time.secs, time.millis, time.micros
    )?;
    writeln!(out, "{}", style("==============================").bold())?;
    Ok(())
}

fn highlight(count: usize) -> console::StyledObject<usize> {
    if count > 0 {
        style(count).red().bold()
    } else {
        style(count)
    }
}
