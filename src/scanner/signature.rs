//! Signature matching for suspicious file content
//!
//! Three fixed signatures are searched for, line by line, using a single
//! Aho-Corasick automaton. Matching is exact, case-sensitive substring
//! containment on raw bytes.

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use anyhow::{Context, Result};
use serde::Serialize;

/// Fake script tag injected into JavaScript files
pub const JS_SIGNATURE: &str = "<script>evil_script()</script>";

/// Destructive shell command
pub const UNIX_SIGNATURE: &str = "rm -rf ~/Documents";

/// macOS launch agent invocation
pub const MACOS_SIGNATURE: &str =
    r#"system("launchctl load /Library/LaunchAgents/com.malware.agent")"#;

/// Extension (without the leading dot) that enables the JS signature
pub const JS_EXTENSION: &str = "js";

// Pattern IDs inside the automaton, in the order passed to the builder
const JS_ID: usize = 0;
const UNIX_ID: usize = 1;
const MACOS_ID: usize = 2;

/// Outcome of inspecting one directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// The entry could not be opened
    Error,
    JsSuspicious,
    UnixSuspicious,
    MacosSuspicious,
    /// No signature found
    Clean,
}

/// Which signatures were seen on a single line
#[derive(Debug, Default, Clone, Copy)]
struct LineHits {
    js: bool,
    unix: bool,
    macos: bool,
}

impl LineHits {
    /// Unix takes priority over macOS on the same line
    fn shell_category(&self) -> Option<Category> {
        if self.unix {
            Some(Category::UnixSuspicious)
        } else if self.macos {
            Some(Category::MacosSuspicious)
        } else {
            None
        }
    }
}

/// Compiled set of the suspicious signatures
#[derive(Debug, Clone)]
pub struct SignatureSet {
    automaton: AhoCorasick,
}

impl SignatureSet {
    pub fn new() -> Result<Self> {
        let automaton = AhoCorasickBuilder::new()
            .match_kind(MatchKind::Standard)
            .build([JS_SIGNATURE, UNIX_SIGNATURE, MACOS_SIGNATURE])
            .context("Failed to build signature automaton")?;

        Ok(Self { automaton })
    }

    /// Classify content given as a sequence of lines.
    ///
    /// Lines are consumed lazily and in order; the iterator is not advanced
    /// past the line that decides the outcome. A `.js` file is only checked
    /// for the JS signature: its lines are used up by that search, so one
    /// without the script tag is clean even if it holds a shell signature.
    ///
    /// `extension` is the path's final extension without the dot.
    pub fn classify<I, L>(&self, lines: I, extension: Option<&str>) -> Category
    where
        I: IntoIterator<Item = L>,
        L: AsRef<[u8]>,
    {
        let check_js = extension == Some(JS_EXTENSION);

        if !check_js {
            for line in lines {
                if let Some(category) = self.hits(line.as_ref()).shell_category() {
                    return category;
                }
            }
            return Category::Clean;
        }

        for line in lines {
            if self.hits(line.as_ref()).js {
                return Category::JsSuspicious;
            }
        }

        Category::Clean
    }

    fn hits(&self, line: &[u8]) -> LineHits {
        let mut hits = LineHits::default();
        for found in self.automaton.find_overlapping_iter(line) {
            match found.pattern().as_usize() {
                JS_ID => hits.js = true,
                UNIX_ID => hits.unix = true,
                MACOS_ID => hits.macos = true,
                _ => {}
            }
        }
        hits
    }
}
