use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A link discovered on a rendered page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Target URL (None when the element carries no href)
    pub href: Option<String>,

    /// Display text of the element
    pub text: String,
}

impl Link {
    /// Create a new link
    pub fn new(href: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
            text: text.into(),
        }
    }

    /// Same link with its display text trimmed
    pub fn trimmed(self) -> Self {
        Self {
            href: self.href,
            text: self.text.trim().to_string(),
        }
    }
}

/// What a single capture attempt did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// The page was fetched, cleaned and written here
    Written(PathBuf),

    /// A file was already present at this path
    SkippedExisting(PathBuf),

    /// The link had no http(s) URL
    SkippedScheme,
}

/// Tally of a dump run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DumpSummary {
    pub categories: usize,
    pub sections: usize,
    pub written: usize,
    pub skipped_existing: usize,
    pub skipped_scheme: usize,
}

impl DumpSummary {
    /// Count one capture outcome
    pub fn record(&mut self, outcome: &CaptureOutcome) {
        match outcome {
            CaptureOutcome::Written(_) => self.written += 1,
            CaptureOutcome::SkippedExisting(_) => self.skipped_existing += 1,
            CaptureOutcome::SkippedScheme => self.skipped_scheme += 1,
        }
    }

    /// Fold another summary into this one
    pub fn merge(&mut self, other: &DumpSummary) {
        self.categories += other.categories;
        self.sections += other.sections;
        self.written += other.written;
        self.skipped_existing += other.skipped_existing;
        self.skipped_scheme += other.skipped_scheme;
    }
}
