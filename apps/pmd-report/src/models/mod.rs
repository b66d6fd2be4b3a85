//! Shared data models for PMD input and report output.

pub mod pmd;

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
/// Which upstream result a record was translated from.
pub enum RecordKind {
    Violation,
    Processing,
    Configuration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Owned snapshot of one error record, ready for printing.
pub struct RecordView {
    pub kind: RecordKind,
    pub name: String,
    pub file: String,
    pub lines: String,
    pub description: String,
}

#[derive(Debug, Default, Serialize)]
/// Aggregated counts used by printers and the exit status.
pub struct Summary {
    pub violations: usize,
    pub processing: usize,
    pub configuration: usize,
    pub suppressed: usize,
    pub files: usize,
}

#[derive(Debug, Serialize)]
/// Collection results container.
pub struct CollectResult {
    pub records: Vec<RecordView>,
    pub summary: Summary,
}

impl Summary {
    /// Records that survived exclusion.
    pub fn total(&self) -> usize {
        self.violations + self.processing + self.configuration
    }
}

/// Same single-line form as `PmdError`: `file[lines]: description (name)`.
impl fmt::Display for RecordView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}]: {} ({})",
            self.file, self.lines, self.description, self.name
        )
    }
}
