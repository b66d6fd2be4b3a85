//! PMD result shapes as produced by the `json` report renderer.
//!
//! These are the upstream values wrapped by `record`. Violations are grouped
//! per file on the wire; `PmdReport::violations` flattens them back into
//! standalone `RuleViolation`s carrying their own file name.

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
/// Top-level PMD JSON report.
pub struct PmdReport {
    #[serde(default, rename = "formatVersion")]
    pub format_version: Option<u32>,
    #[serde(default, rename = "pmdVersion")]
    pub pmd_version: Option<String>,
    #[serde(default)]
    pub files: Vec<FileViolations>,
    #[serde(default, rename = "processingErrors")]
    pub processing_errors: Vec<ProcessingError>,
    #[serde(default, rename = "configurationErrors")]
    pub configuration_errors: Vec<ConfigurationError>,
}

#[derive(Debug, Clone, Default, Deserialize)]
/// One `files[]` entry: all violations reported for a single source file.
pub struct FileViolations {
    pub filename: String,
    #[serde(default)]
    pub violations: Vec<Violation>,
}

#[derive(Debug, Clone, Deserialize)]
/// A violation as it appears inside a `files[]` entry (no file name).
pub struct Violation {
    #[serde(rename = "beginline")]
    pub begin_line: u32,
    #[serde(default, rename = "begincolumn")]
    pub begin_column: Option<u32>,
    #[serde(rename = "endline")]
    pub end_line: u32,
    #[serde(default, rename = "endcolumn")]
    pub end_column: Option<u32>,
    pub description: String,
    pub rule: String,
    #[serde(default)]
    pub ruleset: Option<String>,
    #[serde(default)]
    pub priority: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// The rule that produced a violation.
pub struct Rule {
    pub name: String,
    pub ruleset: Option<String>,
    pub priority: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A single rule violation located in one file.
pub struct RuleViolation {
    pub rule: Rule,
    pub filename: String,
    pub begin_line: u32,
    pub end_line: u32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// A failure PMD hit while analyzing one file (e.g. unparsable source).
pub struct ProcessingError {
    #[serde(rename = "filename")]
    pub file: String,
    #[serde(rename = "message")]
    pub msg: String,
    #[serde(default)]
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// A problem with PMD's own setup, not tied to any source file.
pub struct ConfigurationError {
    #[serde(default)]
    pub rule: Option<String>,
    #[serde(default)]
    pub ruleset: Option<String>,
    #[serde(rename = "message")]
    pub issue: String,
}

impl RuleViolation {
    pub fn new(
        rule: impl Into<String>,
        filename: impl Into<String>,
        begin_line: u32,
        end_line: u32,
        description: impl Into<String>,
    ) -> Self {
        RuleViolation {
            rule: Rule {
                name: rule.into(),
                ruleset: None,
                priority: None,
            },
            filename: filename.into(),
            begin_line,
            end_line,
            description: description.into(),
        }
    }
}

impl ProcessingError {
    pub fn new(file: impl Into<String>, msg: impl Into<String>, detail: impl Into<String>) -> Self {
        ProcessingError {
            file: file.into(),
            msg: msg.into(),
            detail: detail.into(),
        }
    }
}

impl ConfigurationError {
    pub fn new(issue: impl Into<String>) -> Self {
        ConfigurationError {
            rule: None,
            ruleset: None,
            issue: issue.into(),
        }
    }
}

impl PmdReport {
    /// Flatten per-file violation groups into standalone violations,
    /// preserving report order.
    pub fn violations(&self) -> Vec<RuleViolation> {
        self.files
            .iter()
            .flat_map(|f| {
                f.violations.iter().map(move |v| RuleViolation {
                    rule: Rule {
                        name: v.rule.clone(),
                        ruleset: v.ruleset.clone(),
                        priority: v.priority,
                    },
                    filename: f.filename.clone(),
                    begin_line: v.begin_line,
                    end_line: v.end_line,
                    description: v.description.clone(),
                })
            })
            .collect()
    }
}
