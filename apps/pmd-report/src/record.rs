//! Uniform error records over PMD results.
//!
//! PMD reports three unrelated result kinds. Each one is wrapped by a small
//! borrowing view implementing `ErrorRecord`, so printers only ever deal with
//! four strings: name, file name, line range and description. `PmdError` is
//! the sum type over the three views.
//!
//! Records never fail: data PMD does not provide is reported as `UNKNOWN`.

use crate::models::pmd::{ConfigurationError, ProcessingError, RuleViolation};
use crate::models::{RecordKind, RecordView};
use std::borrow::Cow;
use std::fmt;

/// Placeholder for a file name or line range that is not available.
pub const UNKNOWN: &str = "unknown";

/// Name reported for both processing and configuration errors.
pub const PROCESSING_ERROR: &str = "ProcessingError";

/// Read-only view of one PMD result.
pub trait ErrorRecord {
    /// Short, fixed, human-readable category of the error.
    fn name(&self) -> Cow<'_, str>;

    /// File which caused the error, or `UNKNOWN`.
    fn file_name(&self) -> Cow<'_, str>;

    /// Line range formatted as `begin-end`, or `UNKNOWN`.
    fn lines(&self) -> Cow<'_, str>;

    /// Human-readable description.
    fn description(&self) -> Cow<'_, str>;
}

/// Record backed by a rule violation.
#[derive(Debug, Clone, Copy)]
pub struct OfRuleViolation<'a> {
    violation: &'a RuleViolation,
}

impl<'a> OfRuleViolation<'a> {
    pub fn new(violation: &'a RuleViolation) -> Self {
        OfRuleViolation { violation }
    }
}

impl ErrorRecord for OfRuleViolation<'_> {
    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.violation.rule.name)
    }

    fn file_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.violation.filename)
    }

    fn lines(&self) -> Cow<'_, str> {
        Cow::Owned(format!(
            "{}-{}",
            self.violation.begin_line, self.violation.end_line
        ))
    }

    fn description(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.violation.description)
    }
}

/// Record backed by a processing error.
#[derive(Debug, Clone, Copy)]
pub struct OfProcessingError<'a> {
    error: &'a ProcessingError,
}

impl<'a> OfProcessingError<'a> {
    pub fn new(error: &'a ProcessingError) -> Self {
        OfProcessingError { error }
    }
}

impl ErrorRecord for OfProcessingError<'_> {
    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(PROCESSING_ERROR)
    }

    fn file_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.error.file)
    }

    fn lines(&self) -> Cow<'_, str> {
        Cow::Borrowed(UNKNOWN)
    }

    fn description(&self) -> Cow<'_, str> {
        Cow::Owned(format!("{}: {}", self.error.msg, self.error.detail))
    }
}

/// Record backed by a configuration error.
#[derive(Debug, Clone, Copy)]
pub struct OfConfigError<'a> {
    error: &'a ConfigurationError,
}

impl<'a> OfConfigError<'a> {
    pub fn new(error: &'a ConfigurationError) -> Self {
        OfConfigError { error }
    }
}

impl ErrorRecord for OfConfigError<'_> {
    // Same label as processing errors.
    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(PROCESSING_ERROR)
    }

    fn file_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(UNKNOWN)
    }

    fn lines(&self) -> Cow<'_, str> {
        Cow::Borrowed(UNKNOWN)
    }

    fn description(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.error.issue)
    }
}

/// One PMD error of any kind (usually a violation).
#[derive(Debug, Clone, Copy)]
pub enum PmdError<'a> {
    Violation(OfRuleViolation<'a>),
    Processing(OfProcessingError<'a>),
    Config(OfConfigError<'a>),
}

impl<'a> From<&'a RuleViolation> for PmdError<'a> {
    fn from(v: &'a RuleViolation) -> Self {
        PmdError::Violation(OfRuleViolation::new(v))
    }
}

impl<'a> From<&'a ProcessingError> for PmdError<'a> {
    fn from(e: &'a ProcessingError) -> Self {
        PmdError::Processing(OfProcessingError::new(e))
    }
}

impl<'a> From<&'a ConfigurationError> for PmdError<'a> {
    fn from(e: &'a ConfigurationError) -> Self {
        PmdError::Config(OfConfigError::new(e))
    }
}

impl PmdError<'_> {
    fn inner(&self) -> &dyn ErrorRecord {
        match self {
            PmdError::Violation(r) => r,
            PmdError::Processing(r) => r,
            PmdError::Config(r) => r,
        }
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            PmdError::Violation(_) => RecordKind::Violation,
            PmdError::Processing(_) => RecordKind::Processing,
            PmdError::Config(_) => RecordKind::Configuration,
        }
    }

    /// Detach the record from the report it borrows.
    pub fn to_view(&self) -> RecordView {
        RecordView {
            kind: self.kind(),
            name: self.name().into_owned(),
            file: self.file_name().into_owned(),
            lines: self.lines().into_owned(),
            description: self.description().into_owned(),
        }
    }
}

impl ErrorRecord for PmdError<'_> {
    fn name(&self) -> Cow<'_, str> {
        self.inner().name()
    }

    fn file_name(&self) -> Cow<'_, str> {
        self.inner().file_name()
    }

    fn lines(&self) -> Cow<'_, str> {
        self.inner().lines()
    }

    fn description(&self) -> Cow<'_, str> {
        self.inner().description()
    }
}

impl fmt::Display for PmdError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}]: {} ({})",
            self.file_name(),
            self.lines(),
            self.description(),
            self.name()
        )
    }
}
