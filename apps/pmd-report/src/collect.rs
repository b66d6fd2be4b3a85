//! Collection of PMD reports into error records.
//!
//! Produces a `CollectResult` with one `RecordView` per surviving PMD result
//! and a summary. Reports are parsed in parallel; records are then ordered
//! by file, lines and name so output does not depend on scheduling.

use crate::error::{ReportError, Result};
use crate::models::pmd::PmdReport;
use crate::models::{CollectResult, RecordKind, RecordView, Summary};
use crate::record::{ErrorRecord, PmdError, UNKNOWN};
use glob::Pattern;
use rayon::prelude::*;
use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Compiled exclusion patterns.
///
/// `files` globs match the displayed file name, `rules` regexes match the
/// record name.
#[derive(Debug, Default)]
pub struct Exclusions {
    files: Vec<Pattern>,
    rules: Vec<Regex>,
}

impl Exclusions {
    pub fn compile(files: &[String], rules: &[String]) -> Result<Self> {
        let files = files
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|source| ReportError::InvalidGlob {
                    pattern: p.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let rules = rules
            .iter()
            .map(|p| {
                Regex::new(p).map_err(|source| ReportError::InvalidRegex {
                    pattern: p.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Exclusions { files, rules })
    }

    /// Whether a record should be dropped. Records without a file are only
    /// subject to rule exclusions.
    pub fn excludes(&self, view: &RecordView) -> bool {
        if view.file != UNKNOWN && self.files.iter().any(|p| p.matches(&view.file)) {
            return true;
        }
        self.rules.iter().any(|r| r.is_match(&view.name))
    }
}

/// Read and parse one PMD JSON report.
pub fn load_report(path: &Path) -> Result<PmdReport> {
    let raw = fs::read_to_string(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ReportError::ParseReport {
        path: path.to_path_buf(),
        source,
    })
}

/// Every record of one report, in report order: violations, then
/// processing errors, then configuration errors.
pub fn translate(report: &PmdReport, root: &Path) -> Vec<RecordView> {
    let violations = report.violations();
    let records = violations
        .iter()
        .map(PmdError::from)
        .chain(report.processing_errors.iter().map(PmdError::from))
        .chain(report.configuration_errors.iter().map(PmdError::from));
    records
        .map(|r| {
            let mut view = r.to_view();
            view.file = display_path(&r.file_name(), root);
            view
        })
        .collect()
}

/// Show absolute paths under `root` relative to it; anything else as given.
fn display_path(file: &str, root: &Path) -> String {
    let p = Path::new(file);
    if file == UNKNOWN || !p.is_absolute() {
        return file.to_string();
    }
    match pathdiff::diff_paths(p, root) {
        Some(rel) if !rel.starts_with("..") => rel.to_string_lossy().to_string(),
        _ => file.to_string(),
    }
}

/// Load the given reports (relative to `repo_root`) and collect their
/// records, minus exclusions.
pub fn run_collect(
    repo_root: &Path,
    report_paths: &[String],
    exclusions: &Exclusions,
) -> Result<CollectResult> {
    let paths: Vec<PathBuf> = report_paths.iter().map(|p| repo_root.join(p)).collect();
    let loaded: Vec<Result<PmdReport>> = paths
        .par_iter()
        .map(|p| {
            debug!(path = %p.display(), "reading PMD report");
            load_report(p)
        })
        .collect();
    let reports = loaded.into_iter().collect::<Result<Vec<_>>>()?;

    let mut summary = Summary::default();
    let mut records: Vec<RecordView> = Vec::new();
    let mut files: BTreeSet<&str> = BTreeSet::new();
    for report in &reports {
        files.extend(report.files.iter().map(|f| f.filename.as_str()));
        for view in translate(report, repo_root) {
            if exclusions.excludes(&view) {
                debug!(file = %view.file, name = %view.name, "record excluded");
                summary.suppressed += 1;
                continue;
            }
            match view.kind {
                RecordKind::Violation => summary.violations += 1,
                RecordKind::Processing => summary.processing += 1,
                RecordKind::Configuration => summary.configuration += 1,
            }
            records.push(view);
        }
    }
    summary.files = files.len();
    records.sort_by(|a, b| {
        a.file
            .cmp(&b.file)
            .then_with(|| line_key(&a.lines).cmp(&line_key(&b.lines)))
            .then_with(|| a.name.cmp(&b.name))
    });
    info!(
        reports = reports.len(),
        records = records.len(),
        suppressed = summary.suppressed,
        "collected PMD results"
    );
    Ok(CollectResult { records, summary })
}

/// Numeric ordering for `begin-end`; `unknown` sorts last.
fn line_key(lines: &str) -> (u32, u32) {
    lines
        .split_once('-')
        .and_then(|(b, e)| Some((b.parse().ok()?, e.parse().ok()?)))
        .unwrap_or((u32::MAX, u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const REPORT: &str = r#"{
  "formatVersion": 0,
  "files": [
    { "filename": "src/B.java", "violations": [
      { "beginline": 20, "endline": 21, "description": "too long", "rule": "LongVariable" },
      { "beginline": 3, "endline": 3, "description": "unused x", "rule": "UnusedLocalVariable" }
    ]},
    { "filename": "src/gen/A.java", "violations": [
      { "beginline": 1, "endline": 1, "description": "generated", "rule": "CommentRequired" }
    ]}
  ],
  "processingErrors": [
    { "filename": "src/C.java", "message": "Parse failed", "detail": "unexpected token" }
  ],
  "configurationErrors": [
    { "rule": "X", "message": "missing property" }
  ]
}"#;

    fn write_report(dir: &Path, name: &str, body: &str) {
        fs::write(dir.join(name), body).unwrap();
    }

    #[test]
    fn test_collect_orders_and_counts() {
        let dir = tempdir().unwrap();
        write_report(dir.path(), "pmd.json", REPORT);
        let res = run_collect(dir.path(), &["pmd.json".into()], &Exclusions::default()).unwrap();
        assert_eq!(res.summary.violations, 3);
        assert_eq!(res.summary.processing, 1);
        assert_eq!(res.summary.configuration, 1);
        assert_eq!(res.summary.files, 2);
        assert_eq!(res.summary.total(), 5);
        let order: Vec<(&str, &str)> = res
            .records
            .iter()
            .map(|r| (r.file.as_str(), r.lines.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("src/B.java", "3-3"),
                ("src/B.java", "20-21"),
                ("src/C.java", "unknown"),
                ("src/gen/A.java", "1-1"),
                ("unknown", "unknown"),
            ]
        );
        assert_eq!(res.records[2].description, "Parse failed: unexpected token");
        assert_eq!(res.records[4].name, "ProcessingError");
    }

    #[test]
    fn test_exclusions_by_file_and_rule() {
        let dir = tempdir().unwrap();
        write_report(dir.path(), "pmd.json", REPORT);
        let ex = Exclusions::compile(&["src/gen/**".into()], &["^LongVariable$".into()]).unwrap();
        let res = run_collect(dir.path(), &["pmd.json".into()], &ex).unwrap();
        assert_eq!(res.summary.suppressed, 2);
        assert_eq!(res.summary.violations, 1);
        assert!(res.records.iter().all(|r| r.name != "LongVariable"));
        assert!(res.records.iter().all(|r| !r.file.starts_with("src/gen")));
    }

    #[test]
    fn test_unknown_file_never_matches_file_glob() {
        let ex = Exclusions::compile(&["*".into()], &[]).unwrap();
        let view = RecordView {
            kind: RecordKind::Configuration,
            name: "ProcessingError".into(),
            file: UNKNOWN.into(),
            lines: UNKNOWN.into(),
            description: "x".into(),
        };
        assert!(!ex.excludes(&view));
    }

    #[test]
    fn test_invalid_patterns_are_errors() {
        assert!(matches!(
            Exclusions::compile(&["[".into()], &[]),
            Err(ReportError::InvalidGlob { .. })
        ));
        assert!(matches!(
            Exclusions::compile(&[], &["(".into()]),
            Err(ReportError::InvalidRegex { .. })
        ));
    }

    #[test]
    fn test_absolute_paths_shown_relative_to_root() {
        let dir = tempdir().unwrap();
        let abs = dir.path().join("src/Foo.java");
        let body = format!(
            r#"{{"files": [{{"filename": {}, "violations": [
              {{"beginline": 10, "endline": 12, "description": "x is unused", "rule": "UnusedVariable"}}
            ]}}]}}"#,
            serde_json::to_string(&abs.to_string_lossy()).unwrap()
        );
        write_report(dir.path(), "pmd.json", &body);
        let res = run_collect(dir.path(), &["pmd.json".into()], &Exclusions::default()).unwrap();
        assert_eq!(res.records[0].file, Path::new("src").join("Foo.java").to_string_lossy());
        assert_eq!(res.records[0].lines, "10-12");
    }

    #[test]
    fn test_relative_root_shows_and_excludes_relative_paths() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        let abs = dir.path().join("src/Foo.java");
        let body = format!(
            r#"{{"files": [{{"filename": {}, "violations": [
              {{"beginline": 1, "endline": 2, "description": "d", "rule": "R"}}
            ]}}]}}"#,
            serde_json::to_string(&abs.to_string_lossy()).unwrap()
        );
        write_report(dir.path(), "pmd.json", &body);
        let root = crate::config::detect_repo_root_from(dir.path(), Path::new("."));
        let ex = Exclusions::compile(&["src/**".into()], &[]).unwrap();
        let res = run_collect(&root, &["pmd.json".into()], &ex).unwrap();
        assert_eq!(res.summary.suppressed, 1);
        assert!(res.records.is_empty());
    }

    #[test]
    fn test_shared_file_counted_once() {
        let dir = tempdir().unwrap();
        let body = r#"{"files": [{"filename": "A.java", "violations": [
          {"beginline": 1, "endline": 1, "description": "d", "rule": "R"}
        ]}]}"#;
        write_report(dir.path(), "a.json", body);
        write_report(dir.path(), "b.json", body);
        let res = run_collect(
            dir.path(),
            &["a.json".into(), "b.json".into()],
            &Exclusions::default(),
        )
        .unwrap();
        assert_eq!(res.summary.files, 1);
        assert_eq!(res.summary.violations, 2);
    }

    #[test]
    fn test_multiple_reports_merge() {
        let dir = tempdir().unwrap();
        write_report(dir.path(), "a.json", REPORT);
        write_report(
            dir.path(),
            "b.json",
            r#"{"processingErrors": [{"filename": "Z.java", "message": "m", "detail": "d"}]}"#,
        );
        let res = run_collect(
            dir.path(),
            &["a.json".into(), "b.json".into()],
            &Exclusions::default(),
        )
        .unwrap();
        assert_eq!(res.summary.processing, 2);
        assert_eq!(res.records.len(), 6);
    }

    #[test]
    fn test_missing_and_malformed_reports() {
        let dir = tempdir().unwrap();
        let err = run_collect(dir.path(), &["nope.json".into()], &Exclusions::default());
        assert!(matches!(err, Err(ReportError::Io { .. })));
        write_report(dir.path(), "bad.json", "{ not json");
        let err = run_collect(dir.path(), &["bad.json".into()], &Exclusions::default());
        assert!(matches!(err, Err(ReportError::ParseReport { .. })));
    }

    #[test]
    fn test_fixture_report() {
        let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
        let res = run_collect(&fixtures, &["pmd.json".into()], &Exclusions::default()).unwrap();
        // A file entry with no violations counts as a file but yields no records.
        assert!(res
            .records
            .iter()
            .all(|r| !r.file.ends_with("AllowsDuplicateLiteralsInAnnotations.java")));
        assert_eq!(res.summary.files, 2);
        assert_eq!(res.summary.violations, 1);
        assert_eq!(res.records[0].name, "UnusedVariable");
        assert_eq!(res.records[0].lines, "10-12");
    }
}
