//! Configuration discovery and effective settings resolution.
//!
//! `pmd-report.toml|yaml|yml` is read from the repository root (or closest
//! ancestor) and merged with CLI flags into an `Effective` config.
//! Defaults:
//! - `output`: `human`
//! - `reports`: `["target/pmd.json"]`
//! - `exclude.files|rules`: empty
//!
//! Overrides precedence: CLI > config file > defaults. Exclusion lists given
//! on the CLI extend the configured ones instead of replacing them.

use crate::error::{ReportError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const CONFIG_NAMES: [&str; 3] = ["pmd-report.toml", "pmd-report.yaml", "pmd-report.yml"];

pub const DEFAULT_REPORT: &str = "target/pmd.json";

#[derive(Debug, Default, Deserialize, Clone)]
/// Exclusion section under `[exclude]`.
pub struct ExcludeCfg {
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default)]
    pub rules: Vec<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `pmd-report.toml|yaml`.
pub struct ReportConfig {
    pub output: Option<String>,
    pub reports: Option<Vec<String>>,
    #[serde(default)]
    pub exclude: Option<ExcludeCfg>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub config_found: bool,
    pub output: String,
    pub reports: Vec<String>,
    pub exclude_files: Vec<String>,
    pub exclude_rules: Vec<String>,
}

/// CLI-provided values; `None`/empty means "not given".
#[derive(Debug, Default, Clone)]
pub struct CliOverrides<'a> {
    pub repo_root: Option<&'a str>,
    pub output: Option<&'a str>,
    pub reports: &'a [String],
    pub exclude_files: &'a [String],
    pub exclude_rules: &'a [String],
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `pmd-report.toml|yaml|yml` or a `.git` directory is found.
/// A relative `start` is anchored at the current directory first.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let cwd = std::env::current_dir().unwrap_or_default();
    detect_repo_root_from(&cwd, start)
}

/// Same as `detect_repo_root`, with `start` resolved against `cwd`.
///
/// The returned root is absolute whenever `cwd` is.
pub fn detect_repo_root_from(cwd: &Path, start: &Path) -> PathBuf {
    // components() drops `.` segments, so "." resolves to `cwd` itself
    let start: PathBuf = cwd.join(start).components().collect();
    let mut cur = start.as_path();
    loop {
        if CONFIG_NAMES.iter().any(|n| cur.join(n).exists()) || cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start,
        }
    }
}

/// Load `ReportConfig` from the first config file present under `root`.
///
/// Returns `Ok(None)` when there is no config file; a file that exists but
/// cannot be read or parsed is an error.
pub fn load_config(root: &Path) -> Result<Option<ReportConfig>> {
    for name in CONFIG_NAMES {
        let path = root.join(name);
        if !path.exists() {
            continue;
        }
        debug!(path = %path.display(), "loading config");
        let s = fs::read_to_string(&path).map_err(|source| ReportError::Io {
            path: path.clone(),
            source,
        })?;
        let cfg: ReportConfig = if name.ends_with(".toml") {
            toml::from_str(&s).map_err(|source| ReportError::ParseToml { path, source })?
        } else {
            serde_yaml::from_str(&s).map_err(|source| ReportError::ParseYaml { path, source })?
        };
        return Ok(Some(cfg));
    }
    Ok(None)
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(cli: &CliOverrides<'_>) -> Result<Effective> {
    let start = PathBuf::from(cli.repo_root.unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let loaded = load_config(&repo_root)?;
    let config_found = loaded.is_some();
    let cfg = loaded.unwrap_or_default();

    let output = cli
        .output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    let reports = if !cli.reports.is_empty() {
        cli.reports.to_vec()
    } else {
        cfg.reports
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| vec![DEFAULT_REPORT.to_string()])
    };

    let exclude = cfg.exclude.unwrap_or_default();
    let mut exclude_files = exclude.files;
    exclude_files.extend(cli.exclude_files.iter().cloned());
    let mut exclude_rules = exclude.rules;
    exclude_rules.extend(cli.exclude_rules.iter().cloned());

    Ok(Effective {
        repo_root,
        config_found,
        output,
        reports,
        exclude_files,
        exclude_rules,
    })
}
