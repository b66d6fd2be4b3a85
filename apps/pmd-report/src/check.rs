//! One `pmd-report check` run: resolve config, collect, decide the exit code.
//!
//! Kept out of the binary so the output mode used for errors and the exit
//! status can be tested without spawning a process.

use crate::collect::{run_collect, Exclusions};
use crate::config::{self, CliOverrides};
use crate::error::Result;
use crate::models::CollectResult;
use tracing::info;

/// Outcome of a check together with the output mode it must be printed in.
#[derive(Debug)]
pub struct Checked {
    /// Effective output mode; falls back to the CLI flag (or `human`) when
    /// the config itself could not be resolved.
    pub output: String,
    pub result: Result<CollectResult>,
}

pub fn run_check(cli: &CliOverrides<'_>) -> Checked {
    let eff = match config::resolve_effective(cli) {
        Ok(eff) => eff,
        Err(e) => {
            return Checked {
                output: cli.output.unwrap_or("human").to_string(),
                result: Err(e),
            }
        }
    };
    if !eff.config_found {
        info!(root = %eff.repo_root.display(), "no pmd-report config found; using defaults");
    }
    let result = Exclusions::compile(&eff.exclude_files, &eff.exclude_rules)
        .and_then(|ex| run_collect(&eff.repo_root, &eff.reports, &ex));
    Checked {
        output: eff.output,
        result,
    }
}

/// 0 when clean, 1 when any record remains, 2 on failure.
pub fn exit_code(result: &Result<CollectResult>) -> i32 {
    match result {
        Ok(res) if res.summary.total() > 0 => 1,
        Ok(_) => 0,
        Err(_) => 2,
    }
}
