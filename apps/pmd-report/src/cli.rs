//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "pmd-report",
    version,
    about = "Report PMD results as uniform error records",
    long_about = "pmd-report reads PMD JSON reports (pmd check -f json) and prints every rule violation, processing error and configuration error as one uniform record.\n\nConfiguration precedence: CLI > pmd-report.toml > defaults.",
    after_help = "Examples:\n  pmd-report check --report target/pmd.json\n  pmd-report check --output json --exclude-rule '^CommentRequired$'",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current pmd-report version.")]
    Version,
    /// Collect and print PMD results
    #[command(
        about = "Print PMD results",
        long_about = "Translate PMD reports into error records and print them. Exits 1 when any record remains after exclusions, 2 on failure.",
        after_help = "Examples:\n  pmd-report check\n  pmd-report check --report a.json --report b.json --exclude-file 'src/generated/**'"
    )]
    Check {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long = "report", help = "PMD JSON report, relative to the repository root (repeatable)")]
        reports: Vec<String>,
        #[arg(long = "exclude-file", help = "Glob of file names to skip (repeatable)")]
        exclude_files: Vec<String>,
        #[arg(long = "exclude-rule", help = "Regex of record names to skip (repeatable)")]
        exclude_rules: Vec<String>,
    },
}
