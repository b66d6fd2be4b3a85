//! pmd-report CLI binary entry point.
//! Resolves configuration, collects PMD records and prints them.

use clap::Parser;
use pmd_report::check::{exit_code, run_check};
use pmd_report::cli::{Cli, Commands};
use pmd_report::config::CliOverrides;
use pmd_report::output;
use tracing_subscriber::EnvFilter;

fn main() {
    // Logs go to stderr so JSON output on stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Check {
            repo_root,
            output: output_flag,
            reports,
            exclude_files,
            exclude_rules,
        } => {
            let checked = run_check(&CliOverrides {
                repo_root: repo_root.as_deref(),
                output: output_flag.as_deref(),
                reports: &reports,
                exclude_files: &exclude_files,
                exclude_rules: &exclude_rules,
            });
            match &checked.result {
                Ok(res) => output::print_records(res, &checked.output),
                Err(e) => output::print_error(e, &checked.output),
            }
            let code = exit_code(&checked.result);
            if code != 0 {
                std::process::exit(code);
            }
        }
    }
}
