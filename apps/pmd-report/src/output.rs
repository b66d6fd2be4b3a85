//! Output rendering for collected PMD records.
//!
//! Supports `human` (default) and `json` outputs. The JSON form includes
//! per-record fields and a top-level summary.

use crate::error::ReportError;
use crate::models::{CollectResult, RecordKind, RecordView};
use owo_colors::OwoColorize;
use serde_json::Value as JsonVal;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

/// Red `error:` prefix for stderr messages.
pub fn error_prefix() -> String {
    if use_colors("human") {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

/// Print collected records in the requested format.
pub fn print_records(res: &CollectResult, output: &str) {
    match output {
        "json" => match serde_json::to_string_pretty(&compose_json(res)) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("{} {}", error_prefix(), e),
        },
        _ => {
            let color = use_colors(output);
            for r in &res.records {
                println!("{}", render_line(r, color));
            }
            let s = &res.summary;
            let summary = format!(
                "— Summary — violations={} processing={} configuration={} suppressed={} files={}",
                s.violations, s.processing, s.configuration, s.suppressed, s.files
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

/// One human-readable line: `<icon> file[lines]: description (name)`.
pub fn render_line(r: &RecordView, color: bool) -> String {
    let icon = match r.kind {
        RecordKind::Violation => "✖",
        _ => "▲",
    };
    if !color {
        return format!("{} {}", icon, r);
    }
    let (icon, name) = match r.kind {
        RecordKind::Violation => (icon.red().to_string(), r.name.red().bold().to_string()),
        _ => (icon.yellow().to_string(), r.name.yellow().bold().to_string()),
    };
    format!(
        "{} {}[{}]: {} ({})",
        icon,
        r.file.bold(),
        r.lines,
        r.description,
        name
    )
}

/// Print a failure that stopped collection.
pub fn print_error(err: &ReportError, output: &str) {
    match output {
        "json" => println!("{}", serde_json::json!({ "error": err.to_string() })),
        _ => eprintln!("{} {}", error_prefix(), err),
    }
}

/// Compose the JSON object (pure) for testing/snapshot purposes.
pub fn compose_json(res: &CollectResult) -> JsonVal {
    serde_json::json!({
        "records": res.records,
        "summary": res.summary,
    })
}
