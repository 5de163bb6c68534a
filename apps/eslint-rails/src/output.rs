//! Output rendering for the warning report printed after the progress line.
//!
//! Supports `human` (default) and `json` outputs. The JSON form includes
//! per-warning fields and a top-level summary.

use crate::models::{Severity, Summary, Warning};
use crate::utils::use_colors;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

/// Print the report in the requested format.
pub fn print_report(warnings: &[Warning], files: usize, output: &str) {
    match output {
        "json" => println!("{}", render_json(warnings, files)),
        _ => print!("{}", render_human(warnings, use_colors(output))),
    }
}

/// Human-readable report: one line per warning, then a summary line.
pub fn render_human(warnings: &[Warning], color: bool) -> String {
    let mut out = String::new();
    for w in warnings {
        let label = match (w.severity, color) {
            (Severity::High, true) => "high".red().bold().to_string(),
            (Severity::Low, true) => "low".yellow().bold().to_string(),
            (Severity::None, true) => "none".bright_black().to_string(),
            (sev, false) => sev.as_str().to_string(),
        };
        let location = if color {
            w.location().bold().to_string()
        } else {
            w.location()
        };
        out.push_str(&format!("{} {} {}: {}\n", location, label, w.rule_id, w.message));
    }

    let line = if warnings.is_empty() {
        "All files passed.".to_string()
    } else {
        format!("{} warning(s) found.", warnings.len())
    };
    if color {
        out.push_str(&format!("{}\n", line.bold()));
    } else {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Compose the JSON report (pure) for testing purposes.
pub fn compose_json(warnings: &[Warning], files: usize) -> JsonVal {
    json!({
        "warnings": warnings,
        "summary": Summary::from_warnings(warnings, files),
    })
}

fn render_json(warnings: &[Warning], files: usize) -> String {
    let value = compose_json(warnings, files);
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
}
