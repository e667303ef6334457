//! CLI output formatting.
//!
//! Each command has a `format_*` function returning lines (pure, testable)
//! and a `print_*` wrapper that writes them to stdout.

use crate::pages::CheckReport;

/// Lines for a completed generation step: a heading, one line per written
/// file, and a count.
pub fn format_artifacts(heading: &str, written: &[String]) -> Vec<String> {
    let mut lines = vec![heading.to_string()];
    for name in written {
        lines.push(format!("    {name}"));
    }
    let noun = if written.len() == 1 { "file" } else { "files" };
    lines.push(format!("Generated {} {noun}", written.len()));
    lines
}

pub fn print_artifacts(heading: &str, written: &[String]) {
    for line in format_artifacts(heading, written) {
        println!("{line}");
    }
}

/// Lines for a source check: validated pages, then anything the page list
/// never references.
pub fn format_check(report: &CheckReport) -> Vec<String> {
    let mut lines = vec!["Pages".to_string()];
    for name in &report.checked {
        lines.push(format!("    {name}: ok"));
    }
    if !report.unreferenced.is_empty() {
        lines.push("Not referenced by any page entry".to_string());
        for name in &report.unreferenced {
            lines.push(format!("    {name}"));
        }
    }
    lines
}

pub fn print_check(report: &CheckReport) {
    for line in format_check(report) {
        println!("{line}");
    }
}
