//! Shared output formatting for lint results.

use anyhow::Result;
use fsd_lint::{LintReport, ViolationKind};

use crate::OutputFormat;

/// Print lint results in the specified format.
pub fn print(report: &LintReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(report),
        OutputFormat::Json => return print_json(report),
        OutputFormat::Compact => print_compact(report),
    }
    Ok(())
}

fn print_text(report: &LintReport) {
    for finding in &report.findings {
        println!("{}", colorize(&finding.format()));
    }

    let summary_color = if report.has_findings() {
        "\x1b[31m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{}Found {} violation(s) in {} file(s)\x1b[0m",
        summary_color,
        report.findings.len(),
        report.files_checked
    );

    let breakdown: Vec<String> = ViolationKind::ALL
        .iter()
        .map(|&kind| (kind, report.count(kind)))
        .filter(|&(_, n)| n > 0)
        .map(|(kind, n)| format!("{} {kind}: {n}", kind.code()))
        .collect();
    if !breakdown.is_empty() {
        println!("  {}", breakdown.join(", "));
    }

    let fixable = report.fixable();
    if fixable > 0 {
        println!("{fixable} finding(s) can be fixed with `fsd-lint check --fix`");
    }
    if report.fixes_applied > 0 {
        println!("Applied {} fix(es)", report.fixes_applied);
    }
}

/// Highlights the severity label of a formatted finding.
fn colorize(formatted: &str) -> String {
    formatted.replacen("  error:", "  \x1b[31merror\x1b[0m:", 1)
}

fn print_json(report: &LintReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}

fn print_compact(report: &LintReport) {
    for finding in &report.findings {
        println!("{finding}");
    }
}
