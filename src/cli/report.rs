//! Report formatting and printing utilities.
//!
//! This module provides functions to display issues in cargo-style format.
//! Separate from core logic to allow locsync to be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{
    CheckSummary, CommandResult, CommandSummary, InitSummary, ShowSummary, SyncKind, SyncSummary,
};
use crate::config::CONFIG_FILE_NAME;
use crate::core::DocumentStatus;
use crate::issues::{Issue, Report, ReportLocation, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format to a writer.
///
/// Issues are sorted and displayed with severity, location, source context,
/// and details.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort();

    // Calculate max line number width for alignment
    let max_line_width = calculate_max_line_width(&sorted);

    for issue in &sorted {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(&sorted, writer);
}

/// Print a success message when no issues are found.
pub fn print_success_to<W: Write>(files_checked: usize, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Checked {} translation {} - no issues found",
            files_checked,
            if files_checked == 1 { "file" } else { "files" }
        )
        .green()
    );
}

/// Print a parse warning to a custom writer.
pub fn print_parse_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be parsed (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let loc = issue.location();
    let (file_path, line, col, source_line) = extract_location_info(&loc);

    // Print severity and message (cargo-style)
    let severity = issue.report_severity();
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    // Print clickable location: --> path:line:col
    if line > 0 {
        let _ = writeln!(writer, "  {} {}:{}:{}", "-->".blue(), file_path, line, col);
    } else {
        let _ = writeln!(writer, "  {} {}", "-->".blue(), file_path);
    }

    if let Some(source_line) = source_line.filter(|s| !s.is_empty()) {
        let caret_char = match severity {
            Severity::Error => "^".red(),
            Severity::Warning => "^".yellow(),
        };

        let _ = writeln!(
            writer,
            "{:>width$} {}",
            "",
            "|".blue(),
            width = max_line_width
        );
        let _ = writeln!(
            writer,
            "{:>width$} {} {}",
            line.to_string().blue(),
            "|".blue(),
            source_line,
            width = max_line_width
        );

        // Caret pointing to the column (col is 1-based)
        let prefix: String = source_line.chars().take(col.saturating_sub(1)).collect();
        let caret_padding = UnicodeWidthStr::width(prefix.as_str());
        let _ = writeln!(
            writer,
            "{:>width$} {} {:>padding$}{}",
            "",
            "|".blue(),
            "",
            caret_char,
            width = max_line_width,
            padding = caret_padding
        );
    }

    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    if let Some(hint) = issue.hint() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "hint:".bold().cyan(),
            hint,
            width = max_line_width
        );
    }

    let _ = writeln!(writer); // Empty line between issues
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Warning)
        .count();
    let total_problems = total_errors + total_warnings;

    if total_problems > 0 {
        let _ = writeln!(
            writer,
            "{} {} problems ({} {}, {} {})",
            FAILURE_MARK.red(),
            total_problems,
            total_errors,
            if total_errors == 1 { "error" } else { "errors" }.red(),
            total_warnings,
            if total_warnings == 1 {
                "warning"
            } else {
                "warnings"
            }
            .yellow()
        );
    }
}

fn extract_location_info<'a>(
    loc: &'a ReportLocation<'a>,
) -> (&'a str, usize, usize, Option<&'a str>) {
    match loc {
        ReportLocation::Value(ctx) => (
            ctx.file_path.as_str(),
            ctx.line,
            ctx.col,
            Some(ctx.source_line.as_str()),
        ),
        ReportLocation::File { path } => (path, 0, 0, None),
    }
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| match i.location() {
            ReportLocation::Value(ctx) => Some(ctx.line),
            ReportLocation::File { .. } => None,
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

// ============================================================
// Command Output
// ============================================================

pub fn print(result: &CommandResult, verbose: bool) {
    let mut stdout = io::stdout().lock();
    print_to(result, &mut stdout);
    print_parse_warning_to(result.parse_error_count, verbose, &mut io::stderr().lock());
}

pub fn print_to<W: Write>(result: &CommandResult, writer: &mut W) {
    match &result.summary {
        CommandSummary::Check(summary) => print_check(summary, &result.issues, writer),
        CommandSummary::Sync(summary) => print_sync(summary, writer),
        CommandSummary::Show(summary) => print_show(summary, writer),
        CommandSummary::Init(summary) => print_init(summary, writer),
    }
}

fn print_check<W: Write>(summary: &CheckSummary, issues: &[Issue], writer: &mut W) {
    if !summary.is_localization_workspace {
        let _ = writeln!(
            writer,
            "Note: not a localization workspace (no {} and no canonical file), nothing checked.",
            CONFIG_FILE_NAME
        );
        return;
    }

    if issues.is_empty() {
        print_success_to(summary.files_checked, writer);
    } else {
        report_to(issues, writer);
    }
}

fn print_sync<W: Write>(summary: &SyncSummary, writer: &mut W) {
    let report = &summary.report;
    let (pending, done, preposition) = match summary.kind {
        SyncKind::Propagate => ("Would insert", "Inserted", "into"),
        SyncKind::Prune => ("Would delete", "Deleted", "from"),
    };

    let changed: Vec<&str> = report
        .outcomes
        .iter()
        .filter(|o| o.status.is_change())
        .map(|o| o.document.as_str())
        .collect();

    for outcome in report.outcomes.iter().filter(|o| o.status.is_problem()) {
        let severity = match outcome.status {
            DocumentStatus::Failed { .. } => "error:".bold().red(),
            _ => "warning:".bold().yellow(),
        };
        let _ = writeln!(writer, "{} {}: {}", severity, outcome.document, outcome.status);
    }

    if changed.is_empty() {
        let message = match summary.kind {
            SyncKind::Propagate => format!(
                "'{}' is already present in every translation file",
                report.path
            ),
            SyncKind::Prune => format!("'{}' is not present in any translation file", report.path),
        };
        if report.problems() == 0 {
            let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), message.green());
        }
    } else {
        let verb = if report.applied {
            done.green().bold()
        } else {
            pending.yellow().bold()
        };
        let _ = writeln!(
            writer,
            "{} '{}' {} {} file(s):",
            verb,
            report.path,
            preposition,
            changed.len()
        );
        for document in &changed {
            let _ = writeln!(writer, "  - {}", document);
        }
        if !report.applied {
            let _ = writeln!(writer, "Run with {} to write these changes.", "--apply".cyan());
        }
    }

    if report.cancelled {
        let _ = writeln!(
            writer,
            "{} cancelled after {} file(s)",
            "note:".bold(),
            report.outcomes.len()
        );
    }
}

fn print_show<W: Write>(summary: &ShowSummary, writer: &mut W) {
    let _ = writeln!(writer, "{}", summary.path.bold());
    if let Some(canonical) = &summary.canonical {
        let _ = writeln!(
            writer,
            "  {} {}",
            "canonical:".dimmed(),
            serde_json::Value::from(canonical.as_str())
        );
    }

    for entry in &summary.entries {
        match &entry.value {
            Some(value) => {
                let _ = writeln!(
                    writer,
                    "  {}: {}",
                    entry.document,
                    serde_json::Value::from(value.as_str())
                );
            }
            None => {
                let _ = writeln!(writer, "  {}: {}", entry.document, "(missing)".yellow());
            }
        }
    }
}

fn print_init<W: Write>(summary: &InitSummary, writer: &mut W) {
    if summary.created {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
}

// ============================================================
// Tests
// ============================================================
