//! Issue types for placeholder consistency results.
//!
//! Each issue is self-contained with all information needed by a reporter
//! (CLI, MCP) to display it.

use std::collections::BTreeSet;

use enum_dispatch::enum_dispatch;

use crate::core::ValueFinding;

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    MissingVariables,
    InvalidVariables,
    ParseError,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::MissingVariables => write!(f, "missing-variables"),
            Rule::InvalidVariables => write!(f, "invalid-variables"),
            Rule::ParseError => write!(f, "parse-error"),
        }
    }
}

// ============================================================
// Context
// ============================================================

/// Where a translated value sits and what it says.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueContext {
    pub file_path: String,
    /// 1-based line of the value's opening quote.
    pub line: usize,
    /// 1-based column of the value's opening quote.
    pub col: usize,
    /// Dotted property path.
    pub path: String,
    pub value: String,
    /// Full text of the line holding the value.
    pub source_line: String,
}

// ============================================================
// Issue Types
// ============================================================

/// Placeholders of the canonical value that the translation does not use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingVariablesIssue {
    pub context: ValueContext,
    pub variables: BTreeSet<String>,
}

impl MissingVariablesIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::MissingVariables
    }
}

/// Placeholders in the translation that the canonical value does not have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidVariablesIssue {
    pub context: ValueContext,
    pub variables: BTreeSet<String>,
    /// Every placeholder of the canonical value.
    pub expected: BTreeSet<String>,
}

impl InvalidVariablesIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::InvalidVariables
    }
}

/// Translation file that could not be read or parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
}

impl ParseErrorIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

// ============================================================
// Issue Enum
// ============================================================

#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    MissingVariables(MissingVariablesIssue),
    InvalidVariables(InvalidVariablesIssue),
    ParseError(ParseErrorIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::MissingVariables(_) => MissingVariablesIssue::severity(),
            Issue::InvalidVariables(_) => InvalidVariablesIssue::severity(),
            Issue::ParseError(_) => ParseErrorIssue::severity(),
        }
    }

    pub fn rule(&self) -> Rule {
        match self {
            Issue::MissingVariables(_) => MissingVariablesIssue::rule(),
            Issue::InvalidVariables(_) => InvalidVariablesIssue::rule(),
            Issue::ParseError(_) => ParseErrorIssue::rule(),
        }
    }

    /// Turn one consistency finding into zero, one or two issues.
    pub fn from_finding(file_path: &str, source_line: &str, finding: ValueFinding) -> Vec<Issue> {
        let context = ValueContext {
            file_path: file_path.to_string(),
            line: finding.line,
            col: finding.column,
            path: finding.path,
            value: finding.value,
            source_line: source_line.to_string(),
        };
        let report = finding.report;

        let mut issues = Vec::new();
        if !report.missing.is_empty() {
            issues.push(Issue::MissingVariables(MissingVariablesIssue {
                context: context.clone(),
                variables: report.missing,
            }));
        }
        if !report.invalid.is_empty() {
            issues.push(Issue::InvalidVariables(InvalidVariablesIssue {
                context,
                variables: report.invalid,
                expected: report.expected,
            }));
        }
        issues
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// A value inside a translation file (has source_line for context display).
    Value(&'a ValueContext),
    /// File-level only (for ParseError - no line context).
    File { path: &'a str },
}

/// Trait for types that can be reported to CLI.
///
/// Uses `enum_dispatch` for zero-cost dispatch on the `Issue` enum.
#[enum_dispatch]
pub trait Report {
    /// Get the location for this issue.
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display (property path, error, etc.).
    fn message(&self) -> String;

    /// Severity level.
    fn report_severity(&self) -> Severity;

    /// Rule identifier.
    fn report_rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<&str> {
        None
    }

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

// ============================================================
// Report Implementations
// ============================================================

fn join(variables: &BTreeSet<String>) -> String {
    variables
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

impl Report for MissingVariablesIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Value(&self.context)
    }

    fn message(&self) -> String {
        self.context.path.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "the following variables are not used from the canonical value: {}",
            join(&self.variables)
        ))
    }
}

impl Report for InvalidVariablesIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Value(&self.context)
    }

    fn message(&self) -> String {
        self.context.path.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        if self.expected.is_empty() {
            Some(format!(
                "the following variables are invalid: {} (the canonical value has none)",
                join(&self.variables)
            ))
        } else {
            Some(format!(
                "the following variables are invalid: {}. Valid ones are: {}",
                join(&self.variables),
                join(&self.expected)
            ))
        }
    }
}

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<&str> {
        Some("the file is left out of every check and sync until it parses")
    }
}

// ============================================================
// Ordering
// ============================================================

impl Issue {
    fn sort_file_path(&self) -> &str {
        match self.location() {
            ReportLocation::Value(ctx) => &ctx.file_path,
            ReportLocation::File { path } => path,
        }
    }

    fn sort_line(&self) -> usize {
        match self.location() {
            ReportLocation::Value(ctx) => ctx.line,
            ReportLocation::File { .. } => 0,
        }
    }

    fn sort_col(&self) -> usize {
        match self.location() {
            ReportLocation::Value(ctx) => ctx.col,
            ReportLocation::File { .. } => 0,
        }
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Sort by: file_path, line, col, rule, message
        self.sort_file_path()
            .cmp(other.sort_file_path())
            .then_with(|| self.sort_line().cmp(&other.sort_line()))
            .then_with(|| self.sort_col().cmp(&other.sort_col()))
            .then_with(|| self.rule().cmp(&other.rule()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================
// Tests
// ============================================================
