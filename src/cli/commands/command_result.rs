use crate::core::SyncReport;
use crate::issues::Issue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncKind {
    Propagate,
    Prune,
}

#[derive(Debug)]
pub enum CommandSummary {
    Check(CheckSummary),
    Sync(SyncSummary),
    Show(ShowSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct CheckSummary {
    /// Number of translation files that were checked.
    pub files_checked: usize,
    /// False when the workspace holds no translations; nothing was checked.
    pub is_localization_workspace: bool,
}

#[derive(Debug)]
pub struct SyncSummary {
    pub kind: SyncKind,
    pub report: SyncReport,
}

#[derive(Debug)]
pub struct ShowEntry {
    /// Translation file name, e.g. `ro.json`.
    pub document: String,
    /// None when the property is absent from this file.
    pub value: Option<String>,
}

#[derive(Debug)]
pub struct ShowSummary {
    pub path: String,
    /// Value in the canonical file, if it holds one.
    pub canonical: Option<String>,
    pub entries: Vec<ShowEntry>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running locsync commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// If true, exit code 1 should be returned when error_count > 0.
    /// If false, always exit 0 (used for dry-run commands that report work to do).
    pub exit_on_errors: bool,
    /// All issues found during the check.
    /// Empty for non-check commands.
    pub issues: Vec<Issue>,
    /// Number of files that failed to parse.
    pub parse_error_count: usize,
}
