use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::core::{DocumentOutcome, DocumentStatus, SyncReport};

// ============================================================
// Shared
// ============================================================

fn default_project_root() -> String {
    ".".to_string()
}

/// Where the project lives; shared by every tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectParams {
    /// Project directory; `.locsyncrc.json` is searched from here upwards
    #[serde(default = "default_project_root")]
    pub project_root_path: String,
    /// Canonical translation file name (overrides config file), e.g. `en.json`
    #[serde(default)]
    pub canonical_file: Option<String>,
}

/// A dotted property path, or a 1-based position in the canonical file.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyTarget {
    /// Dotted property path, e.g. `setting.editor.fontSize`
    #[serde(default)]
    pub path: Option<String>,
    /// 1-based line in the canonical file (used when `path` is absent)
    #[serde(default)]
    pub line: Option<u32>,
    /// 1-based column in the canonical file (used when `path` is absent)
    #[serde(default)]
    pub column: Option<u32>,
}

// ============================================================
// Documents Types (list_documents)
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListDocumentsParams {
    #[serde(flatten)]
    pub project: ProjectParams,
}

/// Result of list_documents operation
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentsResult {
    pub translations_dir: String,
    pub canonical_file: String,
    /// False when the project holds no translations; checks are inert then
    pub is_localization_workspace: bool,
    pub documents: Vec<DocumentInfo>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentInfo {
    pub name: String,
    pub locale: String,
    pub file_path: String,
    pub is_canonical: bool,
}

// ============================================================
// Lookup Types (get_value)
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetValueParams {
    #[serde(flatten)]
    pub project: ProjectParams,
    /// Dotted property path
    pub path: String,
    /// Only look in this translation file (file name or locale)
    #[serde(default)]
    pub locale: Option<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetValueResult {
    pub path: String,
    /// Value in the canonical file, if it holds one
    pub canonical: Option<String>,
    pub values: Vec<DocumentValue>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentValue {
    pub document: String,
    /// Null when the property is absent from this file
    pub value: Option<String>,
}

// ============================================================
// Sync Types (propagate_property, prune_property)
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SyncPropertyParams {
    #[serde(flatten)]
    pub project: ProjectParams,
    #[serde(flatten)]
    pub target: PropertyTarget,
    /// Write the files; when false only report what would change
    #[serde(default)]
    pub apply: bool,
}

/// Result of a propagate or prune run
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SyncResult {
    pub path: String,
    pub applied: bool,
    pub cancelled: bool,
    pub changed_count: usize,
    pub problem_count: usize,
    pub outcomes: Vec<OutcomeItem>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeItem {
    pub document: String,
    /// inserted, alreadyPresent, deleted, notFound, conflict, skipped or failed
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl From<&DocumentOutcome> for OutcomeItem {
    fn from(outcome: &DocumentOutcome) -> Self {
        let (status, detail) = match &outcome.status {
            DocumentStatus::Inserted => ("inserted", None),
            DocumentStatus::AlreadyPresent => ("alreadyPresent", None),
            DocumentStatus::Deleted => ("deleted", None),
            DocumentStatus::NotFound => ("notFound", None),
            DocumentStatus::Conflict { at } => ("conflict", Some(at.clone())),
            DocumentStatus::Skipped { reason } => ("skipped", Some(reason.clone())),
            DocumentStatus::Failed { error } => ("failed", Some(error.clone())),
        };
        Self {
            document: outcome.document.clone(),
            status: status.to_string(),
            detail,
        }
    }
}

impl From<&SyncReport> for SyncResult {
    fn from(report: &SyncReport) -> Self {
        Self {
            path: report.path.clone(),
            applied: report.applied,
            cancelled: report.cancelled,
            changed_count: report.changed(),
            problem_count: report.problems(),
            outcomes: report.outcomes.iter().map(OutcomeItem::from).collect(),
        }
    }
}

// ============================================================
// Check Types (check_variables)
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckVariablesParams {
    #[serde(flatten)]
    pub project: ProjectParams,
    /// Dotted property path of a candidate value; scan every file when absent
    #[serde(default)]
    pub path: Option<String>,
    /// Candidate translation to check against the canonical value at `path`
    #[serde(default)]
    pub value: Option<String>,
    /// Max number of items to return (default 20, max 100)
    #[serde(default)]
    pub limit: Option<u32>,
    /// Number of items to skip
    #[serde(default)]
    pub offset: Option<u32>,
}

/// Result of checking a single candidate value
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CandidateCheckResult {
    pub path: String,
    /// False when the check did not apply (no canonical value, short value,
    /// no placeholders on either side, or not a localization workspace)
    pub checked: bool,
    pub consistent: bool,
    pub expected: Vec<String>,
    pub missing: Vec<String>,
    pub invalid: Vec<String>,
}

/// A value whose placeholders do not match the canonical value
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VariableMismatchItem {
    pub file_path: String,
    pub line: usize,
    pub column: usize,
    pub path: String,
    pub value: String,
    pub missing: Vec<String>,
    pub invalid: Vec<String>,
    pub expected: Vec<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParseErrorItem {
    pub file_path: String,
    pub error: String,
}

/// Result of scanning every translation file
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VariablesScanResult {
    pub total_count: usize,
    pub files_checked: usize,
    pub items: Vec<VariableMismatchItem>,
    pub parse_errors: Vec<ParseErrorItem>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub offset: usize,
    pub limit: usize,
    pub has_more: bool,
}
