//! Multi-document propagate and prune.
//!
//! Target documents are processed one at a time. Each one is read, edited in
//! memory and written back on its own; there is no transaction across
//! documents, so a failure in one never undoes the edits already written to
//! another. Cancellation is checked between documents only.

pub mod delete;
pub mod indent;
pub mod insert;

use std::{
    fmt, fs,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use tracing::{info, warn};

use crate::core::{
    discovery::TranslationDocument,
    document::{Document, ParseError},
    error::SyncError,
};

pub use delete::{DeleteOutcome, delete_from};
pub use indent::IndentStyle;
pub use insert::{InsertOutcome, PlannedProperty, PropagationPlan, insert_into};

/// What happened to one target document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentStatus {
    Inserted,
    AlreadyPresent,
    Deleted,
    NotFound,
    /// The path runs through a non-object value at `at`.
    Conflict { at: String },
    /// The document could not be read or parsed.
    Skipped { reason: String },
    /// The edit could not be applied or written.
    Failed { error: String },
}

impl DocumentStatus {
    pub fn is_change(&self) -> bool {
        matches!(self, DocumentStatus::Inserted | DocumentStatus::Deleted)
    }

    pub fn is_problem(&self) -> bool {
        matches!(
            self,
            DocumentStatus::Conflict { .. }
                | DocumentStatus::Skipped { .. }
                | DocumentStatus::Failed { .. }
        )
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentStatus::Inserted => f.write_str("inserted"),
            DocumentStatus::AlreadyPresent => f.write_str("already present"),
            DocumentStatus::Deleted => f.write_str("deleted"),
            DocumentStatus::NotFound => f.write_str("not present"),
            DocumentStatus::Conflict { at } => write!(f, "conflict: '{at}' is not an object"),
            DocumentStatus::Skipped { reason } => write!(f, "skipped: {reason}"),
            DocumentStatus::Failed { error } => write!(f, "failed: {error}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentOutcome {
    pub document: String,
    pub status: DocumentStatus,
}

/// Result of one propagate or prune run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub path: String,
    pub outcomes: Vec<DocumentOutcome>,
    /// Set when the run stopped early; documents after the cut are absent.
    pub cancelled: bool,
    /// False for a dry run: changes were computed but not written.
    pub applied: bool,
}

impl SyncReport {
    pub fn changed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.status.is_change()).count()
    }

    pub fn problems(&self) -> usize {
        self.outcomes.iter().filter(|o| o.status.is_problem()).count()
    }
}

/// Progress sink for long-running runs.
pub trait Progress {
    /// Called before document `done + 1` of `total`.
    fn on_document(&self, done: usize, total: usize, document: &str);

    /// Polled between documents.
    fn is_cancelled(&self) -> bool {
        false
    }

    fn on_finish(&self, _total: usize) {}
}

/// Ignores progress and never cancels.
pub struct NoProgress;

impl Progress for NoProgress {
    fn on_document(&self, _done: usize, _total: usize, _document: &str) {}
}

/// Shared cancellation switch a host can flip from another thread.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Logs progress through `tracing` and honours a [`CancellationFlag`].
#[derive(Debug, Clone, Default)]
pub struct LoggingProgress {
    pub cancellation: CancellationFlag,
}

impl LoggingProgress {
    pub fn new(cancellation: CancellationFlag) -> Self {
        Self { cancellation }
    }
}

impl Progress for LoggingProgress {
    fn on_document(&self, done: usize, total: usize, document: &str) {
        info!(done, total, document, "processing translation file");
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    fn on_finish(&self, total: usize) {
        info!(done = total, total, "finished");
    }
}

/// Edit applied to one parsed target document.
pub(crate) type DocumentEdit<'a> = dyn Fn(&mut Document) -> Result<DocumentStatus, ParseError> + 'a;

/// Run `edit` over every document in order.
///
/// Read and parse failures skip the document; a failed edit or write marks it
/// failed. Either way the run continues with the next document. The document
/// is only written back when `apply` is set and the edit changed it.
pub(crate) fn run_over_documents(
    path: &str,
    documents: &[TranslationDocument],
    apply: bool,
    progress: &dyn Progress,
    edit: &DocumentEdit<'_>,
) -> SyncReport {
    let total = documents.len();
    let mut report = SyncReport {
        path: path.to_string(),
        applied: apply,
        ..Default::default()
    };

    for (done, document) in documents.iter().enumerate() {
        if progress.is_cancelled() {
            info!(done, total, "cancelled");
            report.cancelled = true;
            break;
        }
        progress.on_document(done, total, &document.name);

        let status = process_document(document, apply, edit);
        if status.is_problem() {
            warn!(document = %document.name, path, "{status}");
        }
        report.outcomes.push(DocumentOutcome {
            document: document.name.clone(),
            status,
        });
    }

    if !report.cancelled {
        progress.on_finish(total);
    }
    report
}

fn process_document(
    document: &TranslationDocument,
    apply: bool,
    edit: &DocumentEdit<'_>,
) -> DocumentStatus {
    let content = match fs::read_to_string(&document.path) {
        Ok(content) => content,
        Err(source) => {
            let error = SyncError::Read {
                path: document.path.clone(),
                source,
            };
            return DocumentStatus::Skipped {
                reason: error.to_string(),
            };
        }
    };
    let mut doc = match Document::parse(content) {
        Ok(doc) => doc,
        Err(source) => {
            let error = SyncError::Parse {
                document: document.name.clone(),
                source,
            };
            return DocumentStatus::Skipped {
                reason: error.to_string(),
            };
        }
    };

    let status = match edit(&mut doc) {
        Ok(status) => status,
        Err(source) => {
            let error = SyncError::Parse {
                document: document.name.clone(),
                source,
            };
            return DocumentStatus::Failed {
                error: error.to_string(),
            };
        }
    };

    if apply
        && status.is_change()
        && let Err(source) = fs::write(&document.path, doc.text())
    {
        let error = SyncError::Write {
            path: document.path.clone(),
            source,
        };
        return DocumentStatus::Failed {
            error: error.to_string(),
        };
    }
    status
}
