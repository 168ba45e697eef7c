use std::{io, path::PathBuf};

use thiserror::Error;

use super::document::ParseError;

/// Errors surfaced by the sync engine that callers are expected to branch on.
///
/// Per-document failures during propagate/prune never escape as `SyncError`;
/// they are folded into the [`SyncReport`](super::sync::SyncReport) instead.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("property path must not be empty")]
    EmptyPath,

    #[error("canonical document '{}' was not found", .0.display())]
    CanonicalMissing(PathBuf),

    #[error("translations directory '{}' does not exist", .0.display())]
    RootMissing(PathBuf),

    #[error("failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{document}: {source}")]
    Parse {
        document: String,
        #[source]
        source: ParseError,
    },

    #[error("property '{0}' is not present in the canonical document")]
    NotInCanonical(String),

    #[error("property '{0}' does not hold a string value in the canonical document")]
    NotALeaf(String),

    #[error("no property encloses line {line}, column {column} of the canonical document")]
    NoPropertyAt { line: usize, column: usize },

    #[error("translation file '{0}' was not found")]
    DocumentMissing(String),

    #[error("property '{path}' is not present in translation file '{document}'")]
    TranslationMissing { path: String, document: String },
}
