//! Synchronization and consistency engine.
//!
//! - `document`: span-preserving property tree of one JSON document
//! - `path`: dotted property paths and their resolution
//! - `cache`: canonical path → value map
//! - `discovery`: translation documents next to the canonical one
//! - `sync`: propagate and prune across documents
//! - `placeholders`: `{{name}}` consistency checking
//! - `session`: the per-workspace context tying these together

pub mod cache;
pub mod discovery;
pub mod document;
pub mod error;
pub mod path;
pub mod placeholders;
pub mod session;
pub mod sync;

pub use cache::CanonicalValueCache;
pub use discovery::{TranslationDocument, list_translation_documents};
pub use document::{Document, NodeId, ParseError};
pub use error::SyncError;
pub use path::{PropertyPath, Resolution};
pub use placeholders::ConsistencyReport;
pub use session::{Session, SessionSettings, ValueFinding};
pub use sync::{
    CancellationFlag, DocumentOutcome, DocumentStatus, IndentStyle, LoggingProgress, NoProgress,
    Progress, SyncReport,
};
