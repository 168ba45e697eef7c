//! Explicit context for one workspace.
//!
//! A [`Session`] owns the canonical value cache and the settings that locate
//! translation files. It is created when a host opens a workspace and dropped
//! when it closes it; every operation goes through it, there is no global
//! state. Rebuilding the cache takes `&mut self`, so a rebuild can never
//! overlap a lookup.

use std::{
    fs,
    path::{Path, PathBuf},
};

use glob::Pattern;
use tracing::{debug, warn};

use crate::core::{
    cache::CanonicalValueCache,
    discovery::{TranslationDocument, list_translation_documents},
    document::{Document, ParseError},
    error::SyncError,
    path::{PropertyPath, path_of, resolve},
    placeholders::{self, ConsistencyReport},
    sync::{
        DeleteOutcome, DocumentStatus, IndentStyle, InsertOutcome, Progress, PropagationPlan,
        SyncReport, delete_from, insert_into, run_over_documents,
    },
};

/// Where the translation files live and how to treat them.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Directory holding the canonical and translation documents.
    pub root: PathBuf,
    /// File name of the canonical document, e.g. `en.json`.
    pub canonical_file: String,
    /// File names that are never translation documents.
    pub reserved: Vec<Pattern>,
    pub indent_style: IndentStyle,
    /// A root directory whose name contains this is a localization workspace.
    pub workspace_marker: String,
}

/// A string leaf of a translation document, with its consistency report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueFinding {
    pub path: String,
    pub value: String,
    pub line: usize,
    pub column: usize,
    pub report: ConsistencyReport,
}

pub struct Session {
    settings: SessionSettings,
    cache: CanonicalValueCache,
}

impl Session {
    /// An empty session; the cache stays empty until the workspace identity
    /// is set and the cache rebuilt. See [`Session::open`].
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            settings,
            cache: CanonicalValueCache::new(),
        }
    }

    /// Create a session, decide whether the workspace holds translations,
    /// and build the cache from the canonical document.
    ///
    /// A missing or unreadable canonical document is logged and leaves the
    /// cache empty; the session is still usable for discovery.
    pub fn open(settings: SessionSettings, config_from_file: bool) -> Self {
        let mut session = Self::new(settings);
        let is_localization = session.detect_localization_workspace(config_from_file);
        session.cache.set_localization_workspace(is_localization);
        debug!(is_localization, root = %session.settings.root.display(), "opened session");
        // Failure is already logged by rebuild_cache.
        let _ = session.rebuild_cache();
        session
    }

    fn detect_localization_workspace(&self, config_from_file: bool) -> bool {
        let marker = &self.settings.workspace_marker;
        let named_like_workspace = !marker.is_empty()
            && self
                .settings
                .root
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|name| name.contains(marker.as_str()));
        config_from_file || named_like_workspace || self.canonical_path().is_file()
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn root(&self) -> &Path {
        &self.settings.root
    }

    pub fn canonical_path(&self) -> PathBuf {
        self.settings.root.join(&self.settings.canonical_file)
    }

    pub fn cache(&self) -> &CanonicalValueCache {
        &self.cache
    }

    pub fn is_localization_workspace(&self) -> bool {
        self.cache.is_localization_workspace()
    }

    pub fn load_canonical(&self) -> Result<Document, SyncError> {
        let path = self.canonical_path();
        if !path.is_file() {
            return Err(SyncError::CanonicalMissing(path));
        }
        load_document(&path, &self.settings.canonical_file)
    }

    /// Rebuild the cache from the canonical document on disk.
    ///
    /// On failure the previous entries are dropped rather than kept stale.
    pub fn rebuild_cache(&mut self) -> Result<(), SyncError> {
        match self.load_canonical() {
            Ok(canonical) => {
                self.cache.rebuild(&canonical);
                Ok(())
            }
            Err(error) => {
                warn!("{error}");
                self.cache.clear();
                Err(error)
            }
        }
    }

    /// Entry point for hosts that hold the canonical document in memory.
    pub fn on_canonical_document_changed(&mut self, content: &str) -> Result<(), SyncError> {
        let canonical = Document::parse(content).map_err(|source| SyncError::Parse {
            document: self.settings.canonical_file.clone(),
            source,
        })?;
        self.cache.rebuild(&canonical);
        Ok(())
    }

    pub fn value_at(&self, path: &str) -> Option<&str> {
        self.cache.value_at(path)
    }

    pub fn check_consistency(&self, path: &str, candidate: &str) -> Option<ConsistencyReport> {
        placeholders::check(&self.cache, path, candidate)
    }

    /// Translation documents of the workspace. The canonical document is
    /// included only with `include_self`.
    pub fn translation_documents(
        &self,
        include_self: bool,
    ) -> Result<Vec<TranslationDocument>, SyncError> {
        list_translation_documents(
            &self.settings.root,
            &self.settings.canonical_file,
            &self.settings.reserved,
            include_self,
        )
    }

    /// Dotted path of the innermost property enclosing a 1-based position of
    /// the canonical document.
    pub fn resolve_path_at(&self, line: usize, column: usize) -> Result<PropertyPath, SyncError> {
        let canonical = self.load_canonical()?;
        canonical
            .offset_of(line, column)
            .and_then(|offset| canonical.property_at(offset))
            .and_then(|property| path_of(&canonical, property, canonical.root()))
            .ok_or(SyncError::NoPropertyAt { line, column })
    }

    /// Insert the canonical leaf at `path` into every sibling document that
    /// lacks it.
    pub fn propagate(
        &self,
        path: &PropertyPath,
        apply: bool,
        progress: &dyn Progress,
    ) -> Result<SyncReport, SyncError> {
        let canonical = self.load_canonical()?;
        let plan = PropagationPlan::new(&canonical, path)?;
        let documents = self.translation_documents(false)?;
        let style = self.settings.indent_style;

        let edit = |doc: &mut Document| -> Result<DocumentStatus, ParseError> {
            Ok(match insert_into(doc, &plan, style)? {
                InsertOutcome::Inserted => DocumentStatus::Inserted,
                InsertOutcome::AlreadyPresent => DocumentStatus::AlreadyPresent,
                InsertOutcome::Conflict { at } => DocumentStatus::Conflict { at },
            })
        };
        Ok(run_over_documents(
            &path.to_string(),
            &documents,
            apply,
            progress,
            &edit,
        ))
    }

    /// Delete `path` from every translation document, the canonical one
    /// included.
    ///
    /// The path may already be gone from the canonical document; when it is
    /// still there it must be a string leaf. Rebuilds the cache when the
    /// canonical document was rewritten.
    pub fn prune(
        &mut self,
        path: &PropertyPath,
        apply: bool,
        progress: &dyn Progress,
    ) -> Result<SyncReport, SyncError> {
        let canonical = self.load_canonical()?;
        if let Some(property) = resolve(&canonical, path).found()
            && canonical
                .property_value(property)
                .and_then(|v| canonical.string_value(v))
                .is_none()
        {
            return Err(SyncError::NotALeaf(path.to_string()));
        }
        let documents = self.translation_documents(true)?;

        let edit = |doc: &mut Document| -> Result<DocumentStatus, ParseError> {
            Ok(match delete_from(doc, path)? {
                DeleteOutcome::Deleted => DocumentStatus::Deleted,
                DeleteOutcome::NotFound => DocumentStatus::NotFound,
            })
        };
        let report = run_over_documents(&path.to_string(), &documents, apply, progress, &edit);

        let canonical_changed = report.outcomes.iter().any(|o| {
            o.document == self.settings.canonical_file && o.status == DocumentStatus::Deleted
        });
        if apply && canonical_changed {
            // Failure is already logged by rebuild_cache.
            let _ = self.rebuild_cache();
        }
        Ok(report)
    }

    /// The value at `path` in one translation document, chosen by file name
    /// (`ro.json`) or locale (`ro`).
    pub fn lookup_translation(
        &self,
        path: &PropertyPath,
        document: &str,
    ) -> Result<String, SyncError> {
        let chosen = self
            .translation_documents(true)?
            .into_iter()
            .find(|d| d.name == document || d.locale == document)
            .ok_or_else(|| SyncError::DocumentMissing(document.to_string()))?;
        let doc = load_document(&chosen.path, &chosen.name)?;

        lookup_in(&doc, path).ok_or_else(|| SyncError::TranslationMissing {
            path: path.to_string(),
            document: chosen.name.clone(),
        })
    }

    /// The value at `path` in every sibling document; `None` where absent.
    /// Unreadable documents are logged and left out.
    pub fn lookup_everywhere(
        &self,
        path: &PropertyPath,
    ) -> Result<Vec<(TranslationDocument, Option<String>)>, SyncError> {
        let documents = self.translation_documents(false)?;
        Ok(documents
            .into_iter()
            .filter_map(|document| match load_document(&document.path, &document.name) {
                Ok(doc) => {
                    let value = lookup_in(&doc, path);
                    Some((document, value))
                }
                Err(error) => {
                    warn!("{error}");
                    None
                }
            })
            .collect())
    }

    /// Check every string leaf of `document` against the canonical values.
    /// Only leaves with a placeholder mismatch are returned.
    pub fn check_document(
        &self,
        document: &TranslationDocument,
    ) -> Result<Vec<ValueFinding>, SyncError> {
        let doc = load_document(&document.path, &document.name)?;
        let root = doc.root();

        let findings = doc
            .all_properties()
            .into_iter()
            .filter_map(|property| {
                let value_node = doc.property_value(property)?;
                let value = doc.string_value(value_node)?;
                let path = path_of(&doc, property, root)?.to_string();
                let report = self.check_consistency(&path, value)?;
                if report.is_consistent() {
                    return None;
                }
                let (line, column) = doc.line_col(doc.span(value_node).start);
                Some(ValueFinding {
                    path,
                    value: value.to_string(),
                    line,
                    column,
                    report,
                })
            })
            .collect();
        Ok(findings)
    }
}

fn load_document(path: &Path, name: &str) -> Result<Document, SyncError> {
    let content = fs::read_to_string(path).map_err(|source| SyncError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Document::parse(content).map_err(|source| SyncError::Parse {
        document: name.to_string(),
        source,
    })
}

/// Walk `doc` segment by segment. A missing segment, a non-object
/// intermediate, or a non-string leaf all count as absent.
fn lookup_in(doc: &Document, path: &PropertyPath) -> Option<String> {
    let property = resolve(doc, path).found()?;
    doc.string_value(doc.property_value(property)?)
        .map(str::to_string)
}
