use std::{
    fs,
    path::{Path, PathBuf},
};

use glob::Pattern;

use crate::core::error::SyncError;

/// A JSON document directly under the translations root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationDocument {
    pub path: PathBuf,
    /// File name, e.g. `ro.json`.
    pub name: String,
    /// File stem, e.g. `ro`.
    pub locale: String,
}

/// Enumerate translation documents under `root_dir`.
///
/// Only `.json` files that are direct children of `root_dir` qualify.
/// Subdirectories, other files, and names matching a `reserved` pattern are
/// skipped without error. The canonical document (`canonical_name`) is part
/// of the result only when `include_self` is set.
///
/// Results are sorted by file name.
pub fn list_translation_documents(
    root_dir: &Path,
    canonical_name: &str,
    reserved: &[Pattern],
    include_self: bool,
) -> Result<Vec<TranslationDocument>, SyncError> {
    if !root_dir.is_dir() {
        return Err(SyncError::RootMissing(root_dir.to_path_buf()));
    }

    let read_error = |source| SyncError::Read {
        path: root_dir.to_path_buf(),
        source,
    };

    let mut documents = Vec::new();
    for entry in fs::read_dir(root_dir).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()).map(str::to_string) else {
            continue;
        };
        if reserved.iter().any(|pattern| pattern.matches(&name)) {
            continue;
        }
        if name == canonical_name && !include_self {
            continue;
        }
        let locale = extract_locale(&path).unwrap_or_else(|| name.clone());
        documents.push(TranslationDocument { path, name, locale });
    }

    documents.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(documents)
}

/// Extracts locale from filename.
///
/// Examples:
/// - "en.json" -> Some("en")
/// - "zh-CN.json" -> Some("zh-CN")
pub fn extract_locale(path: impl AsRef<Path>) -> Option<String> {
    path.as_ref()
        .file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}
