use std::{collections::HashMap, sync::OnceLock};

use tracing::debug;

use crate::core::{document::Document, path::path_of};

/// Path → string value map of every leaf in the canonical document.
///
/// Rebuilt all at once from the canonical document; it is never patched, so a
/// reader always sees the state of the last rebuild. Intermediate properties
/// and non-string values are not recorded.
#[derive(Debug, Default)]
pub struct CanonicalValueCache {
    values: HashMap<String, String>,
    /// Set once per session by whoever decides the workspace identity.
    localization_workspace: OnceLock<bool>,
}

impl CanonicalValueCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record whether this workspace holds translation files at all.
    ///
    /// Only the first call has an effect; returns whether it did.
    pub fn set_localization_workspace(&self, is_localization: bool) -> bool {
        self.localization_workspace.set(is_localization).is_ok()
    }

    /// False until the workspace identity has been set.
    pub fn is_localization_workspace(&self) -> bool {
        self.localization_workspace.get().copied().unwrap_or(false)
    }

    /// Replace every entry with the string leaves of `canonical`.
    ///
    /// Does nothing outside a localization workspace.
    pub fn rebuild(&mut self, canonical: &Document) {
        if !self.is_localization_workspace() {
            return;
        }

        let root = canonical.root();
        let values: HashMap<String, String> = canonical
            .all_properties()
            .into_iter()
            .filter_map(|property| {
                let value = canonical.property_value(property)?;
                let text = canonical.string_value(value)?;
                let path = path_of(canonical, property, root)?;
                Some((path.to_string(), text.to_string()))
            })
            .collect();

        debug!(entries = values.len(), "rebuilt canonical value cache");
        self.values = values;
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn value_at(&self, path: &str) -> Option<&str> {
        self.values.get(path).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All cached paths, sorted.
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.values.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }
}
