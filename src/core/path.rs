//! Dotted property paths over a [`Document`].
//!
//! A path such as `setting.editor.name` names a property by walking from the
//! root object one segment at a time. Segments are split on `.` with no
//! escaping, so a property whose own name contains a dot cannot be addressed
//! unambiguously.

use std::fmt;

use crate::core::{
    document::{Document, NodeId},
    error::SyncError,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyPath(Vec<String>);

impl PropertyPath {
    pub fn parse(raw: &str) -> Result<Self, SyncError> {
        if raw.is_empty() {
            return Err(SyncError::EmptyPath);
        }
        Ok(Self(raw.split('.').map(str::to_string).collect()))
    }

    pub fn from_segments(segments: Vec<String>) -> Result<Self, SyncError> {
        if segments.is_empty() {
            return Err(SyncError::EmptyPath);
        }
        Ok(Self(segments))
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Name of the addressed property.
    pub fn last(&self) -> &str {
        self.0.last().map(String::as_str).unwrap_or_default()
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

/// Outcome of walking a path through a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Every segment matched; holds the property node.
    Found(NodeId),
    /// The walk reached a property whose value is not an object while
    /// segments remained. `matched` counts the segments consumed.
    Partial { deepest: NodeId, matched: usize },
    NotFound,
}

impl Resolution {
    /// The property node, only for a full match.
    pub fn found(self) -> Option<NodeId> {
        match self {
            Resolution::Found(id) => Some(id),
            _ => None,
        }
    }
}

/// Walk `node` up to `root`, collecting the names of enclosing properties.
///
/// Returns `None` when `node` is not below `root`, or when it sits at the
/// root level with no enclosing property.
pub fn path_of(doc: &Document, node: NodeId, root: NodeId) -> Option<PropertyPath> {
    let mut names = Vec::new();
    let mut current = Some(node);
    while let Some(id) = current {
        if id == root {
            names.reverse();
            return PropertyPath::from_segments(names).ok();
        }
        if let Some(name) = doc.property_name(id) {
            names.push(name.to_string());
        }
        current = doc.parent(id);
    }
    None
}

/// Resolve a path from the document root.
///
/// Stops at the first non-object value with segments still remaining and
/// reports it as [`Resolution::Partial`]; callers that need a real property
/// must use [`Resolution::found`].
pub fn resolve(doc: &Document, path: &PropertyPath) -> Resolution {
    let mut cursor = doc.root();
    for (i, segment) in path.segments().iter().enumerate() {
        let Some(property) = doc.find_property(cursor, segment) else {
            return Resolution::NotFound;
        };
        if i + 1 == path.len() {
            return Resolution::Found(property);
        }
        match doc.property_value(property) {
            Some(value) if doc.is_object(value) => cursor = value,
            _ => {
                return Resolution::Partial {
                    deepest: property,
                    matched: i + 1,
                };
            }
        }
    }
    Resolution::NotFound
}

/// The object reached by following `segments` from the root, if every
/// segment names a property holding an object.
pub fn object_at(doc: &Document, segments: &[String]) -> Option<NodeId> {
    let mut cursor = doc.root();
    for segment in segments {
        let property = doc.find_property(cursor, segment)?;
        let value = doc.property_value(property)?;
        if !doc.is_object(value) {
            return None;
        }
        cursor = value;
    }
    Some(cursor)
}

/// String value of the leaf at `path`, if the path fully resolves to one.
pub fn leaf_value<'a>(doc: &'a Document, path: &PropertyPath) -> Option<&'a str> {
    let property = resolve(doc, path).found()?;
    doc.string_value(doc.property_value(property)?)
}
