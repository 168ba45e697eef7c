//! Propagation of a canonical leaf into a target document.
//!
//! The target is walked along the path. Each missing level is created in
//! place, positioned relative to the names of its neighbours in the canonical
//! document:
//!
//! | canonical neighbours | found in target | placement            |
//! |----------------------|-----------------|----------------------|
//! | none                 | -               | first (or only)      |
//! | next only            | next            | before next          |
//! | next only            | nothing         | first                |
//! | previous             | previous        | after previous       |
//! | previous             | nothing         | first                |
//!
//! Existing properties are never overwritten.

use serde_json::Value;

use crate::core::{
    document::{Document, NodeId, ParseError},
    error::SyncError,
    path::{PropertyPath, object_at, resolve},
    sync::indent::{IndentStyle, indent_unit, tabify_object},
};

const DEFAULT_SEPARATOR: &str = ": ";

/// One path level as it appears in the canonical document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedProperty {
    pub name: String,
    pub prev: Option<String>,
    pub next: Option<String>,
    /// Key/value separator used by the canonical property, e.g. `": "`.
    pub separator: String,
}

/// Everything the insertion needs from the canonical document, captured once
/// so every target sees the same snapshot.
#[derive(Debug, Clone)]
pub struct PropagationPlan {
    pub path: PropertyPath,
    pub levels: Vec<PlannedProperty>,
    /// Source text of the canonical value, quotes and escapes included.
    pub leaf_source: String,
}

impl PropagationPlan {
    /// Fails when `path` is missing from `canonical` or does not hold a
    /// string.
    pub fn new(canonical: &Document, path: &PropertyPath) -> Result<Self, SyncError> {
        let property = resolve(canonical, path)
            .found()
            .ok_or_else(|| SyncError::NotInCanonical(path.to_string()))?;
        let value = canonical
            .property_value(property)
            .filter(|&v| canonical.string_value(v).is_some())
            .ok_or_else(|| SyncError::NotALeaf(path.to_string()))?;

        // Walk up from the leaf so each level uses the real canonical node.
        let mut levels = Vec::with_capacity(path.len());
        let mut current = Some(property);
        while let Some(node) = current {
            if let Some(name) = canonical.property_name(node) {
                let neighbour_name =
                    |id: Option<NodeId>| id.and_then(|id| canonical.property_name(id)).map(str::to_string);
                levels.push(PlannedProperty {
                    name: name.to_string(),
                    prev: neighbour_name(canonical.prev_sibling(node)),
                    next: neighbour_name(canonical.next_sibling(node)),
                    separator: canonical
                        .key_value_separator(node)
                        .unwrap_or(DEFAULT_SEPARATOR)
                        .to_string(),
                });
            }
            current = canonical.parent(node);
        }
        levels.reverse();

        Ok(Self {
            path: path.clone(),
            levels,
            leaf_source: canonical.source(value).to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    AlreadyPresent,
    /// A property on the path exists with a non-object value.
    Conflict { at: String },
}

/// Insert the planned leaf into `target`, creating missing intermediate
/// objects on the way.
pub fn insert_into(
    target: &mut Document,
    plan: &PropagationPlan,
    style: IndentStyle,
) -> Result<InsertOutcome, ParseError> {
    let segments = plan.path.segments();
    let conflict_at = |depth: usize| InsertOutcome::Conflict {
        at: segments[..depth].join("."),
    };

    for (i, level) in plan.levels.iter().enumerate() {
        let is_leaf = i + 1 == plan.levels.len();
        // Node ids do not survive an edit, so the cursor is re-resolved by path.
        let Some(object) = object_at(target, &segments[..i]) else {
            return Ok(conflict_at(i));
        };

        if let Some(existing) = target.find_property(object, &level.name) {
            if is_leaf {
                return Ok(InsertOutcome::AlreadyPresent);
            }
            match target.property_value(existing) {
                Some(value) if target.is_object(value) => continue,
                _ => return Ok(conflict_at(i + 1)),
            }
        }

        let value = if is_leaf { plan.leaf_source.as_str() } else { "{}" };
        let rendered = render_property(target, level, value);
        place_property(target, object, level, &rendered, style)?;

        if is_leaf {
            if style == IndentStyle::Tabs
                && let Some(object) = object_at(target, &segments[..i])
            {
                tabify_object(target, object)?;
            }
            return Ok(InsertOutcome::Inserted);
        }
    }

    Ok(InsertOutcome::AlreadyPresent)
}

/// `"name": value`, using the separator style already present in `target`.
fn render_property(target: &Document, level: &PlannedProperty, value: &str) -> String {
    let separator = target
        .all_properties()
        .first()
        .and_then(|&p| target.key_value_separator(p))
        .unwrap_or(level.separator.as_str());
    format!("{}{}{}", Value::from(level.name.as_str()), separator, value)
}

enum Placement {
    Before(NodeId),
    After(NodeId),
    Sole,
}

fn placement(target: &Document, object: NodeId, level: &PlannedProperty) -> Placement {
    let anchor = |name: &Option<String>| {
        name.as_deref()
            .and_then(|name| target.find_property(object, name))
    };

    let found = match (&level.prev, &level.next) {
        (Some(_), _) => anchor(&level.prev).map(Placement::After),
        (None, Some(_)) => anchor(&level.next).map(Placement::Before),
        (None, None) => None,
    };

    found.unwrap_or_else(|| match target.properties(object).first() {
        Some(&first) => Placement::Before(first),
        None => Placement::Sole,
    })
}

fn place_property(
    target: &mut Document,
    object: NodeId,
    level: &PlannedProperty,
    rendered: &str,
    style: IndentStyle,
) -> Result<(), ParseError> {
    match placement(target, object, level) {
        Placement::Before(anchor) => {
            let start = target.span(anchor).start;
            let text = format!("{rendered},{}", target.whitespace_before(start));
            target.splice(start..start, &text)
        }
        Placement::After(prev) => {
            let prev_span = target.span(prev);
            let next = target.next_sibling(prev);
            match target.next_token(prev_span.end) {
                Some((comma, ',')) => {
                    let lead = match next {
                        Some(next) => target.whitespace_before(target.span(next).start),
                        None => target.whitespace_before(prev_span.start),
                    };
                    let trailing = if next.is_some() { "," } else { "" };
                    let text = format!("{lead}{rendered}{trailing}");
                    target.splice(comma + 1..comma + 1, &text)
                }
                _ => {
                    let text = format!(",{}{rendered}", target.whitespace_before(prev_span.start));
                    target.splice(prev_span.end..prev_span.end, &text)
                }
            }
        }
        Placement::Sole => {
            let span = target.span(object);
            let interior = span.start + 1..span.end - 1;
            let text = if target.is_multiline() {
                let indent = target.line_indent(span.start).to_string();
                let unit = indent_unit(target, style);
                let eol = target.line_ending();
                format!("{eol}{indent}{unit}{rendered}{eol}{indent}")
            } else {
                rendered.to_string()
            };
            target.splice(interior, &text)
        }
    }
}
