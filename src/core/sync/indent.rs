//! Indentation of inserted properties.

use serde::{Deserialize, Serialize};

use crate::core::document::{Document, NodeId, ParseError};

/// How inserted properties are indented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum IndentStyle {
    /// Reuse the whitespace around the anchor property.
    #[default]
    Auto,
    /// Rewrite space indentation of the receiving object's property lines to
    /// tabs after a leaf insertion.
    Tabs,
}

/// One level of indentation as used by `doc`.
///
/// Taken from the first indented line; falls back to a tab for
/// [`IndentStyle::Tabs`] and two spaces otherwise.
pub fn indent_unit(doc: &Document, style: IndentStyle) -> String {
    let detected = doc.text().lines().find_map(|line| {
        let indent = &line[..line.len() - line.trim_start_matches([' ', '\t']).len()];
        match indent.chars().next() {
            Some('\t') => Some("\t".to_string()),
            Some(_) if !line.trim().is_empty() => Some(indent.to_string()),
            _ => None,
        }
    });

    detected.unwrap_or_else(|| match style {
        IndentStyle::Tabs => "\t".to_string(),
        IndentStyle::Auto => "  ".to_string(),
    })
}

/// Replace space indentation with tabs on every line that holds a property of
/// `object`.
///
/// Four-space runs are tried first, then two-space runs; there is no
/// formatter configuration to consult.
pub fn tabify_object(doc: &mut Document, object: NodeId) -> Result<(), ParseError> {
    let mut edits = Vec::new();
    let mut seen_lines = Vec::new();

    for &property in doc.properties(object) {
        let offset = doc.span(property).start;
        let line_start = doc.line_start(offset);
        if seen_lines.contains(&line_start) {
            continue;
        }
        seen_lines.push(line_start);

        let indent = doc.line_indent(offset);
        let replaced = if indent.contains("    ") {
            indent.replace("    ", "\t")
        } else if indent.contains("  ") {
            indent.replace("  ", "\t")
        } else {
            continue;
        };
        edits.push((line_start..line_start + indent.len(), replaced));
    }

    if edits.is_empty() {
        return Ok(());
    }
    doc.splice_all(edits)
}
