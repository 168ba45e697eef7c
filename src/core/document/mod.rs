//! Property tree model.
//!
//! A translation file is parsed into an arena of nodes addressed by [`NodeId`].
//! Each node knows its parent and its byte span in the source text; objects
//! keep their properties in document order. Sibling navigation is an index
//! lookup into the parent's property list.
//!
//! The text is the source of truth: every mutation is a splice of the text
//! followed by a full re-parse, so node ids from before an edit must not be
//! reused after it.

mod parser;

use std::ops::Range;

pub use parser::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Byte range in the document text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    Object {
        properties: Vec<NodeId>,
    },
    /// `"name": value`. The span runs from the opening quote of the name
    /// to the end of the value.
    Property {
        name: String,
        name_span: Span,
        value: NodeId,
    },
    String {
        value: String,
    },
    Array {
        items: Vec<NodeId>,
    },
    /// Numbers, booleans and null.
    Other,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub parent: Option<NodeId>,
    pub span: Span,
    pub kind: NodeKind,
}

#[derive(Debug, Clone)]
pub struct Document {
    text: String,
    nodes: Vec<Node>,
    root: NodeId,
    line_index: Vec<usize>,
}

impl Document {
    /// Parse a document whose top-level value is an object.
    pub fn parse(text: impl Into<String>) -> Result<Self, ParseError> {
        let text = text.into();
        let (nodes, root) = parser::Parser::new(&text).parse_document()?;
        let line_index = build_line_index(&text);
        Ok(Self {
            text,
            nodes,
            root,
            line_index,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    /// The top-level object.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn span(&self, id: NodeId) -> Span {
        self.node(id).span
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Source text covered by a node.
    pub fn source(&self, id: NodeId) -> &str {
        let span = self.span(id);
        &self.text[span.start..span.end]
    }

    pub fn is_object(&self, id: NodeId) -> bool {
        matches!(self.node(id).kind, NodeKind::Object { .. })
    }

    pub fn is_property(&self, id: NodeId) -> bool {
        matches!(self.node(id).kind, NodeKind::Property { .. })
    }

    /// Properties of an object node, in document order. Empty for anything
    /// that is not an object.
    pub fn properties(&self, object: NodeId) -> &[NodeId] {
        match &self.node(object).kind {
            NodeKind::Object { properties } => properties,
            _ => &[],
        }
    }

    pub fn find_property(&self, object: NodeId, name: &str) -> Option<NodeId> {
        self.properties(object)
            .iter()
            .copied()
            .find(|&p| self.property_name(p) == Some(name))
    }

    pub fn property_name(&self, property: NodeId) -> Option<&str> {
        match &self.node(property).kind {
            NodeKind::Property { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn property_value(&self, property: NodeId) -> Option<NodeId> {
        match self.node(property).kind {
            NodeKind::Property { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Text between the end of a property's name and the start of its value,
    /// e.g. `": "` or `":"`.
    pub fn key_value_separator(&self, property: NodeId) -> Option<&str> {
        match self.node(property).kind {
            NodeKind::Property {
                name_span, value, ..
            } => Some(&self.text[name_span.end..self.span(value).start]),
            _ => None,
        }
    }

    pub fn string_value(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::String { value } => Some(value),
            _ => None,
        }
    }

    pub fn prev_sibling(&self, property: NodeId) -> Option<NodeId> {
        let (siblings, index) = self.sibling_position(property)?;
        index.checked_sub(1).map(|i| siblings[i])
    }

    pub fn next_sibling(&self, property: NodeId) -> Option<NodeId> {
        let (siblings, index) = self.sibling_position(property)?;
        siblings.get(index + 1).copied()
    }

    fn sibling_position(&self, property: NodeId) -> Option<(&[NodeId], usize)> {
        let siblings = self.properties(self.parent(property)?);
        let index = siblings.iter().position(|&p| p == property)?;
        Some((siblings, index))
    }

    /// Every property in the document, depth-first in document order.
    pub fn all_properties(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_properties(self.root, &mut out);
        out
    }

    fn collect_properties(&self, object: NodeId, out: &mut Vec<NodeId>) {
        for &property in self.properties(object) {
            out.push(property);
            if let Some(value) = self.property_value(property)
                && self.is_object(value)
            {
                self.collect_properties(value, out);
            }
        }
    }

    /// The innermost property whose span contains `offset`.
    pub fn property_at(&self, offset: usize) -> Option<NodeId> {
        let mut current = self.root;
        let mut found = None;
        loop {
            let hit = self
                .properties(current)
                .iter()
                .copied()
                .find(|&p| self.span(p).contains(offset));
            match hit {
                Some(property) => {
                    found = Some(property);
                    match self.property_value(property) {
                        Some(value) if self.is_object(value) => current = value,
                        _ => return found,
                    }
                }
                None => return found,
            }
        }
    }

    /// 1-based line and column (in chars) of a byte offset.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let line = offset_to_line(&self.line_index, offset);
        let line_start = self.line_index[line - 1];
        let column = self.text[line_start..offset].chars().count() + 1;
        (line, column)
    }

    /// Byte offset of a 1-based line and column.
    pub fn offset_of(&self, line: usize, column: usize) -> Option<usize> {
        let line_start = *self.line_index.get(line.checked_sub(1)?)?;
        let line_end = self
            .line_index
            .get(line)
            .copied()
            .unwrap_or(self.text.len());
        let line_text = &self.text[line_start..line_end];
        let skip = column.checked_sub(1)?;
        match line_text.char_indices().nth(skip) {
            Some((i, _)) => Some(line_start + i),
            None if skip == line_text.chars().count() => Some(line_end),
            None => None,
        }
    }

    /// Byte offset where the line containing `offset` starts.
    pub fn line_start(&self, offset: usize) -> usize {
        self.line_index[offset_to_line(&self.line_index, offset) - 1]
    }

    /// Leading whitespace of the line containing `offset`.
    pub fn line_indent(&self, offset: usize) -> &str {
        let start = self.line_start(offset);
        let rest = &self.text[start..];
        let len = rest.len() - rest.trim_start_matches([' ', '\t']).len();
        &rest[..len]
    }

    /// The whitespace run immediately before `offset`.
    pub fn whitespace_before(&self, offset: usize) -> &str {
        let before = &self.text[..offset];
        let trimmed = before.trim_end_matches([' ', '\t', '\n', '\r']);
        &before[trimmed.len()..]
    }

    /// Byte offset of the first non-whitespace character at or after `offset`.
    pub fn next_token(&self, offset: usize) -> Option<(usize, char)> {
        self.text[offset..]
            .char_indices()
            .find(|(_, c)| !c.is_whitespace())
            .map(|(i, c)| (offset + i, c))
    }

    pub fn is_multiline(&self) -> bool {
        self.line_index.len() > 1
    }

    /// `"\r\n"` when the document uses CRLF line endings, `"\n"` otherwise.
    pub fn line_ending(&self) -> &'static str {
        if self.text.contains("\r\n") { "\r\n" } else { "\n" }
    }

    /// Replace `range` with `replacement` and re-parse. The document is left
    /// untouched when the edited text no longer parses.
    pub fn splice(&mut self, range: Range<usize>, replacement: &str) -> Result<(), ParseError> {
        let mut text = String::with_capacity(self.text.len() + replacement.len());
        text.push_str(&self.text[..range.start]);
        text.push_str(replacement);
        text.push_str(&self.text[range.end..]);
        *self = Self::parse(text)?;
        Ok(())
    }

    /// Apply several non-overlapping edits at once, then re-parse.
    pub fn splice_all(&mut self, mut edits: Vec<(Range<usize>, String)>) -> Result<(), ParseError> {
        edits.sort_by(|a, b| b.0.start.cmp(&a.0.start));
        let mut text = self.text.clone();
        for (range, replacement) in edits {
            text.replace_range(range, &replacement);
        }
        *self = Self::parse(text)?;
        Ok(())
    }
}

/// Build an index of line start byte offsets for O(log n) line lookups.
fn build_line_index(content: &str) -> Vec<usize> {
    let mut offsets = vec![0];
    for (i, c) in content.char_indices() {
        if c == '\n' {
            offsets.push(i + 1);
        }
    }
    offsets
}

/// 1-based line number for a byte offset.
fn offset_to_line(line_index: &[usize], offset: usize) -> usize {
    match line_index.binary_search(&offset) {
        Ok(line) => line + 1,
        Err(line) => line,
    }
}
