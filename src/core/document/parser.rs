//! Span-preserving JSON parser.
//!
//! Builds the arena for a [`Document`](super::Document). Unlike serde_json it
//! records the byte span of every property, name and value so edits can be
//! applied to the original text without reformatting anything around them.
//! Trailing commas in objects and arrays are tolerated.

use thiserror::Error;

use super::{Node, NodeId, NodeKind, Span};

/// Deepest object/array nesting accepted, matching serde_json's default.
const MAX_DEPTH: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at line {line}, column {column}")]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

pub(super) struct Parser<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
    nodes: Vec<Node>,
}

impl<'a> Parser<'a> {
    pub(super) fn new(text: &'a str) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
            depth: 0,
            nodes: Vec::new(),
        }
    }

    pub(super) fn parse_document(mut self) -> Result<(Vec<Node>, NodeId), ParseError> {
        if self.text.starts_with('\u{feff}') {
            self.pos = '\u{feff}'.len_utf8();
        }
        self.skip_whitespace();
        if self.peek() != Some(b'{') {
            return Err(self.error("top-level value is not an object"));
        }
        let root = self.parse_object(None)?;
        self.skip_whitespace();
        if self.pos < self.bytes.len() {
            return Err(self.error("unexpected content after the top-level object"));
        }
        Ok((self.nodes, root))
    }

    fn push(&mut self, parent: Option<NodeId>, span: Span, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node { parent, span, kind });
        id
    }

    fn parse_value(&mut self, parent: Option<NodeId>) -> Result<NodeId, ParseError> {
        match self.peek() {
            Some(b'{') => self.parse_object(parent),
            Some(b'[') => self.parse_array(parent),
            Some(b'"') => {
                let start = self.pos;
                let value = self.parse_string()?;
                Ok(self.push(parent, Span::new(start, self.pos), NodeKind::String { value }))
            }
            Some(_) => self.parse_scalar(parent),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn parse_object(&mut self, parent: Option<NodeId>) -> Result<NodeId, ParseError> {
        self.enter_nested()?;
        let start = self.pos;
        self.pos += 1;
        let object = self.push(
            parent,
            Span::new(start, start),
            NodeKind::Object {
                properties: Vec::new(),
            },
        );

        let mut properties = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(b'}') => {
                    self.pos += 1;
                    break;
                }
                Some(b'"') => {}
                Some(_) => return Err(self.error("expected a property name")),
                None => return Err(self.error("unterminated object")),
            }

            properties.push(self.parse_property(object)?);

            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'}') => {}
                Some(_) => return Err(self.error("expected ',' or '}'")),
                None => return Err(self.error("unterminated object")),
            }
        }

        let node = &mut self.nodes[object.0];
        node.span.end = self.pos;
        node.kind = NodeKind::Object { properties };
        self.depth -= 1;
        Ok(object)
    }

    fn parse_property(&mut self, object: NodeId) -> Result<NodeId, ParseError> {
        let name_start = self.pos;
        let name = self.parse_string()?;
        let name_span = Span::new(name_start, self.pos);

        self.skip_whitespace();
        if self.peek() != Some(b':') {
            return Err(self.error("expected ':' after property name"));
        }
        self.pos += 1;
        self.skip_whitespace();

        // Reserve the slot first so the value can point at its parent.
        let property = self.push(
            Some(object),
            Span::new(name_start, name_start),
            NodeKind::Other,
        );
        let value = self.parse_value(Some(property))?;

        let node = &mut self.nodes[property.0];
        node.span.end = self.pos;
        node.kind = NodeKind::Property {
            name,
            name_span,
            value,
        };
        Ok(property)
    }

    fn parse_array(&mut self, parent: Option<NodeId>) -> Result<NodeId, ParseError> {
        self.enter_nested()?;
        let start = self.pos;
        self.pos += 1;
        let array = self.push(
            parent,
            Span::new(start, start),
            NodeKind::Array { items: Vec::new() },
        );

        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(b']') => {
                    self.pos += 1;
                    break;
                }
                Some(_) => {}
                None => return Err(self.error("unterminated array")),
            }

            items.push(self.parse_value(Some(array))?);

            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {}
                Some(_) => return Err(self.error("expected ',' or ']'")),
                None => return Err(self.error("unterminated array")),
            }
        }

        let node = &mut self.nodes[array.0];
        node.span.end = self.pos;
        node.kind = NodeKind::Array { items };
        self.depth -= 1;
        Ok(array)
    }

    fn enter_nested(&mut self) -> Result<(), ParseError> {
        if self.depth == MAX_DEPTH {
            return Err(self.error("nesting too deep"));
        }
        self.depth += 1;
        Ok(())
    }

    fn parse_scalar(&mut self, parent: Option<NodeId>) -> Result<NodeId, ParseError> {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if is_whitespace(b) || matches!(b, b',' | b'}' | b']' | b':') {
                break;
            }
            self.pos += 1;
        }

        let token = &self.text[start..self.pos];
        let is_number = token
            .bytes()
            .next()
            .is_some_and(|b| b == b'-' || b.is_ascii_digit())
            && token.parse::<f64>().is_ok();
        if !is_number && !matches!(token, "true" | "false" | "null") {
            self.pos = start;
            return Err(self.error("unexpected token"));
        }

        Ok(self.push(parent, Span::new(start, self.pos), NodeKind::Other))
    }

    fn parse_string(&mut self) -> Result<String, ParseError> {
        self.pos += 1;
        let mut out = String::new();
        loop {
            // Only ASCII bytes stop the scan, so the slice never splits a char.
            let run_start = self.pos;
            while let Some(b) = self.peek() {
                if b == b'"' || b == b'\\' || b < 0x20 {
                    break;
                }
                self.pos += 1;
            }
            out.push_str(&self.text[run_start..self.pos]);

            match self.peek() {
                Some(b'"') => {
                    self.pos += 1;
                    return Ok(out);
                }
                Some(b'\\') => {
                    self.pos += 1;
                    let c = self.parse_escape()?;
                    out.push(c);
                }
                Some(_) => return Err(self.error("unescaped control character in string")),
                None => return Err(self.error("unterminated string")),
            }
        }
    }

    fn parse_escape(&mut self) -> Result<char, ParseError> {
        let Some(b) = self.peek() else {
            return Err(self.error("unterminated escape sequence"));
        };
        self.pos += 1;
        let c = match b {
            b'"' => '"',
            b'\\' => '\\',
            b'/' => '/',
            b'b' => '\u{8}',
            b'f' => '\u{c}',
            b'n' => '\n',
            b'r' => '\r',
            b't' => '\t',
            b'u' => return self.parse_unicode_escape(),
            _ => {
                self.pos -= 1;
                return Err(self.error("invalid escape sequence"));
            }
        };
        Ok(c)
    }

    fn parse_unicode_escape(&mut self) -> Result<char, ParseError> {
        let high = self.parse_hex4()?;
        if !(0xD800..0xDC00).contains(&high) {
            return char::from_u32(high).ok_or_else(|| self.error("invalid unicode escape"));
        }

        if !self.text[self.pos..].starts_with("\\u") {
            return Err(self.error("unpaired surrogate in unicode escape"));
        }
        self.pos += 2;
        let low = self.parse_hex4()?;
        if !(0xDC00..0xE000).contains(&low) {
            return Err(self.error("invalid low surrogate in unicode escape"));
        }
        char::from_u32(0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00))
            .ok_or_else(|| self.error("invalid unicode escape"))
    }

    fn parse_hex4(&mut self) -> Result<u32, ParseError> {
        let digits = self
            .text
            .get(self.pos..self.pos + 4)
            .filter(|s| s.bytes().all(|b| b.is_ascii_hexdigit()))
            .ok_or_else(|| self.error("expected four hex digits"))?;
        let value =
            u32::from_str_radix(digits, 16).map_err(|_| self.error("expected four hex digits"))?;
        self.pos += 4;
        Ok(value)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(is_whitespace) {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn error(&self, message: &str) -> ParseError {
        let consumed = &self.text[..self.pos.min(self.text.len())];
        let line = consumed.matches('\n').count() + 1;
        let line_start = consumed.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = consumed[line_start..].chars().count() + 1;
        ParseError {
            message: message.to_string(),
            line,
            column,
        }
    }
}

fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}
