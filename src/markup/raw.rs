//! Raw parse tree produced by the markup grammar
//!
//! This is the untyped tree the AST builder consumes: text, comments and
//! elements with their attributes, each carrying the byte span it was parsed
//! from. Line and column information is recovered on demand through
//! [`SourceMap`].

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// A node of the raw tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawNode {
    Text(RawText),
    Comment(RawComment),
    Element(RawElement),
}

impl RawNode {
    /// Byte span of the whole node
    pub fn span(&self) -> &Span {
        match self {
            RawNode::Text(t) => &t.span,
            RawNode::Comment(c) => &c.span,
            RawNode::Element(e) => &e.span,
        }
    }

    /// Name used in diagnostics: `#text`, `#comment` or the tag name
    pub fn node_name(&self) -> &str {
        match self {
            RawNode::Text(_) => "#text",
            RawNode::Comment(_) => "#comment",
            RawNode::Element(e) => &e.tag_name,
        }
    }

    pub fn as_element(&self) -> Option<&RawElement> {
        match self {
            RawNode::Element(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawText {
    pub value: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawComment {
    pub data: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawElement {
    /// Lower-cased tag name
    pub tag_name: String,
    pub attrs: Vec<RawAttribute>,
    pub children: Vec<RawNode>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAttribute {
    /// Lower-cased attribute name, including any `@` prefix
    pub name: String,
    /// Decoded value; empty for valueless attributes
    pub value: String,
    pub span: Span,
}

/// A parsed document fragment together with the line index of its source
#[derive(Debug, Clone)]
pub struct Fragment {
    pub children: Vec<RawNode>,
    pub source_map: SourceMap,
}

/// Resolved source location of a span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub start_line: usize,
    pub start_col: usize,
    pub start_offset: usize,
    pub end_line: usize,
    pub end_col: usize,
    pub end_offset: usize,
}

/// Maps byte offsets to 1-based line/column pairs
///
/// Columns count characters, not bytes, so multi-byte text before an element
/// does not skew the reported column.
#[derive(Debug, Clone)]
pub struct SourceMap {
    source: String,
    line_starts: Vec<usize>,
}

impl SourceMap {
    pub fn new(source: &str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            source: source.to_string(),
            line_starts,
        }
    }

    /// Line and column of a byte offset
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.source.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(next) => next.saturating_sub(1),
        };
        let line_start = self.line_starts.get(line).copied().unwrap_or(0);
        let col = self
            .source
            .get(line_start..offset)
            .map(|s| s.chars().count())
            .unwrap_or(offset - line_start);
        (line + 1, col + 1)
    }

    pub fn locate(&self, span: &Span) -> Location {
        let (start_line, start_col) = self.line_col(span.start);
        let (end_line, end_col) = self.line_col(span.end);
        Location {
            start_line,
            start_col,
            start_offset: span.start,
            end_line,
            end_col,
            end_offset: span.end,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}
