//! Source positions attached to AST nodes

use std::fmt;

use crate::markup::{Location, SourceMap, Span};

/// Where a node came from
///
/// Every field but the file name is optional: nodes created by the compiler
/// rather than parsed from source (an injected doctype, say) have no
/// location.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Position {
    pub file_name: String,
    pub start_line: Option<usize>,
    pub start_col: Option<usize>,
    pub start_offset: Option<usize>,
    pub end_line: Option<usize>,
    pub end_col: Option<usize>,
    pub end_offset: Option<usize>,
}

impl Position {
    /// A position with a file name and nothing else
    pub fn synthetic(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            ..Self::default()
        }
    }

    pub fn from_location(file_name: impl Into<String>, loc: Location) -> Self {
        Self {
            file_name: file_name.into(),
            start_line: Some(loc.start_line),
            start_col: Some(loc.start_col),
            start_offset: Some(loc.start_offset),
            end_line: Some(loc.end_line),
            end_col: Some(loc.end_col),
            end_offset: Some(loc.end_offset),
        }
    }

    pub fn from_span(file_name: impl Into<String>, map: &SourceMap, span: &Span) -> Self {
        Self::from_location(file_name, map.locate(span))
    }

    /// Byte span, when both offsets are known
    pub fn span(&self) -> Option<Span> {
        Some(self.start_offset?..self.end_offset?)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |v: Option<usize>| v.map_or_else(|| "?".to_string(), |v| v.to_string());
        write!(
            f,
            "{}:{}:{}",
            self.file_name,
            show(self.start_line),
            show(self.start_col)
        )
    }
}
