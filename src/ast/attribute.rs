//! Attribute extraction: directive/plain split and `{{ }}` interpolation

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::position::Position;
use crate::markup::{RawAttribute, SourceMap};

/// Shortest match between `{{` and the first following `}}` on one line
static INTERPOLATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{(.*?)\}\}").expect("interpolation pattern is valid")
});

/// One piece of an attribute value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueFragment {
    /// Literal text
    Text(String),
    /// Trimmed expression source from inside `{{ }}`
    Expr(String),
}

/// An element attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Name with any `@` prefix stripped
    pub name: String,
    /// Raw value as written
    pub value: String,
    /// Interpolation fragments; always empty for directive attributes
    pub fragments: Vec<ValueFragment>,
    pub pos: Option<Position>,
}

/// Attributes of one element, partitioned by kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitAttributes {
    /// `@name` attributes, compiler instructions
    pub directives: Vec<Attribute>,
    /// Everything else, rendered to output
    pub plain: Vec<Attribute>,
}

/// Partition raw attributes into directive and plain attributes
///
/// Directive attributes keep their value untouched; plain attribute values are
/// scanned for interpolation spans.
pub fn split_directive_attributes(
    attrs: &[RawAttribute],
    file_name: &str,
    map: &SourceMap,
) -> SplitAttributes {
    let mut split = SplitAttributes::default();
    for attr in attrs {
        let pos = Some(Position::from_span(file_name, map, &attr.span));
        match attr.name.strip_prefix('@') {
            Some(name) => split.directives.push(Attribute {
                name: name.to_string(),
                value: attr.value.clone(),
                fragments: Vec::new(),
                pos,
            }),
            None => split.plain.push(Attribute {
                name: attr.name.clone(),
                value: attr.value.clone(),
                fragments: parse_interpolations(&attr.value),
                pos,
            }),
        }
    }
    split
}

/// Split a value into text and `{{ expr }}` fragments
///
/// An unterminated `{{` is plain text. The empty string yields no fragments.
pub fn parse_interpolations(value: &str) -> Vec<ValueFragment> {
    let mut fragments = Vec::new();
    let mut last = 0;

    for caps in INTERPOLATION.captures_iter(value) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            fragments.push(ValueFragment::Text(value[last..whole.start()].to_string()));
        }
        fragments.push(ValueFragment::Expr(inner.as_str().trim().to_string()));
        last = whole.end();
    }

    if last < value.len() {
        fragments.push(ValueFragment::Text(value[last..].to_string()));
    }

    fragments
}
