//! Typed template AST

use std::fmt;

use crate::ast::attribute::Attribute;
use crate::ast::position::Position;
use crate::compose::CtxId;

/// Markup emitted for `<tempile @doctype>`
pub const HTML5_DOCTYPE: &str = "<!DOCTYPE html>";

/// Kind of a node, and of the reserved tag that produces it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Import,
    Doctype,
    Tempile,
    Comment,
    Text,
    Element,
    If,
    ElseIf,
    Else,
    For,
    Include,
    Slot,
    Content,
    Out,
    Logic,
}

impl NodeKind {
    /// The directive kind a reserved tag name stands for
    ///
    /// Returns `None` for every other tag, which then builds a plain element.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "import" => Some(NodeKind::Import),
            "tempile" => Some(NodeKind::Tempile),
            "if" => Some(NodeKind::If),
            "elseif" => Some(NodeKind::ElseIf),
            "else" => Some(NodeKind::Else),
            "for" => Some(NodeKind::For),
            "include" => Some(NodeKind::Include),
            "slot" => Some(NodeKind::Slot),
            "content" => Some(NodeKind::Content),
            "out" => Some(NodeKind::Out),
            "logic" => Some(NodeKind::Logic),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Import => "import",
            NodeKind::Doctype => "doctype",
            NodeKind::Tempile => "tempile",
            NodeKind::Comment => "comment",
            NodeKind::Text => "text",
            NodeKind::Element => "element",
            NodeKind::If => "if",
            NodeKind::ElseIf => "elseif",
            NodeKind::Else => "else",
            NodeKind::For => "for",
            NodeKind::Include => "include",
            NodeKind::Slot => "slot",
            NodeKind::Content => "content",
            NodeKind::Out => "out",
            NodeKind::Logic => "logic",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node of the template AST
///
/// `<tempile>` has a kind but no variant: it is rewritten into a
/// [`Node::Doctype`] or [`Node::Element`] as soon as it is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(Text),
    Comment(Comment),
    Element(Element),
    Doctype(Doctype),
    Import(Import),
    If(If),
    ElseIf(ElseIf),
    Else(Else),
    For(For),
    Include(Include),
    Slot(Slot),
    Content(Content),
    Out(Out),
    Logic(Logic),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    pub data: String,
    pub pos: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub data: String,
    pub pos: Option<Position>,
}

/// A plain HTML element or an unrecognised custom tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<Attribute>,
    pub children: Vec<Node>,
    pub pos: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Doctype {
    pub data: String,
    pub pos: Option<Position>,
}

/// Top-level import block, e.g. `<import @ts>...</import>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    /// Name of the single directive attribute
    pub lang: String,
    /// Text and comment nodes only
    pub children: Vec<Node>,
    pub pos: Option<Position>,
}

/// Conditional block with its `elseif`/`else` branches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct If {
    pub conditions: Vec<Attribute>,
    /// Never empty
    pub if_content: Vec<Node>,
    pub else_ifs: Vec<ElseIf>,
    pub else_node: Option<Else>,
    pub pos: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElseIf {
    pub conditions: Vec<Attribute>,
    pub children: Vec<Node>,
    pub pos: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Else {
    pub children: Vec<Node>,
    pub pos: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct For {
    pub loops: Vec<Attribute>,
    pub children: Vec<Node>,
    pub pos: Option<Position>,
}

/// Inclusion of another template file
///
/// Before composition the children are the caller's `content` blocks; after
/// include resolution they are the included file's nodes followed by those
/// blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Include {
    /// Unique per instance, scoping slot/content matching
    pub ctx_id: CtxId,
    /// The `@path` directive attribute
    pub path: Attribute,
    pub children: Vec<Node>,
    pub pos: Option<Position>,
}

/// Named placeholder; its children are the default content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub name: String,
    pub children: Vec<Node>,
    pub pos: Option<Position>,
    /// Key assigned while slots and contents are being matched
    pub(crate) binding: Option<usize>,
}

impl Slot {
    pub fn new(name: impl Into<String>, children: Vec<Node>, pos: Option<Position>) -> Self {
        Self {
            name: name.into(),
            children,
            pos,
            binding: None,
        }
    }
}

/// Named override block supplied at an include site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    pub name: String,
    pub children: Vec<Node>,
    pub pos: Option<Position>,
}

/// Expression output, escaped unless `raw`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Out {
    pub data: String,
    pub is_raw: bool,
    pub pos: Option<Position>,
}

/// Embedded code block in the named language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logic {
    pub lang: String,
    pub data: String,
    pub pos: Option<Position>,
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Text(_) => NodeKind::Text,
            Node::Comment(_) => NodeKind::Comment,
            Node::Element(_) => NodeKind::Element,
            Node::Doctype(_) => NodeKind::Doctype,
            Node::Import(_) => NodeKind::Import,
            Node::If(_) => NodeKind::If,
            Node::ElseIf(_) => NodeKind::ElseIf,
            Node::Else(_) => NodeKind::Else,
            Node::For(_) => NodeKind::For,
            Node::Include(_) => NodeKind::Include,
            Node::Slot(_) => NodeKind::Slot,
            Node::Content(_) => NodeKind::Content,
            Node::Out(_) => NodeKind::Out,
            Node::Logic(_) => NodeKind::Logic,
        }
    }

    pub fn pos(&self) -> Option<&Position> {
        match self {
            Node::Text(n) => n.pos.as_ref(),
            Node::Comment(n) => n.pos.as_ref(),
            Node::Element(n) => n.pos.as_ref(),
            Node::Doctype(n) => n.pos.as_ref(),
            Node::Import(n) => n.pos.as_ref(),
            Node::If(n) => n.pos.as_ref(),
            Node::ElseIf(n) => n.pos.as_ref(),
            Node::Else(n) => n.pos.as_ref(),
            Node::For(n) => n.pos.as_ref(),
            Node::Include(n) => n.pos.as_ref(),
            Node::Slot(n) => n.pos.as_ref(),
            Node::Content(n) => n.pos.as_ref(),
            Node::Out(n) => n.pos.as_ref(),
            Node::Logic(n) => n.pos.as_ref(),
        }
    }

    /// Structural children, see [`children_of`]
    pub fn children(&self) -> &[Node] {
        children_of(self)
    }

    /// Mutable structural children, see [`children_mut`]
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        children_mut(self)
    }
}

/// The children generic tree walks descend into
///
/// For an `if` this is only the `if` body: `elseif` and `else` branches are
/// not structural children, so walks (include resolution and slot matching
/// among them) never see what is inside them.
pub fn children_of(node: &Node) -> &[Node] {
    match node {
        Node::Text(_) | Node::Comment(_) | Node::Doctype(_) | Node::Out(_) | Node::Logic(_) => &[],
        Node::Element(n) => &n.children,
        Node::Import(n) => &n.children,
        Node::If(n) => &n.if_content,
        Node::ElseIf(n) => &n.children,
        Node::Else(n) => &n.children,
        Node::For(n) => &n.children,
        Node::Include(n) => &n.children,
        Node::Slot(n) => &n.children,
        Node::Content(n) => &n.children,
    }
}

/// Mutable counterpart of [`children_of`]; `None` for leaves
pub fn children_mut(node: &mut Node) -> Option<&mut Vec<Node>> {
    match node {
        Node::Text(_) | Node::Comment(_) | Node::Doctype(_) | Node::Out(_) | Node::Logic(_) => {
            None
        }
        Node::Element(n) => Some(&mut n.children),
        Node::Import(n) => Some(&mut n.children),
        Node::If(n) => Some(&mut n.if_content),
        Node::ElseIf(n) => Some(&mut n.children),
        Node::Else(n) => Some(&mut n.children),
        Node::For(n) => Some(&mut n.children),
        Node::Include(n) => Some(&mut n.children),
        Node::Slot(n) => Some(&mut n.children),
        Node::Content(n) => Some(&mut n.children),
    }
}
