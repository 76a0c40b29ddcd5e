//! AST builder: raw tree to typed nodes, with per-tag validation
//!
//! Every reserved tag has its own constructor. A constructor checks, in this
//! order, that it was handed the right element, that the element sits under
//! the right parent, that it carries the directive attributes its tag needs
//! and that its children are of an allowed kind. The first failed check
//! aborts the build. Control blocks that end up with nothing inside are
//! dropped without error.

use log::debug;

use crate::ast::attribute::{split_directive_attributes, Attribute, SplitAttributes};
use crate::ast::node::*;
use crate::ast::position::Position;
use crate::compose::IdSource;
use crate::error::{Error, Result};
use crate::markup::{Fragment, RawElement, RawNode, SourceMap, Span};

/// Directives `<tempile>` accepts
const TEMPILE_DIRECTIVES: &[&str] = &["doctype", "html", "head", "body"];

/// The raw parent of the node being built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parent<'a> {
    /// Top level of the document
    Fragment,
    /// Child of the element with this tag
    Element(&'a str),
}

impl Parent<'_> {
    fn is(&self, tag: &str) -> bool {
        matches!(self, Parent::Element(t) if *t == tag)
    }
}

/// Build the typed nodes of a parsed fragment
pub fn build(fragment: &Fragment, file_name: &str, ids: &mut dyn IdSource) -> Result<Vec<Node>> {
    AstBuilder::new(file_name, &fragment.source_map, ids)
        .parse_children(&fragment.children, Parent::Fragment)
}

pub struct AstBuilder<'a> {
    file_name: &'a str,
    map: &'a SourceMap,
    ids: &'a mut dyn IdSource,
}

impl<'a> AstBuilder<'a> {
    pub fn new(file_name: &'a str, map: &'a SourceMap, ids: &'a mut dyn IdSource) -> Self {
        Self {
            file_name,
            map,
            ids,
        }
    }

    /// Build a list of sibling raw nodes, skipping dropped blocks
    pub fn parse_children(&mut self, raw: &[RawNode], parent: Parent<'_>) -> Result<Vec<Node>> {
        let mut nodes = Vec::with_capacity(raw.len());
        for node in raw {
            if let Some(node) = self.parse_node(node, parent)? {
                nodes.push(node);
            }
        }
        Ok(nodes)
    }

    fn parse_node(&mut self, raw: &RawNode, parent: Parent<'_>) -> Result<Option<Node>> {
        let el = match raw {
            RawNode::Text(t) => {
                return Ok(Some(Node::Text(Text {
                    data: t.value.clone(),
                    pos: Some(self.pos(&t.span)),
                })))
            }
            RawNode::Comment(c) => {
                return Ok(Some(Node::Comment(Comment {
                    data: c.data.clone(),
                    pos: Some(self.pos(&c.span)),
                })))
            }
            RawNode::Element(el) => el,
        };

        let Some(kind) = NodeKind::from_tag(&el.tag_name) else {
            return self.build_element(raw).map(Some);
        };

        match kind {
            NodeKind::Import => self.build_import(raw, parent).map(Some),
            NodeKind::Tempile => self.build_tempile(raw).map(Some),
            NodeKind::If => self.build_if(raw),
            NodeKind::ElseIf => self.build_else_if(raw, parent),
            NodeKind::Else => self.build_else(raw, parent),
            NodeKind::For => self.build_for(raw),
            NodeKind::Include => self.build_include(raw).map(Some),
            NodeKind::Slot => self.build_slot(raw).map(Some),
            NodeKind::Content => self.build_content(raw, parent).map(Some),
            NodeKind::Out => self.build_out(raw),
            NodeKind::Logic => self.build_logic(raw),
            NodeKind::Doctype | NodeKind::Comment | NodeKind::Text | NodeKind::Element => {
                self.build_element(raw).map(Some)
            }
        }
    }

    fn pos(&self, span: &Span) -> Position {
        Position::from_span(self.file_name, self.map, span)
    }

    fn split(&self, el: &RawElement) -> SplitAttributes {
        split_directive_attributes(&el.attrs, self.file_name, self.map)
    }

    /// The raw node as an element of the given tag
    fn expect_element<'r>(&self, raw: &'r RawNode, tag: &str) -> Result<&'r RawElement> {
        match raw {
            RawNode::Element(el) if el.tag_name == tag => Ok(el),
            RawNode::Element(el) => Err(Error::structural(
                format!("expected <{}> element, found <{}>", tag, el.tag_name),
                self.pos(&el.span),
            )),
            other => Err(Error::structural(
                format!("expected <{}> element, found {}", tag, other.node_name()),
                self.pos(other.span()),
            )),
        }
    }

    /// Exactly one directive attribute
    fn single_directive(
        &self,
        el: &RawElement,
        directives: Vec<Attribute>,
        expected: &str,
    ) -> Result<Attribute> {
        let pos = self.pos(&el.span);
        if directives.len() > 1 {
            return Err(Error::MultipleAttributes {
                tag: el.tag_name.clone(),
                found: directives.into_iter().map(|a| a.name).collect(),
                pos,
            });
        }
        directives.into_iter().next().ok_or_else(|| Error::MissingDirective {
            tag: el.tag_name.clone(),
            expected: expected.to_string(),
            pos,
        })
    }

    /// One or more directive attributes
    fn some_directives(
        &self,
        el: &RawElement,
        directives: Vec<Attribute>,
        expected: &str,
    ) -> Result<Vec<Attribute>> {
        if directives.is_empty() {
            return Err(Error::MissingDirective {
                tag: el.tag_name.clone(),
                expected: expected.to_string(),
                pos: self.pos(&el.span),
            });
        }
        Ok(directives)
    }

    /// Reject any element child
    fn only_text_children(&self, el: &RawElement) -> Result<()> {
        match el.children.iter().find_map(RawNode::as_element) {
            Some(child) => Err(Error::structural(
                format!(
                    "<{}> may only contain text or comments, found <{}>",
                    el.tag_name, child.tag_name
                ),
                self.pos(&child.span),
            )),
            None => Ok(()),
        }
    }

    /// Concatenated text children; comments are skipped
    fn text_data(el: &RawElement) -> String {
        el.children
            .iter()
            .filter_map(|child| match child {
                RawNode::Text(t) => Some(t.value.as_str()),
                _ => None,
            })
            .collect()
    }

    fn dropped(&self, el: &RawElement) -> Result<Option<Node>> {
        debug!("dropping empty <{}> at {}", el.tag_name, self.pos(&el.span));
        Ok(None)
    }

    fn build_element(&mut self, raw: &RawNode) -> Result<Node> {
        let el = match raw {
            RawNode::Element(el) => el,
            other => {
                return Err(Error::structural(
                    format!("expected an element, found {}", other.node_name()),
                    self.pos(other.span()),
                ))
            }
        };
        let attrs = self.split(el).plain;
        let children = self.parse_children(&el.children, Parent::Element(&el.tag_name))?;
        Ok(Node::Element(Element {
            tag: el.tag_name.clone(),
            attrs,
            children,
            pos: Some(self.pos(&el.span)),
        }))
    }

    fn build_import(&mut self, raw: &RawNode, parent: Parent<'_>) -> Result<Node> {
        let el = self.expect_element(raw, "import")?;
        if parent != Parent::Fragment {
            return Err(Error::structural(
                "<import> must be at the top level of the document",
                self.pos(&el.span),
            ));
        }
        let lang = self.single_directive(el, self.split(el).directives, "@lang")?;
        self.only_text_children(el)?;

        let children = self.parse_children(&el.children, Parent::Element("import"))?;
        Ok(Node::Import(Import {
            lang: lang.name,
            children,
            pos: Some(self.pos(&el.span)),
        }))
    }

    /// `<tempile>` is rewritten into a doctype or an `html`/`head`/`body` element
    fn build_tempile(&mut self, raw: &RawNode) -> Result<Node> {
        let el = self.expect_element(raw, "tempile")?;
        let SplitAttributes { directives, plain } = self.split(el);
        let directive = self.single_directive(el, directives, "@doctype, @html, @head or @body")?;
        if !TEMPILE_DIRECTIVES.contains(&directive.name.as_str()) {
            return Err(Error::structural(
                format!(
                    "<tempile> does not support @{}, expected one of @doctype, @html, @head, @body",
                    directive.name
                ),
                self.pos(&el.span),
            ));
        }

        let children = self.parse_children(&el.children, Parent::Element("tempile"))?;
        let pos = Some(self.pos(&el.span));
        if directive.name == "doctype" {
            return Ok(Node::Doctype(Doctype {
                data: HTML5_DOCTYPE.to_string(),
                pos,
            }));
        }
        Ok(Node::Element(Element {
            tag: directive.name,
            attrs: plain,
            children,
            pos,
        }))
    }

    fn build_if(&mut self, raw: &RawNode) -> Result<Option<Node>> {
        let el = self.expect_element(raw, "if")?;
        let conditions = self.some_directives(el, self.split(el).directives, "a condition")?;

        let mut if_content = Vec::new();
        let mut else_ifs = Vec::new();
        let mut else_node: Option<Else> = None;
        for child in self.parse_children(&el.children, Parent::Element("if"))? {
            match child {
                Node::ElseIf(branch) => else_ifs.push(branch),
                Node::Else(branch) => {
                    if else_node.is_some() {
                        return Err(Error::MultipleElse {
                            pos: branch
                                .pos
                                .unwrap_or_else(|| Position::synthetic(self.file_name)),
                        });
                    }
                    else_node = Some(branch);
                }
                other => if_content.push(other),
            }
        }

        if if_content.is_empty() {
            return self.dropped(el);
        }
        Ok(Some(Node::If(If {
            conditions,
            if_content,
            else_ifs,
            else_node,
            pos: Some(self.pos(&el.span)),
        })))
    }

    fn build_else_if(&mut self, raw: &RawNode, parent: Parent<'_>) -> Result<Option<Node>> {
        let el = self.expect_element(raw, "elseif")?;
        if !parent.is("if") {
            return Err(Error::structural(
                "<elseif> must be a direct child of <if>",
                self.pos(&el.span),
            ));
        }
        let conditions = self.some_directives(el, self.split(el).directives, "a condition")?;

        let children = self.parse_children(&el.children, Parent::Element("elseif"))?;
        if children.is_empty() {
            return self.dropped(el);
        }
        Ok(Some(Node::ElseIf(ElseIf {
            conditions,
            children,
            pos: Some(self.pos(&el.span)),
        })))
    }

    fn build_else(&mut self, raw: &RawNode, parent: Parent<'_>) -> Result<Option<Node>> {
        let el = self.expect_element(raw, "else")?;
        if !parent.is("if") {
            return Err(Error::structural(
                "<else> must be a direct child of <if>",
                self.pos(&el.span),
            ));
        }

        let children = self.parse_children(&el.children, Parent::Element("else"))?;
        if children.is_empty() {
            return self.dropped(el);
        }
        Ok(Some(Node::Else(Else {
            children,
            pos: Some(self.pos(&el.span)),
        })))
    }

    fn build_for(&mut self, raw: &RawNode) -> Result<Option<Node>> {
        let el = self.expect_element(raw, "for")?;
        let loops = self.some_directives(el, self.split(el).directives, "a loop")?;

        let children = self.parse_children(&el.children, Parent::Element("for"))?;
        if children.is_empty() {
            return self.dropped(el);
        }
        Ok(Some(Node::For(For {
            loops,
            children,
            pos: Some(self.pos(&el.span)),
        })))
    }

    fn build_include(&mut self, raw: &RawNode) -> Result<Node> {
        let el = self.expect_element(raw, "include")?;
        let path = self.single_directive(el, self.split(el).directives, "@path")?;

        let children = self.parse_children(&el.children, Parent::Element("include"))?;
        Ok(Node::Include(Include {
            ctx_id: self.ids.next_id(),
            path,
            children,
            pos: Some(self.pos(&el.span)),
        }))
    }

    fn build_slot(&mut self, raw: &RawNode) -> Result<Node> {
        let el = self.expect_element(raw, "slot")?;
        let name = self.single_directive(el, self.split(el).directives, "@name")?;

        let children = self.parse_children(&el.children, Parent::Element("slot"))?;
        Ok(Node::Slot(Slot::new(
            name.value,
            children,
            Some(self.pos(&el.span)),
        )))
    }

    fn build_content(&mut self, raw: &RawNode, parent: Parent<'_>) -> Result<Node> {
        let el = self.expect_element(raw, "content")?;
        if !parent.is("include") {
            return Err(Error::structural(
                "<content> must be a direct child of <include>",
                self.pos(&el.span),
            ));
        }
        let name = self.single_directive(el, self.split(el).directives, "@name")?;

        let children = self.parse_children(&el.children, Parent::Element("content"))?;
        Ok(Node::Content(Content {
            name: name.value,
            children,
            pos: Some(self.pos(&el.span)),
        }))
    }

    fn build_out(&mut self, raw: &RawNode) -> Result<Option<Node>> {
        let el = self.expect_element(raw, "out")?;
        let directives = self.split(el).directives;
        if directives.len() > 1 {
            return Err(Error::MultipleAttributes {
                tag: el.tag_name.clone(),
                found: directives.into_iter().map(|a| a.name).collect(),
                pos: self.pos(&el.span),
            });
        }
        self.only_text_children(el)?;

        if el.children.is_empty() {
            return self.dropped(el);
        }
        Ok(Some(Node::Out(Out {
            data: Self::text_data(el),
            is_raw: directives.first().is_some_and(|d| d.name == "raw"),
            pos: Some(self.pos(&el.span)),
        })))
    }

    fn build_logic(&mut self, raw: &RawNode) -> Result<Option<Node>> {
        let el = self.expect_element(raw, "logic")?;
        let lang = self.single_directive(el, self.split(el).directives, "@lang")?;
        self.only_text_children(el)?;

        if el.children.is_empty() {
            return self.dropped(el);
        }
        Ok(Some(Node::Logic(Logic {
            lang: lang.name,
            data: Self::text_data(el),
            pos: Some(self.pos(&el.span)),
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::attribute::ValueFragment;
    use crate::compose::{CtxId, SequentialIds};
    use crate::markup;
    use pretty_assertions::assert_eq;

    fn build_str(source: &str) -> Result<Vec<Node>> {
        let fragment = markup::parse(source).expect("Should parse markup");
        build(&fragment, "test.html", &mut SequentialIds::new())
    }

    fn build_ok(source: &str) -> Vec<Node> {
        build_str(source).expect("Should build")
    }

    fn build_err(source: &str) -> Error {
        build_str(source).expect_err("Should fail")
    }

    #[test]
    fn test_text_and_element() {
        let nodes = build_ok("Hello<div>ok</div>");
        assert_eq!(nodes.len(), 2);
        match &nodes[0] {
            Node::Text(t) => assert_eq!(t.data, "Hello"),
            other => panic!("Expected text, got {:?}", other),
        }
        match &nodes[1] {
            Node::Element(el) => {
                assert_eq!(el.tag, "div");
                assert_eq!(el.children.len(), 1);
            }
            other => panic!("Expected element, got {:?}", other),
        }
    }

    #[test]
    fn test_element_keeps_plain_attributes_only() {
        let nodes = build_ok(r#"<a href="/u/{{ id }}" @ignored="x">go</a>"#);
        let Node::Element(el) = &nodes[0] else {
            panic!("Expected element, got {:?}", nodes[0]);
        };
        assert_eq!(el.attrs.len(), 1);
        assert_eq!(el.attrs[0].name, "href");
        assert_eq!(
            el.attrs[0].fragments,
            vec![
                ValueFragment::Text("/u/".to_string()),
                ValueFragment::Expr("id".to_string())
            ]
        );
    }

    #[test]
    fn test_positions_are_recorded() {
        let nodes = build_ok("\n  <p>x</p>");
        let pos = nodes[1].pos().expect("Should have position");
        assert_eq!(pos.file_name, "test.html");
        assert_eq!(pos.start_line, Some(2));
        assert_eq!(pos.start_col, Some(3));
    }

    #[test]
    fn test_empty_blocks_are_dropped() {
        for source in [
            r#"<for @lang="x"></for>"#,
            r#"<if @lang="x"></if>"#,
            r#"<logic @ts></logic>"#,
            r#"<out></out>"#,
            r#"<if @a="1"><elseif @b="2"></elseif><else></else>x</if>"#,
        ] {
            let nodes = build_ok(source);
            let kinds: Vec<_> = nodes.iter().map(Node::kind).collect();
            assert!(
                !kinds.contains(&NodeKind::For)
                    && !kinds.contains(&NodeKind::Logic)
                    && !kinds.contains(&NodeKind::Out),
                "{} built {:?}",
                source,
                kinds
            );
        }
        assert!(build_ok(r#"<for @lang="x"></for>"#).is_empty());
        assert!(build_ok(r#"<if @lang="x"></if>"#).is_empty());

        let nodes = build_ok(r#"<if @a="1"><elseif @b="2"></elseif><else></else>x</if>"#);
        let Node::If(node) = &nodes[0] else {
            panic!("Expected if, got {:?}", nodes[0]);
        };
        assert!(node.else_ifs.is_empty());
        assert!(node.else_node.is_none());
    }

    #[test]
    fn test_if_with_only_branches_is_dropped() {
        let nodes = build_ok(r#"<if @a="1"><else>no</else></if>"#);
        assert!(nodes.is_empty());
    }

    #[test]
    fn test_if_separates_branches() {
        let nodes = build_ok(
            r#"<if @lang="en"><p>a</p><elseif @lang="fr">b</elseif><else>c</else></if>"#,
        );
        let Node::If(node) = &nodes[0] else {
            panic!("Expected if, got {:?}", nodes[0]);
        };
        assert_eq!(node.conditions.len(), 1);
        assert_eq!(node.conditions[0].name, "lang");
        assert_eq!(node.conditions[0].value, "en");
        assert_eq!(node.if_content.len(), 1);
        assert_eq!(node.if_content[0].kind(), NodeKind::Element);
        assert_eq!(node.else_ifs.len(), 1);
        assert_eq!(node.else_ifs[0].conditions[0].value, "fr");
        assert!(node.else_node.is_some());
    }

    #[test]
    fn test_second_else_is_error() {
        let err = build_err(r#"<if @a="1">x<else>b</else><else>c</else></if>"#);
        match err {
            Error::MultipleElse { pos } => assert_eq!(pos.start_col, Some(27)),
            other => panic!("Expected MultipleElse, got {:?}", other),
        }
    }

    #[test]
    fn test_branches_outside_if_are_errors() {
        assert!(matches!(
            build_err(r#"<div><else>x</else></div>"#),
            Error::Structural { .. }
        ));
        assert!(matches!(
            build_err(r#"<elseif @a="1">x</elseif>"#),
            Error::Structural { .. }
        ));
        // Nested one level deeper than the if
        assert!(matches!(
            build_err(r#"<if @a="1"><div><else>x</else></div></if>"#),
            Error::Structural { .. }
        ));
    }

    #[test]
    fn test_missing_directives() {
        for (source, tag) in [
            ("<if>x</if>", "if"),
            ("<for>x</for>", "for"),
            ("<logic>x</logic>", "logic"),
            ("<import>x</import>", "import"),
            ("<slot></slot>", "slot"),
            ("<include></include>", "include"),
            ("<tempile></tempile>", "tempile"),
        ] {
            match build_err(source) {
                Error::MissingDirective { tag: found, .. } => assert_eq!(found, tag),
                other => panic!("Expected MissingDirective for {}, got {:?}", source, other),
            }
        }
    }

    #[test]
    fn test_multiple_directives() {
        for source in [
            r#"<slot @name="a" @other="b"></slot>"#,
            r#"<include @path="a.html" @x></include>"#,
            r#"<include @path="a.html"><content @name="a" @b></content></include>"#,
            r#"<out @raw @x>v</out>"#,
            r#"<logic @ts @js>v</logic>"#,
            r#"<import @ts @js>v</import>"#,
            r#"<tempile @html @body></tempile>"#,
        ] {
            assert!(
                matches!(build_err(source), Error::MultipleAttributes { .. }),
                "{}",
                source
            );
        }
    }

    #[test]
    fn test_if_and_for_keep_every_directive() {
        let nodes = build_ok(r#"<for @item="items" @index="i">x</for>"#);
        let Node::For(node) = &nodes[0] else {
            panic!("Expected for, got {:?}", nodes[0]);
        };
        let names: Vec<_> = node.loops.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["item", "index"]);
    }

    #[test]
    fn test_import_at_top_level_only() {
        let nodes = build_ok("<import @ts>import x from 'y';<!-- c --></import>");
        let Node::Import(node) = &nodes[0] else {
            panic!("Expected import, got {:?}", nodes[0]);
        };
        assert_eq!(node.lang, "ts");
        assert_eq!(node.children.len(), 2);

        let err = build_err("<div><import @ts>x</import></div>");
        assert!(matches!(err, Error::Structural { .. }));
    }

    #[test]
    fn test_text_only_children() {
        for source in [
            "<import @ts><b>x</b></import>",
            "<logic @ts><b>x</b></logic>",
            "<out><b>x</b></out>",
        ] {
            match build_err(source) {
                Error::Structural { message, .. } => assert!(message.contains("<b>")),
                other => panic!("Expected Structural for {}, got {:?}", source, other),
            }
        }
    }

    #[test]
    fn test_out_and_logic_data() {
        let nodes = build_ok("<out @raw>a<!-- skip -->b</out><out>user.name</out><logic @ts>let x = 1;</logic>");
        assert_eq!(
            nodes[0],
            Node::Out(Out {
                data: "ab".to_string(),
                is_raw: true,
                pos: nodes[0].pos().cloned(),
            })
        );
        match &nodes[1] {
            Node::Out(out) => {
                assert_eq!(out.data, "user.name");
                assert!(!out.is_raw);
            }
            other => panic!("Expected out, got {:?}", other),
        }
        match &nodes[2] {
            Node::Logic(logic) => {
                assert_eq!(logic.lang, "ts");
                assert_eq!(logic.data, "let x = 1;");
            }
            other => panic!("Expected logic, got {:?}", other),
        }
    }

    #[test]
    fn test_tempile_rewrites() {
        let nodes = build_ok(r#"<tempile @doctype></tempile><tempile @html lang="en"><tempile @body>x</tempile></tempile>"#);
        match &nodes[0] {
            Node::Doctype(d) => {
                assert_eq!(d.data, "<!DOCTYPE html>");
                assert_eq!(d.pos.as_ref().and_then(|p| p.start_offset), Some(0));
            }
            other => panic!("Expected doctype, got {:?}", other),
        }
        let Node::Element(html) = &nodes[1] else {
            panic!("Expected html element, got {:?}", nodes[1]);
        };
        assert_eq!(html.tag, "html");
        assert_eq!(html.attrs[0].name, "lang");
        match &html.children[0] {
            Node::Element(body) => assert_eq!(body.tag, "body"),
            other => panic!("Expected body element, got {:?}", other),
        }
    }

    #[test]
    fn test_tempile_rejects_unknown_directive() {
        match build_err("<tempile @footer></tempile>") {
            Error::Structural { message, .. } => assert!(message.contains("@footer")),
            other => panic!("Expected Structural, got {:?}", other),
        }
    }

    #[test]
    fn test_include_slot_content() {
        let nodes = build_ok(
            r#"<include @path="a.html"><content @name="main">x</content></include><include @path="a.html"></include><slot @name="s">default</slot>"#,
        );
        let (Node::Include(first), Node::Include(second)) = (&nodes[0], &nodes[1]) else {
            panic!("Expected includes, got {:?}", nodes);
        };
        assert_eq!(first.path.name, "path");
        assert_eq!(first.path.value, "a.html");
        assert_eq!(first.ctx_id, CtxId::from("ctx0"));
        assert_eq!(second.ctx_id, CtxId::from("ctx1"));
        match &first.children[0] {
            Node::Content(content) => assert_eq!(content.name, "main"),
            other => panic!("Expected content, got {:?}", other),
        }
        match &nodes[2] {
            Node::Slot(slot) => {
                assert_eq!(slot.name, "s");
                assert_eq!(slot.children.len(), 1);
            }
            other => panic!("Expected slot, got {:?}", other),
        }
    }

    #[test]
    fn test_content_outside_include_is_error() {
        let err = build_err(r#"<div><content @name="x">y</content></div>"#);
        assert!(matches!(err, Error::Structural { .. }));
    }

    #[test]
    fn test_wrong_node_for_constructor() {
        let fragment = markup::parse("<div></div>text").expect("Should parse");
        let mut ids = SequentialIds::new();
        let mut builder = AstBuilder::new("t.html", &fragment.source_map, &mut ids);
        assert!(matches!(
            builder.build_slot(&fragment.children[0]),
            Err(Error::Structural { .. })
        ));
        assert!(matches!(
            builder.build_include(&fragment.children[1]),
            Err(Error::Structural { .. })
        ));
    }
}
