//! Indented text rendering of a node tree

use std::fmt::Write;

use crate::ast::attribute::Attribute;
use crate::ast::node::*;

/// Render nodes one per line, children indented by two spaces
pub fn dump(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        dump_node(&mut out, node, 0);
    }
    out
}

fn directives(attrs: &[Attribute]) -> String {
    attrs
        .iter()
        .map(|a| format!(" @{}={:?}", a.name, a.value))
        .collect()
}

fn line(out: &mut String, depth: usize, text: &str) {
    let _ = writeln!(out, "{}{}", "  ".repeat(depth), text);
}

fn dump_all(out: &mut String, nodes: &[Node], depth: usize) {
    for node in nodes {
        dump_node(out, node, depth);
    }
}

fn dump_node(out: &mut String, node: &Node, depth: usize) {
    match node {
        Node::Text(t) => line(out, depth, &format!("text {:?}", t.data)),
        Node::Comment(c) => line(out, depth, &format!("comment {:?}", c.data)),
        Node::Doctype(d) => line(out, depth, &format!("doctype {:?}", d.data)),
        Node::Element(el) => {
            let attrs: String = el
                .attrs
                .iter()
                .map(|a| format!(" {}={:?}", a.name, a.value))
                .collect();
            line(out, depth, &format!("<{}{}>", el.tag, attrs));
            dump_all(out, &el.children, depth + 1);
        }
        Node::Import(n) => {
            line(out, depth, &format!("import @{}", n.lang));
            dump_all(out, &n.children, depth + 1);
        }
        Node::If(n) => {
            line(out, depth, &format!("if{}", directives(&n.conditions)));
            dump_all(out, &n.if_content, depth + 1);
            for branch in &n.else_ifs {
                dump_else_if(out, branch, depth);
            }
            if let Some(branch) = &n.else_node {
                line(out, depth, "else");
                dump_all(out, &branch.children, depth + 1);
            }
        }
        Node::ElseIf(n) => dump_else_if(out, n, depth),
        Node::Else(n) => {
            line(out, depth, "else");
            dump_all(out, &n.children, depth + 1);
        }
        Node::For(n) => {
            line(out, depth, &format!("for{}", directives(&n.loops)));
            dump_all(out, &n.children, depth + 1);
        }
        Node::Include(n) => {
            line(out, depth, &format!("include {:?}", n.path.value));
            dump_all(out, &n.children, depth + 1);
        }
        Node::Slot(n) => {
            line(out, depth, &format!("slot {:?}", n.name));
            dump_all(out, &n.children, depth + 1);
        }
        Node::Content(n) => {
            line(out, depth, &format!("content {:?}", n.name));
            dump_all(out, &n.children, depth + 1);
        }
        Node::Out(n) if n.is_raw => line(out, depth, &format!("out raw {:?}", n.data)),
        Node::Out(n) => line(out, depth, &format!("out {:?}", n.data)),
        Node::Logic(n) => line(out, depth, &format!("logic @{} {:?}", n.lang, n.data)),
    }
}

fn dump_else_if(out: &mut String, node: &ElseIf, depth: usize) {
    line(out, depth, &format!("elseif{}", directives(&node.conditions)));
    dump_all(out, &node.children, depth + 1);
}
