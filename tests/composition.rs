//! Integration tests for include inlining and slot binding

use std::path::Path;

use tempile::ast::{dump, Node, NodeKind};
use tempile::compose::{MemoryLoader, SequentialIds};
use tempile::{parse_with, Error, Result, Root};

fn compose(main: &str, loader: &MemoryLoader) -> Result<Root> {
    let mut ids = SequentialIds::new();
    let mut root = parse_with(main, "main.html", &mut ids)?;
    root.resolve_includes_with(Path::new("views"), loader, &mut ids)?;
    root.match_slots_and_contents();
    Ok(root)
}

fn count_kind(nodes: &[Node], kind: NodeKind) -> usize {
    nodes
        .iter()
        .map(|n| usize::from(n.kind() == kind) + count_kind(n.children(), kind))
        .sum()
}

fn find_text<'a>(nodes: &'a [Node], data: &str) -> Option<&'a Node> {
    nodes.iter().find_map(|n| match n {
        Node::Text(t) if t.data == data => Some(n),
        other => find_text(other.children(), data),
    })
}

#[test]
fn test_layout_with_header() {
    let loader = MemoryLoader::new()
        .with_file("views/layout.html", r#"<div><slot @name="header"></slot></div>"#);
    let root = compose(
        r#"<include @path="layout.html"><content @name="header"><p>Index Page</p></content></include>"#,
        &loader,
    )
    .expect("Should compose");

    let Node::Element(div) = &root.children[0] else {
        panic!("Expected div, got {:?}", root.children[0]);
    };
    assert_eq!(div.tag, "div");
    assert!(find_text(&div.children, "Index Page").is_some());
    for kind in [NodeKind::Include, NodeKind::Slot, NodeKind::Content] {
        assert_eq!(count_kind(&root.children, kind), 0, "{} left in tree", kind);
    }
}

#[test]
fn test_unmatched_content_contributes_nothing() {
    let loader = MemoryLoader::new()
        .with_file("views/layout.html", r#"<div><slot @name="header"></slot></div>"#);
    let root = compose(
        r#"<include @path="layout.html"><content @name="footer"><p>Lost</p></content></include>"#,
        &loader,
    )
    .expect("Should compose");
    assert!(find_text(&root.children, "Lost").is_none());
    insta::assert_snapshot!(dump(&root.children), @"<div>");
}

#[test]
fn test_sibling_includes_do_not_share_bindings() {
    let loader = MemoryLoader::new()
        .with_file("views/card.html", r#"<article><slot @name="title">Untitled</slot></article>"#);
    let mut ids = SequentialIds::new();
    let mut root = parse_with(
        r#"<include @path="card.html"><content @name="title">First</content></include><include @path="card.html"></include>"#,
        "main.html",
        &mut ids,
    )
    .expect("Should parse");

    match root.children.as_slice() {
        [Node::Include(a), Node::Include(b)] => assert_ne!(a.ctx_id, b.ctx_id),
        other => panic!("Expected two includes, got {:?}", other),
    }

    root.resolve_includes_with(Path::new("views"), &loader, &mut ids)
        .expect("Should resolve");
    root.match_slots_and_contents();

    insta::assert_snapshot!(dump(&root.children), @r###"
    <article>
      text "Untitled"
      text "First"
    <article>
      text "Untitled"
    "###);
}

#[test]
fn test_self_include_is_circular() {
    let err = compose(r#"<include @path="main.html"></include>"#, &MemoryLoader::new())
        .expect_err("Should fail");
    assert!(matches!(err, Error::CircularInclude { .. }), "{:?}", err);
}

#[test]
fn test_indirect_cycle_is_circular() {
    let loader = MemoryLoader::new()
        .with_file("views/a.html", r#"<include @path="b.html"></include>"#)
        .with_file("views/b.html", r#"<p><include @path="a.html"></include></p>"#);
    match compose(r#"<include @path="a.html"></include>"#, &loader) {
        Err(Error::CircularInclude { chain, .. }) => {
            assert_eq!(chain.last().map(String::as_str), Some("a.html"));
        }
        other => panic!("Expected CircularInclude, got {:?}", other),
    }
}

#[test]
fn test_unreadable_include() {
    let err = compose(r#"<include @path="missing.html"></include>"#, &MemoryLoader::new())
        .expect_err("Should fail");
    match err {
        Error::FileRead { path, source, .. } => {
            assert_eq!(path, Path::new("views/missing.html"));
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("Expected FileRead, got {:?}", other),
    }
}

#[test]
fn test_errors_in_included_files_name_that_file() {
    let loader = MemoryLoader::new().with_file("views/broken.html", "<slot></slot>");
    let err = compose(r#"<include @path="broken.html"></include>"#, &loader)
        .expect_err("Should fail");
    assert!(matches!(err, Error::MissingDirective { .. }));
    assert_eq!(err.file_name(), Path::new("views/broken.html").display().to_string());
}

#[test]
fn test_content_passed_through_nested_layouts() {
    let loader = MemoryLoader::new()
        .with_file(
            "views/page.html",
            r#"<include @path="base.html"><content @name="body"><main><slot @name="main"></slot></main></content></include>"#,
        )
        .with_file("views/base.html", r#"<body><slot @name="body"></slot></body>"#);
    let root = compose(
        r#"<include @path="page.html"><content @name="main">Welcome</content></include>"#,
        &loader,
    )
    .expect("Should compose");
    insta::assert_snapshot!(dump(&root.children), @r###"
    <body>
      <main>
        text "Welcome"
    "###);
}

#[test]
fn test_else_branches_are_not_composed() {
    let loader = MemoryLoader::new().with_file("views/x.html", "x");
    let root = compose(
        r#"<if @a="1"><include @path="x.html"></include><else><include @path="x.html"></include></else></if>"#,
        &loader,
    )
    .expect("Should compose");
    insta::assert_snapshot!(dump(&root.children), @r###"
    if @a="1"
      text "x"
    else
      include "x.html"
    "###);
}
