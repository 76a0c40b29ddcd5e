//! Slot/content binding and unwrapping
//!
//! Every include scopes a set of slots and contents by its context id. The
//! scan of an include's children descends through everything below it,
//! nested includes too, so a nested include's slots and contents are also
//! visible to each include that encloses it.

use std::collections::HashMap;

use log::debug;

use super::{CtxId, Root};
use crate::ast::{children_of, Content, Include, Node};

/// Contents registered for one include, in first-registration order
type ContentEntries = Vec<(String, usize)>;

#[derive(Debug, Default)]
struct SlotMatcher {
    /// Context id -> slot name -> binding key
    slots: HashMap<CtxId, HashMap<String, usize>>,
    /// Context id -> content name -> index into `detached`
    contents: Vec<(CtxId, ContentEntries)>,
    /// Content blocks removed from the tree
    detached: Vec<Content>,
    next_binding: usize,
}

impl Root {
    /// Bind contents to slots, then unwrap every include and slot
    pub fn match_slots_and_contents(&mut self) {
        let mut ctx_ids = Vec::new();
        collect_includes(&self.children, &mut ctx_ids);

        let mut matcher = SlotMatcher::default();
        for ctx in &ctx_ids {
            matcher.scan_include(&mut self.children, ctx);
        }
        let mut pending = matcher.bind();

        let children = std::mem::take(&mut self.children);
        self.children = unwrap(children, &mut pending);
        debug!(
            "matched slots for {} includes in {}",
            ctx_ids.len(),
            self.file_name
        );
    }
}

/// Context ids of every include, in document order
fn collect_includes(nodes: &[Node], ctx_ids: &mut Vec<CtxId>) {
    for node in nodes {
        if let Node::Include(include) = node {
            ctx_ids.push(include.ctx_id.clone());
        }
        collect_includes(children_of(node), ctx_ids);
    }
}

fn find_include_mut<'n>(nodes: &'n mut [Node], ctx: &CtxId) -> Option<&'n mut Include> {
    for node in nodes.iter_mut() {
        if matches!(&*node, Node::Include(include) if include.ctx_id == *ctx) {
            return match node {
                Node::Include(include) => Some(include),
                _ => None,
            };
        }
        if let Some(children) = node.children_mut() {
            if let Some(found) = find_include_mut(children, ctx) {
                return Some(found);
            }
        }
    }
    None
}

impl SlotMatcher {
    /// The include with this id, in the tree or inside a detached content
    fn include_mut<'n>(
        tree: &'n mut [Node],
        detached: &'n mut [Content],
        ctx: &CtxId,
    ) -> Option<&'n mut Include> {
        match find_include_mut(tree, ctx) {
            Some(include) => Some(include),
            None => detached
                .iter_mut()
                .find_map(|content| find_include_mut(&mut content.children, ctx)),
        }
    }

    fn scan_include(&mut self, tree: &mut [Node], ctx: &CtxId) {
        self.slots.insert(ctx.clone(), HashMap::new());
        self.contents.push((ctx.clone(), Vec::new()));

        let Some(include) = Self::include_mut(tree, &mut self.detached, ctx) else {
            return;
        };
        let mut children = std::mem::take(&mut include.children);

        self.scan(&mut children, ctx);

        if let Some(include) = Self::include_mut(tree, &mut self.detached, ctx) {
            include.children = children;
        }
    }

    /// Register slots and detach contents below `nodes`
    fn scan(&mut self, nodes: &mut Vec<Node>, ctx: &CtxId) {
        let mut kept = Vec::with_capacity(nodes.len());
        for mut node in nodes.drain(..) {
            match node {
                Node::Content(mut content) => {
                    let mut children = std::mem::take(&mut content.children);
                    let index = self.detached.len();
                    self.register_content(ctx, content.name.clone(), index);
                    self.detached.push(content);

                    self.scan(&mut children, ctx);
                    self.detached[index].children = children;
                    continue;
                }
                Node::Slot(ref mut slot) => {
                    let binding = match slot.binding {
                        Some(binding) => binding,
                        None => {
                            let binding = self.next_binding;
                            self.next_binding += 1;
                            slot.binding = Some(binding);
                            binding
                        }
                    };
                    self.slots
                        .entry(ctx.clone())
                        .or_default()
                        .insert(slot.name.clone(), binding);
                }
                _ => {}
            }
            if let Some(children) = node.children_mut() {
                self.scan(children, ctx);
            }
            kept.push(node);
        }
        *nodes = kept;
    }

    /// Last registration of a name wins, keeping the first one's place
    fn register_content(&mut self, ctx: &CtxId, name: String, index: usize) {
        let Some((_, entries)) = self.contents.iter_mut().find(|(c, _)| c == ctx) else {
            return;
        };
        match entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = index,
            None => entries.push((name, index)),
        }
    }

    /// Children to append to each slot, by binding key
    fn bind(mut self) -> HashMap<usize, Vec<Node>> {
        let mut pending: HashMap<usize, Vec<Node>> = HashMap::new();
        for (ctx, entries) in &self.contents {
            for (name, index) in entries {
                let children = std::mem::take(&mut self.detached[*index].children);
                match self.slots.get(ctx).and_then(|slots| slots.get(name)) {
                    Some(binding) => pending.entry(*binding).or_default().extend(children),
                    None => debug!("discarding content \"{}\": no slot of that name", name),
                }
            }
        }
        pending
    }
}

/// Replace includes and slots by their children, innermost first
fn unwrap(nodes: Vec<Node>, pending: &mut HashMap<usize, Vec<Node>>) -> Vec<Node> {
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            Node::Include(include) => out.extend(unwrap(include.children, pending)),
            Node::Slot(mut slot) => {
                if let Some(extra) = slot.binding.and_then(|binding| pending.remove(&binding)) {
                    slot.children.extend(extra);
                }
                out.extend(unwrap(slot.children, pending));
            }
            mut other => {
                if let Some(children) = other.children_mut() {
                    let taken = std::mem::take(children);
                    *children = unwrap(taken, pending);
                }
                out.push(other);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{dump, NodeKind};
    use crate::compose::{parse_with, MemoryLoader, SequentialIds};
    use std::path::Path;

    fn compose(main: &str, loader: &MemoryLoader) -> Root {
        let mut ids = SequentialIds::new();
        let mut root = parse_with(main, "main.html", &mut ids).expect("Should parse");
        root.resolve_includes_with(Path::new(""), loader, &mut ids)
            .expect("Should resolve");
        root.match_slots_and_contents();
        root
    }

    fn count_kind(nodes: &[Node], kind: NodeKind) -> usize {
        nodes
            .iter()
            .map(|n| usize::from(n.kind() == kind) + count_kind(n.children(), kind))
            .sum()
    }

    #[test]
    fn test_content_fills_slot_after_default() {
        let loader = MemoryLoader::new()
            .with_file("layout.html", r#"<main><slot @name="body">default</slot></main>"#);
        let root = compose(
            r#"<include @path="layout.html"><content @name="body">override</content></include>"#,
            &loader,
        );
        insta::assert_snapshot!(dump(&root.children), @r###"
        <main>
          text "default"
          text "override"
        "###);
    }

    #[test]
    fn test_unmatched_content_is_discarded() {
        let loader = MemoryLoader::new().with_file("layout.html", r#"<slot @name="a"></slot>"#);
        let root = compose(
            r#"<include @path="layout.html"><content @name="b"><p>lost</p></content></include>"#,
            &loader,
        );
        assert!(root.children.is_empty());
    }

    #[test]
    fn test_last_content_with_a_name_wins() {
        let loader = MemoryLoader::new().with_file("layout.html", r#"<slot @name="a"></slot>"#);
        let root = compose(
            r#"<include @path="layout.html"><content @name="a">one</content><content @name="a">two</content></include>"#,
            &loader,
        );
        insta::assert_snapshot!(dump(&root.children), @r###"text "two""###);
    }

    #[test]
    fn test_sibling_includes_are_isolated() {
        let loader = MemoryLoader::new().with_file("card.html", r#"<div><slot @name="title"></slot></div>"#);
        let root = compose(
            r#"<include @path="card.html"><content @name="title">A</content></include><include @path="card.html"><content @name="title">B</content></include>"#,
            &loader,
        );
        insta::assert_snapshot!(dump(&root.children), @r###"
        <div>
          text "A"
        <div>
          text "B"
        "###);
    }

    #[test]
    fn test_nested_include_inside_content() {
        let loader = MemoryLoader::new()
            .with_file("layout.html", r#"<body><slot @name="main"></slot></body>"#)
            .with_file("card.html", r#"<section><slot @name="title">untitled</slot></section>"#);
        let root = compose(
            r#"<include @path="layout.html"><content @name="main"><include @path="card.html"><content @name="title">Hi</content></include></content></include>"#,
            &loader,
        );
        insta::assert_snapshot!(dump(&root.children), @r###"
        <body>
          <section>
            text "untitled"
            text "Hi"
        "###);
        assert_eq!(count_kind(&root.children, NodeKind::Include), 0);
        assert_eq!(count_kind(&root.children, NodeKind::Slot), 0);
        assert_eq!(count_kind(&root.children, NodeKind::Content), 0);
    }

    #[test]
    fn test_slot_without_include_keeps_default() {
        let root = compose(r#"<p><slot @name="x">fallback</slot></p>"#, &MemoryLoader::new());
        insta::assert_snapshot!(dump(&root.children), @r###"
        <p>
          text "fallback"
        "###);
    }

    #[test]
    fn test_content_holding_its_own_slot_is_dropped() {
        let loader = MemoryLoader::new().with_file("empty.html", "");
        let root = compose(
            r#"<include @path="empty.html"><content @name="x">a<slot @name="x">b</slot></content></include>done"#,
            &loader,
        );
        insta::assert_snapshot!(dump(&root.children), @r###"text "done""###);
    }

    #[test]
    fn test_else_branch_is_left_alone() {
        let loader = MemoryLoader::new().with_file("layout.html", r#"<slot @name="a"></slot>"#);
        let root = compose(
            r#"<include @path="layout.html"><content @name="a"><if @c="1">yes<else><slot @name="b">kept</slot></else></if></content></include>"#,
            &loader,
        );
        let Node::If(node) = &root.children[0] else {
            panic!("Expected if, got {:?}", root.children[0]);
        };
        let branch = node.else_node.as_ref().expect("Should have else");
        assert_eq!(branch.children[0].kind(), NodeKind::Slot);
    }
}
