//! Child-path selection over an [`XmlTree`].
//!
//! WordprocessingML addresses everything the object model needs with
//! plain child steps (`w:pPr/w:jc`) and a final attribute step
//! (`w:pPr/w:shd/@w:val`), so this is deliberately not a full XPath
//! engine. A leading `./` is accepted and ignored.

use crate::xml::tree::{NodeId, XmlTree};

/// First node matching a `/`-separated child path, document order.
pub fn select_one(tree: &XmlTree, from: NodeId, path: &str) -> Option<NodeId> {
    let mut current = from;
    for step in steps(path) {
        current = tree.first_child_element(current, step)?;
    }
    Some(current)
}

/// All nodes matching a `/`-separated child path, document order.
pub fn select_all(tree: &XmlTree, from: NodeId, path: &str) -> Vec<NodeId> {
    let mut current = vec![from];
    for step in steps(path) {
        let mut next = Vec::new();
        for node in current {
            next.extend(tree.child_elements_by_tag(node, step));
        }
        current = next;
    }
    current
}

/// Walk a child path, creating each missing element along the way.
///
/// Created elements are appended as the last child of their parent.
pub fn ensure_path(tree: &mut XmlTree, from: NodeId, path: &str) -> NodeId {
    let mut current = from;
    for step in steps(path) {
        current = match tree.first_child_element(current, step) {
            Some(existing) => existing,
            None => {
                let created = tree.create_element(step);
                tree.append(current, created);
                created
            }
        };
    }
    current
}

/// A selector ending in an attribute step, split into the element path
/// and the attribute name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttrPath<'a> {
    /// Element portion; empty when the attribute sits on the context
    /// node itself (selector like `./@w:styleId`).
    pub element_path: &'a str,
    pub attr: &'a str,
}

impl<'a> AttrPath<'a> {
    /// Split a selector like `./w:pPr/w:shd/@w:val`. Returns `None`
    /// when there is no attribute step.
    pub fn parse(selector: &'a str) -> Option<Self> {
        let (element_path, attr_step) = selector.rsplit_once('/')?;
        let attr = attr_step.strip_prefix('@')?;
        Some(Self {
            element_path: element_path.trim_start_matches("./").trim_end_matches('.'),
            attr,
        })
    }

    /// The node carrying the attribute, if the element path resolves.
    pub fn target(&self, tree: &XmlTree, from: NodeId) -> Option<NodeId> {
        if self.element_path.is_empty() {
            Some(from)
        } else {
            select_one(tree, from, self.element_path)
        }
    }

    /// The node carrying the attribute, creating missing elements.
    pub fn ensure_target(&self, tree: &mut XmlTree, from: NodeId) -> NodeId {
        if self.element_path.is_empty() {
            from
        } else {
            ensure_path(tree, from, self.element_path)
        }
    }
}

fn steps(path: &str) -> impl Iterator<Item = &str> {
    path.trim_start_matches("./")
        .split('/')
        .filter(|s| !s.is_empty())
}
