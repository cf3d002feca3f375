//! Structural capability shared by every wrapper type.

use crate::document::{Document, NodeRef};
use crate::elements::Paragraph;

/// Common structural operations over a wrapped node: ancestry lookup,
/// deep copy, reparenting, and access to the element's properties
/// child (`w:pPr`, `w:rPr`, ...).
///
/// All mutation goes through the owning [`Document`]; wrappers stay
/// plain handles and never hold a borrow themselves.
pub trait Element: Sized {
    /// Qualified tag of the wrapped element.
    const TAG: &'static str;

    /// Tag of the child element holding formatting properties, for
    /// element kinds that have one.
    const PROPERTIES_TAG: Option<&'static str> = None;

    fn node_ref(&self) -> NodeRef;

    fn from_node_ref(doc: &mut Document, node: NodeRef) -> Self;

    /// Nearest ancestor element with the given tag.
    fn parent(&self, doc: &Document, tag: &str) -> Option<NodeRef> {
        let this = self.node_ref();
        doc.tree(this.part)
            .ancestor(this.node, Some(tag))
            .map(|node| NodeRef {
                part: this.part,
                node,
            })
    }

    /// The enclosing paragraph, if any.
    fn parent_paragraph(&self, doc: &mut Document) -> Option<Paragraph> {
        let node = self.parent(doc, "w:p")?;
        Some(Paragraph::derive(doc, node))
    }

    /// Deep-copy the wrapped subtree. The copy is detached; insert it
    /// with one of the reparenting methods.
    fn copy(&self, doc: &mut Document) -> Self {
        let this = self.node_ref();
        let node = doc.tree_mut(this.part).duplicate(this.node);
        Self::from_node_ref(
            doc,
            NodeRef {
                part: this.part,
                node,
            },
        )
    }

    /// Move this node directly after `sibling`. No-op across parts.
    fn insert_after(&self, doc: &mut Document, sibling: NodeRef) {
        let this = self.node_ref();
        if this.part == sibling.part {
            doc.tree_mut(this.part).insert_after(sibling.node, this.node);
        }
    }

    /// Move this node directly before `sibling`. No-op across parts.
    fn insert_before(&self, doc: &mut Document, sibling: NodeRef) {
        let this = self.node_ref();
        if this.part == sibling.part {
            doc.tree_mut(this.part).insert_before(sibling.node, this.node);
        }
    }

    /// Move this node to be the last child of `parent`.
    fn append_to(&self, doc: &mut Document, parent: NodeRef) {
        let this = self.node_ref();
        if this.part == parent.part {
            doc.tree_mut(this.part).append(parent.node, this.node);
        }
    }

    /// Move this node to the front of `parent`'s children, after the
    /// properties child when the parent has one.
    fn prepend_to(&self, doc: &mut Document, parent: NodeRef) {
        let this = self.node_ref();
        if this.part != parent.part {
            return;
        }
        let tree = doc.tree_mut(this.part);
        let properties = tree
            .child_elements(parent.node)
            .next()
            .filter(|&child| tree.tag(child).is_some_and(|t| t.ends_with("Pr")));
        match properties {
            Some(props) => tree.insert_after(props, this.node),
            None => tree.prepend(parent.node, this.node),
        }
    }

    /// Find or create the properties child named by `PROPERTIES_TAG`.
    ///
    /// Creation mutates the tree even on read paths; the second call
    /// finds the now-existing node. The properties child is prepended
    /// so it stays first, as the schema expects.
    fn properties(&self, doc: &mut Document) -> Option<NodeRef> {
        let tag = Self::PROPERTIES_TAG?;
        let this = self.node_ref();
        let tree = doc.tree_mut(this.part);
        let node = match tree.first_child_element(this.node, tag) {
            Some(existing) => existing,
            None => {
                let created = tree.create_element(tag);
                tree.prepend(this.node, created);
                created
            }
        };
        Some(NodeRef {
            part: this.part,
            node,
        })
    }
}
