//! Arena-based XML tree.
//!
//! All nodes of one parsed XML part live in a contiguous vector; parent,
//! child, and sibling links are indices into that vector. Wrapper types
//! elsewhere in the crate hold a [`NodeId`] and re-derive whatever they
//! need from the current tree state, so structural edits are immediately
//! visible through every handle.
//!
//! Element and attribute names keep their qualified form (`w:p`,
//! `w:val`) exactly as they appear in the source part. WordprocessingML
//! addresses nodes by prefix, so no namespace resolution is performed.

/// Unique identifier for a node in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Sentinel value for no node.
    pub(crate) const NONE: NodeId = NodeId(u32::MAX);

    pub(crate) fn is_some(self) -> bool {
        self.0 != u32::MAX
    }

    pub(crate) fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    fn ok(self) -> Option<NodeId> {
        if self.is_some() { Some(self) } else { None }
    }
}

/// An XML attribute with its qualified name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// Node payload.
#[derive(Debug, Clone)]
pub enum NodeData {
    /// Synthetic document root.
    Document,
    /// Element with qualified name and attributes.
    Element {
        name: String,
        attrs: Vec<Attribute>,
    },
    /// Character data (already unescaped).
    Text(String),
    /// Comment (kept so edited parts round-trip).
    Comment(String),
    /// CDATA section.
    CData(String),
}

/// A node in the tree.
#[derive(Debug)]
pub struct Node {
    pub data: NodeData,
    pub(crate) parent: NodeId,
    pub(crate) first_child: NodeId,
    pub(crate) last_child: NodeId,
    pub(crate) prev_sibling: NodeId,
    pub(crate) next_sibling: NodeId,
}

impl Node {
    fn new(data: NodeData) -> Self {
        Self {
            data,
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
        }
    }
}

/// One XML part as a mutable tree.
///
/// Detached nodes (after [`XmlTree::detach`]) stay allocated in the
/// arena but are unreachable from the document root, so serialization
/// and traversal never see them.
pub struct XmlTree {
    nodes: Vec<Node>,
    document: NodeId,
    /// `standalone` value of the source XML declaration, if any.
    pub(crate) standalone: Option<bool>,
}

impl XmlTree {
    /// Create an empty tree with a document root.
    pub fn new() -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            document: NodeId::NONE,
            standalone: None,
        };
        tree.document = tree.alloc(Node::new(NodeData::Document));
        tree
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// The synthetic document root.
    pub fn document(&self) -> NodeId {
        self.document
    }

    /// The top-level element of the part, if any.
    pub fn root(&self) -> Option<NodeId> {
        self.child_elements(self.document).next()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if id.is_none() {
            return None;
        }
        self.nodes.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if id.is_none() {
            return None;
        }
        self.nodes.get_mut(id.0 as usize)
    }

    // ------------------------------------------------------------------
    // Creation
    // ------------------------------------------------------------------

    /// Create a detached element node.
    pub fn create_element(&mut self, name: impl Into<String>) -> NodeId {
        self.alloc(Node::new(NodeData::Element {
            name: name.into(),
            attrs: Vec::new(),
        }))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(Node::new(NodeData::Text(text.into())))
    }

    pub fn create_comment(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(Node::new(NodeData::Comment(text.into())))
    }

    pub fn create_cdata(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(Node::new(NodeData::CData(text.into())))
    }

    /// Deep-copy a subtree. The copy is detached.
    pub fn duplicate(&mut self, id: NodeId) -> NodeId {
        let data = match self.get(id) {
            Some(node) => node.data.clone(),
            None => return NodeId::NONE,
        };
        let copy = self.alloc(Node::new(data));
        let children: Vec<NodeId> = self.children(id).collect();
        for child in children {
            let child_copy = self.duplicate(child);
            self.append(copy, child_copy);
        }
        copy
    }

    // ------------------------------------------------------------------
    // Structure mutation
    // ------------------------------------------------------------------

    /// Unlink a node from its parent and siblings. The node itself (and
    /// its subtree) stays intact and can be re-inserted elsewhere.
    pub fn detach(&mut self, id: NodeId) {
        let (parent, prev, next) = match self.get(id) {
            Some(n) => (n.parent, n.prev_sibling, n.next_sibling),
            None => return,
        };
        if let Some(p) = self.get_mut(prev) {
            p.next_sibling = next;
        }
        if let Some(n) = self.get_mut(next) {
            n.prev_sibling = prev;
        }
        if let Some(par) = self.get_mut(parent) {
            if par.first_child == id {
                par.first_child = next;
            }
            if par.last_child == id {
                par.last_child = prev;
            }
        }
        if let Some(node) = self.get_mut(id) {
            node.parent = NodeId::NONE;
            node.prev_sibling = NodeId::NONE;
            node.next_sibling = NodeId::NONE;
        }
    }

    /// Append a node as the last child of `parent`, detaching it from
    /// any previous position first.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        let last = self.get(parent).map(|n| n.last_child).unwrap_or(NodeId::NONE);
        if let Some(node) = self.get_mut(child) {
            node.parent = parent;
            node.prev_sibling = last;
        }
        if let Some(last_node) = self.get_mut(last) {
            last_node.next_sibling = child;
        }
        if let Some(parent_node) = self.get_mut(parent) {
            if parent_node.first_child.is_none() {
                parent_node.first_child = child;
            }
            parent_node.last_child = child;
        }
    }

    /// Insert a node as the first child of `parent`.
    pub fn prepend(&mut self, parent: NodeId, child: NodeId) {
        let first = self.get(parent).map(|n| n.first_child).unwrap_or(NodeId::NONE);
        if first.is_some() {
            self.insert_before(first, child);
        } else {
            self.append(parent, child);
        }
    }

    /// Insert `new_node` immediately before `sibling`.
    pub fn insert_before(&mut self, sibling: NodeId, new_node: NodeId) {
        self.detach(new_node);
        let (parent, prev) = match self.get(sibling) {
            Some(n) => (n.parent, n.prev_sibling),
            None => return,
        };
        if let Some(node) = self.get_mut(new_node) {
            node.parent = parent;
            node.prev_sibling = prev;
            node.next_sibling = sibling;
        }
        if let Some(sib) = self.get_mut(sibling) {
            sib.prev_sibling = new_node;
        }
        if prev.is_some() {
            if let Some(p) = self.get_mut(prev) {
                p.next_sibling = new_node;
            }
        } else if let Some(par) = self.get_mut(parent) {
            par.first_child = new_node;
        }
    }

    /// Insert `new_node` immediately after `sibling`.
    pub fn insert_after(&mut self, sibling: NodeId, new_node: NodeId) {
        self.detach(new_node);
        let (parent, next) = match self.get(sibling) {
            Some(n) => (n.parent, n.next_sibling),
            None => return,
        };
        if next.is_some() {
            self.insert_before(next, new_node);
        } else {
            self.append(parent, new_node);
        }
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent.ok())
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling.ok())
    }

    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling.ok())
    }

    /// Iterate over direct children.
    pub fn children(&self, parent: NodeId) -> ChildrenIter<'_> {
        let first = self.get(parent).map(|n| n.first_child).unwrap_or(NodeId::NONE);
        ChildrenIter { tree: self, current: first }
    }

    /// Iterate over direct element children.
    pub fn child_elements(&self, parent: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(parent).filter(|&id| self.is_element(id))
    }

    /// First direct child element with the given qualified tag.
    pub fn first_child_element(&self, parent: NodeId, tag: &str) -> Option<NodeId> {
        self.children(parent).find(|&id| self.has_tag(id, tag))
    }

    /// All direct child elements with the given qualified tag.
    pub fn child_elements_by_tag<'a>(
        &'a self,
        parent: NodeId,
        tag: &'a str,
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.children(parent).filter(move |&id| self.has_tag(id, tag))
    }

    /// Pre-order traversal of the subtree rooted at `from`, excluding
    /// `from` itself.
    pub fn descendants(&self, from: NodeId) -> DescendantsIter<'_> {
        let mut stack: Vec<NodeId> = self.children(from).collect();
        stack.reverse();
        DescendantsIter { tree: self, stack }
    }

    /// Nearest ancestor element matching the tag, or any element when
    /// `tag` is `None`.
    pub fn ancestor(&self, id: NodeId, tag: Option<&str>) -> Option<NodeId> {
        let mut current = self.parent(id);
        while let Some(node) = current {
            if self.is_element(node) && tag.is_none_or(|t| self.has_tag(node, t)) {
                return Some(node);
            }
            current = self.parent(node);
        }
        None
    }

    // ------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------

    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.get(id).map(|n| &n.data), Some(NodeData::Element { .. }))
    }

    /// Qualified tag name of an element node.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match self.get(id).map(|n| &n.data) {
            Some(NodeData::Element { name, .. }) => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn has_tag(&self, id: NodeId, tag: &str) -> bool {
        self.tag(id) == Some(tag)
    }

    /// Content of a text or CDATA node.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.get(id).map(|n| &n.data) {
            Some(NodeData::Text(s)) | Some(NodeData::CData(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Overwrite the content of a text or CDATA node.
    pub fn set_text(&mut self, id: NodeId, content: impl Into<String>) {
        if let Some(node) = self.get_mut(id) {
            match &mut node.data {
                NodeData::Text(s) | NodeData::CData(s) => *s = content.into(),
                _ => {}
            }
        }
    }

    /// Concatenated content of all direct text/CDATA children.
    pub fn child_text(&self, id: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(id) {
            if let Some(t) = self.text(child) {
                out.push_str(t);
            }
        }
        out
    }

    // ------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        match self.get(id).map(|n| &n.data) {
            Some(NodeData::Element { attrs, .. }) => attrs
                .iter()
                .find(|a| a.name == name)
                .map(|a| a.value.as_str()),
            _ => None,
        }
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(NodeData::Element { attrs, .. }) = self.get_mut(id).map(|n| &mut n.data) {
            match attrs.iter_mut().find(|a| a.name == name) {
                Some(attr) => attr.value = value.to_string(),
                None => attrs.push(Attribute {
                    name: name.to_string(),
                    value: value.to_string(),
                }),
            }
        }
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) {
        if let Some(NodeData::Element { attrs, .. }) = self.get_mut(id).map(|n| &mut n.data) {
            attrs.retain(|a| a.name != name);
        }
    }
}

impl Default for XmlTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over direct children of a node.
pub struct ChildrenIter<'a> {
    tree: &'a XmlTree,
    current: NodeId,
}

impl<'a> Iterator for ChildrenIter<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if self.current.is_none() {
            return None;
        }
        let id = self.current;
        self.current = self
            .tree
            .get(id)
            .map(|n| n.next_sibling)
            .unwrap_or(NodeId::NONE);
        Some(id)
    }
}

/// Pre-order iterator over a subtree.
pub struct DescendantsIter<'a> {
    tree: &'a XmlTree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for DescendantsIter<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        let mut children: Vec<NodeId> = self.tree.children(id).collect();
        children.reverse();
        self.stack.extend(children);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_and_iterate_children() {
        let mut tree = XmlTree::new();
        let body = tree.create_element("w:body");
        tree.append(tree.document(), body);
        let p1 = tree.create_element("w:p");
        let p2 = tree.create_element("w:p");
        tree.append(body, p1);
        tree.append(body, p2);

        let children: Vec<_> = tree.children(body).collect();
        assert_eq!(children, vec![p1, p2]);
        assert_eq!(tree.parent(p1), Some(body));
    }

    #[test]
    fn insert_before_updates_links() {
        let mut tree = XmlTree::new();
        let body = tree.create_element("w:body");
        tree.append(tree.document(), body);
        let p1 = tree.create_element("w:p");
        let p2 = tree.create_element("w:p");
        tree.append(body, p1);
        tree.insert_before(p1, p2);

        let children: Vec<_> = tree.children(body).collect();
        assert_eq!(children, vec![p2, p1]);
        assert_eq!(tree.prev_sibling(p1), Some(p2));
    }

    #[test]
    fn detach_then_reinsert_is_a_move() {
        let mut tree = XmlTree::new();
        let body = tree.create_element("w:body");
        tree.append(tree.document(), body);
        let p1 = tree.create_element("w:p");
        let p2 = tree.create_element("w:p");
        let p3 = tree.create_element("w:p");
        tree.append(body, p1);
        tree.append(body, p2);
        tree.append(body, p3);

        tree.insert_after(p3, p1);
        let children: Vec<_> = tree.children(body).collect();
        assert_eq!(children, vec![p2, p3, p1]);
    }

    #[test]
    fn duplicate_is_deep_and_detached() {
        let mut tree = XmlTree::new();
        let p = tree.create_element("w:p");
        tree.append(tree.document(), p);
        let r = tree.create_element("w:r");
        tree.append(p, r);
        let t = tree.create_text("hello");
        tree.append(r, t);

        let copy = tree.duplicate(p);
        assert_eq!(tree.parent(copy), None);
        let copy_run = tree.first_child_element(copy, "w:r").unwrap();
        assert_ne!(copy_run, r);
        assert_eq!(tree.child_text(copy_run), "hello");

        // Mutating the copy leaves the original alone.
        let copy_text = tree.children(copy_run).next().unwrap();
        tree.set_text(copy_text, "changed");
        assert_eq!(tree.child_text(r), "hello");
    }

    #[test]
    fn attributes_roundtrip() {
        let mut tree = XmlTree::new();
        let style = tree.create_element("w:style");
        tree.append(tree.document(), style);
        tree.set_attr(style, "w:styleId", "Red");
        assert_eq!(tree.attr(style, "w:styleId"), Some("Red"));
        tree.set_attr(style, "w:styleId", "Blue");
        assert_eq!(tree.attr(style, "w:styleId"), Some("Blue"));
        tree.remove_attr(style, "w:styleId");
        assert_eq!(tree.attr(style, "w:styleId"), None);
    }

    #[test]
    fn descendants_in_document_order() {
        let mut tree = XmlTree::new();
        let body = tree.create_element("w:body");
        tree.append(tree.document(), body);
        let p = tree.create_element("w:p");
        tree.append(body, p);
        let r = tree.create_element("w:r");
        tree.append(p, r);
        let p2 = tree.create_element("w:p");
        tree.append(body, p2);

        let tags: Vec<_> = tree
            .descendants(body)
            .filter_map(|id| tree.tag(id))
            .collect();
        assert_eq!(tags, vec!["w:p", "w:r", "w:p"]);
    }
}
