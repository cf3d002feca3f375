//! Run-level content: text extraction, mutation, and formatting flags.

use regex::Regex;

use crate::document::{Document, NodeRef, PartId};
use crate::elements::element::Element;
use crate::elements::{Collapse, ContentOp, assign_content, set_element_text};
use crate::html;
use crate::xml::{self, NodeId};

/// Presence-derived formatting flags of a run. Recomputed from the
/// tree on every read; there is no cached state to go stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Formatting {
    pub italic: bool,
    pub bold: bool,
    pub underline: bool,
    pub strike: bool,
}

/// One `w:r` run, or a `w:hyperlink` wrapping a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRun {
    node: NodeRef,
}

impl Element for TextRun {
    const TAG: &'static str = "w:r";
    const PROPERTIES_TAG: Option<&'static str> = Some("w:rPr");

    fn node_ref(&self) -> NodeRef {
        self.node
    }

    fn from_node_ref(_doc: &mut Document, node: NodeRef) -> Self {
        Self { node }
    }
}

impl TextRun {
    pub(crate) fn new(node: NodeRef) -> Self {
        Self { node }
    }

    /// Create an empty detached `w:r` in the given part.
    pub(crate) fn create_detached(doc: &mut Document, part: PartId) -> Self {
        let node = doc.tree_mut(part).create_element("w:r");
        Self {
            node: NodeRef { part, node },
        }
    }

    /// The element whose `w:rPr` and `w:t` children carry this run's
    /// content: the run itself, or the run nested in a hyperlink.
    fn content_root(&self, doc: &Document) -> NodeId {
        let tree = doc.tree(self.node.part);
        if tree.has_tag(self.node.node, "w:hyperlink") {
            tree.first_child_element(self.node.node, "w:r")
                .unwrap_or(self.node.node)
        } else {
            self.node.node
        }
    }

    /// `w:t` children in document order, including those of a run
    /// nested inside a hyperlink.
    fn text_elements(&self, doc: &Document) -> Vec<NodeId> {
        let tree = doc.tree(self.node.part);
        let mut found = Vec::new();
        for child in tree.children(self.node.node) {
            if tree.has_tag(child, "w:t") {
                found.push(child);
            } else if tree.has_tag(child, "w:r") {
                found.extend(tree.child_elements_by_tag(child, "w:t"));
            }
        }
        found
    }

    /// Concatenated text content, empty when the run has none.
    pub fn text(&self, doc: &Document) -> String {
        let tree = doc.tree(self.node.part);
        self.text_elements(doc)
            .iter()
            .map(|&t| tree.child_text(t))
            .collect()
    }

    /// Replace the run's text. One text element is overwritten in
    /// place; zero creates one; extras left behind by reconciliation
    /// are blanked rather than dropped.
    pub fn set_text(&self, doc: &mut Document, content: &str) {
        let nodes = self.text_elements(doc);
        let root = self.content_root(doc);
        let part = self.node.part;
        assign_content(&nodes, Collapse::ClearExtras, |op, node| {
            let tree = doc.tree_mut(part);
            match (op, node) {
                (ContentOp::Create, _) => {
                    let t = tree.create_element("w:t");
                    tree.append(root, t);
                    set_element_text(tree, t, content);
                }
                (ContentOp::Overwrite, Some(t)) => set_element_text(tree, t, content),
                (ContentOp::Clear, Some(t)) => set_element_text(tree, t, ""),
                (ContentOp::Remove, Some(t)) => tree.detach(t),
                _ => {}
            }
        });
    }

    /// Apply a substitution to every text element independently. A
    /// pattern spanning two text elements of the same run will not
    /// match.
    pub fn substitute(&self, doc: &mut Document, pattern: &Regex, replacement: &str) {
        let nodes = self.text_elements(doc);
        let part = self.node.part;
        for t in nodes {
            let current = doc.tree(part).child_text(t);
            let replaced = pattern.replace_all(&current, replacement);
            if replaced != current {
                let replaced = replaced.into_owned();
                set_element_text(doc.tree_mut(part), t, &replaced);
            }
        }
    }

    pub fn formatting(&self, doc: &Document) -> Formatting {
        let tree = doc.tree(self.node.part);
        let root = self.content_root(doc);
        match tree.first_child_element(root, "w:rPr") {
            Some(rpr) => Formatting {
                italic: tree.first_child_element(rpr, "w:i").is_some(),
                bold: tree.first_child_element(rpr, "w:b").is_some(),
                underline: tree.first_child_element(rpr, "w:u").is_some(),
                strike: tree.first_child_element(rpr, "w:strike").is_some(),
            },
            None => Formatting::default(),
        }
    }

    /// Explicit run font size in points, falling back to the document
    /// default.
    pub fn font_size(&self, doc: &Document) -> Option<u32> {
        let tree = doc.tree(self.node.part);
        let root = self.content_root(doc);
        let explicit = xml::path::select_one(tree, root, "w:rPr/w:sz")
            .and_then(|sz| tree.attr(sz, "w:val"))
            .and_then(|v| v.parse::<u32>().ok())
            .map(|half_points| half_points / 2);
        explicit.or(doc.properties().font_size)
    }

    /// Explicit run font color (hex, no `#`), if set.
    pub fn font_color(&self, doc: &Document) -> Option<String> {
        let tree = doc.tree(self.node.part);
        let root = self.content_root(doc);
        xml::path::select_one(tree, root, "w:rPr/w:color")
            .and_then(|c| tree.attr(c, "w:val"))
            .map(str::to_string)
    }

    /// Explicit run font family (ascii slot), if set.
    pub fn font(&self, doc: &Document) -> Option<String> {
        let tree = doc.tree(self.node.part);
        let root = self.content_root(doc);
        xml::path::select_one(tree, root, "w:rPr/w:rFonts")
            .and_then(|f| tree.attr(f, "w:ascii"))
            .map(str::to_string)
    }

    /// Whether this wrapper sits on a hyperlink reference.
    pub fn is_hyperlink(&self, doc: &Document) -> bool {
        let tree = doc.tree(self.node.part);
        tree.has_tag(self.node.node, "w:hyperlink") && tree.attr(self.node.node, "r:id").is_some()
    }

    /// Target URL of the hyperlink, resolved through the document's
    /// relationship map. An unresolvable id yields `None`.
    pub fn href<'a>(&self, doc: &'a Document) -> Option<&'a str> {
        let tree = doc.tree(self.node.part);
        if !tree.has_tag(self.node.node, "w:hyperlink") {
            return None;
        }
        let id = tree.attr(self.node.node, "r:id")?;
        doc.properties().hyperlinks.get(id).map(String::as_str)
    }

    /// HTML fragment for this run. Nesting order is fixed: em
    /// innermost, then strong, then strike, then span, then anchor.
    pub fn to_html(&self, doc: &Document) -> String {
        let mut fragment = html::escape(&self.text(doc));
        let formatting = self.formatting(doc);
        if formatting.italic {
            fragment = html::tag("em", &fragment);
        }
        if formatting.bold {
            fragment = html::tag("strong", &fragment);
        }
        if formatting.strike {
            fragment = html::tag("s", &fragment);
        }
        let mut styles: Vec<(&str, String)> = Vec::new();
        if formatting.underline {
            styles.push(("text-decoration", "underline".to_string()));
        }
        if let Some(size) = self.font_size(doc) {
            if doc.properties().font_size != Some(size) {
                styles.push(("font-size", format!("{size}pt")));
            }
        }
        if let Some(color) = self.font_color(doc) {
            styles.push(("color", format!("#{color}")));
        }
        if let Some(family) = self.font(doc) {
            styles.push(("font-family", family));
        }
        if !styles.is_empty() {
            fragment = html::styled("span", &styles, &fragment);
        }
        if let Some(href) = self.href(doc) {
            fragment = html::anchor(href, &fragment);
        }
        fragment
    }
}
