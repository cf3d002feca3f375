//! Bookmarks: position markers with text insertion around them.

use crate::document::{Document, NodeRef};
use crate::elements::element::Element;
use crate::elements::text_run::TextRun;

/// One `w:bookmarkStart` marker. Carries no content of its own; all
/// operations locate or create adjacent runs and paragraphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bookmark {
    node: NodeRef,
}

impl Element for Bookmark {
    const TAG: &'static str = "w:bookmarkStart";

    fn node_ref(&self) -> NodeRef {
        self.node
    }

    fn from_node_ref(_doc: &mut Document, node: NodeRef) -> Self {
        Self { node }
    }
}

impl Bookmark {
    pub(crate) fn new(node: NodeRef) -> Self {
        Self { node }
    }

    pub fn name(&self, doc: &Document) -> Option<String> {
        doc.tree(self.node.part)
            .attr(self.node.node, "w:name")
            .map(str::to_string)
    }

    /// Nearest preceding sibling run. When none exists, an empty run
    /// is spliced in directly before the marker, so callers can always
    /// append text without a null check.
    pub fn run_before(&self, doc: &mut Document) -> TextRun {
        let tree = doc.tree(self.node.part);
        let mut current = tree.prev_sibling(self.node.node);
        while let Some(node) = current {
            if tree.has_tag(node, "w:r") {
                return TextRun::new(NodeRef {
                    part: self.node.part,
                    node,
                });
            }
            current = tree.prev_sibling(node);
        }
        let run = TextRun::create_detached(doc, self.node.part);
        run.insert_before(doc, self.node);
        run
    }

    /// Nearest following sibling run, synthesized after the marker
    /// when none exists.
    pub fn run_after(&self, doc: &mut Document) -> TextRun {
        let tree = doc.tree(self.node.part);
        let mut current = tree.next_sibling(self.node.node);
        while let Some(node) = current {
            if tree.has_tag(node, "w:r") {
                return TextRun::new(NodeRef {
                    part: self.node.part,
                    node,
                });
            }
            current = tree.next_sibling(node);
        }
        let run = TextRun::create_detached(doc, self.node.part);
        run.insert_after(doc, self.node);
        run
    }

    /// Insert text reading-order-before the bookmark position by
    /// prepending to the run after the marker.
    pub fn insert_text_before(&self, doc: &mut Document, text: &str) {
        let run = self.run_after(doc);
        let existing = run.text(doc);
        run.set_text(doc, &format!("{text}{existing}"));
    }

    /// Insert text reading-order-after the bookmark position by
    /// appending to the run before the marker.
    pub fn insert_text_after(&self, doc: &mut Document, text: &str) {
        let run = self.run_before(doc);
        let existing = run.text(doc);
        run.set_text(doc, &format!("{existing}{text}"));
    }

    /// Fan the bookmark's paragraph out into one paragraph per line.
    ///
    /// The enclosing paragraph is blanked and used as a template: each
    /// line beyond the first gets a deep copy inserted after the
    /// previously inserted one, then every paragraph is assigned its
    /// line. Paragraph count grows by `lines.len() - 1`.
    pub fn insert_multiple_lines(&self, doc: &mut Document, lines: &[&str]) {
        let Some(first_line) = lines.first() else {
            return;
        };
        let Some(template) = self.parent_paragraph(doc) else {
            return;
        };
        template.blank(doc);

        let mut copies = Vec::with_capacity(lines.len() - 1);
        let mut previous = template.node_ref();
        for _ in 1..lines.len() {
            let copy = template.copy(doc);
            copy.insert_after(doc, previous);
            previous = copy.node_ref();
            copies.push(copy);
        }

        self.insert_text_after(doc, first_line);
        for (copy, line) in copies.iter().zip(&lines[1..]) {
            copy.set_text(doc, line);
        }
    }
}
