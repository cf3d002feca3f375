//! Paragraph wrapper and `{{token}}` placeholder reconciliation.

use std::sync::LazyLock;

use regex::Regex;

use crate::document::{Document, NodeRef};
use crate::elements::element::Element;
use crate::elements::text_run::TextRun;
use crate::elements::{Collapse, ContentOp, assign_content};
use crate::error::{Error, Result};
use crate::html;
use crate::xml;

/// Non-greedy, no nested braces. `{{out{{er}}` is not one match.
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{[^{}]*?\}\}").unwrap());

/// One `w:p` paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paragraph {
    node: NodeRef,
}

impl Element for Paragraph {
    const TAG: &'static str = "w:p";
    const PROPERTIES_TAG: Option<&'static str> = Some("w:pPr");

    fn node_ref(&self) -> NodeRef {
        self.node
    }

    fn from_node_ref(doc: &mut Document, node: NodeRef) -> Self {
        Self::derive(doc, node)
    }
}

impl Paragraph {
    /// Wrap a paragraph node, reconciling placeholders split across
    /// run boundaries first.
    pub(crate) fn derive(doc: &mut Document, node: NodeRef) -> Self {
        let paragraph = Self { node };
        paragraph.reconcile_placeholders(doc);
        paragraph
    }

    /// Runs in document order. A `w:hyperlink` child counts as one run.
    pub fn text_runs(&self, doc: &Document) -> Vec<TextRun> {
        let tree = doc.tree(self.node.part);
        tree.children(self.node.node)
            .filter(|&child| tree.has_tag(child, "w:r") || tree.has_tag(child, "w:hyperlink"))
            .map(|node| {
                TextRun::new(NodeRef {
                    part: self.node.part,
                    node,
                })
            })
            .collect()
    }

    /// Concatenated run text in document order.
    pub fn text(&self, doc: &Document) -> String {
        self.text_runs(doc)
            .iter()
            .map(|run| run.text(doc))
            .collect()
    }

    /// Replace the paragraph's content with a single run carrying
    /// `content`. Collapsing two or more runs into one loses their
    /// per-run formatting.
    pub fn set_text(&self, doc: &mut Document, content: &str) {
        let runs = self.text_runs(doc);
        let part = self.node.part;
        let parent = self.node.node;
        assign_content(&runs, Collapse::RemoveExtras, |op, run| match (op, run) {
            (ContentOp::Create, _) => {
                let node = doc.tree_mut(part).create_element("w:r");
                doc.tree_mut(part).append(parent, node);
                TextRun::new(NodeRef { part, node }).set_text(doc, content);
            }
            (ContentOp::Overwrite, Some(run)) => run.set_text(doc, content),
            (ContentOp::Remove, Some(run)) => {
                doc.tree_mut(part).detach(run.node_ref().node);
            }
            _ => {}
        });
    }

    /// Remove every run, leaving markers (bookmarks) and properties in
    /// place.
    pub fn blank(&self, doc: &mut Document) {
        let runs = self.text_runs(doc);
        for run in runs {
            doc.tree_mut(self.node.part).detach(run.node_ref().node);
        }
    }

    /// Merge `{{token}}` placeholders that the originating editor split
    /// across several runs, so each occurrence sits wholly inside one
    /// run and a single substitution on that run can replace it.
    ///
    /// The content map (each run's offset range in the concatenated
    /// text) is computed once from the original run boundaries, and
    /// occurrences are repaired in left-to-right order: the run holding
    /// an occurrence's start keeps its prefix and receives the whole
    /// token, later runs lose the covered portion and keep whatever
    /// follows it. An occurrence already contained in one run is left
    /// untouched. Returns the number of occurrences that could not be
    /// mapped to any run and were skipped.
    pub fn reconcile_placeholders(&self, doc: &mut Document) -> usize {
        let runs = self.text_runs(doc);
        let mut spans = Vec::with_capacity(runs.len());
        let mut full = String::new();
        for run in &runs {
            let text = run.text(doc);
            let start = full.len();
            full.push_str(&text);
            spans.push((start, full.len(), text));
        }

        let position_of = |offset: usize| {
            spans
                .iter()
                .position(|&(start, end, _)| offset >= start && offset < end)
        };

        let mut skipped = 0;
        let mut repairs: Vec<(usize, usize)> = Vec::new();
        for m in PLACEHOLDER.find_iter(&full) {
            // end - 1 stays inside the closing brace.
            match (position_of(m.start()), position_of(m.end() - 1)) {
                (Some(first), Some(last)) => {
                    if first != last {
                        repairs.push((m.start(), m.end()));
                    }
                }
                _ => skipped += 1,
            }
        }
        if repairs.is_empty() {
            return skipped;
        }

        for (index, run) in runs.iter().enumerate() {
            let (start, end) = (spans[index].0, spans[index].1);
            let mut merged = String::new();
            let mut cursor = start;
            for &(m_start, m_end) in &repairs {
                if m_end <= start || m_start >= end {
                    continue;
                }
                if m_start > cursor {
                    merged.push_str(&full[cursor..m_start]);
                }
                if m_start >= start {
                    merged.push_str(&full[m_start..m_end]);
                }
                cursor = cursor.max(m_end);
            }
            if cursor < end {
                merged.push_str(&full[cursor..end]);
            }
            if merged != spans[index].2 {
                run.set_text(doc, &merged);
            }
        }
        skipped
    }

    /// Style id from the paragraph properties, if referenced.
    pub fn style_id(&self, doc: &Document) -> Option<String> {
        let tree = doc.tree(self.node.part);
        xml::path::select_one(tree, self.node.node, "w:pPr/w:pStyle")
            .and_then(|node| tree.attr(node, "w:val"))
            .map(str::to_string)
    }

    /// Display name of the referenced style, resolved through the
    /// styles part.
    pub fn style(&self, doc: &Document) -> Option<String> {
        let id = self.style_id(doc)?;
        let configuration = doc.styles_configuration()?;
        configuration
            .style_of(doc, &id)
            .ok()
            .and_then(|style| style.name(doc))
    }

    /// Point the paragraph at a style, looked up by id or display
    /// name. Fails with [`Error::StyleNotFound`] when no such style
    /// exists.
    pub fn set_style(&self, doc: &mut Document, id_or_name: &str) -> Result<()> {
        let configuration = doc
            .styles_configuration()
            .ok_or_else(|| Error::StyleNotFound(id_or_name.to_string()))?;
        let style = configuration.style_of(doc, id_or_name)?;
        let id = style
            .id(doc)
            .ok_or_else(|| Error::StyleNotFound(id_or_name.to_string()))?;
        if let Some(properties) = self.properties(doc) {
            let tree = doc.tree_mut(self.node.part);
            let pstyle = match tree.first_child_element(properties.node, "w:pStyle") {
                Some(existing) => existing,
                None => {
                    let created = tree.create_element("w:pStyle");
                    tree.append(properties.node, created);
                    created
                }
            };
            tree.set_attr(pstyle, "w:val", &id);
        }
        Ok(())
    }

    /// Explicit alignment value (`left`, `center`, `right`, `both`).
    pub fn alignment(&self, doc: &Document) -> Option<String> {
        let tree = doc.tree(self.node.part);
        xml::path::select_one(tree, self.node.node, "w:pPr/w:jc")
            .and_then(|jc| tree.attr(jc, "w:val"))
            .map(str::to_string)
    }

    /// Left is the implicit default: true for an explicit `left` and
    /// for no alignment at all.
    pub fn aligned_left(&self, doc: &Document) -> bool {
        matches!(self.alignment(doc).as_deref(), None | Some("left"))
    }

    pub fn aligned_center(&self, doc: &Document) -> bool {
        self.alignment(doc).as_deref() == Some("center")
    }

    pub fn aligned_right(&self, doc: &Document) -> bool {
        self.alignment(doc).as_deref() == Some("right")
    }

    /// Paragraph-level font size in points, falling back to the
    /// document default.
    pub fn font_size(&self, doc: &Document) -> Option<u32> {
        let tree = doc.tree(self.node.part);
        let explicit = tree
            .first_child_element(self.node.node, "w:pPr")
            .and_then(|ppr| tree.descendants(ppr).find(|&d| tree.has_tag(d, "w:sz")))
            .and_then(|sz| tree.attr(sz, "w:val"))
            .and_then(|v| v.parse::<u32>().ok())
            .map(|half_points| half_points / 2);
        explicit.or(doc.properties().font_size)
    }

    /// Paragraph-level font color (hex, no `#`), if set.
    pub fn font_color(&self, doc: &Document) -> Option<String> {
        let tree = doc.tree(self.node.part);
        xml::path::select_one(tree, self.node.node, "w:pPr/w:rPr/w:color")
            .and_then(|c| tree.attr(c, "w:val"))
            .map(str::to_string)
    }

    /// HTML fragment: run fragments wrapped in a `p` tag, with inline
    /// styles only for values that differ from the defaults.
    pub fn to_html(&self, doc: &Document) -> String {
        let content: String = self
            .text_runs(doc)
            .iter()
            .map(|run| run.to_html(doc))
            .collect();
        let mut styles: Vec<(&str, String)> = Vec::new();
        if let Some(size) = self.font_size(doc) {
            if doc.properties().font_size != Some(size) {
                styles.push(("font-size", format!("{size}pt")));
            }
        }
        if let Some(color) = self.font_color(doc) {
            styles.push(("color", format!("#{color}")));
        }
        if let Some(align) = self.alignment(doc) {
            if align != "left" {
                styles.push(("text-align", align));
            }
        }
        html::styled("p", &styles, &content)
    }
}
