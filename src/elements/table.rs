//! Tables: structural containers over rows, cells, and their
//! paragraphs.

use crate::document::{Document, NodeRef};
use crate::elements::element::Element;
use crate::elements::paragraph::Paragraph;
use crate::xml;

/// One `w:tbl` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Table {
    node: NodeRef,
}

impl Element for Table {
    const TAG: &'static str = "w:tbl";
    const PROPERTIES_TAG: Option<&'static str> = Some("w:tblPr");

    fn node_ref(&self) -> NodeRef {
        self.node
    }

    fn from_node_ref(_doc: &mut Document, node: NodeRef) -> Self {
        Self { node }
    }
}

impl Table {
    pub(crate) fn new(node: NodeRef) -> Self {
        Self { node }
    }

    /// Rows in document order.
    pub fn rows(&self, doc: &Document) -> Vec<TableRow> {
        let tree = doc.tree(self.node.part);
        tree.child_elements_by_tag(self.node.node, "w:tr")
            .map(|node| TableRow {
                node: NodeRef {
                    part: self.node.part,
                    node,
                },
            })
            .collect()
    }

    pub fn row_count(&self, doc: &Document) -> usize {
        self.rows(doc).len()
    }

    /// Declared column count, from the table grid.
    pub fn column_count(&self, doc: &Document) -> usize {
        let tree = doc.tree(self.node.part);
        xml::path::select_all(tree, self.node.node, "w:tblGrid/w:gridCol").len()
    }

    /// Columns synthesized by index projection over the rows. Built
    /// fresh on every call, so structural edits are always reflected.
    pub fn columns(&self, doc: &Document) -> Vec<TableColumn> {
        let rows = self.rows(doc);
        (0..self.column_count(doc))
            .map(|index| TableColumn {
                cells: rows
                    .iter()
                    .filter_map(|row| row.cells(doc).get(index).copied())
                    .collect(),
            })
            .collect()
    }
}

/// One `w:tr` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableRow {
    node: NodeRef,
}

impl Element for TableRow {
    const TAG: &'static str = "w:tr";
    const PROPERTIES_TAG: Option<&'static str> = Some("w:trPr");

    fn node_ref(&self) -> NodeRef {
        self.node
    }

    fn from_node_ref(_doc: &mut Document, node: NodeRef) -> Self {
        Self { node }
    }
}

impl TableRow {
    /// Cells in document order.
    pub fn cells(&self, doc: &Document) -> Vec<TableCell> {
        let tree = doc.tree(self.node.part);
        tree.child_elements_by_tag(self.node.node, "w:tc")
            .map(|node| TableCell {
                node: NodeRef {
                    part: self.node.part,
                    node,
                },
            })
            .collect()
    }
}

/// One `w:tc` cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableCell {
    node: NodeRef,
}

impl Element for TableCell {
    const TAG: &'static str = "w:tc";
    const PROPERTIES_TAG: Option<&'static str> = Some("w:tcPr");

    fn node_ref(&self) -> NodeRef {
        self.node
    }

    fn from_node_ref(_doc: &mut Document, node: NodeRef) -> Self {
        Self { node }
    }
}

impl TableCell {
    /// The cell's paragraphs, placeholder-reconciled like body
    /// paragraphs.
    pub fn paragraphs(&self, doc: &mut Document) -> Vec<Paragraph> {
        let tree = doc.tree(self.node.part);
        let part = self.node.part;
        let nodes: Vec<_> = tree
            .child_elements_by_tag(self.node.node, "w:p")
            .collect();
        nodes
            .into_iter()
            .map(|node| Paragraph::derive(doc, NodeRef { part, node }))
            .collect()
    }

    /// All paragraph text in the cell, joined with newlines.
    pub fn text(&self, doc: &mut Document) -> String {
        let paragraphs = self.paragraphs(doc);
        paragraphs
            .iter()
            .map(|p| p.text(doc))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A column, synthesized by projecting the same cell index across all
/// rows. Holds its cell handles directly; nothing in the tree
/// corresponds to a column.
#[derive(Debug, Clone)]
pub struct TableColumn {
    cells: Vec<TableCell>,
}

impl TableColumn {
    pub fn cells(&self) -> &[TableCell] {
        &self.cells
    }
}
