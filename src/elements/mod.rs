//! Wrapper types over WordprocessingML elements.
//!
//! Every wrapper is a cheap copyable handle ([`crate::document::NodeRef`])
//! into one of the document's XML trees. Child collections are
//! re-derived from the tree on every access, never cached, so
//! structural edits are immediately visible through existing wrappers.

pub mod bookmark;
pub mod element;
pub mod paragraph;
pub mod style;
pub mod styles_configuration;
pub mod table;
pub mod text_run;

pub use bookmark::Bookmark;
pub use element::Element;
pub use paragraph::Paragraph;
pub use style::{Style, StyleValue};
pub use styles_configuration::StylesConfiguration;
pub use table::{Table, TableCell, TableColumn, TableRow};
pub use text_run::{Formatting, TextRun};

use crate::xml::{NodeId, XmlTree};

/// How a text setter treats content nodes beyond the first.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Collapse {
    /// Overwrite the first node, blank the rest.
    ClearExtras,
    /// Remove every node and create a fresh one.
    RemoveExtras,
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum ContentOp {
    Create,
    Overwrite,
    Clear,
    Remove,
}

/// Tri-state content assignment shared by the run-level and
/// paragraph-level text setters: zero content nodes creates one, one is
/// overwritten in place, more than one collapses per `collapse`.
pub(crate) fn assign_content<T: Copy>(
    items: &[T],
    collapse: Collapse,
    mut apply: impl FnMut(ContentOp, Option<T>),
) {
    match (items, collapse) {
        ([], _) => apply(ContentOp::Create, None),
        ([only], _) => apply(ContentOp::Overwrite, Some(*only)),
        (many, Collapse::ClearExtras) => {
            apply(ContentOp::Overwrite, Some(many[0]));
            for &item in &many[1..] {
                apply(ContentOp::Clear, Some(item));
            }
        }
        (many, Collapse::RemoveExtras) => {
            for &item in many {
                apply(ContentOp::Remove, Some(item));
            }
            apply(ContentOp::Create, None);
        }
    }
}

/// Replace the text content of an element (e.g. one `w:t`) with a
/// single text node.
pub(crate) fn set_element_text(tree: &mut XmlTree, element: NodeId, content: &str) {
    let texts: Vec<NodeId> = tree
        .children(element)
        .filter(|&child| tree.text(child).is_some())
        .collect();
    match texts.split_first() {
        Some((&first, rest)) => {
            tree.set_text(first, content);
            for &extra in rest {
                tree.detach(extra);
            }
        }
        None => {
            let text = tree.create_text(content);
            tree.append(element, text);
        }
    }
}
