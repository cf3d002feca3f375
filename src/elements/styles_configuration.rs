//! Registry view over the styles part.

use crate::document::{Document, NodeRef, PartId};
use crate::elements::style::{Style, StyleValue};
use crate::error::{Error, Result};

/// Lookup, creation, and removal of style definitions. The registry
/// is a view: `styles` and `size` re-scan the tree on every call, so
/// they always reflect the current state.
#[derive(Debug, Clone, Copy)]
pub struct StylesConfiguration {
    part: PartId,
}

impl StylesConfiguration {
    pub(crate) fn new(part: PartId) -> Self {
        Self { part }
    }

    /// Style definitions carrying an id, in document order.
    pub fn styles(&self, doc: &Document) -> Vec<Style> {
        let tree = doc.tree(self.part);
        let Some(root) = tree.root() else {
            return Vec::new();
        };
        tree.child_elements_by_tag(root, "w:style")
            .filter(|&node| tree.attr(node, "w:styleId").is_some())
            .map(|node| {
                Style::new(NodeRef {
                    part: self.part,
                    node,
                })
            })
            .collect()
    }

    pub fn size(&self, doc: &Document) -> usize {
        self.styles(doc).len()
    }

    /// First style whose id or display name matches.
    pub fn style_of(&self, doc: &Document, id_or_name: &str) -> Result<Style> {
        self.styles(doc)
            .into_iter()
            .find(|style| {
                style.id(doc).as_deref() == Some(id_or_name)
                    || style.name(doc).as_deref() == Some(id_or_name)
            })
            .ok_or_else(|| Error::StyleNotFound(id_or_name.to_string()))
    }

    /// Create a new definition under the style-sheet root with its id
    /// and name both set to `id`. Other attributes (including the
    /// required `type`) are left for the caller to assign, so the new
    /// style may not be `valid` yet.
    pub fn add_style(&self, doc: &mut Document, id: &str) -> Result<Style> {
        self.add_style_with(doc, id, &[])
    }

    /// Like [`StylesConfiguration::add_style`], then assign
    /// `attributes` through the attribute engine. Entries may override
    /// the id/name defaults; a rejected value fails the whole call with
    /// the style already in the sheet.
    pub fn add_style_with(
        &self,
        doc: &mut Document,
        id: &str,
        attributes: &[(&str, StyleValue)],
    ) -> Result<Style> {
        let tree = doc.tree_mut(self.part);
        let root = tree
            .root()
            .ok_or_else(|| Error::InvalidPackage("styles part has no root".to_string()))?;
        let node = tree.create_element("w:style");
        tree.append(root, node);
        let style = Style::new(NodeRef {
            part: self.part,
            node,
        });
        style.set(doc, "id", Some(id.into()))?;
        style.set(doc, "name", Some(id.into()))?;
        for (name, value) in attributes {
            style.set(doc, name, Some(value.clone()))?;
        }
        Ok(style)
    }

    /// Remove the definition matching `id_or_name`.
    pub fn remove_style(&self, doc: &mut Document, id_or_name: &str) -> Result<()> {
        let style = self.style_of(doc, id_or_name)?;
        style.remove(doc);
        Ok(())
    }
}
