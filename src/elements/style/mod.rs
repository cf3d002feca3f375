//! Style definitions and their attribute engine.

pub(crate) mod attributes;

use crate::document::{Document, NodeRef};
use crate::elements::element::Element;
use crate::error::{Error, Result};
use crate::xml::{self, path::AttrPath};

use attributes::{ATTRIBUTES, descriptor};

/// A typed style attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleValue {
    Str(String),
    Bool(bool),
    /// Numeric values, e.g. a font size in points.
    Int(u32),
}

impl StyleValue {
    /// String form, used for identity encoding and error messages.
    pub(crate) fn render(&self) -> String {
        match self {
            StyleValue::Str(s) => s.clone(),
            StyleValue::Bool(b) => if *b { "1" } else { "0" }.to_string(),
            StyleValue::Int(i) => i.to_string(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            StyleValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            StyleValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<u32> {
        match self {
            StyleValue::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Str(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        StyleValue::Str(value)
    }
}

impl From<bool> for StyleValue {
    fn from(value: bool) -> Self {
        StyleValue::Bool(value)
    }
}

impl From<u32> for StyleValue {
    fn from(value: u32) -> Self {
        StyleValue::Int(value)
    }
}

/// One `w:style` definition inside the styles part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    node: NodeRef,
}

impl Element for Style {
    const TAG: &'static str = "w:style";

    fn node_ref(&self) -> NodeRef {
        self.node
    }

    fn from_node_ref(_doc: &mut Document, node: NodeRef) -> Self {
        Self { node }
    }
}

impl Style {
    pub(crate) fn new(node: NodeRef) -> Self {
        Self { node }
    }

    /// Read a named attribute. Selectors are tried in declared order;
    /// the first resolving one wins. Absence is `Ok(None)`.
    pub fn get(&self, doc: &Document, name: &str) -> Result<Option<StyleValue>> {
        let desc =
            descriptor(name).ok_or_else(|| Error::UnknownStyleAttribute(name.to_string()))?;
        let tree = doc.tree(self.node.part);
        for selector in desc.selectors {
            let Some(attr_path) = AttrPath::parse(selector) else {
                continue;
            };
            let Some(target) = attr_path.target(tree, self.node.node) else {
                continue;
            };
            if let Some(raw) = tree.attr(target, attr_path.attr) {
                return Ok(Some(desc.converter.decode(raw)));
            }
        }
        Ok(None)
    }

    /// Write a named attribute across all of its selectors, creating
    /// missing element paths as needed. `None` unsets the attribute.
    ///
    /// Validation runs before any mutation, so a rejected value leaves
    /// every selector untouched.
    pub fn set(&self, doc: &mut Document, name: &str, value: Option<StyleValue>) -> Result<()> {
        let desc =
            descriptor(name).ok_or_else(|| Error::UnknownStyleAttribute(name.to_string()))?;
        if desc.required && value.is_none() {
            return Err(Error::RequiredPropertyValue(desc.name));
        }
        if let Some(ref v) = value {
            if !desc.validator.accepts(v) {
                return Err(Error::InvalidPropertyValue {
                    name: desc.name,
                    value: v.render(),
                });
            }
        }
        let encoded = value.as_ref().map(|v| desc.converter.encode(v));
        let part = self.node.part;
        for selector in desc.selectors {
            let Some(attr_path) = AttrPath::parse(selector) else {
                continue;
            };
            match &encoded {
                Some(raw) => {
                    let target = attr_path.ensure_target(doc.tree_mut(part), self.node.node);
                    doc.tree_mut(part).set_attr(target, attr_path.attr, raw);
                }
                None => {
                    let tree = doc.tree_mut(part);
                    if let Some(target) = attr_path.target(tree, self.node.node) {
                        tree.remove_attr(target, attr_path.attr);
                    }
                }
            }
        }
        Ok(())
    }

    pub fn id(&self, doc: &Document) -> Option<String> {
        self.get_str(doc, "id")
    }

    pub fn name(&self, doc: &Document) -> Option<String> {
        self.get_str(doc, "name")
    }

    fn get_str(&self, doc: &Document, attr: &str) -> Option<String> {
        match self.get(doc, attr) {
            Ok(Some(StyleValue::Str(s))) => Some(s),
            _ => None,
        }
    }

    /// Whether every required attribute currently resolves to a value
    /// its validator accepts.
    pub fn valid(&self, doc: &Document) -> bool {
        ATTRIBUTES
            .iter()
            .filter(|desc| desc.required)
            .all(|desc| match self.get(doc, desc.name) {
                Ok(Some(value)) => desc.validator.accepts(&value),
                _ => false,
            })
    }

    /// Detach the definition from the styles part.
    pub fn remove(&self, doc: &mut Document) {
        doc.tree_mut(self.node.part).detach(self.node.node);
    }

    /// Serialized XML of this definition.
    pub fn to_xml(&self, doc: &Document) -> Result<Vec<u8>> {
        xml::serialize_node(doc.tree(self.node.part), self.node.node)
    }
}
