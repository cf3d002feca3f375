//! Serialization of an [`XmlTree`] back to bytes.

use std::io::Cursor;

use quick_xml::Writer;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::Result;
use crate::xml::tree::{NodeData, NodeId, XmlTree};

/// Serialize the whole part, prefixed with an XML declaration.
///
/// Output is UTF-8. Elements without children are written
/// self-closing; no indentation or reordering is applied beyond what
/// the event writer does by default.
pub fn serialize(tree: &XmlTree) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    let standalone = match tree.standalone {
        Some(true) => Some("yes"),
        Some(false) => Some("no"),
        None => None,
    };
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), standalone)))?;
    for child in tree.children(tree.document()) {
        write_node(&mut writer, tree, child)?;
    }
    Ok(writer.into_inner().into_inner())
}

/// Serialize a single subtree without an XML declaration.
pub fn serialize_node(tree: &XmlTree, id: NodeId) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    write_node(&mut writer, tree, id)?;
    Ok(writer.into_inner().into_inner())
}

fn write_node(writer: &mut Writer<Cursor<Vec<u8>>>, tree: &XmlTree, id: NodeId) -> Result<()> {
    let Some(node) = tree.get(id) else {
        return Ok(());
    };
    match &node.data {
        NodeData::Document => {
            for child in tree.children(id) {
                write_node(writer, tree, child)?;
            }
        }
        NodeData::Element { name, attrs } => {
            let mut start = BytesStart::new(name.as_str());
            for attr in attrs {
                start.push_attribute((attr.name.as_str(), attr.value.as_str()));
            }
            if tree.children(id).next().is_none() {
                writer.write_event(Event::Empty(start))?;
            } else {
                writer.write_event(Event::Start(start))?;
                for child in tree.children(id) {
                    write_node(writer, tree, child)?;
                }
                writer.write_event(Event::End(BytesEnd::new(name.as_str())))?;
            }
        }
        NodeData::Text(text) => {
            writer.write_event(Event::Text(BytesText::new(text)))?;
        }
        NodeData::CData(text) => {
            writer.write_event(Event::CData(BytesCData::new(text.as_str())))?;
        }
        NodeData::Comment(text) => {
            writer.write_event(Event::Comment(BytesText::from_escaped(text.as_str())))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parser::parse;

    #[test]
    fn roundtrips_simple_part() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="ns"><w:body><w:p><w:r><w:t>hello</w:t></w:r></w:p></w:body></w:document>"#;
        let tree = parse(xml).unwrap();
        let out = serialize(&tree).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), String::from_utf8_lossy(xml));
    }

    #[test]
    fn escapes_text_and_attributes() {
        let mut tree = XmlTree::new();
        let t = tree.create_element("w:t");
        tree.append(tree.document(), t);
        tree.set_attr(t, "w:val", "a<b");
        let text = tree.create_text("x & y");
        tree.append(t, text);

        let out = String::from_utf8(serialize_node(&tree, t).unwrap()).unwrap();
        assert_eq!(out, r#"<w:t w:val="a&lt;b">x &amp; y</w:t>"#);
    }

    #[test]
    fn empty_elements_self_close() {
        let mut tree = XmlTree::new();
        let rpr = tree.create_element("w:rPr");
        tree.append(tree.document(), rpr);
        let i = tree.create_element("w:i");
        tree.append(rpr, i);

        let out = String::from_utf8(serialize_node(&tree, rpr).unwrap()).unwrap();
        assert_eq!(out, "<w:rPr><w:i/></w:rPr>");
    }
}
