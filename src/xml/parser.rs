//! XML part parsing into an [`XmlTree`].

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::error::{Error, Result};
use crate::xml::tree::{NodeId, XmlTree};

/// Parse one XML part into a tree.
///
/// Whitespace between elements is kept as text nodes so that edited
/// parts serialize close to their source form. Entity references are
/// resolved into the adjacent text node.
pub fn parse(bytes: &[u8]) -> Result<XmlTree> {
    let mut reader = Reader::from_reader(bytes);
    let mut tree = XmlTree::new();
    let mut stack: Vec<NodeId> = vec![tree.document()];
    let mut pending_text = String::new();
    let mut buf = Vec::with_capacity(1024);

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                flush_text(&mut tree, &stack, &mut pending_text);
                let element = create_element_from(&mut tree, &e)?;
                append_to_top(&mut tree, &stack, element);
                stack.push(element);
            }
            Ok(Event::Empty(e)) => {
                flush_text(&mut tree, &stack, &mut pending_text);
                let element = create_element_from(&mut tree, &e)?;
                append_to_top(&mut tree, &stack, element);
            }
            Ok(Event::End(_)) => {
                flush_text(&mut tree, &stack, &mut pending_text);
                if stack.len() > 1 {
                    stack.pop();
                }
            }
            Ok(Event::Text(e)) => {
                pending_text.push_str(&String::from_utf8_lossy(e.as_ref()));
            }
            Ok(Event::GeneralRef(e)) => {
                let name = String::from_utf8_lossy(e.as_ref()).into_owned();
                if let Some(resolved) = resolve_reference(&name) {
                    pending_text.push_str(&resolved);
                }
            }
            Ok(Event::CData(e)) => {
                flush_text(&mut tree, &stack, &mut pending_text);
                let cdata = tree.create_cdata(String::from_utf8_lossy(e.as_ref()).into_owned());
                append_to_top(&mut tree, &stack, cdata);
            }
            Ok(Event::Comment(e)) => {
                flush_text(&mut tree, &stack, &mut pending_text);
                let comment = tree.create_comment(String::from_utf8_lossy(e.as_ref()).into_owned());
                append_to_top(&mut tree, &stack, comment);
            }
            Ok(Event::Decl(e)) => {
                tree.standalone = match e.standalone() {
                    Some(Ok(value)) => Some(value.as_ref() == b"yes"),
                    _ => None,
                };
            }
            Ok(Event::PI(_)) | Ok(Event::DocType(_)) => {}
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(e)),
        }
        buf.clear();
    }

    flush_text(&mut tree, &stack, &mut pending_text);
    Ok(tree)
}

fn create_element_from(
    tree: &mut XmlTree,
    e: &quick_xml::events::BytesStart<'_>,
) -> Result<NodeId> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let element = tree.create_element(name);
    for attr in e.attributes().flatten() {
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let raw = String::from_utf8_lossy(&attr.value).into_owned();
        let value = match quick_xml::escape::unescape(&raw) {
            Ok(unescaped) => unescaped.into_owned(),
            Err(_) => raw,
        };
        tree.set_attr(element, &key, &value);
    }
    Ok(element)
}

fn append_to_top(tree: &mut XmlTree, stack: &[NodeId], node: NodeId) {
    if let Some(&top) = stack.last() {
        tree.append(top, node);
    }
}

fn flush_text(tree: &mut XmlTree, stack: &[NodeId], pending: &mut String) {
    if pending.is_empty() {
        return;
    }
    let text = tree.create_text(std::mem::take(pending));
    append_to_top(tree, stack, text);
}

/// Resolve a general entity reference (`&name;`) or character
/// reference (`&#160;`, `&#xA0;`). Unknown named entities resolve to
/// nothing rather than failing the parse.
fn resolve_reference(name: &str) -> Option<String> {
    match name {
        "amp" => return Some("&".to_string()),
        "lt" => return Some("<".to_string()),
        "gt" => return Some(">".to_string()),
        "apos" => return Some("'".to_string()),
        "quot" => return Some("\"".to_string()),
        _ => {}
    }
    let digits = name.strip_prefix('#')?;
    let code = match digits.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse::<u32>().ok()?,
    };
    char::from_u32(code).map(|c| c.to_string())
}
