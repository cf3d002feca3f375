//! Shared helpers: build .docx archives in memory from XML part
//! strings, so no binary fixtures are needed.

#![allow(dead_code)]

use std::io::{Cursor, Write};

use vellum::Document;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

pub const XML_DECL: &str =
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>";

pub const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub const R_NS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
pub const W14_NS: &str = "http://schemas.microsoft.com/office/word/2010/wordml";

/// Zip the given entries in order.
pub fn docx_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, body) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(body.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

pub fn open(entries: &[(&str, &str)]) -> Document {
    Document::from_bytes(docx_bytes(entries)).unwrap()
}

/// A `word/document.xml` part with the given body content.
pub fn document_xml(body: &str) -> String {
    format!(
        "{XML_DECL}<w:document xmlns:w=\"{W_NS}\" xmlns:r=\"{R_NS}\"><w:body>{body}</w:body></w:document>"
    )
}

pub fn run(text: &str) -> String {
    format!("<w:r><w:t>{text}</w:t></w:r>")
}

pub fn paragraph(run_texts: &[&str]) -> String {
    let runs: String = run_texts.iter().map(|t| run(t)).collect();
    format!("<w:p>{runs}</w:p>")
}

/// A document whose body is one paragraph per entry, one run each.
pub fn document_of_paragraphs(texts: &[&str]) -> Document {
    let body: String = texts.iter().map(|t| paragraph(&[t])).collect();
    open(&[("word/document.xml", &document_xml(&body))])
}

/// Two paragraphs, "hello" and "world".
pub fn basic_document() -> Document {
    document_of_paragraphs(&["hello", "world"])
}

/// A `word/styles.xml` part declaring a default font size (half-points)
/// and the given style definitions.
pub fn styles_xml(default_sz_half_points: u32, styles: &str) -> String {
    format!(
        "{XML_DECL}<w:styles xmlns:w=\"{W_NS}\" xmlns:w14=\"{W14_NS}\">\
<w:docDefaults><w:rPrDefault><w:rPr><w:sz w:val=\"{default_sz_half_points}\"/></w:rPr></w:rPrDefault></w:docDefaults>\
{styles}</w:styles>"
    )
}

/// One fully populated paragraph style, id and name "Red". Every
/// attribute the engine declares has a concrete value here.
pub fn full_red_style() -> &'static str {
    concat!(
        "<w:style w:type=\"paragraph\" w:styleId=\"Red\">",
        "<w:name w:val=\"Red\"/>",
        "<w:next w:val=\"Red\"/>",
        "<w:pPr>",
        "<w:keepNext w:val=\"0\"/>",
        "<w:keepLines w:val=\"0\"/>",
        "<w:pageBreakBefore w:val=\"0\"/>",
        "<w:widowControl w:val=\"1\"/>",
        "<w:shd w:val=\"clear\" w:color=\"auto\" w:fill=\"auto\"/>",
        "<w:suppressAutoHyphens w:val=\"0\"/>",
        "<w:bidi w:val=\"0\"/>",
        "<w:spacing w:before=\"0\" w:after=\"200\" w:line=\"240\" w:lineRule=\"auto\"/>",
        "<w:ind w:start=\"0\" w:end=\"0\" w:firstLine=\"0\"/>",
        "<w:jc w:val=\"left\"/>",
        "<w:outlineLvl w:val=\"9\"/>",
        "</w:pPr>",
        "<w:rPr>",
        "<w:rFonts w:ascii=\"Cambria\" w:cs=\"Arial Unicode MS\" w:hAnsi=\"Cambria\" w:eastAsia=\"Arial Unicode MS\"/>",
        "<w:b w:val=\"1\"/>",
        "<w:i w:val=\"0\"/>",
        "<w:caps w:val=\"0\"/>",
        "<w:smallCaps w:val=\"0\"/>",
        "<w:strike w:val=\"0\"/>",
        "<w:dstrike w:val=\"0\"/>",
        "<w:outline w:val=\"0\"/>",
        "<w:shd w:val=\"clear\" w:color=\"auto\" w:fill=\"auto\"/>",
        "<w:color w:val=\"99403d\"/>",
        "<w:sz w:val=\"24\"/>",
        "<w:szCs w:val=\"24\"/>",
        "<w:u w:val=\"none\" w:color=\"000000\"/>",
        "<w:spacing w:val=\"0\"/>",
        "<w:kern w:val=\"0\"/>",
        "<w:position w:val=\"0\"/>",
        "<w14:textFill><w14:solidFill><w14:srgbClr w14:val=\"9A403E\"/></w14:solidFill></w14:textFill>",
        "<w:vertAlign w:val=\"baseline\"/>",
        "<w:lang w:val=\"en-US\"/>",
        "</w:rPr>",
        "</w:style>"
    )
}

/// Relationships part mapping hyperlink ids to targets.
pub fn rels_xml(links: &[(&str, &str)]) -> String {
    let relationships: String = links
        .iter()
        .map(|(id, target)| {
            format!(
                "<Relationship Id=\"{id}\" \
Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink\" \
Target=\"{target}\" TargetMode=\"External\"/>"
            )
        })
        .collect();
    format!(
        "{XML_DECL}<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">{relationships}</Relationships>"
    )
}
