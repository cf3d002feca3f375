//! Read-path tests: opening documents, extracting parts, and deriving
//! paragraph, run, table, and bookmark views.

use std::io::Cursor;

use vellum::{Document, Error};

mod common;
use common::*;

// ============================================================================
// Opening
// ============================================================================

#[test]
fn test_open_basic_document() {
    let mut doc = basic_document();
    assert_eq!(doc.paragraphs().len(), 2);
    assert_eq!(doc.text(), "hello\nworld");
}

#[test]
fn test_reader_and_bytes_sources_are_equivalent() {
    let bytes = docx_bytes(&[(
        "word/document.xml",
        &document_xml(&paragraph(&["same"])),
    )]);
    let mut from_bytes = Document::from_bytes(bytes.clone()).unwrap();
    let mut from_reader = Document::from_reader(Cursor::new(bytes)).unwrap();
    assert_eq!(from_bytes.text(), from_reader.text());
}

#[test]
fn test_garbage_input_fails_as_invalid_archive() {
    let result = Document::from_bytes(b"definitely not a zip file".to_vec());
    assert!(matches!(result, Err(Error::Zip(_))));
}

#[test]
fn test_archive_without_main_part_fails_as_not_found() {
    let bytes = docx_bytes(&[("word/styles.xml", &styles_xml(22, ""))]);
    let result = Document::from_bytes(bytes);
    assert!(matches!(result, Err(Error::EntryNotFound(_))));
}

#[test]
fn test_header_and_footer_parts_keyed_by_filename_stem() {
    let doc = open(&[
        ("word/document.xml", &document_xml(&paragraph(&["body"]))),
        ("word/header1.xml", &document_xml(&paragraph(&["h1"]))),
        ("word/header2.xml", &document_xml(&paragraph(&["h2"]))),
        ("word/footer1.xml", &document_xml(&paragraph(&["f1"]))),
    ]);
    let names: Vec<&str> = doc.part_names().collect();
    assert!(names.contains(&"document"));
    assert!(names.contains(&"header1"));
    assert!(names.contains(&"header2"));
    assert!(names.contains(&"footer1"));
}

// ============================================================================
// Paragraphs and Runs
// ============================================================================

#[test]
fn test_paragraphs_exclude_those_nested_in_tables() {
    let body = format!(
        "{}<w:tbl><w:tr><w:tc>{}</w:tc></w:tr></w:tbl>{}",
        paragraph(&["first"]),
        paragraph(&["in table"]),
        paragraph(&["last"]),
    );
    let mut doc = open(&[("word/document.xml", &document_xml(&body))]);
    assert_eq!(doc.paragraphs().len(), 2);
    assert_eq!(doc.text(), "first\nlast");
    assert_eq!(doc.tables().len(), 1);
}

#[test]
fn test_run_formatting_flags() {
    let body = "<w:p>\
<w:r><w:rPr><w:i/><w:b/></w:rPr><w:t>styled</w:t></w:r>\
<w:r><w:rPr><w:u w:val=\"single\"/><w:strike/></w:rPr><w:t>lined</w:t></w:r>\
<w:r><w:t>plain</w:t></w:r>\
</w:p>";
    let mut doc = open(&[("word/document.xml", &document_xml(body))]);
    let paragraphs = doc.paragraphs();
    let runs = paragraphs[0].text_runs(&doc);
    assert_eq!(runs.len(), 3);

    let first = runs[0].formatting(&doc);
    assert!(first.italic && first.bold && !first.underline && !first.strike);

    let second = runs[1].formatting(&doc);
    assert!(!second.italic && !second.bold && second.underline && second.strike);

    // No run properties at all: every flag false.
    let third = runs[2].formatting(&doc);
    assert_eq!(
        (third.italic, third.bold, third.underline, third.strike),
        (false, false, false, false)
    );
}

#[test]
fn test_font_sizes_resolve_through_document_default() {
    let body = format!(
        "{}<w:p><w:r><w:rPr><w:sz w:val=\"28\"/></w:rPr><w:t>big</w:t></w:r></w:p>",
        paragraph(&["default"]),
    );
    let mut doc = open(&[
        ("word/document.xml", &document_xml(&body)),
        ("word/styles.xml", &styles_xml(22, "")),
    ]);
    assert_eq!(doc.font_size(), Some(11));

    let paragraphs = doc.paragraphs();
    let default_run = &paragraphs[0].text_runs(&doc)[0];
    let sized_run = &paragraphs[1].text_runs(&doc)[0];
    assert_eq!(default_run.font_size(&doc), Some(11));
    assert_eq!(sized_run.font_size(&doc), Some(14));
}

#[test]
fn test_font_size_is_none_without_styles_part() {
    let doc = basic_document();
    assert_eq!(doc.font_size(), None);
}

// ============================================================================
// Hyperlinks
// ============================================================================

#[test]
fn test_hyperlink_href_resolves_through_relationship_map() {
    let body = "<w:p>\
<w:hyperlink r:id=\"rId1\"><w:r><w:t>click</w:t></w:r></w:hyperlink>\
<w:hyperlink r:id=\"rId9\"><w:r><w:t>dangling</w:t></w:r></w:hyperlink>\
</w:p>";
    let mut doc = open(&[
        ("word/document.xml", &document_xml(body)),
        (
            "word/_rels/document.xml.rels",
            &rels_xml(&[("rId1", "https://example.com/")]),
        ),
    ]);
    let paragraphs = doc.paragraphs();
    let runs = paragraphs[0].text_runs(&doc);
    assert_eq!(runs.len(), 2);

    assert!(runs[0].is_hyperlink(&doc));
    assert_eq!(runs[0].text(&doc), "click");
    assert_eq!(runs[0].href(&doc), Some("https://example.com/"));

    // Unresolvable relationship id degrades to None, not an error.
    assert!(runs[1].is_hyperlink(&doc));
    assert_eq!(runs[1].href(&doc), None);
}

// ============================================================================
// Tables
// ============================================================================

#[test]
fn test_table_rows_cells_and_columns() {
    let body = "<w:tbl>\
<w:tblGrid><w:gridCol/><w:gridCol/></w:tblGrid>\
<w:tr><w:tc><w:p><w:r><w:t>a1</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>b1</w:t></w:r></w:p></w:tc></w:tr>\
<w:tr><w:tc><w:p><w:r><w:t>a2</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>b2</w:t></w:r></w:p></w:tc></w:tr>\
</w:tbl>";
    let mut doc = open(&[("word/document.xml", &document_xml(body))]);
    let tables = doc.tables();
    assert_eq!(tables.len(), 1);
    let table = tables[0];

    assert_eq!(table.row_count(&doc), 2);
    assert_eq!(table.column_count(&doc), 2);

    let rows = table.rows(&doc);
    assert_eq!(rows[0].cells(&doc).len(), 2);
    assert_eq!(rows[1].cells(&doc)[1].text(&mut doc), "b2");

    let columns = table.columns(&doc);
    assert_eq!(columns.len(), 2);
    let first_column: Vec<String> = columns[0]
        .cells()
        .iter()
        .map(|cell| cell.text(&mut doc))
        .collect();
    assert_eq!(first_column, vec!["a1", "a2"]);
}

// ============================================================================
// Bookmarks
// ============================================================================

#[test]
fn test_bookmarks_collected_across_parts_and_goback_filtered() {
    let body = "<w:p>\
<w:bookmarkStart w:id=\"0\" w:name=\"intro\"/>\
<w:bookmarkStart w:id=\"1\" w:name=\"_GoBack\"/>\
<w:r><w:t>text</w:t></w:r>\
</w:p>";
    let header = "<w:p><w:bookmarkStart w:id=\"2\" w:name=\"in_header\"/></w:p>";
    let doc = open(&[
        ("word/document.xml", &document_xml(body)),
        ("word/header1.xml", &document_xml(header)),
    ]);
    let bookmarks = doc.bookmarks();
    assert_eq!(bookmarks.len(), 2);
    assert!(bookmarks.contains_key("intro"));
    assert!(bookmarks.contains_key("in_header"));
    assert!(!bookmarks.contains_key("_GoBack"));
    assert_eq!(
        bookmarks["intro"].name(&doc),
        Some("intro".to_string())
    );
}

// ============================================================================
// HTML Emission
// ============================================================================

#[test]
fn test_run_html_nesting_order() {
    let body = "<w:p>\
<w:r><w:rPr><w:i/><w:b/><w:strike/><w:u w:val=\"single\"/></w:rPr><w:t>all</w:t></w:r>\
</w:p>";
    let mut doc = open(&[("word/document.xml", &document_xml(body))]);
    let paragraphs = doc.paragraphs();
    let html = paragraphs[0].text_runs(&doc)[0].to_html(&doc);
    // em innermost, then strong, then strike, then the styled span.
    assert_eq!(
        html,
        "<span style=\"text-decoration:underline;\"><s><strong><em>all</em></strong></s></span>"
    );
}

#[test]
fn test_paragraph_html_styles_only_non_defaults() {
    let body = "<w:p>\
<w:pPr><w:jc w:val=\"center\"/></w:pPr>\
<w:r><w:t>centered</w:t></w:r>\
</w:p><w:p><w:r><w:t>plain</w:t></w:r></w:p>";
    let mut doc = open(&[("word/document.xml", &document_xml(body))]);
    let paragraphs = doc.paragraphs();
    assert_eq!(
        paragraphs[0].to_html(&doc),
        "<p style=\"text-align:center;\">centered</p>"
    );
    assert_eq!(paragraphs[1].to_html(&doc), "<p>plain</p>");
    assert!(paragraphs[0].aligned_center(&doc));
    assert!(paragraphs[1].aligned_left(&doc));
}

#[test]
fn test_hyperlink_html_wraps_anchor_outermost() {
    let body = "<w:p>\
<w:hyperlink r:id=\"rId1\"><w:r><w:rPr><w:b/></w:rPr><w:t>go</w:t></w:r></w:hyperlink>\
</w:p>";
    let mut doc = open(&[
        ("word/document.xml", &document_xml(body)),
        (
            "word/_rels/document.xml.rels",
            &rels_xml(&[("rId1", "https://example.com/")]),
        ),
    ]);
    let paragraphs = doc.paragraphs();
    let html = paragraphs[0].text_runs(&doc)[0].to_html(&doc);
    assert_eq!(
        html,
        "<a href=\"https://example.com/\" target=\"_blank\"><strong>go</strong></a>"
    );
}
