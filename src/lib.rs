//! # vellum
//!
//! A library for reading, querying, and editing Microsoft Word
//! (.docx / OOXML WordprocessingML) documents.
//!
//! ## Features
//!
//! - Open documents from a path, byte buffer, or reader
//! - Query paragraphs, runs, tables, bookmarks, and styles
//! - Edit text and style attributes in place
//! - `{{token}}` placeholders split across runs are merged so a single
//!   substitution can replace them
//! - Saving keeps every untouched archive entry byte-identical
//!
//! ## Quick Start
//!
//! ```no_run
//! use vellum::Document;
//!
//! let mut doc = Document::open("report.docx").unwrap();
//! for paragraph in doc.paragraphs() {
//!     println!("{}", paragraph.text(&doc));
//! }
//! let paragraphs = doc.paragraphs();
//! paragraphs[0].set_text(&mut doc, "Hello from vellum");
//! doc.save("report-edited.docx").unwrap();
//! ```
//!
//! ## Styles
//!
//! Style attributes go through a declarative engine that validates and
//! encodes values before touching the XML:
//!
//! ```no_run
//! use vellum::Document;
//!
//! let mut doc = Document::open("report.docx").unwrap();
//! let styles = doc.styles_configuration().unwrap();
//! let style = styles.add_style(&mut doc, "Red").unwrap();
//! style.set(&mut doc, "type", Some("paragraph".into())).unwrap();
//! style.set(&mut doc, "font_color", Some("FF0000".into())).unwrap();
//! ```

pub mod archive;
pub mod document;
pub mod elements;
pub mod error;
pub(crate) mod html;
pub mod xml;

pub use archive::Archive;
pub use document::{Document, DocumentProperties, NodeRef, PartId};
pub use elements::{
    Bookmark, Element, Formatting, Paragraph, Style, StyleValue, StylesConfiguration, Table,
    TableCell, TableColumn, TableRow, TextRun,
};
pub use error::{Error, Result};
