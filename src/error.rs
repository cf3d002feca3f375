//! Error types for document operations.

use thiserror::Error;

/// Errors that can occur while reading, editing, or saving a document.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Archive entry not found: {0}")]
    EntryNotFound(String),

    #[error("Invalid .docx package: {0}")]
    InvalidPackage(String),

    #[error("Style name or id '{0}' not found")]
    StyleNotFound(String),

    #[error("Unknown style attribute: {0}")]
    UnknownStyleAttribute(String),

    #[error("Invalid value '{value}' for style attribute '{name}'")]
    InvalidPropertyValue { name: &'static str, value: String },

    #[error("Style attribute '{0}' is required and cannot be unset")]
    RequiredPropertyValue(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
