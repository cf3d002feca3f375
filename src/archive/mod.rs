//! ZIP container access for .docx packages.
//!
//! The whole source archive is held in memory, so a path and an
//! in-memory byte buffer produce equivalent stores and nothing keeps a
//! filesystem handle alive after open. Writing streams a new archive
//! where untouched entries are copied raw (bytes and compression
//! preserved) and replaced entries are re-compressed.

use std::collections::HashMap;
use std::io::{Cursor, Read, Seek, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::{Error, Result};

/// An opened .docx container.
pub struct Archive {
    data: Vec<u8>,
    entries: Vec<String>,
}

impl Archive {
    /// Open an archive from a filesystem path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_bytes(std::fs::read(path)?)
    }

    /// Open an archive from a byte buffer.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let mut zip = ZipArchive::new(Cursor::new(&data[..]))?;
        let mut entries = Vec::with_capacity(zip.len());
        for i in 0..zip.len() {
            let file = zip.by_index_raw(i)?;
            if !file.is_dir() {
                entries.push(file.name().to_string());
            }
        }
        Ok(Self { data, entries })
    }

    fn zip(&self) -> Result<ZipArchive<Cursor<&[u8]>>> {
        Ok(ZipArchive::new(Cursor::new(&self.data[..]))?)
    }

    /// File entry names in archive order.
    pub fn entry_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn contains(&self, entry: &str) -> bool {
        self.entries.iter().any(|name| name == entry)
    }

    /// Entry names matching a pattern with a single `*` wildcard, e.g.
    /// `word/header*.xml`.
    pub fn glob(&self, pattern: &str) -> Vec<String> {
        let Some((prefix, suffix)) = pattern.split_once('*') else {
            return self
                .entries
                .iter()
                .filter(|name| name.as_str() == pattern)
                .cloned()
                .collect();
        };
        self.entries
            .iter()
            .filter(|name| {
                name.len() >= prefix.len() + suffix.len()
                    && name.starts_with(prefix)
                    && name.ends_with(suffix)
            })
            .cloned()
            .collect()
    }

    /// Read one entry fully.
    ///
    /// Falls back to a percent-decoded lookup for archives written with
    /// encoded entry paths.
    pub fn read(&self, entry: &str) -> Result<Vec<u8>> {
        let mut zip = self.zip()?;
        match zip.by_name(entry) {
            Ok(mut file) => {
                let mut contents = Vec::new();
                file.read_to_end(&mut contents)?;
                return Ok(contents);
            }
            Err(zip::result::ZipError::FileNotFound) => {}
            Err(e) => return Err(e.into()),
        }

        let decoded = percent_encoding::percent_decode_str(entry)
            .decode_utf8()
            .map_err(|_| Error::EntryNotFound(entry.to_string()))?;
        match zip.by_name(&decoded) {
            Ok(mut file) => {
                let mut contents = Vec::new();
                file.read_to_end(&mut contents)?;
                Ok(contents)
            }
            Err(zip::result::ZipError::FileNotFound) => {
                Err(Error::EntryNotFound(entry.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Write a new archive: entries named in `replacements` get the
    /// replacement bytes (deflated); every other entry is copied raw so
    /// its stored bytes stay identical. Replacement names absent from
    /// the source are appended at the end in sorted order.
    pub fn write_to<W: Write + Seek>(
        &self,
        writer: W,
        replacements: &HashMap<String, Vec<u8>>,
    ) -> Result<()> {
        let mut zip = self.zip()?;
        let mut out = ZipWriter::new(writer);
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for i in 0..zip.len() {
            let file = zip.by_index_raw(i)?;
            let name = file.name().to_string();
            match replacements.get(&name) {
                Some(bytes) => {
                    drop(file);
                    out.start_file(&*name, options)?;
                    out.write_all(bytes)?;
                }
                None => {
                    out.raw_copy_file(file)?;
                }
            }
        }

        let mut appended: Vec<&String> = replacements
            .keys()
            .filter(|name| !self.contains(name))
            .collect();
        appended.sort();
        for name in appended {
            out.start_file(name.as_str(), options)?;
            out.write_all(&replacements[name])?;
        }

        out.finish()?;
        Ok(())
    }
}
