//! The top-level document facade.
//!
//! A [`Document`] owns the opened archive plus one parsed XML tree per
//! WordprocessingML part it recognizes. Every wrapper in
//! [`crate::elements`] is a view into one of those trees, addressed by
//! a [`NodeRef`], and borrows the document for every read or edit.

use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::path::Path;

use crate::archive::Archive;
use crate::elements::{Bookmark, Paragraph, StylesConfiguration, Table};
use crate::error::{Error, Result};
use crate::xml::{self, NodeId, XmlTree};

/// Identifier for one parsed part of an open document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PartId(pub(crate) usize);

/// The main document part. Always parsed first, so always index 0.
pub(crate) const BODY: PartId = PartId(0);

/// A node in a specific part of a specific document.
///
/// Wrappers hold a `NodeRef` and re-derive everything else from the
/// current tree state, so edits through one wrapper are visible
/// through every other wrapper over the same node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef {
    pub(crate) part: PartId,
    pub(crate) node: NodeId,
}

pub(crate) struct Part {
    pub(crate) name: String,
    pub(crate) path: String,
    pub(crate) tree: XmlTree,
}

/// Document-wide values computed once at open time and consulted by
/// paragraph and run accessors, so formatting defaults resolve without
/// re-walking the styles part per run.
#[derive(Debug, Clone, Default)]
pub struct DocumentProperties {
    /// Default font size in points, from the styles part.
    pub font_size: Option<u32>,
    /// Hyperlink relationship id to target URL.
    pub hyperlinks: HashMap<String, String>,
}

/// An open .docx document.
pub struct Document {
    archive: Archive,
    parts: Vec<Part>,
    styles: Option<PartId>,
    headers: Vec<PartId>,
    footers: Vec<PartId>,
    properties: DocumentProperties,
    replacements: HashMap<String, Vec<u8>>,
}

impl Document {
    /// Open a document from a filesystem path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_archive(Archive::open(path)?)
    }

    /// Open a document from an in-memory byte buffer.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_archive(Archive::from_bytes(data)?)
    }

    /// Open a document from any reader. The reader is drained into
    /// memory; path and stream sources produce equivalent documents.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    fn from_archive(archive: Archive) -> Result<Self> {
        let mut parts = Vec::new();

        // The main part is required; everything else is optional.
        let body = archive.read("word/document.xml")?;
        parts.push(Part {
            name: "document".to_string(),
            path: "word/document.xml".to_string(),
            tree: xml::parse(&body)?,
        });

        let mut styles = None;
        for (name, path) in [
            ("styles", "word/styles.xml"),
            ("numbering", "word/numbering.xml"),
            ("settings", "word/settings.xml"),
        ] {
            if !archive.contains(path) {
                continue;
            }
            let tree = xml::parse(&archive.read(path)?)?;
            let id = PartId(parts.len());
            parts.push(Part {
                name: name.to_string(),
                path: path.to_string(),
                tree,
            });
            if name == "styles" {
                styles = Some(id);
            }
        }

        let mut headers = Vec::new();
        let mut footers = Vec::new();
        for (pattern, collected) in [
            ("word/header*.xml", &mut headers),
            ("word/footer*.xml", &mut footers),
        ] {
            for path in archive.glob(pattern) {
                let tree = xml::parse(&archive.read(&path)?)?;
                let id = PartId(parts.len());
                parts.push(Part {
                    name: part_stem(&path),
                    path,
                    tree,
                });
                collected.push(id);
            }
        }

        let properties = DocumentProperties {
            font_size: styles.and_then(|id| default_font_size(&parts[id.0].tree)),
            hyperlinks: hyperlink_targets(&archive)?,
        };

        Ok(Self {
            archive,
            parts,
            styles,
            headers,
            footers,
            properties,
            replacements: HashMap::new(),
        })
    }

    // ------------------------------------------------------------------
    // Part access
    // ------------------------------------------------------------------

    pub(crate) fn tree(&self, part: PartId) -> &XmlTree {
        &self.parts[part.0].tree
    }

    pub(crate) fn tree_mut(&mut self, part: PartId) -> &mut XmlTree {
        &mut self.parts[part.0].tree
    }

    pub(crate) fn styles_part(&self) -> Option<PartId> {
        self.styles
    }

    /// Logical names of the parsed parts, in parse order.
    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|part| part.name.as_str())
    }

    /// Serialized XML for one part, by logical name.
    pub fn part_xml(&self, name: &str) -> Result<Vec<u8>> {
        let part = self
            .parts
            .iter()
            .find(|part| part.name == name)
            .ok_or_else(|| Error::EntryNotFound(name.to_string()))?;
        xml::serialize(&part.tree)
    }

    /// Values computed at open time (default font size, hyperlink map).
    pub fn properties(&self) -> &DocumentProperties {
        &self.properties
    }

    /// Document-wide default font size in points, if the styles part
    /// declares one.
    pub fn font_size(&self) -> Option<u32> {
        self.properties.font_size
    }

    // ------------------------------------------------------------------
    // Collections
    // ------------------------------------------------------------------

    /// Paragraphs directly in the body, in document order. Paragraphs
    /// nested inside tables are reached through [`Document::tables`].
    ///
    /// Takes `&mut self` because construction reconciles `{{token}}`
    /// placeholders that the originating editor split across runs.
    pub fn paragraphs(&mut self) -> Vec<Paragraph> {
        let Some(body) = self.body() else {
            return Vec::new();
        };
        let nodes: Vec<NodeId> = self
            .tree(BODY)
            .child_elements_by_tag(body, "w:p")
            .collect();
        nodes
            .into_iter()
            .map(|node| Paragraph::derive(self, NodeRef { part: BODY, node }))
            .collect()
    }

    /// Tables directly in the body, in document order.
    pub fn tables(&self) -> Vec<Table> {
        let Some(body) = self.body() else {
            return Vec::new();
        };
        self.tree(BODY)
            .child_elements_by_tag(body, "w:tbl")
            .map(|node| Table::new(NodeRef { part: BODY, node }))
            .collect()
    }

    /// Bookmarks from the body and every header and footer, keyed by
    /// name. The editor-generated `_GoBack` marker is filtered out.
    pub fn bookmarks(&self) -> HashMap<String, Bookmark> {
        let mut found = HashMap::new();
        let mut scan = vec![BODY];
        scan.extend(self.headers.iter().copied());
        scan.extend(self.footers.iter().copied());
        for part in scan {
            let tree = self.tree(part);
            for node in tree.descendants(tree.document()) {
                if !tree.has_tag(node, "w:bookmarkStart") {
                    continue;
                }
                let Some(name) = tree.attr(node, "w:name") else {
                    continue;
                };
                if name == "_GoBack" {
                    continue;
                }
                found.insert(name.to_string(), Bookmark::new(NodeRef { part, node }));
            }
        }
        found
    }

    /// Registry over the styles part, absent when the document has no
    /// `word/styles.xml`.
    pub fn styles_configuration(&self) -> Option<StylesConfiguration> {
        self.styles.map(StylesConfiguration::new)
    }

    /// All body paragraph text joined with newlines.
    pub fn text(&mut self) -> String {
        let paragraphs = self.paragraphs();
        paragraphs
            .iter()
            .map(|p| p.text(self))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn body(&self) -> Option<NodeId> {
        let tree = self.tree(BODY);
        let root = tree.root()?;
        tree.first_child_element(root, "w:body")
    }

    // ------------------------------------------------------------------
    // Output
    // ------------------------------------------------------------------

    /// Substitute an archive entry's raw bytes, bypassing the XML
    /// model. The replacement participates in [`Document::save`] and
    /// [`Document::stream`] alongside the re-serialized parts.
    pub fn replace_entry(&mut self, path: impl Into<String>, bytes: Vec<u8>) {
        self.replacements.insert(path.into(), bytes);
    }

    /// Write the document to a path.
    ///
    /// Untouched archive entries are copied byte-identical from the
    /// source; mutable parts (body, styles, headers, footers) are
    /// re-serialized. The archive is assembled in a temporary file and
    /// renamed into place, so a failed save never leaves a truncated
    /// file at `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let replacements = self.collect_replacements()?;
        let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
        let mut tmp = tempfile::NamedTempFile::new_in(dir.unwrap_or(Path::new(".")))?;
        self.archive.write_to(tmp.as_file_mut(), &replacements)?;
        tmp.persist(path).map_err(|e| Error::Io(e.error))?;
        Ok(())
    }

    /// Produce the serialized archive as an in-memory buffer.
    pub fn stream(&self) -> Result<Vec<u8>> {
        let replacements = self.collect_replacements()?;
        let mut buffer = Cursor::new(Vec::new());
        self.archive.write_to(&mut buffer, &replacements)?;
        Ok(buffer.into_inner())
    }

    /// Serialize every part that wrapper edits can reach. Explicit
    /// [`Document::replace_entry`] substitutions win over the XML model
    /// for the same entry path.
    fn collect_replacements(&self) -> Result<HashMap<String, Vec<u8>>> {
        let mut replacements = HashMap::new();
        let mut mutable = vec![BODY];
        mutable.extend(self.styles);
        mutable.extend(self.headers.iter().copied());
        mutable.extend(self.footers.iter().copied());
        for id in mutable {
            let part = &self.parts[id.0];
            replacements.insert(part.path.clone(), xml::serialize(&part.tree)?);
        }
        for (path, bytes) in &self.replacements {
            replacements.insert(path.clone(), bytes.clone());
        }
        Ok(replacements)
    }
}

/// `word/header1.xml` becomes `header1`.
fn part_stem(path: &str) -> String {
    let file = path.rsplit('/').next().unwrap_or(path);
    file.strip_suffix(".xml").unwrap_or(file).to_string()
}

fn default_font_size(tree: &XmlTree) -> Option<u32> {
    let root = tree.root()?;
    let sz = xml::path::select_one(tree, root, "w:docDefaults/w:rPrDefault/w:rPr/w:sz")?;
    let half_points: u32 = tree.attr(sz, "w:val")?.parse().ok()?;
    Some(half_points / 2)
}

/// Hyperlink relationship id to target map from the main part's
/// relationships entry. Missing entry means no hyperlinks.
fn hyperlink_targets(archive: &Archive) -> Result<HashMap<String, String>> {
    const RELS: &str = "word/_rels/document.xml.rels";
    if !archive.contains(RELS) {
        return Ok(HashMap::new());
    }
    let tree = xml::parse(&archive.read(RELS)?)?;
    let mut targets = HashMap::new();
    if let Some(root) = tree.root() {
        for rel in tree.child_elements_by_tag(root, "Relationship") {
            if !tree.attr(rel, "Type").is_some_and(|t| t.ends_with("/hyperlink")) {
                continue;
            }
            if let (Some(id), Some(target)) = (tree.attr(rel, "Id"), tree.attr(rel, "Target")) {
                targets.insert(id.to_string(), target.to_string());
            }
        }
    }
    Ok(targets)
}
