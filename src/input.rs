//! Locating documents and extracting their heading outline with tree-sitter.
//!
//! A document is parsed once; every heading the format's query captures becomes a [`Heading`]
//! with its byte span, so the text between consecutive headings can later be measured as the
//! heading's own content.

use crate::error::{Error, Result};
use crate::formats::Format;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Parser, Query, QueryCursor};

#[derive(Clone, Debug, PartialEq, Eq)]
/// A heading located in a document.
pub struct Heading {
    /// Heading text without markup symbols.
    pub title: String,
    /// Heading level (1 for `#`).
    pub level: usize,
    /// Whether the heading belongs to the document outline: it sits in a section and every
    /// enclosing node up to the root is a section too, so headings in block quotes or list
    /// items do not.
    pub in_section: bool,
    /// Byte offset where the heading starts.
    pub byte_start: usize,
    /// Byte offset just past the heading line.
    pub byte_end: usize,
}

#[derive(Clone, Debug)]
/// A parsed document and its headings in document order.
pub struct Outline {
    /// Source file.
    pub path: PathBuf,
    /// Full document text.
    pub source: String,
    /// Headings sorted by position.
    pub headings: Vec<Heading>,
}

impl Outline {
    #[must_use]
    /// Text before the first section heading.
    pub fn leading(&self) -> &str {
        let end = self.next_section_start(0);
        &self.source[..end]
    }

    #[must_use]
    /// Text between a heading and the next section heading of any level.
    ///
    /// Headings outside a section, such as one inside a block quote, are part of the body.
    pub fn body(&self, index: usize) -> &str {
        let start = self.headings[index].byte_end;
        let end = self.next_section_start(index + 1);
        &self.source[start.min(end)..end]
    }

    fn next_section_start(&self, from: usize) -> usize {
        self.headings
            .iter()
            .skip(from)
            .find(|h| h.in_section)
            .map_or(self.source.len(), |h| h.byte_start)
    }
}

/// Expands paths into the documents to open, descending into directories.
///
/// Files named explicitly are always included; files found in directories must carry one of the
/// given extensions. Results are sorted per directory.
///
/// # Errors
///
/// Returns an error if a path or directory cannot be read.
pub fn find_documents(paths: Vec<PathBuf>, extensions: &[String]) -> io::Result<Vec<PathBuf>> {
    let mut documents = Vec::new();
    for path in paths {
        if path.is_dir() {
            collect_dir(&path, extensions, &mut documents)?;
        } else if path.exists() {
            documents.push(path);
        } else {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            ));
        }
    }
    Ok(documents)
}

fn collect_dir(dir: &Path, extensions: &[String], documents: &mut Vec<PathBuf>) -> io::Result<()> {
    let mut entries = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<io::Result<Vec<_>>>()?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            collect_dir(&path, extensions, documents)?;
        } else if path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.iter().any(|wanted| wanted == ext))
        {
            documents.push(path);
        }
    }
    Ok(())
}

/// Reads and parses a document.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn extract_outline<F: Format + ?Sized>(path: &Path, format: &F) -> Result<Outline> {
    let source = fs::read_to_string(path)?;
    parse_outline(path, source, format)
}

/// Parses document text into its outline.
///
/// # Errors
///
/// Returns an error if the grammar cannot be loaded, the heading query is invalid or the parser
/// produces no tree.
pub fn parse_outline<F: Format + ?Sized>(
    path: impl Into<PathBuf>,
    source: String,
    format: &F,
) -> Result<Outline> {
    let path = path.into();
    let language = format.language();

    let mut parser = Parser::new();
    parser
        .set_language(&language)
        .map_err(|e| Error::Language {
            message: e.to_string(),
        })?;
    let tree = parser
        .parse(&source, None)
        .ok_or_else(|| Error::Parse { path: path.clone() })?;
    let query = Query::new(&language, format.heading_query()).map_err(|e| Error::Query {
        message: e.to_string(),
    })?;

    let mut headings = Vec::new();
    {
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&query, tree.root_node(), source.as_bytes());
        while let Some(m) = matches.next() {
            for capture in m.captures {
                let node = capture.node;
                let Some(level) = format.heading_level(node) else {
                    continue;
                };
                headings.push(Heading {
                    title: heading_title(node, &source),
                    level,
                    in_section: in_outline(node, format.section_kind()),
                    byte_start: node.start_byte(),
                    byte_end: node.end_byte(),
                });
            }
        }
    }
    headings.sort_by_key(|h| h.byte_start);
    headings.dedup_by_key(|h| h.byte_start);

    tracing::debug!(path = %path.display(), headings = headings.len(), "parsed outline");
    Ok(Outline {
        path,
        source,
        headings,
    })
}

/// Whether every node between `heading` and the document root is a section.
fn in_outline(heading: Node<'_>, section_kind: &str) -> bool {
    let mut enclosing = heading.parent();
    let mut sections = 0;
    while let Some(node) = enclosing.filter(|node| node.parent().is_some()) {
        if node.kind() != section_kind {
            return false;
        }
        sections += 1;
        enclosing = node.parent();
    }
    sections > 0
}

fn heading_title(node: Node<'_>, source: &str) -> String {
    let text = source[node.start_byte()..node.end_byte()]
        .trim()
        .trim_start_matches('#')
        .trim();
    // A closing run of `#` only counts when separated from the title by whitespace.
    let unclosed = text.trim_end_matches('#');
    if unclosed.is_empty() || unclosed.ends_with(char::is_whitespace) {
        unclosed.trim_end().to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
