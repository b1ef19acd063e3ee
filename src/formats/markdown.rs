//! Markdown headings via tree-sitter-md.
//!
//! The block grammar nests every ATX heading (`#` through `######`) in a `section` node, so the
//! outline is the chain of sections and a heading's level is read from its marker.

use crate::formats::Format;

/// Outline source for Markdown documents with ATX headings.
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn language(&self) -> tree_sitter::Language {
        tree_sitter_md::LANGUAGE.into()
    }

    fn heading_query(&self) -> &'static str {
        "(atx_heading) @heading"
    }

    fn heading_level(&self, heading: tree_sitter::Node<'_>) -> Option<usize> {
        let mut cursor = heading.walk();
        let level = heading.children(&mut cursor).find_map(|child| {
            child
                .kind()
                .strip_prefix("atx_h")?
                .strip_suffix("_marker")?
                .parse()
                .ok()
        });
        level
    }

    fn section_kind(&self) -> &'static str {
        "section"
    }
}
