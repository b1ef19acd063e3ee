//! Document formats an outline can be read from.
//!
//! A [`Format`] supplies a tree-sitter grammar, the query that captures its headings, and the
//! node kind that marks a section, which is all the outline extraction needs to know.

pub mod markdown;

/// Grammar and heading query for one document format.
pub trait Format {
    /// Tree-sitter grammar for the format.
    fn language(&self) -> tree_sitter::Language;
    /// Query capturing every heading node as `@heading`.
    fn heading_query(&self) -> &str;
    /// Level of a captured heading, from the kind of its marker child.
    fn heading_level(&self, heading: tree_sitter::Node<'_>) -> Option<usize>;
    /// Node kind of the container that makes a heading a section header.
    fn section_kind(&self) -> &str;
}
