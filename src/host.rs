//! The seam between the state machine and whatever renders the document.
//!
//! A host enumerates headers, measures extents at its current viewport width and accepts the
//! style writes the state machine decides on. Browsers, terminals and test doubles all fit behind
//! [`DocumentHost`]; the crate ships [`markdown::MarkdownHost`].

pub mod markdown;

use crate::section::{CollapseState, NodeKind};

#[derive(Clone, Debug, PartialEq, Eq)]
/// A header element as enumerated by the host, in document order.
pub struct HeaderElement {
    /// Header text.
    pub label: String,
    /// Heading level (1 for top-level).
    pub level: usize,
    /// Whether the header's enclosing container is a section rather than unrelated markup.
    pub in_section: bool,
    /// Whether any content of the header's own follows it before the next header.
    pub has_body: bool,
}

/// Read/write handle to a hierarchical document.
///
/// Header indices refer to positions in the vector returned by [`DocumentHost::headers`].
pub trait DocumentHost {
    /// All header elements in document order.
    fn headers(&self) -> Vec<HeaderElement>;

    /// Natural extent of a header at the current viewport width.
    fn header_extent(&self, header: usize) -> u32;

    /// Natural extent of a header's own content, excluding nested sections.
    fn body_extent(&self, header: usize) -> u32;

    /// Extent of the content preceding the first header.
    fn leading_extent(&self) -> u32;

    /// Whether the page has a side panel at all.
    fn has_side_panel(&self) -> bool;

    /// Reflows the document at a new viewport width.
    fn resize(&mut self, width: u32);

    /// Sets the maximum extent style on a header's content region.
    fn set_max_extent(&mut self, kind: NodeKind, header: usize, extent: u32);

    /// Sets the visual class of a header.
    fn set_header_state(&mut self, kind: NodeKind, header: usize, state: CollapseState);

    /// Enables or suppresses extent transition animation.
    fn set_transitions(&mut self, enabled: bool);

    /// Pins the content container to a height, or clears the pin with `None`.
    fn set_container_height(&mut self, height: Option<u32>);

    /// Shows or hides the side panel.
    fn set_panel_collapsed(&mut self, collapsed: bool);
}
