//! Section representation for collapsible documents.
//!
//! A section represents a hierarchical division of a document: a header plus the content region
//! that follows it, which may itself contain nested sections. Sections track their position in
//! the document tree through parent/child indices and carry the extents needed to keep the
//! allotted height of every enclosing region consistent as sections collapse and expand.

use serde::Serialize;

/// Token persisted for a collapsed section, mirroring a hidden `display` value.
pub const COLLAPSED_TOKEN: &str = "none";
/// Token persisted for an expanded section.
pub const EXPANDED_TOKEN: &str = "block";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
/// Binary visibility of a section's content region.
pub enum CollapseState {
    /// Content is visible at its natural extent.
    Expanded,
    /// Content is hidden; its allotted extent is zero.
    Collapsed,
}

impl CollapseState {
    #[must_use]
    /// The opposite state.
    pub fn flipped(self) -> Self {
        match self {
            Self::Expanded => Self::Collapsed,
            Self::Collapsed => Self::Expanded,
        }
    }

    #[must_use]
    /// Serialised form written to the session store.
    pub fn token(self) -> &'static str {
        match self {
            Self::Expanded => EXPANDED_TOKEN,
            Self::Collapsed => COLLAPSED_TOKEN,
        }
    }

    #[must_use]
    /// Reads a persisted token: `"none"` is collapsed, anything else is expanded.
    pub fn from_token(token: &str) -> Self {
        if token == COLLAPSED_TOKEN {
            Self::Collapsed
        } else {
            Self::Expanded
        }
    }

    #[must_use]
    /// Visual class a header carries in this state.
    pub fn class(self) -> &'static str {
        match self {
            Self::Expanded => "expanded",
            Self::Collapsed => "collapsed",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
/// Which use site a section belongs to; the two differ in default policy.
pub enum NodeKind {
    /// Header inside the document body, expanded unless remembered otherwise.
    Section,
    /// Item of the side panel's menu, collapsed unless remembered otherwise.
    Menu,
}

impl NodeKind {
    #[must_use]
    /// State applied when the session store has nothing for a node.
    pub fn default_state(self) -> CollapseState {
        match self {
            Self::Section => CollapseState::Expanded,
            Self::Menu => CollapseState::Collapsed,
        }
    }

    #[must_use]
    /// Session store key for a node with this label.
    ///
    /// Menu items are namespaced so they never share a key with the section they point at.
    pub fn storage_key(self, label: &str) -> String {
        match self {
            Self::Section => label.to_string(),
            Self::Menu => format!("toc:{label}"),
        }
    }
}

#[derive(Clone, Debug)]
/// One collapsible unit: a header and the content region that follows it.
pub struct SectionNode {
    /// Header text, used as the persistence key.
    pub label: String,
    /// Nesting depth in the document hierarchy (1 for top-level headings).
    pub level: usize,
    /// Use site deciding the default state and storage key.
    pub kind: NodeKind,
    /// Current visibility of the content region.
    pub state: CollapseState,
    /// Whether the header toggles at all; a header without content never does.
    pub collapsible: bool,
    /// Whether the host reported content of the header's own, outside nested sections.
    pub has_body: bool,
    /// Position of the header in the host's header enumeration.
    pub host_index: usize,
    /// Measured extent of the header itself.
    pub header_extent: u32,
    /// Measured extent of the header's own content, excluding nested sections.
    pub body_extent: u32,
    /// Last measured natural extent of the whole content region.
    pub content_height: u32,
    /// Explicit maximum extent of the content region while it is collapsible.
    pub allotted: u32,
    /// Index of the enclosing section in the tree.
    pub parent_index: Option<usize>,
    /// Indices of directly nested sections, in document order.
    pub children_indices: Vec<usize>,
}

impl SectionNode {
    #[must_use]
    /// Creates an unmeasured node in its kind's default state.
    pub fn new(
        label: impl Into<String>,
        level: usize,
        kind: NodeKind,
        host_index: usize,
        parent_index: Option<usize>,
    ) -> Self {
        Self {
            label: label.into(),
            level,
            kind,
            state: kind.default_state(),
            collapsible: false,
            has_body: false,
            host_index,
            header_extent: 0,
            body_extent: 0,
            content_height: 0,
            allotted: 0,
            parent_index,
            children_indices: Vec::new(),
        }
    }

    #[must_use]
    /// Whether a content region follows the header.
    pub fn has_content(&self) -> bool {
        self.has_body || !self.children_indices.is_empty()
    }

    #[must_use]
    /// Key under which the node's state is persisted.
    pub fn storage_key(&self) -> String {
        self.kind.storage_key(&self.label)
    }
}
