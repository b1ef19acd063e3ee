//! Explicit section tree built once from the host's header enumeration.
//!
//! Headers arrive as a flat, document-ordered list. Nesting is recovered from heading levels
//! with a stack, giving every node owned child indices and a parent index, so nothing afterwards
//! needs to walk the host's siblings.

use crate::host::HeaderElement;
use crate::section::{CollapseState, NodeKind, SectionNode};

#[derive(Clone, Debug)]
/// Arena of [`SectionNode`]s for one use site, in document order.
pub struct SectionTree {
    /// Use site shared by every node in the tree.
    pub kind: NodeKind,
    /// Nodes in document order; parents always precede their children.
    pub nodes: Vec<SectionNode>,
}

impl SectionTree {
    #[must_use]
    /// Builds the tree from host headers, skipping headers that are not inside a section.
    ///
    /// A node is collapsible when it has a content region and, for in-document sections, its
    /// level is one of `levels`. Menu items collapse whenever they have sub-items.
    pub fn build(headers: &[HeaderElement], kind: NodeKind, levels: &[usize]) -> Self {
        let mut nodes: Vec<SectionNode> = Vec::new();
        let mut stack: Vec<usize> = Vec::new();

        for (host_index, header) in headers.iter().enumerate() {
            if !header.in_section {
                continue;
            }

            while let Some(&top) = stack.last() {
                if nodes[top].level >= header.level {
                    stack.pop();
                } else {
                    break;
                }
            }

            let id = nodes.len();
            let parent = stack.last().copied();
            let mut node =
                SectionNode::new(header.label.as_str(), header.level, kind, host_index, parent);
            node.has_body = kind == NodeKind::Section && header.has_body;
            nodes.push(node);

            if let Some(parent_id) = parent {
                nodes[parent_id].children_indices.push(id);
            }
            stack.push(id);
        }

        for node in &mut nodes {
            let level_allowed = kind == NodeKind::Menu || levels.contains(&node.level);
            node.collapsible = level_allowed && node.has_content();
            if !node.collapsible {
                node.state = CollapseState::Expanded;
            }
        }

        Self { kind, nodes }
    }

    #[must_use]
    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    /// Whether the document had no section headers.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    /// First node carrying `label`.
    pub fn find(&self, label: &str) -> Option<usize> {
        self.nodes.iter().position(|node| node.label == label)
    }

    #[must_use]
    /// Node built from the host header at `header`, if that header is inside a section.
    pub fn node_at(&self, header: usize) -> Option<usize> {
        self.nodes
            .binary_search_by_key(&header, |node| node.host_index)
            .ok()
    }

    #[must_use]
    /// Host indices of every header carrying `label`, in document order.
    pub fn headers_labelled(&self, label: &str) -> Vec<usize> {
        self.nodes
            .iter()
            .filter(|node| node.label == label)
            .map(|node| node.host_index)
            .collect()
    }

    #[must_use]
    /// Indices of top-level nodes.
    pub fn roots(&self) -> Vec<usize> {
        (0..self.nodes.len())
            .filter(|&id| self.nodes[id].parent_index.is_none())
            .collect()
    }

    /// Enclosing nodes of `id`, innermost first.
    pub fn ancestors(&self, id: usize) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(self.nodes[id].parent_index, |&parent| {
            self.nodes[parent].parent_index
        })
    }

    #[must_use]
    /// Extent the content region of `id` currently occupies.
    ///
    /// Collapsible regions occupy their allotted extent; others always flow naturally.
    pub fn effective_extent(&self, id: usize) -> u32 {
        let node = &self.nodes[id];
        if node.collapsible {
            node.allotted
        } else {
            self.natural_extent(id)
        }
    }

    #[must_use]
    /// Extent the content region of `id` would occupy with no maximum applied.
    ///
    /// Nested regions contribute their current effective extent, as a measured `scrollHeight`
    /// would.
    pub fn natural_extent(&self, id: usize) -> u32 {
        let node = &self.nodes[id];
        node.children_indices
            .iter()
            .fold(node.body_extent, |total, &child| {
                total
                    .saturating_add(self.nodes[child].header_extent)
                    .saturating_add(self.effective_extent(child))
            })
    }

    #[must_use]
    /// Total extent of all top-level sections with their headers.
    pub fn document_extent(&self) -> u32 {
        self.roots().into_iter().fold(0, |total: u32, id| {
            total
                .saturating_add(self.nodes[id].header_extent)
                .saturating_add(self.effective_extent(id))
        })
    }

    #[must_use]
    /// Indices of collapsible nodes in document order.
    pub fn collapsible_ids(&self) -> Vec<usize> {
        (0..self.nodes.len())
            .filter(|&id| self.nodes[id].collapsible)
            .collect()
    }
}

#[cfg(test)]
#[path = "tests/tree.rs"]
mod tests;
