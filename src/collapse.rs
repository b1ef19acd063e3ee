//! The collapse state machine over one section tree.
//!
//! Every collapsible node is either expanded, with its content region allotted its natural
//! extent, or collapsed, with an allotted extent of zero. A toggle flips one node, persists the
//! new state and moves the resulting extent delta up through every expanded ancestor so nested
//! regions never clip. Toggling twice restores the allotted extents exactly, which is what makes
//! a double toggle a valid re-measure after the viewport reflows.
//!
//! ```text
//! Expanded --toggle--> Collapsed   allotted = 0,       ancestors -= old extent
//! Collapsed --toggle--> Expanded   allotted = natural, ancestors += natural
//! ```

use crate::host::DocumentHost;
use crate::persistence::SessionStore;
use crate::section::{CollapseState, NodeKind};
use crate::tree::SectionTree;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Outcome of a single toggle.
pub struct Toggle {
    /// Node that was toggled.
    pub id: usize,
    /// State the node is now in.
    pub state: CollapseState,
    /// Allotted extent before the toggle.
    pub old_extent: u32,
    /// Allotted extent after the toggle.
    pub new_extent: u32,
}

impl Toggle {
    #[must_use]
    /// Signed change in the node's allotted extent.
    pub fn delta(&self) -> i64 {
        i64::from(self.new_extent) - i64::from(self.old_extent)
    }
}

#[derive(Clone, Debug)]
/// Tracks collapse state for one tree and the headers that respond to activation.
pub struct CollapseMachine {
    tree: SectionTree,
    handlers: Vec<usize>,
}

impl CollapseMachine {
    /// Measures the tree, restores remembered states and applies them to the host.
    ///
    /// Nodes without a remembered token take their kind's default policy. Only collapsible
    /// nodes get an activation handler.
    pub fn initialize<H, S>(tree: SectionTree, host: &mut H, store: &S) -> Self
    where
        H: DocumentHost + ?Sized,
        S: SessionStore + ?Sized,
    {
        let mut machine = Self {
            tree,
            handlers: Vec::new(),
        };
        machine.measure(host);

        for id in machine.tree.collapsible_ids() {
            let node = &mut machine.tree.nodes[id];
            node.state = store
                .get(&node.storage_key())
                .map_or(node.kind.default_state(), |token| {
                    CollapseState::from_token(&token)
                });
        }

        // Children follow their parents in document order, so allot bottom-up.
        for id in (0..machine.tree.len()).rev() {
            let natural = machine.tree.natural_extent(id);
            let node = &mut machine.tree.nodes[id];
            node.content_height = natural;
            if node.collapsible {
                node.allotted = match node.state {
                    CollapseState::Expanded => natural,
                    CollapseState::Collapsed => 0,
                };
            }
        }

        let kind = machine.tree.kind;
        for id in machine.tree.collapsible_ids() {
            let node = &machine.tree.nodes[id];
            host.set_header_state(kind, node.host_index, node.state);
            host.set_max_extent(kind, node.host_index, node.allotted);
            machine.handlers.push(id);
        }

        tracing::debug!(
            kind = ?kind,
            nodes = machine.tree.len(),
            handlers = machine.handlers.len(),
            "collapse state initialised"
        );
        machine
    }

    #[must_use]
    /// The underlying tree.
    pub fn tree(&self) -> &SectionTree {
        &self.tree
    }

    #[must_use]
    /// Whether activating the header of `id` does anything.
    pub fn is_registered(&self, id: usize) -> bool {
        self.handlers.contains(&id)
    }

    #[must_use]
    /// Current state of a node.
    pub fn state(&self, id: usize) -> CollapseState {
        self.tree.nodes[id].state
    }

    /// Handles a user activation of the host header at index `header`.
    ///
    /// Headers without a registered handler are ignored.
    pub fn activate<H, S>(&mut self, header: usize, host: &mut H, store: &mut S) -> Option<Toggle>
    where
        H: DocumentHost + ?Sized,
        S: SessionStore + ?Sized,
    {
        let Some(id) = self.tree.node_at(header).filter(|&id| self.is_registered(id)) else {
            tracing::debug!(header, "activation ignored: header is not collapsible");
            return None;
        };
        self.toggle(id, host, store)
    }

    /// Flips one node, persists its state and propagates the extent change to its ancestors.
    ///
    /// Returns `None` for nodes that are not collapsible.
    pub fn toggle<H, S>(&mut self, id: usize, host: &mut H, store: &mut S) -> Option<Toggle>
    where
        H: DocumentHost + ?Sized,
        S: SessionStore + ?Sized,
    {
        let toggle = self.flip(id, host)?;
        let node = &self.tree.nodes[id];
        store.set(&node.storage_key(), node.state.token());
        Some(toggle)
    }

    /// Flips one node and propagates the extent change, without touching the session store.
    fn flip<H: DocumentHost + ?Sized>(&mut self, id: usize, host: &mut H) -> Option<Toggle> {
        if !self.tree.nodes.get(id)?.collapsible {
            return None;
        }

        let kind = self.tree.kind;
        let natural = self.tree.natural_extent(id);
        let node = &mut self.tree.nodes[id];
        let old_extent = node.allotted;
        node.state = node.state.flipped();
        node.content_height = natural;
        node.allotted = match node.state {
            CollapseState::Collapsed => 0,
            CollapseState::Expanded => natural,
        };

        let toggle = Toggle {
            id,
            state: node.state,
            old_extent,
            new_extent: node.allotted,
        };
        host.set_header_state(kind, node.host_index, node.state);
        host.set_max_extent(kind, node.host_index, node.allotted);
        tracing::trace!(label = %node.label, state = ?node.state, "toggled");

        self.propagate(id, toggle.delta(), host);
        Some(toggle)
    }

    /// Adds `delta` to every enclosing collapsible region up to the root.
    ///
    /// A collapsed ancestor is allotted nothing, so its own ancestors see no change either.
    fn propagate<H: DocumentHost + ?Sized>(&mut self, id: usize, delta: i64, host: &mut H) {
        if delta == 0 {
            return;
        }
        let kind = self.tree.kind;
        let ancestors: Vec<usize> = self.tree.ancestors(id).collect();
        for ancestor in ancestors {
            let node = &mut self.tree.nodes[ancestor];
            if !node.collapsible {
                continue;
            }
            if node.state == CollapseState::Collapsed {
                break;
            }
            node.allotted = u32::try_from(i64::from(node.allotted) + delta).unwrap_or(0);
            host.set_max_extent(kind, node.host_index, node.allotted);
        }
    }

    /// Re-reads header and body extents from the host at its current viewport.
    ///
    /// Allotted extents are left alone; only a toggle changes them.
    pub fn measure<H: DocumentHost + ?Sized>(&mut self, host: &H) {
        for node in &mut self.tree.nodes {
            let (header, body) = match node.kind {
                NodeKind::Section => (
                    host.header_extent(node.host_index),
                    host.body_extent(node.host_index),
                ),
                NodeKind::Menu => (1, 0),
            };
            node.header_extent = header;
            node.body_extent = body;
        }
        for id in (0..self.tree.len()).rev() {
            self.tree.nodes[id].content_height = self.tree.natural_extent(id);
        }
    }

    /// Recomputes every tracked region after the viewport has reflowed.
    ///
    /// Each region is toggled twice, innermost last-in-document first, with transitions
    /// suppressed for the duration of the pass. States end where they started, so nothing is
    /// written to the session store.
    pub fn recalculate<H: DocumentHost + ?Sized>(&mut self, host: &mut H) {
        self.measure(host);
        host.set_transitions(false);
        for id in self.handlers.clone().into_iter().rev() {
            self.flip(id, host);
            self.flip(id, host);
        }
        host.set_transitions(true);
        tracing::debug!(regions = self.handlers.len(), "recalculated collapsible regions");
    }
}

#[cfg(test)]
#[path = "tests/collapse.rs"]
mod tests;
