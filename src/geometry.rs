//! Page height reconciliation between the main content and the side panel.
//!
//! A collapsible side panel does not count towards the document's flow height, so on short pages
//! it would overhang the content. The content container is therefore pinned to the panel's height
//! whenever the panel is taller, and left to flow naturally otherwise.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "style", content = "height")]
/// Style mutation applied to the content container.
pub enum ContainerStyle {
    /// Container height pinned to the side panel's extent.
    Pinned(u32),
    /// Explicit height cleared; natural flow applies.
    Natural,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Remembers the override currently applied so repeated calls mutate nothing.
pub struct Reconciler {
    pinned: Option<u32>,
}

impl Reconciler {
    #[must_use]
    /// Creates a reconciler for a container with no explicit height.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    /// Height the container is currently pinned to, if any.
    pub fn pinned(&self) -> Option<u32> {
        self.pinned
    }

    /// Compares the measured side panel and content extents.
    ///
    /// Returns the mutation to apply, or `None` when the container already has the right style.
    pub fn reconcile(&mut self, panel: u32, content: u32) -> Option<ContainerStyle> {
        let wanted = (panel > content).then_some(panel);
        if wanted == self.pinned {
            return None;
        }
        self.pinned = wanted;
        Some(wanted.map_or(ContainerStyle::Natural, ContainerStyle::Pinned))
    }
}

#[cfg(test)]
#[path = "tests/geometry.rs"]
mod tests;
