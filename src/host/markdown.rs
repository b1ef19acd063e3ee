//! A terminal-style host over a parsed Markdown document.
//!
//! Extents are rows: every source line occupies its display width divided by the viewport width,
//! rounded up, so narrowing the viewport reflows long lines onto more rows. Style writes are kept
//! in a [`StyleSheet`] keyed by header index, which is what a renderer would read.

use crate::host::{DocumentHost, HeaderElement};
use crate::input::Outline;
use crate::section::{CollapseState, NodeKind};
use serde::Serialize;
use std::collections::BTreeMap;
use unicode_width::UnicodeWidthStr;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
/// Styles applied to one header and its content region.
pub struct RegionStyle {
    /// Header text, for readers of the sheet.
    pub label: String,
    /// Maximum extent of the content region.
    pub max_extent: Option<u32>,
    /// Visual class of the header.
    pub class: Option<&'static str>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// Styles the state machine has applied to the document.
pub struct StyleSheet {
    /// In-document regions by header index.
    pub sections: BTreeMap<usize, RegionStyle>,
    /// Side panel menu regions by header index.
    pub menu: BTreeMap<usize, RegionStyle>,
    /// Whether extent changes animate.
    pub transitions: bool,
    /// Height the content container is pinned to.
    pub container_height: Option<u32>,
    /// Whether the side panel is hidden.
    pub panel_collapsed: bool,
}

impl StyleSheet {
    #[must_use]
    /// Maximum extent applied to the region of `header`, if any.
    pub fn max_extent(&self, kind: NodeKind, header: usize) -> Option<u32> {
        self.regions(kind).get(&header)?.max_extent
    }

    #[must_use]
    /// Class applied to `header`, if any.
    pub fn class(&self, kind: NodeKind, header: usize) -> Option<&'static str> {
        self.regions(kind).get(&header)?.class
    }

    fn regions(&self, kind: NodeKind) -> &BTreeMap<usize, RegionStyle> {
        match kind {
            NodeKind::Section => &self.sections,
            NodeKind::Menu => &self.menu,
        }
    }
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self {
            sections: BTreeMap::new(),
            menu: BTreeMap::new(),
            transitions: true,
            container_height: None,
            panel_collapsed: false,
        }
    }
}

#[derive(Clone, Debug)]
/// Host measuring a Markdown outline at a viewport width.
pub struct MarkdownHost {
    outline: Outline,
    width: u32,
    side_panel: bool,
    styles: StyleSheet,
}

impl MarkdownHost {
    #[must_use]
    /// Creates a host for `outline` at `width` columns, with a side panel.
    pub fn new(outline: Outline, width: u32) -> Self {
        Self {
            outline,
            width: width.max(1),
            side_panel: true,
            styles: StyleSheet::default(),
        }
    }

    #[must_use]
    /// Drops the side panel, as on pages rendered without one.
    pub fn without_side_panel(mut self) -> Self {
        self.side_panel = false;
        self
    }

    #[must_use]
    /// The parsed document.
    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    #[must_use]
    /// Current viewport width.
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    /// Styles applied so far.
    pub fn styles(&self) -> &StyleSheet {
        &self.styles
    }

    fn region(&mut self, kind: NodeKind, header: usize) -> &mut RegionStyle {
        let regions = match kind {
            NodeKind::Section => &mut self.styles.sections,
            NodeKind::Menu => &mut self.styles.menu,
        };
        regions.entry(header).or_insert_with(|| RegionStyle {
            label: self.outline.headings[header].title.clone(),
            ..RegionStyle::default()
        })
    }
}

/// Rows `text` occupies at `width` columns, ignoring blank lines at either end.
fn rows(text: &str, width: u32) -> u32 {
    let lines: Vec<&str> = text.lines().collect();
    let Some(first) = lines.iter().position(|line| !line.trim().is_empty()) else {
        return 0;
    };
    let last = lines
        .iter()
        .rposition(|line| !line.trim().is_empty())
        .unwrap_or(first);

    lines[first..=last].iter().fold(0u32, |total, line| {
        let columns = u32::try_from(line.width()).unwrap_or(u32::MAX);
        total.saturating_add(columns.div_ceil(width).max(1))
    })
}

impl DocumentHost for MarkdownHost {
    fn headers(&self) -> Vec<HeaderElement> {
        self.outline
            .headings
            .iter()
            .enumerate()
            .map(|(index, heading)| HeaderElement {
                label: heading.title.clone(),
                level: heading.level,
                in_section: heading.in_section,
                has_body: !self.outline.body(index).trim().is_empty(),
            })
            .collect()
    }

    fn header_extent(&self, header: usize) -> u32 {
        let heading = &self.outline.headings[header];
        rows(
            &self.outline.source[heading.byte_start..heading.byte_end],
            self.width,
        )
        .max(1)
    }

    fn body_extent(&self, header: usize) -> u32 {
        rows(self.outline.body(header), self.width)
    }

    fn leading_extent(&self) -> u32 {
        rows(self.outline.leading(), self.width)
    }

    fn has_side_panel(&self) -> bool {
        self.side_panel
    }

    fn resize(&mut self, width: u32) {
        self.width = width.max(1);
    }

    fn set_max_extent(&mut self, kind: NodeKind, header: usize, extent: u32) {
        self.region(kind, header).max_extent = Some(extent);
    }

    fn set_header_state(&mut self, kind: NodeKind, header: usize, state: CollapseState) {
        self.region(kind, header).class = Some(state.class());
    }

    fn set_transitions(&mut self, enabled: bool) {
        self.styles.transitions = enabled;
    }

    fn set_container_height(&mut self, height: Option<u32>) {
        self.styles.container_height = height;
    }

    fn set_panel_collapsed(&mut self, collapsed: bool) {
        self.styles.panel_collapsed = collapsed;
    }
}

#[cfg(test)]
#[path = "../tests/markdown_host.rs"]
mod tests;
