//! One page view: the context every collapse operation runs in.
//!
//! A [`Page`] is built once per document view and owns the host handle, the session store, the
//! cookie jar, the section tree, the side panel's menu tree and flag, the height reconciler and
//! the resize debouncer. Events are dispatched to it one at a time and each runs to completion;
//! the only deferred work is the debounced resize pass, released by [`Page::poll`].

use crate::collapse::{CollapseMachine, Toggle};
use crate::config::Config;
use crate::debounce::Debouncer;
use crate::geometry::{ContainerStyle, Reconciler};
use crate::host::DocumentHost;
use crate::persistence::{CookieJar, SessionStore};
use crate::section::{CollapseState, NodeKind};
use crate::sidebar::SidebarPanel;
use crate::tree::SectionTree;
use serde::Serialize;
use std::time::Instant;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Something the host reports to the page.
pub enum PageEvent {
    /// The user activated the in-document section header at this host index.
    Activate(usize),
    /// The user activated the side panel menu item for the header at this host index.
    ActivateMenu(usize),
    /// The user activated the side panel's collapse button.
    ToggleSidebar,
    /// The viewport changed width.
    Resize(u32),
    /// The content region's structure changed.
    Mutation,
}

#[derive(Clone, Debug, Serialize)]
/// Serialisable view of one node.
pub struct NodeSnapshot {
    /// Header text.
    pub label: String,
    /// Heading level.
    pub level: usize,
    /// Current state.
    pub state: CollapseState,
    /// Whether the header responds to activation.
    pub collapsible: bool,
    /// Extent the content region currently occupies.
    pub extent: u32,
}

#[derive(Clone, Debug, Serialize)]
/// Serialisable view of the side panel.
pub struct SidebarSnapshot {
    /// Whether the panel is hidden.
    pub collapsed: bool,
    /// Extent of the panel.
    pub extent: u32,
    /// Menu items.
    pub menu: Vec<NodeSnapshot>,
}

#[derive(Clone, Debug, Serialize)]
/// Serialisable view of a whole page.
pub struct PageSnapshot {
    /// In-document sections.
    pub sections: Vec<NodeSnapshot>,
    /// Side panel, absent when the page has none.
    pub sidebar: Option<SidebarSnapshot>,
    /// Extent of the main content.
    pub content_extent: u32,
    /// Height the content container is pinned to, if any.
    pub container_height: Option<u32>,
    /// Cookie string after all transitions.
    pub cookie: String,
}

/// Side panel state, present only on pages that have one.
struct Panel {
    flag: SidebarPanel,
    menu: CollapseMachine,
}

/// Context for one page view.
pub struct Page<H, S> {
    host: H,
    store: S,
    cookies: CookieJar,
    sections: CollapseMachine,
    panel: Option<Panel>,
    reconciler: Reconciler,
    resize: Debouncer<u32>,
}

impl<H: DocumentHost, S: SessionStore> Page<H, S> {
    /// Initialises collapse state, restores the side panel and reconciles the page height.
    pub fn open(mut host: H, mut store: S, mut cookies: CookieJar, config: &Config) -> Self {
        let headers = host.headers();

        let tree = SectionTree::build(&headers, NodeKind::Section, &config.collapsible_levels);
        let sections = CollapseMachine::initialize(tree, &mut host, &store);

        let panel = host.has_side_panel().then(|| {
            let tree = SectionTree::build(&headers, NodeKind::Menu, &[]);
            let menu = CollapseMachine::initialize(tree, &mut host, &store);
            let mut flag = SidebarPanel::new();
            flag.load_state(&mut host, &mut store, &mut cookies);
            flag.apply_cookie(&mut host, &mut cookies);
            Panel { flag, menu }
        });

        let mut page = Self {
            host,
            store,
            cookies,
            sections,
            panel,
            reconciler: Reconciler::new(),
            resize: Debouncer::new(config.debounce()),
        };
        page.reconcile();
        tracing::info!(
            sections = page.sections.tree().len(),
            side_panel = page.panel.is_some(),
            "page opened"
        );
        page
    }

    /// Handles one host event to completion.
    ///
    /// Returns whether the event changed anything; activations of unregistered headers and side
    /// panel toggles on pages without a panel do not.
    pub fn dispatch(&mut self, event: PageEvent, now: Instant) -> bool {
        match event {
            PageEvent::Activate(header) => {
                let toggled = self
                    .sections
                    .activate(header, &mut self.host, &mut self.store);
                self.after_toggle(toggled)
            }
            PageEvent::ActivateMenu(header) => {
                let Some(panel) = self.panel.as_mut() else {
                    return false;
                };
                let toggled = panel.menu.activate(header, &mut self.host, &mut self.store);
                self.after_toggle(toggled)
            }
            PageEvent::ToggleSidebar => {
                let Some(panel) = self.panel.as_mut() else {
                    return false;
                };
                panel
                    .flag
                    .toggle(&mut self.host, &mut self.store, &mut self.cookies);
                self.reconcile();
                true
            }
            PageEvent::Resize(width) => {
                self.host.resize(width);
                self.sections.measure(&self.host);
                self.reconcile();
                self.resize.schedule(now, width);
                true
            }
            PageEvent::Mutation => {
                self.sections.measure(&self.host);
                self.reconcile();
                true
            }
        }
    }

    fn after_toggle(&mut self, toggled: Option<Toggle>) -> bool {
        if toggled.is_some() {
            self.reconcile();
        }
        toggled.is_some()
    }

    /// Runs the debounced resize pass once no resize has arrived for the quiet window.
    ///
    /// Returns whether the pass ran.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(width) = self.resize.poll(now) else {
            return false;
        };
        tracing::debug!(width, "viewport settled");
        self.sections.recalculate(&mut self.host);
        self.reconcile();
        true
    }

    #[must_use]
    /// When a pending resize pass becomes due.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.resize.deadline()
    }

    /// Pins or releases the content container against the side panel.
    ///
    /// Pages without a side panel have nothing to reconcile against.
    pub fn reconcile(&mut self) -> Option<ContainerStyle> {
        let panel = self.panel.as_ref()?;
        let panel_extent = panel.flag.extent(panel.menu.tree());
        let content_extent = self.content_extent();
        let style = self.reconciler.reconcile(panel_extent, content_extent)?;
        self.host.set_container_height(match style {
            ContainerStyle::Pinned(height) => Some(height),
            ContainerStyle::Natural => None,
        });
        Some(style)
    }

    #[must_use]
    /// Extent of the main content at its current collapse state.
    pub fn content_extent(&self) -> u32 {
        self.host
            .leading_extent()
            .saturating_add(self.sections.tree().document_extent())
    }

    #[must_use]
    /// The in-document section state.
    pub fn sections(&self) -> &CollapseMachine {
        &self.sections
    }

    #[must_use]
    /// The side panel's menu state, if the page has a panel.
    pub fn menu(&self) -> Option<&CollapseMachine> {
        self.panel.as_ref().map(|panel| &panel.menu)
    }

    #[must_use]
    /// The side panel flag, if the page has a panel.
    pub fn sidebar(&self) -> Option<&SidebarPanel> {
        self.panel.as_ref().map(|panel| &panel.flag)
    }

    #[must_use]
    /// The host handle.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host handle, for hosts that change the document between events.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[must_use]
    /// The session store.
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    /// The cookie jar.
    pub fn cookies(&self) -> &CookieJar {
        &self.cookies
    }

    #[must_use]
    /// Captures the page state for reporting.
    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            sections: nodes(self.sections.tree()),
            sidebar: self.panel.as_ref().map(|panel| SidebarSnapshot {
                collapsed: panel.flag.is_collapsed(),
                extent: panel.flag.extent(panel.menu.tree()),
                menu: nodes(panel.menu.tree()),
            }),
            content_extent: self.content_extent(),
            container_height: self.reconciler.pinned(),
            cookie: self.cookies.as_str().to_string(),
        }
    }

    /// Ends the page view, handing back the host and store.
    pub fn close(self) -> (H, S, CookieJar) {
        (self.host, self.store, self.cookies)
    }
}

fn nodes(tree: &SectionTree) -> Vec<NodeSnapshot> {
    (0..tree.len())
        .map(|id| {
            let node = &tree.nodes[id];
            NodeSnapshot {
                label: node.label.clone(),
                level: node.level,
                state: node.state,
                collapsible: node.collapsible,
                extent: tree.effective_extent(id),
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/page.rs"]
mod tests;
