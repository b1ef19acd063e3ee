//! The collapsible side panel and its global collapsed flag.
//!
//! The flag is remembered twice: in the session store under [`COLLAPSED_KEY`] (`"true"` or
//! `"false"`), written only by user toggles, and in the document cookie as
//! `sidebar=collapsed|expanded`, written on every transition. On load the session flag is applied
//! first, then the cookie, and each only acts when the panel is not already in the state it asks
//! for, so a page never collapses twice.

use crate::host::DocumentHost;
use crate::persistence::{CookieJar, SessionStore};
use crate::tree::SectionTree;

/// Session store key for the panel flag.
pub const COLLAPSED_KEY: &str = "collapsed";
/// Cookie name for the panel flag.
pub const COOKIE_NAME: &str = "sidebar";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Side panel visibility, expanded when a page opens.
pub struct SidebarPanel {
    collapsed: bool,
}

impl SidebarPanel {
    #[must_use]
    /// A panel in its expanded default.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    /// Whether the panel is currently hidden.
    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Flips the panel and remembers the choice in the session store.
    pub fn toggle<H, S>(&mut self, host: &mut H, store: &mut S, cookies: &mut CookieJar)
    where
        H: DocumentHost + ?Sized,
        S: SessionStore + ?Sized,
    {
        if self.collapsed {
            self.expand(host, cookies);
        } else {
            self.collapse(host, cookies);
        }
        store.set(COLLAPSED_KEY, if self.collapsed { "true" } else { "false" });
    }

    /// Applies the session flag: a remembered `"true"` collapses an expanded panel.
    pub fn load_state<H, S>(&mut self, host: &mut H, store: &mut S, cookies: &mut CookieJar)
    where
        H: DocumentHost + ?Sized,
        S: SessionStore + ?Sized,
    {
        if store.get(COLLAPSED_KEY).as_deref() == Some("true") && !self.collapsed {
            self.toggle(host, store, cookies);
        }
    }

    /// Applies the cookie flag; a missing or unrecognised value is no preference.
    pub fn apply_cookie<H>(&mut self, host: &mut H, cookies: &mut CookieJar)
    where
        H: DocumentHost + ?Sized,
    {
        match cookies.get(COOKIE_NAME).as_deref() {
            Some("collapsed") if !self.collapsed => self.collapse(host, cookies),
            Some("expanded") if self.collapsed => self.expand(host, cookies),
            _ => {}
        }
    }

    #[must_use]
    /// Extent of the panel: its visible menu rows, or nothing while collapsed.
    pub fn extent(&self, menu: &SectionTree) -> u32 {
        if self.collapsed {
            0
        } else {
            menu.document_extent()
        }
    }

    fn collapse<H: DocumentHost + ?Sized>(&mut self, host: &mut H, cookies: &mut CookieJar) {
        self.collapsed = true;
        host.set_panel_collapsed(true);
        cookies.set(COOKIE_NAME, "collapsed");
        tracing::trace!("side panel collapsed");
    }

    fn expand<H: DocumentHost + ?Sized>(&mut self, host: &mut H, cookies: &mut CookieJar) {
        self.collapsed = false;
        host.set_panel_collapsed(false);
        cookies.set(COOKIE_NAME, "expanded");
        tracing::trace!("side panel expanded");
    }
}

#[cfg(test)]
#[path = "tests/sidebar.rs"]
mod tests;
