//! sectionfold: collapsible section state for hierarchical documents.
//!
//! A document's headers form a tree of sections. Each collapsible section is expanded or
//! collapsed, that choice is remembered in a session store, and the extents allotted to nested
//! content regions are kept consistent as sections toggle or the viewport reflows. The host
//! that renders the document sits behind [`host::DocumentHost`]; [`page::Page`] is the context a
//! single page view runs in.

pub mod collapse;
pub mod config;
pub mod debounce;
pub mod error;
pub mod formats;
pub mod geometry;
pub mod host;
pub mod input;
pub mod page;
pub mod persistence;
pub mod section;
pub mod sidebar;
pub mod tree;

pub use error::{Error, Result};

#[cfg(test)]
#[path = "tests/fake_host.rs"]
mod fake_host;
