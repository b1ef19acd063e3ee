//! Session-scoped storage for remembered collapse state.
//!
//! Storage is a convenience, never a requirement: every store here answers `get` with an
//! `Option` and swallows `set` failures, so a page whose storage is unavailable simply falls back
//! to default policies on every load. The global side panel flag additionally lives in a
//! document-scoped cookie token, handled by [`CookieJar`].

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// String key/value storage whose lifetime is the host's session.
pub trait SessionStore {
    /// Value stored under `key`, if any and if storage is reachable.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`; failures are absorbed.
    fn set(&mut self, key: &str, value: &str);
}

#[derive(Clone, Debug, Default)]
/// Store kept in memory for the lifetime of the page context.
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    /// Whether nothing has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

#[derive(Clone, Copy, Debug, Default)]
/// Store for contexts where storage is inaccessible: every read misses, every write is dropped.
pub struct Unavailable;

impl SessionStore for Unavailable {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&mut self, _key: &str, _value: &str) {}
}

#[derive(Debug)]
/// Store backed by a JSON object on disk, standing in for a browser session between runs.
///
/// A missing file starts an empty session. An unreadable or corrupt file, or a failed write,
/// is logged at debug level and the store carries on in memory.
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    #[must_use]
    /// Opens the session file at `path`, reading whatever state it already holds.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = Self::read(&path).unwrap_or_default();
        Self { path, entries }
    }

    fn read(path: &Path) -> Option<BTreeMap<String, String>> {
        let contents = fs::read_to_string(path).ok()?;
        serde_json::from_str(&contents)
            .map_err(|e| tracing::debug!("ignoring session file {}: {e}", path.display()))
            .ok()
    }

    #[must_use]
    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) {
        let written = serde_json::to_string_pretty(&self.entries)
            .map_err(io::Error::from)
            .and_then(|json| fs::write(&self.path, json));
        if let Err(e) = written {
            tracing::debug!("session file {} not written: {e}", self.path.display());
        }
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush();
    }
}

impl<S: SessionStore + ?Sized> SessionStore for &mut S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) {
        (**self).set(key, value);
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Document-scoped cookie string, e.g. `"theme=dark; sidebar=collapsed"`.
pub struct CookieJar {
    raw: String,
}

impl CookieJar {
    #[must_use]
    /// Wraps an existing cookie string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    #[must_use]
    /// The cookie string as a host would store it.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    #[must_use]
    /// Value of the cookie `name`.
    ///
    /// Items are split on `;` then `=`, leading spaces are stripped from keys and items without
    /// a `=` are ignored. The value is the text between the first and second `=`.
    pub fn get(&self, name: &str) -> Option<String> {
        self.raw.split(';').find_map(|item| {
            let mut parts = item.split('=');
            let key = parts.next()?;
            let value = parts.next()?;
            (key.trim_start() == name).then(|| value.to_string())
        })
    }

    /// Sets the cookie `name`, replacing any previous value.
    pub fn set(&mut self, name: &str, value: &str) {
        let mut items: Vec<String> = self
            .raw
            .split(';')
            .map(str::trim_start)
            .filter(|item| {
                !item.is_empty() && item.split_once('=').is_none_or(|(key, _)| key != name)
            })
            .map(str::to_string)
            .collect();
        items.push(format!("{name}={value}"));
        self.raw = items.join("; ");
    }
}

#[cfg(test)]
#[path = "tests/persistence.rs"]
mod tests;
