//! Settings read from `sectionfold.toml`, with a default for every field.
//!
//! The file sets the starting viewport width, the quiet window before a resize pass runs, the
//! heading levels that may collapse, which file extensions are opened, and where remembered
//! state is written. Command line flags override it.

use crate::error::{Error, Result};
use facet::Facet;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// File consulted by [`Config::load`].
pub const CONFIG_FILE: &str = "sectionfold.toml";

#[derive(Facet, Clone, Debug, PartialEq)]
/// User preferences loaded from sectionfold.toml or falling back to defaults.
pub struct Config {
    #[facet(default = 100)]
    /// Viewport width (in columns) that extents are measured at before any resize.
    pub wrap_width: u32,
    #[facet(default = 200)]
    /// Quiet window in milliseconds before a resize triggers section reconciliation.
    pub debounce_ms: u64,
    #[facet(default = vec![2, 3])]
    /// Heading levels whose in-document sections may be collapsed.
    pub collapsible_levels: Vec<usize>,
    #[facet(default = vec!["md".to_string()])]
    /// File suffixes to match when scanning directories.
    pub file_extensions: Vec<String>,
    #[facet(default = ".sectionfold-session.json".to_string())]
    /// JSON file standing in for the session store between runs.
    pub session_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wrap_width: 100,
            debounce_ms: 200,
            collapsible_levels: vec![2, 3],
            file_extensions: vec!["md".to_string()],
            session_file: ".sectionfold-session.json".to_string(),
        }
    }
}

impl Config {
    #[must_use]
    /// Load configuration from sectionfold.toml if present.
    ///
    /// An unreadable or invalid file is logged and ignored, so the defaults apply.
    pub fn load() -> Self {
        let path = Path::new(CONFIG_FILE);
        if !path.exists() {
            return Self::default();
        }
        Self::load_from(path).unwrap_or_else(|e| {
            tracing::warn!("{e}; using default configuration");
            Self::default()
        })
    }

    /// Load configuration from an explicit file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid configuration TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        facet_toml::from_str::<Self>(&contents).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    #[must_use]
    /// Resize quiet window as a [`Duration`].
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
