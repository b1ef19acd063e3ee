//! Errors raised at the fallible edges of the crate.
//!
//! The collapse state machine itself never fails: missing storage, missing side panels and
//! malformed cookies all degrade to default behaviour. Reading documents, parsing them with
//! tree-sitter and loading configuration files can fail, and those paths report through here.

use std::path::PathBuf;

/// Shorthand for results carrying the crate [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
/// Failures reading, parsing or configuring a document.
pub enum Error {
    #[error(transparent)]
    /// Filesystem access failed.
    Io(#[from] std::io::Error),

    #[error("Failed to load grammar: {message}")]
    /// The tree-sitter grammar could not be loaded into the parser.
    Language {
        /// Description from tree-sitter.
        message: String,
    },

    #[error("Invalid outline query: {message}")]
    /// A format's outline query did not compile against its grammar.
    Query {
        /// Description from tree-sitter.
        message: String,
    },

    #[error("Failed to parse {}", path.display())]
    /// The parser produced no tree for a document.
    Parse {
        /// Document that failed to parse.
        path: PathBuf,
    },

    #[error("Invalid configuration in {}: {message}", path.display())]
    /// A configuration file exists but does not describe a [`crate::config::Config`].
    Config {
        /// Configuration file that was rejected.
        path: PathBuf,
        /// Description from the TOML deserializer.
        message: String,
    },
}
