use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for cfg-expander operations
#[derive(Error, Debug)]
pub enum ExpandError {
    /// IO error without an associated path (e.g. reading stdin)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// An input or included file could not be opened or read
    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A glob pattern is syntactically invalid
    #[error("Invalid include pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// An include chain reached a file that is already being expanded
    #[error("Include cycle detected: {path} is already being expanded")]
    Cycle { path: PathBuf },

    /// The output destination could not be created or written
    #[error("Cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// JSON serialization error (directive listing)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ExpandError>;
