//! Error types for the analyzer core.
//!
//! Library code returns these typed errors; the CLI layer wraps them in
//! `anyhow` with extra context before printing.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// Bad flag combination or bad directory/file path.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A required external tool is not available.
    #[error("missing dependency: {0}")]
    DependencyMissing(String),

    /// The values document could not be parsed.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The process was asked to terminate before all keys were analyzed.
    #[error("interrupted")]
    Interrupted,
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("invalid regex `{pattern}`: {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("search root is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

pub type Result<T, E = AnalyzerError> = std::result::Result<T, E>;
