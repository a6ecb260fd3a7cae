use std::path::PathBuf;
use std::string::FromUtf8Error;

use thiserror::Error;

/// Failures that abort the conversion of a single note. The run carries on
/// with the next candidate after one of these is logged.
#[derive(Debug, Error)]
pub enum NoteError {
    #[error("failed to read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("'{}' is not valid UTF-8: {source}", .path.display())]
    Encoding {
        path: PathBuf,
        source: FromUtf8Error,
    },

    #[error("failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("rendered frontmatter does not parse as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("rendered frontmatter does not round-trip: {0}")]
    InvalidFrontmatter(String),
}
