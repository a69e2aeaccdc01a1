use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    /// Two collections that must be positionally aligned have different lengths.
    #[error("{what} length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { what: &'static str, expected: usize, actual: usize },

    #[error("failed to read linguistic resource {path}: {source}")]
    Resource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed entry in {path} at line {line}: expected `form<TAB>lemma` or `lemma`")]
    MalformedResource { path: PathBuf, line: usize },

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SearchError>;
