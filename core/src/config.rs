//! Configuration shared by the command-line tool and the HTTP server.
//!
//! Every field has a default, so an empty JSON object (or no file at all)
//! yields the stock English pipeline returning the top 5 documents.

use crate::error::{Result, SearchError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Number of documents returned per query
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// File extensions picked up when the corpus is a directory
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    #[serde(default)]
    pub normalizer: NormalizerConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Apply Unicode NFKC before lowercasing
    #[serde(default)]
    pub nfkc: bool,

    /// Replaces the built-in English stopword list
    #[serde(default)]
    pub stopwords_path: Option<PathBuf>,

    #[serde(default)]
    pub extra_stopwords: Vec<String>,

    /// Lemma dictionary merged over the built-in irregular forms: `form<TAB>lemma`
    /// exceptions, or a bare `lemma` per line to add it to the known-lemma vocabulary
    #[serde(default)]
    pub lemmas_path: Option<PathBuf>,
}

fn default_top_n() -> usize {
    5
}

fn default_extensions() -> Vec<String> {
    vec!["txt".to_string()]
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { top_n: default_top_n(), extensions: default_extensions(), normalizer: NormalizerConfig::default() }
    }
}

impl SearchConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| SearchError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| SearchError::Config(e.to_string()))
    }

    /// Load `path` when given, otherwise fall back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let cfg = SearchConfig::from_json("{}").unwrap();
        assert_eq!(cfg.top_n, 5);
        assert_eq!(cfg.extensions, vec!["txt"]);
        assert!(!cfg.normalizer.nfkc);
        assert!(cfg.normalizer.stopwords_path.is_none());
    }

    #[test]
    fn nested_fields_override() {
        let cfg = SearchConfig::from_json(
            r#"{"top_n": 3, "extensions": ["md"], "normalizer": {"nfkc": true, "extra_stopwords": ["record"]}}"#,
        )
        .unwrap();
        assert_eq!(cfg.top_n, 3);
        assert_eq!(cfg.extensions, vec!["md"]);
        assert!(cfg.normalizer.nfkc);
        assert_eq!(cfg.normalizer.extra_stopwords, vec!["record"]);
    }

    #[test]
    fn invalid_json_is_config_error() {
        let err = SearchConfig::from_json("{top_n: }").unwrap_err();
        assert!(matches!(err, SearchError::Config(_)));
    }
}
