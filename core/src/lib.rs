pub mod config;
pub mod document;
pub mod error;
pub mod index;
pub mod linguistics;
pub mod rank;
pub mod scorer;
pub mod search;
pub mod source;
pub mod tokenizer;

pub use config::{NormalizerConfig, SearchConfig};
pub use document::{DocId, Document};
pub use error::SearchError;
pub use index::{build_index, preprocess_all, TermWeightMap, TfIdfIndex};
pub use rank::{rank, RankedDocument};
pub use scorer::{score, scores_all};
pub use search::{process_query, search, SearchEngine};
pub use tokenizer::Normalizer;

/// Ordered, normalized terms of one document or one query.
pub type TermSequence = Vec<String>;
