use crate::index::{TermWeightMap, TfIdfIndex};

/// Sum of the weights of `query_terms` in one document.
///
/// Repeated query terms are counted once per occurrence.
pub fn score(weights: &TermWeightMap, query_terms: &[String]) -> f64 {
    query_terms.iter().map(|t| weights.get(t).copied().unwrap_or(0.0)).sum()
}

/// One score per document, in index order.
pub fn scores_all(index: &TfIdfIndex, query_terms: &[String]) -> Vec<f64> {
    index.iter().map(|weights| score(weights, query_terms)).collect()
}
