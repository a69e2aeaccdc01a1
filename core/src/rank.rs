use crate::document::Document;
use crate::error::{Result, SearchError};
use serde::Serialize;
use std::cmp::Ordering;

/// A document paired with its relevance score for one query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedDocument<'a> {
    pub document: &'a Document,
    pub score: f64,
}

/// Order documents by descending score and keep the first `top_n`.
///
/// Ties keep corpus order. A corpus smaller than `top_n` is returned whole,
/// and `top_n == 0` yields nothing. `documents` and `scores` must be aligned.
pub fn rank<'a>(documents: &'a [Document], scores: &[f64], top_n: usize) -> Result<Vec<RankedDocument<'a>>> {
    if documents.len() != scores.len() {
        return Err(SearchError::LengthMismatch { what: "scores", expected: documents.len(), actual: scores.len() });
    }
    Ok(rank_aligned(documents, scores, top_n))
}

pub(crate) fn rank_aligned<'a>(documents: &'a [Document], scores: &[f64], top_n: usize) -> Vec<RankedDocument<'a>> {
    debug_assert_eq!(documents.len(), scores.len());
    if top_n == 0 {
        return Vec::new();
    }
    let mut ranked: Vec<RankedDocument<'a>> = documents
        .iter()
        .zip(scores)
        .map(|(document, &score)| RankedDocument { document, score })
        .collect();
    // sort_by is stable
    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    ranked.truncate(top_n);
    ranked
}
