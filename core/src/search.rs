use crate::document::{DocId, Document};
use crate::error::{Result, SearchError};
use crate::index::{build_index, preprocess_all, TfIdfIndex};
use crate::rank::{rank, rank_aligned, RankedDocument};
use crate::scorer::scores_all;
use crate::tokenizer::Normalizer;
use crate::TermSequence;

/// Normalize a query with the same normalizer that built the index.
pub fn process_query(normalizer: &Normalizer, raw_query: &str) -> TermSequence {
    let terms = normalizer.normalize(raw_query);
    if terms.is_empty() {
        tracing::warn!(query = raw_query, "query has no searchable terms; every score will be zero");
    }
    terms
}

/// Rank `documents` against `raw_query`.
///
/// Precondition: `index` was built from `documents`, in the same order, with
/// `normalizer`. Only the lengths can be checked here; a reordered or different
/// corpus of the same size returns the wrong documents without any error.
/// Prefer [`SearchEngine`], which keeps the three together.
pub fn search<'a>(
    raw_query: &str,
    normalizer: &Normalizer,
    index: &TfIdfIndex,
    documents: &'a [Document],
    top_n: usize,
) -> Result<Vec<RankedDocument<'a>>> {
    if index.len() != documents.len() {
        return Err(SearchError::LengthMismatch { what: "index", expected: documents.len(), actual: index.len() });
    }
    let query_terms = process_query(normalizer, raw_query);
    let scores = scores_all(index, &query_terms);
    let ranked = rank(documents, &scores, top_n)?;
    tracing::debug!(query = raw_query, terms = query_terms.len(), returned = ranked.len(), "search complete");
    Ok(ranked)
}

/// A corpus, its index and the normalizer that built it.
#[derive(Debug)]
pub struct SearchEngine {
    normalizer: Normalizer,
    documents: Vec<Document>,
    index: TfIdfIndex,
}

impl SearchEngine {
    /// Index `documents`. Each document's `id` is reset to its position so that
    /// hits, [`SearchEngine::document`] and the index all agree.
    pub fn build(normalizer: Normalizer, mut documents: Vec<Document>) -> Self {
        for (pos, doc) in documents.iter_mut().enumerate() {
            doc.id = pos;
        }
        let sequences = preprocess_all(&normalizer, &documents);
        let index = build_index(&sequences);
        Self { normalizer, documents, index }
    }

    pub fn search(&self, raw_query: &str, top_n: usize) -> Vec<RankedDocument<'_>> {
        let query_terms = self.process_query(raw_query);
        let scores = scores_all(&self.index, &query_terms);
        let ranked = rank_aligned(&self.documents, &scores, top_n);
        tracing::debug!(query = raw_query, terms = query_terms.len(), returned = ranked.len(), "search complete");
        ranked
    }

    pub fn process_query(&self, raw_query: &str) -> TermSequence {
        process_query(&self.normalizer, raw_query)
    }

    pub fn document(&self, id: DocId) -> Option<&Document> {
        self.documents.get(id)
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn index(&self) -> &TfIdfIndex {
        &self.index
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
