use crate::document::{DocId, Document};
use crate::tokenizer::Normalizer;
use crate::TermSequence;
use std::collections::{HashMap, HashSet};

/// Sparse term -> tf-idf weight map of one document. Absent terms weigh 0.
pub type TermWeightMap = HashMap<String, f64>;

/// Per-document weight maps, positionally aligned with the corpus they were built from.
#[derive(Debug, Clone, Default)]
pub struct TfIdfIndex {
    weights: Vec<TermWeightMap>,
    df: HashMap<String, u32>,
    num_docs: usize,
}

impl TfIdfIndex {
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn num_docs(&self) -> usize {
        self.num_docs
    }

    pub fn vocabulary_size(&self) -> usize {
        self.df.len()
    }

    pub fn doc_frequency(&self, term: &str) -> u32 {
        self.df.get(term).copied().unwrap_or(0)
    }

    /// IDF of `term` over this corpus; 0 for terms the corpus never saw.
    pub fn idf(&self, term: &str) -> f64 {
        inverse_document_frequency(self.num_docs, self.doc_frequency(term))
    }

    pub fn weights(&self, doc: DocId) -> Option<&TermWeightMap> {
        self.weights.get(doc)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TermWeightMap> {
        self.weights.iter()
    }

    /// Terms of `doc` by descending weight, ties broken alphabetically.
    pub fn top_terms(&self, doc: DocId, limit: usize) -> Vec<(&str, f64)> {
        let Some(map) = self.weights.get(doc) else { return Vec::new() };
        let mut terms: Vec<(&str, f64)> = map.iter().map(|(t, w)| (t.as_str(), *w)).collect();
        terms.sort_by(|a, b| {
            b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal).then_with(|| a.0.cmp(b.0))
        });
        terms.truncate(limit);
        terms
    }
}

/// Normalize every document independently, preserving order and count.
pub fn preprocess_all(normalizer: &Normalizer, documents: &[Document]) -> Vec<TermSequence> {
    let sequences: Vec<TermSequence> = documents.iter().map(|d| normalizer.normalize(&d.text)).collect();
    let tokens: usize = sequences.iter().map(Vec::len).sum();
    tracing::debug!(num_docs = sequences.len(), tokens, "preprocessed corpus");
    sequences
}

/// `count(term in terms) / len(terms)`, or 0 for an empty sequence.
pub fn term_frequency(term: &str, terms: &[String]) -> f64 {
    if terms.is_empty() {
        return 0.0;
    }
    let count = terms.iter().filter(|t| t.as_str() == term).count();
    count as f64 / terms.len() as f64
}

/// `log10(N / df)`, or 0 when `df == 0`.
pub fn inverse_document_frequency(num_docs: usize, df: u32) -> f64 {
    if df == 0 {
        return 0.0;
    }
    (num_docs as f64 / df as f64).log10()
}

/// Number of sequences each term occurs in at least once.
pub fn document_frequencies(term_sequences: &[TermSequence]) -> HashMap<String, u32> {
    let mut df: HashMap<String, u32> = HashMap::new();
    for terms in term_sequences {
        let seen: HashSet<&str> = terms.iter().map(String::as_str).collect();
        for term in seen {
            *df.entry(term.to_string()).or_insert(0) += 1;
        }
    }
    df
}

fn term_counts(terms: &[String]) -> HashMap<&str, u32> {
    let mut counts: HashMap<&str, u32> = HashMap::with_capacity(terms.len());
    for term in terms {
        *counts.entry(term.as_str()).or_insert(0) += 1;
    }
    counts
}

/// Build the tf-idf index. Document frequencies are gathered in one pass over
/// the whole corpus before any weight is computed.
pub fn build_index(term_sequences: &[TermSequence]) -> TfIdfIndex {
    let num_docs = term_sequences.len();
    let df = document_frequencies(term_sequences);

    let weights: Vec<TermWeightMap> = term_sequences
        .iter()
        .map(|terms| {
            let len = terms.len() as f64;
            term_counts(terms)
                .into_iter()
                .map(|(term, count)| {
                    let tf = count as f64 / len;
                    let idf = inverse_document_frequency(num_docs, df.get(term).copied().unwrap_or(0));
                    (term.to_string(), tf * idf)
                })
                .collect()
        })
        .collect();

    tracing::info!(num_docs, vocabulary = df.len(), "built tf-idf index");
    TfIdfIndex { weights, df, num_docs }
}
