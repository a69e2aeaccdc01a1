use minisearch_core::index::term_frequency;
use minisearch_core::{
    build_index, preprocess_all, rank, score, scores_all, search, Document, Normalizer, SearchEngine, SearchError,
};

fn names(hits: &[minisearch_core::RankedDocument<'_>]) -> Vec<usize> {
    hits.iter().map(|h| h.document.id).collect()
}

#[test]
fn cat_and_dog_query_ranks_shared_document_first() {
    let docs = Document::from_texts(["the cat sat", "the dog ran", "cat and dog play"]);
    let engine = SearchEngine::build(Normalizer::english(), docs);
    let hits = engine.search("cat dog", 5);

    assert_eq!(names(&hits), vec![2, 0, 1]);
    assert!(hits[0].score > hits[1].score);
    assert_eq!(hits[1].score, hits[2].score);
    let idf = 1.5f64.log10();
    assert!((hits[0].score - 2.0 / 3.0 * idf).abs() < 1e-6);
    assert!((hits[1].score - 0.5 * idf).abs() < 1e-6);
}

#[test]
fn unknown_term_over_identical_docs_returns_corpus_order() {
    let docs = Document::from_texts(vec!["the same words here"; 5]);
    let engine = SearchEngine::build(Normalizer::english(), docs);
    let hits = engine.search("zebra", 5);
    assert_eq!(names(&hits), vec![0, 1, 2, 3, 4]);
    assert!(hits.iter().all(|h| h.score == 0.0));
}

#[test]
fn stopword_only_query_scores_zero_everywhere() {
    let docs = Document::from_texts(["cats purr", "dogs bark"]);
    let engine = SearchEngine::build(Normalizer::english(), docs);
    assert!(engine.process_query("the and of").is_empty());
    let hits = engine.search("the and of", 5);
    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|h| h.score == 0.0));
}

#[test]
fn top_n_larger_than_corpus_returns_all_sorted() {
    let docs = Document::from_texts(["apple", "banana banana apple", "cherry"]);
    let engine = SearchEngine::build(Normalizer::english(), docs);
    let hits = engine.search("banana", 10);
    assert_eq!(hits.len(), 3);
    assert_eq!(hits[0].document.id, 1);
    assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
    assert!(engine.search("banana", 0).is_empty());
}

#[test]
fn empty_documents_never_outrank_matches() {
    let docs = Document::from_texts(["", "...", "rocket launch"]);
    let engine = SearchEngine::build(Normalizer::english(), docs);
    assert!(engine.index().weights(0).unwrap().is_empty());
    assert!(engine.index().weights(1).unwrap().is_empty());
    let hits = engine.search("rocket", 3);
    assert_eq!(hits[0].document.id, 2);
    assert!(hits[0].score > 0.0);
}

#[test]
fn repeated_query_terms_count_twice() {
    let docs = Document::from_texts(["rust compiler", "python interpreter"]);
    let engine = SearchEngine::build(Normalizer::english(), docs);
    let once = engine.search("rust", 1)[0].score;
    let twice = engine.search("rust rust", 1)[0].score;
    assert!((twice - 2.0 * once).abs() < 1e-6);
}

#[test]
fn free_functions_compose_like_the_engine() {
    let normalizer = Normalizer::english();
    let docs = Document::from_texts(["the cat sat", "the dog ran", "cat and dog play"]);
    let sequences = preprocess_all(&normalizer, &docs);
    for seq in &sequences {
        let total: f64 = seq.iter().collect::<std::collections::HashSet<_>>().iter().map(|t| term_frequency(t, seq)).sum();
        assert!((total - 1.0).abs() < 1e-6);
    }
    let index = build_index(&sequences);

    let query = vec!["cat".to_string(), "dog".to_string()];
    let scores = scores_all(&index, &query);
    assert_eq!(scores[2], score(index.weights(2).unwrap(), &query));

    let ranked = rank(&docs, &scores, 2).unwrap();
    let via_search = search("cat dog", &normalizer, &index, &docs, 2).unwrap();
    assert_eq!(ranked, via_search);
}

#[test]
fn search_rejects_misaligned_index() {
    let normalizer = Normalizer::english();
    let docs = Document::from_texts(["one", "two", "three"]);
    let index = build_index(&preprocess_all(&normalizer, &docs[..2]));
    let err = search("one", &normalizer, &index, &docs, 5).unwrap_err();
    assert!(matches!(err, SearchError::LengthMismatch { expected: 3, actual: 2, .. }));
    assert!(err.to_string().contains("index"));
}

#[test]
fn engine_is_shareable_across_threads() {
    let docs = Document::from_texts(["alpha beta", "beta gamma", "gamma delta"]);
    let engine = std::sync::Arc::new(SearchEngine::build(Normalizer::english(), docs));
    let handles: Vec<_> = ["alpha", "gamma", "delta"]
        .into_iter()
        .map(|q| {
            let engine = engine.clone();
            std::thread::spawn(move || engine.search(q, 1)[0].document.id)
        })
        .collect();
    let top: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(top, vec![0, 1, 2]);
}

#[test]
fn engine_renumbers_documents_by_position() {
    let docs = vec![Document::new(7, "a", "rocket launch"), Document::new(3, "b", "garden tips")];
    let engine = SearchEngine::build(Normalizer::english(), docs);

    let hit = engine.search("rocket", 1)[0];
    assert_eq!(hit.document.id, 0);
    assert_eq!(engine.document(hit.document.id).unwrap().name, "a");

    let second = &engine.documents()[1];
    assert_eq!(second.id, 1);
    assert_eq!(engine.index().top_terms(second.id, 5).len(), 2);
}
