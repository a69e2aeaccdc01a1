use minisearch_core::linguistics::{DictionaryLemmatizer, StopwordSet};
use minisearch_core::{process_query, Normalizer, NormalizerConfig};
use std::fs;

#[test]
fn it_normalizes_and_stems() {
    let n = Normalizer::english();
    let words = n.normalize("Running Runners RUN! The café's menu.");
    assert!(words.contains(&"run".to_string()));
    assert!(words.contains(&"menu".to_string()));
    assert!(!words.iter().any(|w| w.contains('\'')));
}

#[test]
fn it_filters_stopwords() {
    let n = Normalizer::english();
    let words = n.normalize("The quick brown fox and the lazy dog");
    assert!(!words.contains(&"the".to_string()));
    assert!(!words.contains(&"and".to_string()));
    assert_eq!(words.len(), 5);
}

#[test]
fn query_example_keeps_content_words() {
    let n = Normalizer::english();
    assert_eq!(process_query(&n, "Who is the tallest DOG in the world?"), vec!["tallest", "dog", "world"]);
}

#[test]
fn numerals_survive_without_punctuation() {
    let n = Normalizer::english();
    let words = n.normalize("a collection of 10,558 cans");
    assert_eq!(words, vec!["collect", "10", "558", "can"]);
}

#[test]
fn contractions_collapse_into_stopwords() {
    let n = Normalizer::english();
    assert!(n.normalize("don't won't isn't").is_empty());
}

#[test]
fn process_query_is_pure() {
    let n = Normalizer::english();
    let q = "What is the name of the person with the largest collection of Pepsi cans?";
    assert_eq!(process_query(&n, q), process_query(&n, q));
}

#[test]
fn normalizing_a_stem_again_is_stable() {
    let n = Normalizer::english();
    for word in n.normalize("generously agreed collections trampolines abilities") {
        assert_eq!(n.normalize(&word), vec![word.clone()], "{word} is not a fixed point");
    }
}

#[test]
fn nfkc_folds_compatibility_characters() {
    let plain = Normalizer::english();
    let folded = Normalizer::builder().nfkc(true).build();
    // U+FB01 LATIN SMALL LIGATURE FI
    assert_eq!(folded.normalize("\u{FB01}sh"), vec!["fish"]);
    assert_ne!(plain.normalize("\u{FB01}sh"), vec!["fish"]);
}

#[test]
fn builder_accepts_custom_resources() {
    let mut stopwords = StopwordSet::english();
    stopwords.extend(["record"]);
    let mut lemmas = DictionaryLemmatizer::english();
    lemmas.insert("gwr", "guinness");
    let n = Normalizer::builder().stopwords(stopwords).lemmatizer(lemmas).build();
    assert_eq!(n.normalize("GWR record holder"), vec!["guinness", "holder"]);
}

#[test]
fn from_config_loads_files() {
    let dir = tempfile::tempdir().unwrap();
    let stop_path = dir.path().join("stop.txt");
    let lemma_path = dir.path().join("lemmas.tsv");
    fs::write(&stop_path, "cat\n").unwrap();
    fs::write(&lemma_path, "dog\tcanine\n").unwrap();

    let config = NormalizerConfig {
        nfkc: false,
        stopwords_path: Some(stop_path),
        extra_stopwords: vec!["sat".to_string()],
        lemmas_path: Some(lemma_path),
    };
    let n = Normalizer::from_config(&config).unwrap();
    // "the" is no longer a stopword once the built-in list is replaced
    assert_eq!(n.normalize("the cat sat with a dog"), vec!["the", "with", "a", "canine"]);
}

#[test]
fn from_config_reports_missing_files() {
    let config = NormalizerConfig { lemmas_path: Some("/no/such/lemmas.tsv".into()), ..Default::default() };
    assert!(Normalizer::from_config(&config).is_err());
}
