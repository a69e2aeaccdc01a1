use crate::config::NormalizerConfig;
use crate::error::Result;
use crate::linguistics::{DictionaryLemmatizer, Lemmatizer, SnowballStemmer, StopwordSet, WordStemmer};
use crate::TermSequence;
use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    // Runs of word characters, or runs of anything that is neither a word character nor whitespace.
    static ref WORD_PUNCT: Regex = Regex::new(r"\w+|[^\w\s]+").expect("valid regex");
    static ref PUNCT: Regex = Regex::new(r"[\p{P}[:punct:]]").expect("valid regex");
}

/// Split text into words and standalone punctuation runs, in order of appearance.
pub fn split_words(text: &str) -> Vec<&str> {
    WORD_PUNCT.find_iter(text).map(|m| m.as_str()).collect()
}

/// Remove every punctuation character from a token.
pub fn strip_punctuation(token: &str) -> Cow<'_, str> {
    PUNCT.replace_all(token, "")
}

/// Turns raw text into normalized terms.
///
/// Indexing and querying must go through the same instance, otherwise index
/// terms and query terms drift apart and every score silently becomes zero.
pub struct Normalizer {
    stopwords: StopwordSet,
    stemmer: Box<dyn WordStemmer>,
    lemmatizer: Box<dyn Lemmatizer>,
    nfkc: bool,
}

impl Normalizer {
    /// English stopwords, Snowball stemming, built-in irregular lemmas.
    pub fn english() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> NormalizerBuilder {
        NormalizerBuilder::default()
    }

    pub fn from_config(config: &NormalizerConfig) -> Result<Self> {
        let mut stopwords = match &config.stopwords_path {
            Some(path) => StopwordSet::from_file(path)?,
            None => StopwordSet::english(),
        };
        stopwords.extend(&config.extra_stopwords);

        let mut lemmatizer = DictionaryLemmatizer::english();
        if let Some(path) = &config.lemmas_path {
            lemmatizer.load_file(path)?;
        }

        Ok(Self::builder()
            .stopwords(stopwords)
            .lemmatizer(lemmatizer)
            .nfkc(config.nfkc)
            .build())
    }

    /// Lowercase, split, strip punctuation, drop stopwords, then stem and lemmatize.
    pub fn normalize(&self, text: &str) -> TermSequence {
        let lowered = if self.nfkc {
            text.nfkc().collect::<String>().to_lowercase()
        } else {
            text.to_lowercase()
        };
        let mut terms = Vec::new();
        for raw in split_words(&lowered) {
            let token = strip_punctuation(raw);
            if token.is_empty() || self.stopwords.contains(&token) {
                continue;
            }
            let stem = self.stemmer.stem(&token);
            terms.push(self.lemmatizer.lemmatize(&stem).into_owned());
        }
        terms
    }

    pub fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::english()
    }
}

impl std::fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Normalizer")
            .field("stopwords", &self.stopwords.len())
            .field("nfkc", &self.nfkc)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
pub struct NormalizerBuilder {
    stopwords: Option<StopwordSet>,
    stemmer: Option<Box<dyn WordStemmer>>,
    lemmatizer: Option<Box<dyn Lemmatizer>>,
    nfkc: bool,
}

impl NormalizerBuilder {
    pub fn stopwords(mut self, stopwords: StopwordSet) -> Self {
        self.stopwords = Some(stopwords);
        self
    }

    pub fn stemmer(mut self, stemmer: impl WordStemmer + 'static) -> Self {
        self.stemmer = Some(Box::new(stemmer));
        self
    }

    pub fn lemmatizer(mut self, lemmatizer: impl Lemmatizer + 'static) -> Self {
        self.lemmatizer = Some(Box::new(lemmatizer));
        self
    }

    /// Apply Unicode NFKC before lowercasing.
    pub fn nfkc(mut self, enabled: bool) -> Self {
        self.nfkc = enabled;
        self
    }

    pub fn build(self) -> Normalizer {
        Normalizer {
            stopwords: self.stopwords.unwrap_or_else(StopwordSet::english),
            stemmer: self.stemmer.unwrap_or_else(|| Box::new(SnowballStemmer::english())),
            lemmatizer: self.lemmatizer.unwrap_or_else(|| Box::new(DictionaryLemmatizer::english())),
            nfkc: self.nfkc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_words_and_punctuation() {
        assert_eq!(split_words("hello, world!!"), vec!["hello", ",", "world", "!!"]);
        assert_eq!(split_words("don't"), vec!["don", "'", "t"]);
    }

    #[test]
    fn strips_ascii_and_unicode_punctuation() {
        assert_eq!(strip_punctuation("foo_bar"), "foobar");
        assert_eq!(strip_punctuation("«»"), "");
        assert_eq!(strip_punctuation("#cola"), "cola");
        assert_eq!(strip_punctuation("42"), "42");
    }

    #[test]
    fn basic_normalize() {
        let n = Normalizer::english();
        assert_eq!(n.normalize("The BOYS are jumping on the trampoline."), vec!["boy", "jump", "trampolin"]);
    }

    #[test]
    fn empty_input_yields_no_terms() {
        let n = Normalizer::english();
        assert!(n.normalize("").is_empty());
        assert!(n.normalize("  ... !!! ").is_empty());
    }

    #[test]
    fn custom_stemmer_is_used() {
        struct Upper;
        impl WordStemmer for Upper {
            fn stem(&self, word: &str) -> String {
                word.to_uppercase()
            }
        }
        let n = Normalizer::builder().stemmer(Upper).build();
        assert_eq!(n.normalize("quick fox"), vec!["QUICK", "FOX"]);
    }
}
