//! Linguistic resources used by the [`Normalizer`](crate::tokenizer::Normalizer):
//! an English stopword set, a Snowball stemmer and a dictionary lemmatizer.
//!
//! All three are plain values. Nothing here is global, so a normalizer can be
//! built with custom resources (e.g. loaded from files) and shared by reference.

use crate::error::{Result, SearchError};
use rust_stemmers::{Algorithm, Stemmer};
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

/// Upper bound on re-stemming passes; Porter2 settles after one or two.
const MAX_STEM_PASSES: usize = 8;

const ENGLISH_STOPWORDS: &[&str] = &[
    "i","me","my","myself","we","our","ours","ourselves","you","you're","you've","you'll","you'd",
    "your","yours","yourself","yourselves","he","him","his","himself","she","she's","her","hers",
    "herself","it","it's","its","itself","they","them","their","theirs","themselves","what","which",
    "who","whom","this","that","that'll","these","those","am","is","are","was","were","be","been",
    "being","have","has","had","having","do","does","did","doing","a","an","the","and","but","if",
    "or","because","as","until","while","of","at","by","for","with","about","against","between",
    "into","through","during","before","after","above","below","to","from","up","down","in","out",
    "on","off","over","under","again","further","then","once","here","there","when","where","why",
    "how","all","any","both","each","few","more","most","other","some","such","no","nor","not",
    "only","own","same","so","than","too","very","s","t","can","will","just","don","don't","should",
    "should've","now","d","ll","m","o","re","ve","y","ain","aren","aren't","couldn","couldn't",
    "didn","didn't","doesn","doesn't","hadn","hadn't","hasn","hasn't","haven","haven't","isn",
    "isn't","ma","mightn","mightn't","mustn","mustn't","needn","needn't","shan","shan't","shouldn",
    "shouldn't","wasn","wasn't","weren","weren't","won","won't","wouldn","wouldn't",
];

/// Irregular noun forms that suffix rules cannot recover.
const IRREGULAR_NOUNS: &[(&str, &str)] = &[
    ("men", "man"), ("women", "woman"), ("children", "child"), ("mice", "mouse"),
    ("geese", "goose"), ("feet", "foot"), ("teeth", "tooth"), ("oxen", "ox"), ("lice", "louse"),
    ("dice", "die"), ("criteria", "criterion"), ("phenomena", "phenomenon"), ("data", "datum"),
    ("cacti", "cactus"), ("fungi", "fungus"), ("nuclei", "nucleus"), ("radii", "radius"),
    ("alumni", "alumnus"), ("analyses", "analysis"), ("crises", "crisis"), ("theses", "thesis"),
    ("indices", "index"), ("matrices", "matrix"), ("vertices", "vertex"), ("appendices", "appendix"),
    ("wolves", "wolf"), ("knives", "knife"), ("wives", "wife"), ("lives", "life"), ("leaves", "leaf"),
    ("halves", "half"), ("selves", "self"), ("shelves", "shelf"), ("loaves", "loaf"), ("thieves", "thief"),
];

/// Regular noun detachment rules, tried in order.
const NOUN_SUFFIX_RULES: &[(&str, &str)] = &[
    ("ses", "s"), ("xes", "x"), ("zes", "z"), ("ches", "ch"), ("shes", "sh"),
    ("men", "man"), ("ies", "y"), ("s", ""),
];

#[derive(Debug, Clone, Default)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    pub fn english() -> Self {
        Self { words: ENGLISH_STOPWORDS.iter().map(|w| w.to_string()).collect() }
    }

    /// One word per line; blank lines and `#` comments are ignored.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = read_resource(path)?;
        let words = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .map(str::to_lowercase)
            .collect();
        Ok(Self { words })
    }

    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words.extend(words.into_iter().map(|w| w.as_ref().to_lowercase()));
    }

    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Rule-based reduction of a word to a root form.
pub trait WordStemmer: Send + Sync {
    fn stem(&self, word: &str) -> String;
}

/// Snowball English (Porter2), re-applied until the output stops changing.
pub struct SnowballStemmer {
    inner: Stemmer,
}

impl SnowballStemmer {
    pub fn english() -> Self {
        Self { inner: Stemmer::create(Algorithm::English) }
    }
}

impl Default for SnowballStemmer {
    fn default() -> Self {
        Self::english()
    }
}

impl std::fmt::Debug for SnowballStemmer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SnowballStemmer(English)")
    }
}

impl WordStemmer for SnowballStemmer {
    fn stem(&self, word: &str) -> String {
        let mut current = self.inner.stem(word).into_owned();
        for _ in 1..MAX_STEM_PASSES {
            let next = self.inner.stem(&current);
            if next == current.as_str() {
                break;
            }
            let next = next.into_owned();
            current = next;
        }
        current
    }
}

/// Dictionary-based reduction of a word to its canonical form.
pub trait Lemmatizer: Send + Sync {
    fn lemmatize<'a>(&self, word: &'a str) -> Cow<'a, str>;
}

#[derive(Debug, Clone, Default)]
pub struct DictionaryLemmatizer {
    exceptions: HashMap<String, String>,
    lemmas: HashSet<String>,
}

impl DictionaryLemmatizer {
    /// Built-in irregular English nouns, no lemma vocabulary.
    pub fn english() -> Self {
        let exceptions = IRREGULAR_NOUNS
            .iter()
            .map(|(form, lemma)| (form.to_string(), lemma.to_string()))
            .collect();
        Self { exceptions, lemmas: HashSet::new() }
    }

    /// Merge a dictionary file into this lemmatizer.
    ///
    /// Each line is either `form<TAB>lemma` (an exception) or a single `lemma`
    /// (a known dictionary form that enables suffix rules to resolve to it).
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let text = read_resource(path)?;
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
            match fields.as_slice() {
                [lemma] => {
                    self.lemmas.insert(lemma.to_lowercase());
                }
                [form, lemma] if !form.is_empty() && !lemma.is_empty() => {
                    self.insert(form, lemma);
                }
                _ => {
                    return Err(SearchError::MalformedResource { path: path.to_path_buf(), line: idx + 1 })
                }
            }
        }
        Ok(())
    }

    pub fn insert(&mut self, form: &str, lemma: &str) {
        let lemma = lemma.to_lowercase();
        self.lemmas.insert(lemma.clone());
        self.exceptions.insert(form.to_lowercase(), lemma);
    }

    pub fn add_lemma(&mut self, lemma: &str) {
        self.lemmas.insert(lemma.to_lowercase());
    }
}

impl Lemmatizer for DictionaryLemmatizer {
    fn lemmatize<'a>(&self, word: &'a str) -> Cow<'a, str> {
        if let Some(lemma) = self.exceptions.get(word) {
            return Cow::Owned(lemma.clone());
        }
        if self.lemmas.is_empty() || self.lemmas.contains(word) {
            return Cow::Borrowed(word);
        }
        for (suffix, replacement) in NOUN_SUFFIX_RULES {
            if let Some(base) = word.strip_suffix(suffix) {
                if base.is_empty() {
                    continue;
                }
                let candidate = format!("{base}{replacement}");
                if self.lemmas.contains(&candidate) {
                    return Cow::Owned(candidate);
                }
            }
        }
        Cow::Borrowed(word)
    }
}

fn read_resource(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| SearchError::Resource { path: path.to_path_buf(), source })
}
