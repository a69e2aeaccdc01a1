use serde::{Deserialize, Serialize};

/// Position of a document in its corpus. Index entries and scores are aligned on it.
pub type DocId = usize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    /// Human readable handle, e.g. the file name the text was read from.
    pub name: String,
    pub text: String,
}

impl Document {
    pub fn new(id: DocId, name: impl Into<String>, text: impl Into<String>) -> Self {
        Self { id, name: name.into(), text: text.into() }
    }

    /// Build a corpus from raw texts, naming each document after its position.
    pub fn from_texts<I, S>(texts: I) -> Vec<Document>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        texts
            .into_iter()
            .enumerate()
            .map(|(id, text)| Document::new(id, format!("doc{id}"), text))
            .collect()
    }
}
