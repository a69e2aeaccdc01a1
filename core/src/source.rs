use crate::document::Document;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Anything that can hand the engine an ordered list of raw document texts.
pub trait DocumentSource {
    fn load(&self) -> Result<Vec<Document>>;
}

/// Plain-text files directly inside one folder, in file-name order.
pub struct DirectorySource {
    root: PathBuf,
    extensions: Vec<String>,
}

impl DirectorySource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf(), extensions: vec!["txt".to_string()] }
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|e| {
                let e: String = e.into();
                e.trim_start_matches('.').to_lowercase()
            })
            .collect();
        self
    }

    fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|s| s.to_str())
            .map(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }
}

impl DocumentSource for DirectorySource {
    fn load(&self) -> Result<Vec<Document>> {
        if !self.root.is_dir() {
            bail!("{} is not a directory", self.root.display());
        }
        let mut docs = Vec::new();
        let walker = WalkDir::new(&self.root).min_depth(1).max_depth(1).sort_by_file_name();
        for entry in walker {
            let entry = entry.with_context(|| format!("reading {}", self.root.display()))?;
            let p = entry.path();
            if !entry.file_type().is_file() || !self.accepts(p) {
                continue;
            }
            let text = fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            docs.push(Document::new(docs.len(), name, text));
        }
        tracing::info!(root = %self.root.display(), num_docs = docs.len(), "loaded documents");
        Ok(docs)
    }
}

#[derive(Debug, Deserialize)]
struct InputDoc {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    body: String,
}

/// One JSON object per line: `{"id": ..., "title": ..., "body": ...}`.
pub struct JsonlSource {
    path: PathBuf,
}

impl JsonlSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }
}

impl DocumentSource for JsonlSource {
    fn load(&self) -> Result<Vec<Document>> {
        let f = File::open(&self.path).with_context(|| format!("opening {}", self.path.display()))?;
        let reader = BufReader::new(f);
        let mut docs = Vec::new();
        for (lineno, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let doc: InputDoc = serde_json::from_str(&line)
                .with_context(|| format!("{}:{}: invalid document", self.path.display(), lineno + 1))?;
            let name = doc.id.or(doc.title).unwrap_or_else(|| format!("line{}", lineno + 1));
            docs.push(Document::new(docs.len(), name, doc.body));
        }
        tracing::info!(path = %self.path.display(), num_docs = docs.len(), "loaded documents");
        Ok(docs)
    }
}

/// A single file treated as one document.
pub struct FileSource {
    path: PathBuf,
}

impl DocumentSource for FileSource {
    fn load(&self) -> Result<Vec<Document>> {
        let text = fs::read_to_string(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string());
        Ok(vec![Document::new(0, name, text)])
    }
}

/// Pick a source for `path`: a folder, a `.jsonl` file, or any other single file.
pub fn open_source(path: &Path, extensions: &[String]) -> Result<Box<dyn DocumentSource>> {
    if path.is_dir() {
        return Ok(Box::new(DirectorySource::new(path).with_extensions(extensions.iter().cloned())));
    }
    if !path.is_file() {
        bail!("corpus {} does not exist", path.display());
    }
    if path.extension().and_then(|s| s.to_str()) == Some("jsonl") {
        Ok(Box::new(JsonlSource::new(path)))
    } else {
        Ok(Box::new(FileSource { path: path.to_path_buf() }))
    }
}

/// Shorthand for `open_source(path, extensions)?.load()`.
pub fn load_documents(path: &Path, extensions: &[String]) -> Result<Vec<Document>> {
    open_source(path, extensions)?.load()
}
