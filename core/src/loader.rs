use crate::document::DocumentIndex;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const DEFAULT_QUERIES_FILE: &str = "queries.txt";

/// Documents and queries read from a corpus directory.
pub struct Corpus {
    pub documents: Vec<DocumentIndex>,
    pub queries: Vec<String>,
}

pub struct CorpusPaths {
    pub root: PathBuf,
    pub queries_name: String,
}

impl CorpusPaths {
    pub fn new<P: AsRef<Path>>(root: P, queries_name: impl Into<String>) -> Self {
        Self { root: root.as_ref().to_path_buf(), queries_name: queries_name.into() }
    }
    fn queries(&self) -> PathBuf { self.root.join(&self.queries_name) }
    fn is_queries(&self, path: &Path) -> bool {
        path.file_name().and_then(|s| s.to_str()) == Some(self.queries_name.as_str())
    }
}

/// Index a single document; its identifier is the file name.
pub fn load_document(path: &Path) -> Result<DocumentIndex> {
    let text = fs::read_to_string(path).with_context(|| format!("reading document {}", path.display()))?;
    let id = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(DocumentIndex::from_text(id, &text))
}

/// One query per line; blank lines are skipped, the rest are kept verbatim.
pub fn load_queries(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path).with_context(|| format!("reading queries {}", path.display()))?;
    Ok(text.lines().filter(|l| !l.trim().is_empty()).map(str::to_string).collect())
}

/// Index every file directly inside `paths.root`, treating the queries file
/// specially. Files are visited in name order.
pub fn load_corpus_dir(paths: &CorpusPaths) -> Result<Corpus> {
    let mut documents = Vec::new();
    let mut queries = Vec::new();
    let walker = WalkDir::new(&paths.root).min_depth(1).max_depth(1).sort_by_file_name();
    for entry in walker {
        let entry = entry.with_context(|| format!("scanning {}", paths.root.display()))?;
        let p = entry.path();
        if !p.is_file() {
            continue;
        }
        if paths.is_queries(p) {
            queries = load_queries(p)?;
        } else {
            let doc = load_document(p)?;
            tracing::debug!(path = %p.display(), words = doc.words().len(), "indexed document");
            documents.push(doc);
        }
    }
    if queries.is_empty() && !paths.queries().exists() {
        tracing::warn!(path = %paths.queries().display(), "queries file not found");
    }
    tracing::info!(num_docs = documents.len(), num_queries = queries.len(), "loaded corpus");
    Ok(Corpus { documents, queries })
}
