//! Persistent similarity index over goal documents.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::embedder::{cosine_similarity, Embedder};
use crate::error::MemoryError;

const INDEX_FILE: &str = "goal_index.json";
const FORMAT_VERSION: u32 = 1;

/// A goal statement plus free-form metadata (category, importance, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalDocument {
    pub content: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl GoalDocument {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Text fed to the embedder: the content followed by metadata values.
    fn embedding_text(&self) -> String {
        let mut text = self.content.clone();
        for value in self.metadata.values() {
            text.push(' ');
            text.push_str(value);
        }
        text
    }
}

/// A query match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredGoal {
    pub document: GoalDocument,
    /// Cosine similarity in [-1, 1]
    pub score: f32,
}

/// Location of a persisted index. Opaque to callers beyond its directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexHandle(PathBuf);

impl IndexHandle {
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self(dir.into())
    }

    pub fn dir(&self) -> &Path {
        &self.0
    }

    /// Whether an index has been saved here.
    pub fn exists(&self) -> bool {
        self.file().is_file()
    }

    fn file(&self) -> PathBuf {
        self.0.join(INDEX_FILE)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Entry {
    document: GoalDocument,
    vector: Vec<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredIndex {
    version: u32,
    dimension: usize,
    entries: Vec<Entry>,
}

/// In-memory goal index backed by an explicit [`Embedder`].
pub struct GoalIndex<E: Embedder> {
    embedder: E,
    entries: Vec<Entry>,
}

impl<E: Embedder> GoalIndex<E> {
    pub fn new(embedder: E) -> Self {
        Self {
            embedder,
            entries: Vec::new(),
        }
    }

    /// # Errors
    ///
    /// Returns [`MemoryError::Embedding`] if any document cannot be embedded.
    pub fn from_documents(
        documents: impl IntoIterator<Item = GoalDocument>,
        embedder: E,
    ) -> Result<Self, MemoryError> {
        let mut index = Self::new(embedder);
        for document in documents {
            index.add(document)?;
        }
        Ok(index)
    }

    /// # Errors
    ///
    /// Returns [`MemoryError::Embedding`] if any text cannot be embedded.
    pub fn from_texts<S: Into<String>>(
        texts: impl IntoIterator<Item = S>,
        embedder: E,
    ) -> Result<Self, MemoryError> {
        Self::from_documents(texts.into_iter().map(GoalDocument::new), embedder)
    }

    /// # Errors
    ///
    /// Returns [`MemoryError::Embedding`] if the document cannot be embedded.
    pub fn add(&mut self, document: GoalDocument) -> Result<(), MemoryError> {
        let vector = self.embedder.embed(&document.embedding_text())?;
        self.entries.push(Entry { document, vector });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn documents(&self) -> impl Iterator<Item = &GoalDocument> {
        self.entries.iter().map(|e| &e.document)
    }

    /// Up to `k` documents ordered by descending similarity to `text`.
    /// Equal scores keep insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::Embedding`] if `text` cannot be embedded.
    pub fn query(&self, text: &str, k: usize) -> Result<Vec<ScoredGoal>, MemoryError> {
        if k == 0 || self.entries.is_empty() {
            return Ok(Vec::new());
        }
        let query = self.embedder.embed(text)?;
        let mut scored: Vec<ScoredGoal> = self
            .entries
            .iter()
            .map(|entry| ScoredGoal {
                document: entry.document.clone(),
                score: cosine_similarity(&query, &entry.vector),
            })
            .collect();
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(k);
        debug!(query = text, k, returned = scored.len(), "goal query");
        Ok(scored)
    }

    /// Write the index under `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::Io`] if the directory or file cannot be written.
    pub fn save(&self, dir: impl Into<PathBuf>) -> Result<IndexHandle, MemoryError> {
        let handle = IndexHandle::in_dir(dir);
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source| MemoryError::Io { path, source }
        };

        std::fs::create_dir_all(handle.dir()).map_err(io_err(handle.dir()))?;
        let stored = StoredIndex {
            version: FORMAT_VERSION,
            dimension: self.embedder.dimension(),
            entries: self.entries.clone(),
        };
        let json = serde_json::to_string_pretty(&stored)?;
        let file = handle.file();
        std::fs::write(&file, json).map_err(io_err(&file))?;

        info!(path = %file.display(), documents = self.entries.len(), "goal index saved");
        Ok(handle)
    }

    /// Read a previously saved index.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::NotFound`] if nothing was saved at `handle`,
    /// [`MemoryError::DimensionMismatch`] if `embedder` produces vectors of
    /// another size, and [`MemoryError::Corrupt`] for unreadable JSON.
    pub fn load(handle: &IndexHandle, embedder: E) -> Result<Self, MemoryError> {
        let file = handle.file();
        let content = match std::fs::read_to_string(&file) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(MemoryError::NotFound(file));
            }
            Err(source) => return Err(MemoryError::Io { path: file, source }),
        };

        let stored: StoredIndex = serde_json::from_str(&content)?;
        if stored.dimension != embedder.dimension() {
            return Err(MemoryError::DimensionMismatch {
                stored: stored.dimension,
                expected: embedder.dimension(),
            });
        }

        info!(path = %file.display(), documents = stored.entries.len(), "goal index loaded");
        Ok(Self {
            embedder,
            entries: stored.entries,
        })
    }
}

impl<E: Embedder + std::fmt::Debug> std::fmt::Debug for GoalIndex<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoalIndex")
            .field("embedder", &self.embedder)
            .field("documents", &self.entries.len())
            .finish()
    }
}
