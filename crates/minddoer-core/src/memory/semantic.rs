//! Sentence embeddings from a local ONNX model via fastembed.

use std::path::PathBuf;
use std::sync::Mutex;

use fastembed::{EmbeddingModel, TextEmbedding, TextInitOptions};
use tracing::info;

use super::embedder::Embedder;
use crate::error::MemoryError;

/// `AllMiniLML6V2` sentence embeddings (384 dimensions).
///
/// The model is downloaded on first use (~80MB) into the cache directory.
/// Inference needs exclusive access to the model, so calls are serialized
/// behind a mutex.
pub struct FastEmbedder {
    model: Mutex<TextEmbedding>,
}

impl FastEmbedder {
    pub const DIMENSION: usize = 384;

    /// Load the model, downloading it into `cache_dir` if needed.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::Embedding`] if the download or ONNX
    /// initialization fails.
    pub fn new(cache_dir: impl Into<PathBuf>) -> Result<Self, MemoryError> {
        let cache_dir = cache_dir.into();
        info!(cache = %cache_dir.display(), "loading embedding model");

        let model = TextEmbedding::try_new(
            TextInitOptions::new(EmbeddingModel::AllMiniLML6V2)
                .with_cache_dir(cache_dir)
                .with_show_download_progress(true),
        )
        .map_err(|e| MemoryError::Embedding(e.to_string()))?;

        Ok(Self {
            model: Mutex::new(model),
        })
    }
}

impl Embedder for FastEmbedder {
    fn dimension(&self) -> usize {
        Self::DIMENSION
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>, MemoryError> {
        let mut model = self
            .model
            .lock()
            .map_err(|_| MemoryError::Embedding("embedding model lock poisoned".to_string()))?;
        let mut vectors = model
            .embed(vec![text.to_string()], None)
            .map_err(|e| MemoryError::Embedding(e.to_string()))?;
        vectors
            .pop()
            .ok_or_else(|| MemoryError::Embedding("model returned no embedding".to_string()))
    }
}

impl std::fmt::Debug for FastEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FastEmbedder")
            .field("model", &"AllMiniLML6V2")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{cosine_similarity, GoalIndex};

    fn embedder() -> FastEmbedder {
        let cache = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("minddoer-dev")
            .join("cache")
            .join("fastembed");
        FastEmbedder::new(cache).expect("model should load")
    }

    #[test]
    #[ignore = "downloads the embedding model"]
    fn embeds_384_dims() {
        let vector = embedder().embed("Go to the gym three times a week").unwrap();
        assert_eq!(vector.len(), FastEmbedder::DIMENSION);
    }

    #[test]
    #[ignore = "downloads the embedding model"]
    fn related_phrases_without_shared_words_match() {
        let embedder = embedder();
        let gym = embedder.embed("Go to the gym three times a week").unwrap();
        let fitness = embedder.embed("improve my fitness").unwrap();
        let finance = embedder.embed("file quarterly tax returns").unwrap();
        assert!(cosine_similarity(&gym, &fitness) > cosine_similarity(&gym, &finance));
    }

    #[test]
    #[ignore = "downloads the embedding model"]
    fn index_ranks_by_meaning() {
        let index = GoalIndex::from_texts(
            ["Lift weights at the gym", "Read one novel a month"],
            embedder(),
        )
        .unwrap();
        let results = index.query("get physically stronger", 1).unwrap();
        assert_eq!(results[0].document.content, "Lift weights at the gym");
    }
}
