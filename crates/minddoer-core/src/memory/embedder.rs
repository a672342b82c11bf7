//! Text embedding for the goal index.

use sha2::{Digest, Sha256};

use crate::error::MemoryError;

/// Maps text to a fixed-size vector.
///
/// Implementations must be deterministic: vectors are persisted next to the
/// documents and compared with vectors computed later for queries.
pub trait Embedder {
    /// Length of every vector returned by [`Embedder::embed`].
    fn dimension(&self) -> usize;

    /// # Errors
    ///
    /// Returns [`MemoryError::Embedding`] if the model cannot embed `text`.
    fn embed(&self, text: &str) -> Result<Vec<f32>, MemoryError>;
}

const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "by", "for", "in", "is", "it", "my", "of", "on", "the", "to",
    "using", "what", "with",
];

/// Feature-hashed bag of words.
///
/// Works offline and needs no model download, which makes it the default
/// embedder and the one used in tests. It only matches shared words.
///
/// Each lower-cased token is hashed with SHA-256; the first eight bytes pick a
/// bucket and the ninth byte picks the sign. The result is L2-normalized so a
/// dot product is a cosine similarity. SHA-256 keeps bucket assignment stable
/// across processes and toolchains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashingEmbedder {
    dimension: usize,
}

impl HashingEmbedder {
    pub const DEFAULT_DIMENSION: usize = 256;

    /// `dimension` is clamped to at least 1.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
            .filter(|t| !STOP_WORDS.contains(&t.as_str()))
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DIMENSION)
    }
}

impl Embedder for HashingEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>, MemoryError> {
        let mut vector = vec![0.0f32; self.dimension];
        for token in Self::tokens(text) {
            let digest = Sha256::digest(token.as_bytes());
            let mut bucket_bytes = [0u8; 8];
            bucket_bytes.copy_from_slice(&digest[..8]);
            let bucket = (u64::from_le_bytes(bucket_bytes) % self.dimension as u64) as usize;
            let sign = if digest[8] & 1 == 0 { 1.0 } else { -1.0 };
            vector[bucket] += sign;
        }
        normalize(&mut vector);
        Ok(vector)
    }
}

fn normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        vector.iter_mut().for_each(|x| *x /= norm);
    }
}

/// Cosine similarity between two vectors; 0.0 when either is all zeros.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
