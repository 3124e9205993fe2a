//! Embedding provider trait and vector utilities.
//!
//! Semantic scoring is optional: ranking works lexically when no provider
//! is supplied or the provider fails. [`HashingEmbedder`] is a built-in
//! offline provider based on feature hashing of content tokens.

use sha2::{Digest, Sha256};

use crate::error::{Error, Result};
use crate::text::Lexicon;

/// Trait for embedding providers.
///
/// Providers are constructed before processing starts and shared
/// read-only across documents.
pub trait EmbeddingProvider: Send + Sync {
    /// Returns the model identifier.
    fn model_name(&self) -> &str;

    /// Embed a text into a fixed-length vector.
    fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// Compute cosine similarity between two vectors.
///
/// Returns a value in `[-1.0, 1.0]`, or `0.0` for empty vectors, vectors
/// of different lengths and zero vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < f32::EPSILON {
        return 0.0;
    }

    dot / denom
}

/// Deterministic bag-of-words embedder using the hashing trick.
///
/// Each content token (after stop-word removal and stemming) is hashed
/// with FNV-1a into one of `dims` buckets; the vector is L2-normalized.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dims: usize,
    lexicon: Lexicon,
}

impl HashingEmbedder {
    /// Default vector size.
    pub const DEFAULT_DIMS: usize = 512;

    /// Create an embedder with the given dimensionality.
    pub fn new(dims: usize) -> Self {
        Self {
            dims: dims.max(1),
            lexicon: Lexicon::english(),
        }
    }

    /// Use a custom lexicon for tokenization.
    pub fn with_lexicon(mut self, lexicon: Lexicon) -> Self {
        self.lexicon = lexicon;
        self
    }

    /// Vector dimensionality.
    pub fn dims(&self) -> usize {
        self.dims
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DIMS)
    }
}

impl EmbeddingProvider for HashingEmbedder {
    fn model_name(&self) -> &str {
        "hashing-bow"
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vector = vec![0.0f32; self.dims];
        for token in self.lexicon.tokenize(text) {
            vector[token_bucket(&token, self.dims)] += 1.0;
        }

        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm < f32::EPSILON {
            return Err(Error::EmbeddingUnavailable(
                "text has no content tokens".to_string(),
            ));
        }
        for v in &mut vector {
            *v /= norm;
        }
        Ok(vector)
    }
}

/// Bucket index of a token: the first eight bytes of its SHA-256 digest.
fn token_bucket(token: &str, dims: usize) -> usize {
    let digest = Sha256::digest(token.as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    (u64::from_le_bytes(prefix) % dims as u64) as usize
}
