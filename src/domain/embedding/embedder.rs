//! Lexical fingerprint embedder

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

/// Number of components in every embedding produced by [`CharCodeEmbedder`]
pub const EMBEDDING_DIMENSIONS: usize = 50;

/// A fixed-length numeric vector derived from a normalized query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Embedding(Vec<f32>);

impl Embedding {
    pub fn new(vector: Vec<f32>) -> Self {
        Self(vector)
    }

    /// Get the embedding vector
    pub fn vector(&self) -> &[f32] {
        &self.0
    }

    /// Get the embedding dimensions
    pub fn dimensions(&self) -> usize {
        self.0.len()
    }

    /// Calculate cosine similarity with another embedding
    pub fn cosine_similarity(&self, other: &Embedding) -> f64 {
        super::cosine_similarity(&self.0, &other.0)
    }
}

/// Maps a normalized query to a vector
pub trait Embedder: Send + Sync + Debug {
    fn embed(&self, normalized: &str) -> Embedding;

    /// Length of every vector this embedder returns
    fn dimensions(&self) -> usize;
}

/// Embeds text as the code points of its leading characters.
///
/// This is a crude lexical fingerprint, not a semantic model: similarity only
/// reflects shared leading characters. Shorter inputs are right-padded with zeros
/// and characters past `dimensions` are ignored.
#[derive(Debug, Clone)]
pub struct CharCodeEmbedder {
    dimensions: usize,
}

impl CharCodeEmbedder {
    pub fn new() -> Self {
        Self::with_dimensions(EMBEDDING_DIMENSIONS)
    }

    pub fn with_dimensions(dimensions: usize) -> Self {
        Self { dimensions }
    }
}

impl Default for CharCodeEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

impl Embedder for CharCodeEmbedder {
    fn embed(&self, normalized: &str) -> Embedding {
        let mut vector: Vec<f32> = normalized
            .chars()
            .take(self.dimensions)
            .map(|c| u32::from(c) as f32)
            .collect();
        vector.resize(self.dimensions, 0.0);

        Embedding(vector)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_input_is_padded() {
        let embedding = CharCodeEmbedder::new().embed("abc");

        assert_eq!(embedding.dimensions(), EMBEDDING_DIMENSIONS);
        assert_eq!(&embedding.vector()[..4], &[97.0, 98.0, 99.0, 0.0]);
        assert!(embedding.vector()[3..].iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_long_input_is_truncated() {
        let long = "x".repeat(80);
        let embedding = CharCodeEmbedder::new().embed(&long);

        assert_eq!(embedding.dimensions(), EMBEDDING_DIMENSIONS);
        assert!(embedding.vector().iter().all(|v| *v == 120.0));
    }

    #[test]
    fn test_characters_past_limit_ignored() {
        let embedder = CharCodeEmbedder::new();
        let prefix = "p".repeat(EMBEDDING_DIMENSIONS);

        assert_eq!(
            embedder.embed(&format!("{}tail one", prefix)),
            embedder.embed(&format!("{}other tail", prefix))
        );
    }

    #[test]
    fn test_uses_code_points_not_bytes() {
        let embedding = CharCodeEmbedder::new().embed("é");

        assert_eq!(embedding.vector()[0], 233.0);
        assert_eq!(embedding.vector()[1], 0.0);
    }

    #[test]
    fn test_empty_input_is_zero_vector() {
        let embedding = CharCodeEmbedder::new().embed("");
        assert!(embedding.vector().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_deterministic() {
        let embedder = CharCodeEmbedder::new();
        assert_eq!(embedder.embed("what is 2+2?"), embedder.embed("what is 2+2?"));
    }

    #[test]
    fn test_custom_dimensions() {
        let embedder = CharCodeEmbedder::with_dimensions(4);
        assert_eq!(embedder.embed("abcdef").vector(), &[97.0, 98.0, 99.0, 100.0]);
        assert_eq!(embedder.dimensions(), 4);
    }
}
