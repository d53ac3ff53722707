//! Query embeddings and vector similarity

mod embedder;
mod similarity;

pub use embedder::{CharCodeEmbedder, Embedder, Embedding, EMBEDDING_DIMENSIONS};
pub use similarity::cosine_similarity;
