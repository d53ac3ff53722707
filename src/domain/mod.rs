//! Domain layer - Core caching logic and entities

pub mod backend;
pub mod cache;
pub mod clock;
pub mod embedding;
pub mod error;
pub mod query;
pub mod stats;

pub use backend::BackendProvider;
pub use cache::{CacheConfig, CacheEntry, PutOutcome, QueryCache, SimilarMatch, StoreStats};
pub use clock::{Clock, SystemClock};
#[cfg(test)]
pub use clock::ManualClock;
pub use embedding::{cosine_similarity, CharCodeEmbedder, Embedder, Embedding, EMBEDDING_DIMENSIONS};
pub use error::DomainError;
pub use query::{
    normalize, CacheKey, MatchKind, QueryKeyGenerator, QueryOutcome, Sha256KeyGenerator,
};
pub use stats::{Analytics, CostModel, StatsSnapshot, STRATEGIES};
