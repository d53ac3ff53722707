//! Cache store trait

use std::fmt::Debug;

use async_trait::async_trait;
use serde::Serialize;

use super::{CacheEntry, SimilarMatch};
use crate::domain::embedding::Embedding;
use crate::domain::query::CacheKey;
use crate::domain::DomainError;

/// What happened while inserting an entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PutOutcome {
    /// Key removed to make room, if the store was full
    pub evicted: Option<CacheKey>,
    /// Whether an entry with the same key was overwritten
    pub replaced: bool,
}

/// Store-level counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub entries: usize,
    pub evictions: u64,
    pub expirations: u64,
}

/// Keyed store of cache entries with TTL expiry and capacity-bounded eviction.
///
/// Operations never fail on missing keys; errors only signal a broken store
/// (for example a poisoned lock).
#[async_trait]
pub trait QueryCache: Send + Sync + Debug {
    /// Fetch a live entry. A stale entry is removed and reported as absent.
    async fn get(&self, key: &CacheKey) -> Result<Option<CacheEntry>, DomainError>;

    /// Insert an entry, evicting the oldest one first when the store is full
    async fn put(&self, entry: CacheEntry) -> Result<PutOutcome, DomainError>;

    async fn delete(&self, key: &CacheKey) -> Result<bool, DomainError>;

    /// First live entry, in insertion order, whose similarity strictly exceeds `threshold`
    async fn find_similar(
        &self,
        embedding: &Embedding,
        threshold: f64,
    ) -> Result<Option<SimilarMatch>, DomainError>;

    /// Remove every stale entry, returning how many were dropped
    async fn purge_expired(&self) -> Result<usize, DomainError>;

    async fn size(&self) -> Result<usize, DomainError>;

    async fn clear(&self) -> Result<(), DomainError>;

    async fn stats(&self) -> Result<StoreStats, DomainError>;
}
