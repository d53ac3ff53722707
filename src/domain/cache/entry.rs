//! Cache entry types

use chrono::{DateTime, Duration, Utc};

use crate::domain::embedding::Embedding;
use crate::domain::query::CacheKey;

/// A cached backend answer
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    key: CacheKey,
    answer: String,
    embedding: Embedding,
    inserted_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(
        key: CacheKey,
        answer: impl Into<String>,
        embedding: Embedding,
        inserted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            key,
            answer: answer.into(),
            embedding,
            inserted_at,
        }
    }

    pub fn key(&self) -> &CacheKey {
        &self.key
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn embedding(&self) -> &Embedding {
        &self.embedding
    }

    pub fn inserted_at(&self) -> DateTime<Utc> {
        self.inserted_at
    }

    /// Age of the entry at `now`
    pub fn age_at(&self, now: DateTime<Utc>) -> Duration {
        now - self.inserted_at
    }

    /// An entry is still served when its age equals the TTL; only strictly older entries expire
    pub fn is_expired_at(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        self.age_at(now) > ttl
    }
}

/// Result of a similarity scan
#[derive(Debug, Clone)]
pub struct SimilarMatch {
    pub entry: CacheEntry,
    pub similarity: f64,
}

impl SimilarMatch {
    pub fn new(entry: CacheEntry, similarity: f64) -> Self {
        Self { entry, similarity }
    }
}
