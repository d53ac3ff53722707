//! In-memory query cache

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::domain::cache::{CacheConfig, CacheEntry, PutOutcome, QueryCache, SimilarMatch, StoreStats};
use crate::domain::clock::{Clock, SystemClock};
use crate::domain::embedding::Embedding;
use crate::domain::query::CacheKey;
use crate::domain::DomainError;
use crate::infrastructure::observability::{
    record_cache_evictions, record_cache_expirations, record_cache_size,
};

#[derive(Debug)]
struct Slot {
    seq: u64,
    entry: CacheEntry,
}

/// Entries plus their insertion order. Both maps are always updated together.
#[derive(Debug, Default)]
struct StoreState {
    entries: HashMap<CacheKey, Slot>,
    order: BTreeMap<u64, CacheKey>,
    next_seq: u64,
}

impl StoreState {
    fn insert(&mut self, entry: CacheEntry) -> bool {
        let replaced = self.remove(entry.key()).is_some();
        let seq = self.next_seq;
        self.next_seq += 1;

        self.order.insert(seq, entry.key().clone());
        self.entries.insert(entry.key().clone(), Slot { seq, entry });

        replaced
    }

    fn remove(&mut self, key: &CacheKey) -> Option<CacheEntry> {
        let slot = self.entries.remove(key)?;
        self.order.remove(&slot.seq);
        Some(slot.entry)
    }

    /// Oldest entry by insertion time, ties broken by insertion sequence
    fn oldest_key(&self) -> Option<CacheKey> {
        self.entries
            .iter()
            .min_by_key(|(_, slot)| (slot.entry.inserted_at(), slot.seq))
            .map(|(key, _)| key.clone())
    }

    fn expired_keys(&self, now: DateTime<Utc>, ttl: Duration) -> Vec<CacheKey> {
        self.entries
            .iter()
            .filter(|(_, slot)| slot.entry.is_expired_at(now, ttl))
            .map(|(key, _)| key.clone())
            .collect()
    }
}

/// In-memory cache store with linear-scan similarity search
///
/// A single lock guards the map, so check-evict-insert and check-expire-delete
/// are atomic. Similarity scans run under the read lock over a consistent view.
#[derive(Debug)]
pub struct InMemoryQueryCache {
    state: RwLock<StoreState>,
    max_entries: usize,
    ttl: Duration,
    clock: Arc<dyn Clock>,
    evictions: AtomicU64,
    expirations: AtomicU64,
}

impl InMemoryQueryCache {
    /// Create a new in-memory cache using the system clock
    pub fn new(config: &CacheConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &CacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
            max_entries: config.max_entries.max(1),
            ttl: config.ttl(),
            clock,
            evictions: AtomicU64::new(0),
            expirations: AtomicU64::new(0),
        }
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    fn read_lock_error<E: std::fmt::Display>(e: E) -> DomainError {
        DomainError::internal(format!("Failed to acquire read lock: {}", e))
    }

    fn write_lock_error<E: std::fmt::Display>(e: E) -> DomainError {
        DomainError::internal(format!("Failed to acquire write lock: {}", e))
    }
}

#[async_trait]
impl QueryCache for InMemoryQueryCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<CacheEntry>, DomainError> {
        let now = self.clock.now();

        {
            let state = self.state.read().map_err(Self::read_lock_error)?;

            match state.entries.get(key) {
                None => return Ok(None),
                Some(slot) if !slot.entry.is_expired_at(now, self.ttl) => {
                    return Ok(Some(slot.entry.clone()));
                }
                Some(_) => {}
            }
        }

        let mut state = self.state.write().map_err(Self::write_lock_error)?;

        // Re-check under the write lock: a concurrent put may have refreshed the key
        match state.entries.get(key) {
            None => return Ok(None),
            Some(slot) if !slot.entry.is_expired_at(now, self.ttl) => {
                return Ok(Some(slot.entry.clone()));
            }
            Some(_) => {}
        }

        state.remove(key);
        self.expirations.fetch_add(1, Ordering::Relaxed);
        record_cache_expirations(1);
        record_cache_size(state.entries.len());
        debug!(cache_key = %key, "Expired cache entry removed on access");

        Ok(None)
    }

    async fn put(&self, entry: CacheEntry) -> Result<PutOutcome, DomainError> {
        let mut state = self.state.write().map_err(Self::write_lock_error)?;
        let mut outcome = PutOutcome::default();

        if !state.entries.contains_key(entry.key()) && state.entries.len() >= self.max_entries {
            if let Some(oldest) = state.oldest_key() {
                state.remove(&oldest);
                self.evictions.fetch_add(1, Ordering::Relaxed);
                record_cache_evictions(1);
                debug!(cache_key = %oldest, "Evicted oldest cache entry");
                outcome.evicted = Some(oldest);
            }
        }

        outcome.replaced = state.insert(entry);
        record_cache_size(state.entries.len());

        Ok(outcome)
    }

    async fn delete(&self, key: &CacheKey) -> Result<bool, DomainError> {
        let mut state = self.state.write().map_err(Self::write_lock_error)?;

        let removed = state.remove(key).is_some();
        record_cache_size(state.entries.len());

        Ok(removed)
    }

    async fn find_similar(
        &self,
        embedding: &Embedding,
        threshold: f64,
    ) -> Result<Option<SimilarMatch>, DomainError> {
        let now = self.clock.now();
        let state = self.state.read().map_err(Self::read_lock_error)?;

        let found = state
            .order
            .values()
            .filter_map(|key| state.entries.get(key))
            .filter(|slot| !slot.entry.is_expired_at(now, self.ttl))
            .find_map(|slot| {
                let similarity = embedding.cosine_similarity(slot.entry.embedding());
                (similarity > threshold).then(|| SimilarMatch::new(slot.entry.clone(), similarity))
            });

        Ok(found)
    }

    async fn purge_expired(&self) -> Result<usize, DomainError> {
        let now = self.clock.now();
        let mut state = self.state.write().map_err(Self::write_lock_error)?;

        let expired = state.expired_keys(now, self.ttl);
        let count = expired.len();

        for key in expired {
            state.remove(&key);
        }

        self.expirations.fetch_add(count as u64, Ordering::Relaxed);
        record_cache_expirations(count as u64);
        record_cache_size(state.entries.len());

        Ok(count)
    }

    async fn size(&self) -> Result<usize, DomainError> {
        let state = self.state.read().map_err(Self::read_lock_error)?;

        Ok(state.entries.len())
    }

    async fn clear(&self) -> Result<(), DomainError> {
        let mut state = self.state.write().map_err(Self::write_lock_error)?;

        state.entries.clear();
        state.order.clear();
        record_cache_size(0);

        Ok(())
    }

    async fn stats(&self) -> Result<StoreStats, DomainError> {
        let state = self.state.read().map_err(Self::read_lock_error)?;

        Ok(StoreStats {
            entries: state.entries.len(),
            evictions: self.evictions.load(Ordering::Relaxed),
            expirations: self.expirations.load(Ordering::Relaxed),
        })
    }
}
