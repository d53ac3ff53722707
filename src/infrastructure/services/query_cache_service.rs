//! Hybrid query caching service
//!
//! Answers a query from the exact-match cache first, then from the most
//! similar earlier query, and only falls back to the backend when neither
//! lookup produces an answer.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use super::in_flight::{Flight, InFlightRegistry};
use crate::domain::backend::BackendProvider;
use crate::domain::cache::{CacheConfig, CacheEntry, QueryCache};
use crate::domain::clock::{Clock, SystemClock};
use crate::domain::embedding::{CharCodeEmbedder, Embedder, Embedding};
use crate::domain::query::{
    normalize, CacheKey, MatchKind, QueryKeyGenerator, QueryOutcome, Sha256KeyGenerator,
};
use crate::domain::stats::{Analytics, CostModel};
use crate::domain::DomainError;
use crate::infrastructure::observability::{record_backend_call, record_cache_request};
use crate::infrastructure::stats::StatsRecorder;

/// Orchestrates normalization, both cache lookups and the backend fallback
pub struct QueryCacheService {
    cache: Arc<dyn QueryCache>,
    backend: Arc<dyn BackendProvider>,
    embedder: Arc<dyn Embedder>,
    key_generator: Arc<dyn QueryKeyGenerator>,
    clock: Arc<dyn Clock>,
    stats: StatsRecorder,
    cost_model: CostModel,
    config: CacheConfig,
    in_flight: InFlightRegistry,
}

impl fmt::Debug for QueryCacheService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryCacheService")
            .field("cache", &self.cache)
            .field("backend", &self.backend.provider_name())
            .field("embedder", &self.embedder)
            .field("stats", &self.stats)
            .field("config", &self.config)
            .finish()
    }
}

impl QueryCacheService {
    /// Create a service with the default embedder, key generator, clock and cost model
    pub fn new(
        cache: Arc<dyn QueryCache>,
        backend: Arc<dyn BackendProvider>,
        config: CacheConfig,
    ) -> Self {
        Self {
            cache,
            backend,
            embedder: Arc::new(CharCodeEmbedder::new()),
            key_generator: Arc::new(Sha256KeyGenerator::new()),
            clock: Arc::new(SystemClock),
            stats: StatsRecorder::new(),
            cost_model: CostModel::default(),
            config,
            in_flight: InFlightRegistry::new(),
        }
    }

    pub fn with_embedder(mut self, embedder: Arc<dyn Embedder>) -> Self {
        self.embedder = embedder;
        self
    }

    pub fn with_key_generator(mut self, key_generator: Arc<dyn QueryKeyGenerator>) -> Self {
        self.key_generator = key_generator;
        self
    }

    /// Clock used to timestamp new entries; should match the store's clock
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_cost_model(mut self, cost_model: CostModel) -> Self {
        self.cost_model = cost_model;
        self
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub fn cache(&self) -> &Arc<dyn QueryCache> {
        &self.cache
    }

    /// Answer a query, consulting the cache before the backend.
    ///
    /// `None` means the caller supplied no usable query text; nothing is
    /// looked up or counted in that case.
    pub async fn handle_query(&self, query: Option<&str>) -> Result<QueryOutcome, DomainError> {
        let raw = query.ok_or_else(|| {
            DomainError::invalid_input("Field 'query' is required and must be a string")
        })?;

        let started = Instant::now();
        let normalized = normalize(raw);
        let key = self.key_generator.generate(&normalized);

        if let Some(entry) = self.cache.get(&key).await? {
            return Ok(self.hit(entry, MatchKind::Exact, started));
        }

        let embedding = self.embedder.embed(&normalized);

        if let Some(found) = self
            .cache
            .find_similar(&embedding, self.config.similarity_threshold)
            .await?
        {
            debug!(
                cache_key = %found.entry.key(),
                similarity = found.similarity,
                "Semantic match"
            );
            return Ok(self.hit(found.entry, MatchKind::Semantic, started));
        }

        self.stats.record_miss();
        record_cache_request(MatchKind::Miss);

        let answer = self.resolve_miss(&normalized, &key, embedding).await?;
        let latency_ms = elapsed_ms(started);

        info!(
            cache_key = %key,
            match_kind = MatchKind::Miss.as_str(),
            latency_ms,
            "Query answered by backend"
        );

        Ok(QueryOutcome {
            answer,
            cached: false,
            latency_ms,
            cache_key: key,
            match_kind: MatchKind::Miss,
        })
    }

    /// Current counters together with the derived cost figures
    pub async fn analytics(&self) -> Result<Analytics, DomainError> {
        let store = self.cache.stats().await?;

        Ok(Analytics::build(
            self.stats.snapshot(),
            &self.cost_model,
            store.entries,
            store.evictions,
            store.expirations,
        ))
    }

    /// Drop every stale entry now instead of waiting for the sweeper
    pub async fn purge_expired(&self) -> Result<usize, DomainError> {
        let purged = self.cache.purge_expired().await?;

        if purged > 0 {
            debug!(purged, "Purged expired cache entries");
        }

        Ok(purged)
    }

    fn hit(&self, entry: CacheEntry, kind: MatchKind, started: Instant) -> QueryOutcome {
        self.stats.record_hit();
        record_cache_request(kind);

        let latency_ms = elapsed_ms(started);

        info!(
            cache_key = %entry.key(),
            match_kind = kind.as_str(),
            latency_ms,
            "Query answered from cache"
        );

        QueryOutcome {
            answer: entry.answer().to_string(),
            cached: true,
            latency_ms,
            cache_key: entry.key().clone(),
            match_kind: kind,
        }
    }

    async fn resolve_miss(
        &self,
        normalized: &str,
        key: &CacheKey,
        embedding: Embedding,
    ) -> Result<String, DomainError> {
        if !self.config.dedupe_in_flight {
            return self.fetch_and_store(normalized, key, embedding).await;
        }

        let guard = loop {
            match self.in_flight.join(key)? {
                Flight::Leader(guard) => break guard,
                Flight::Follower(ticket) => {
                    debug!(cache_key = %key, "Waiting on in-flight backend call");
                    if let Some(result) = ticket.wait().await {
                        return result;
                    }
                    debug!(cache_key = %key, "In-flight leader went away, joining again");
                }
            }
        };

        let result = self.fetch_and_store(normalized, key, embedding).await;
        guard.finish(&result);
        result
    }

    async fn fetch_and_store(
        &self,
        normalized: &str,
        key: &CacheKey,
        embedding: Embedding,
    ) -> Result<String, DomainError> {
        let answer = self.call_backend(normalized).await?;

        let entry = CacheEntry::new(key.clone(), answer.clone(), embedding, self.clock.now());
        let outcome = self.cache.put(entry).await?;

        if let Some(evicted) = outcome.evicted {
            debug!(cache_key = %key, evicted = %evicted, "Stored answer after eviction");
        }

        Ok(answer)
    }

    async fn call_backend(&self, normalized: &str) -> Result<String, DomainError> {
        let provider = self.backend.provider_name();
        let started = Instant::now();

        let result = self.backend.call(normalized).await;
        record_backend_call(provider, result.is_ok(), started.elapsed());

        if let Err(e) = &result {
            warn!(provider, error = %e, "Backend call failed");
        }

        result
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
