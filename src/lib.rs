//! Hybrid Query Cache
//!
//! Fronts an expensive moderation backend with two cache layers:
//! - exact match on a hash of the normalized query
//! - semantic match on a character-code embedding of the query
//!
//! Entries expire after a TTL and the oldest entry is evicted once the
//! store is full.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use domain::backend::BackendProvider;
use infrastructure::{
    backend::{SimulatedBackend, TimeoutBackend},
    cache::InMemoryQueryCache,
    services::QueryCacheService,
};
use tracing::info;

/// Create the application state with default configuration
pub fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default())
}

/// Create the application state with custom configuration
pub fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    Ok(AppState::new(Arc::new(create_query_service(config)?)))
}

/// Wire store, backend and service together
pub fn create_query_service(config: &AppConfig) -> anyhow::Result<QueryCacheService> {
    config.validate()?;

    let cache = Arc::new(InMemoryQueryCache::new(&config.cache));

    let simulated: Arc<dyn BackendProvider> =
        Arc::new(SimulatedBackend::from_config(&config.backend));
    let backend = Arc::new(TimeoutBackend::new(simulated, config.backend.timeout()));

    info!(
        max_entries = config.cache.max_entries,
        ttl_secs = config.cache.ttl_secs,
        similarity_threshold = config.cache.similarity_threshold,
        backend = backend.provider_name(),
        "Query cache initialized"
    );

    Ok(
        QueryCacheService::new(cache, backend, config.cache.clone())
            .with_cost_model(config.economics.clone()),
    )
}
