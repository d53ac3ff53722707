//! Cache configuration

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Configuration for the hybrid query cache
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of entries to store
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    /// Time-to-live for cached entries in seconds
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    /// Similarity a cached embedding must strictly exceed to count as a semantic hit
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,

    /// Seconds between background sweeps of expired entries (0 disables)
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,

    /// Whether concurrent misses for one key share a single backend call
    #[serde(default = "default_true")]
    pub dedupe_in_flight: bool,
}

fn default_max_entries() -> usize {
    1500
}

fn default_ttl_secs() -> u64 {
    86_400
}

fn default_similarity_threshold() -> f64 {
    0.95
}

fn default_sweep_interval_secs() -> u64 {
    300
}

fn default_true() -> bool {
    true
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
            ttl_secs: default_ttl_secs(),
            similarity_threshold: default_similarity_threshold(),
            sweep_interval_secs: default_sweep_interval_secs(),
            dedupe_in_flight: default_true(),
        }
    }
}

impl CacheConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get TTL as a chrono Duration
    pub fn ttl(&self) -> Duration {
        i64::try_from(self.ttl_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX)
    }

    pub fn sweep_interval(&self) -> Option<std::time::Duration> {
        (self.sweep_interval_secs > 0)
            .then(|| std::time::Duration::from_secs(self.sweep_interval_secs))
    }

    pub fn with_max_entries(mut self, max: usize) -> Self {
        self.max_entries = max;
        self
    }

    pub fn with_ttl_secs(mut self, ttl_secs: u64) -> Self {
        self.ttl_secs = ttl_secs;
        self
    }

    /// Set the similarity threshold, clamped to `[0, 1]`
    pub fn with_similarity_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    pub fn with_sweep_interval_secs(mut self, secs: u64) -> Self {
        self.sweep_interval_secs = secs;
        self
    }

    pub fn with_dedupe_in_flight(mut self, dedupe: bool) -> Self {
        self.dedupe_in_flight = dedupe;
        self
    }

    /// Rejects values the store cannot honor
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.max_entries == 0 {
            return Err(DomainError::configuration("cache.max_entries must be at least 1"));
        }

        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(DomainError::configuration(format!(
                "cache.similarity_threshold must be within [0, 1], got {}",
                self.similarity_threshold
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CacheConfig::default();

        assert_eq!(config.max_entries, 1500);
        assert_eq!(config.ttl(), Duration::seconds(86_400));
        assert!((config.similarity_threshold - 0.95).abs() < f64::EPSILON);
        assert_eq!(config.sweep_interval(), Some(std::time::Duration::from_secs(300)));
        assert!(config.dedupe_in_flight);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = CacheConfig::new()
            .with_max_entries(3)
            .with_ttl_secs(60)
            .with_similarity_threshold(0.9)
            .with_sweep_interval_secs(0)
            .with_dedupe_in_flight(false);

        assert_eq!(config.max_entries, 3);
        assert_eq!(config.ttl(), Duration::seconds(60));
        assert!((config.similarity_threshold - 0.9).abs() < f64::EPSILON);
        assert!(config.sweep_interval().is_none());
        assert!(!config.dedupe_in_flight);
    }

    #[test]
    fn test_similarity_threshold_clamped() {
        let config = CacheConfig::new().with_similarity_threshold(1.5);
        assert_eq!(config.similarity_threshold, 1.0);

        let config = CacheConfig::new().with_similarity_threshold(-0.5);
        assert_eq!(config.similarity_threshold, 0.0);
    }

    #[test]
    fn test_validate_rejects_zero_capacity() {
        let config = CacheConfig::new().with_max_entries(0);
        assert!(matches!(
            config.validate(),
            Err(DomainError::Configuration { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_out_of_range_threshold() {
        let mut config = CacheConfig::new();
        config.similarity_threshold = 1.2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: CacheConfig = serde_json::from_str(r#"{"max_entries": 10}"#).unwrap();

        assert_eq!(config.max_entries, 10);
        assert_eq!(config.ttl_secs, 86_400);
        assert!(config.dedupe_in_flight);
    }
}
