//! Hit/miss accounting and derived analytics

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Fixed description of the lookup and retention strategies in use.
///
/// Eviction is by insertion age, never by access recency.
pub const STRATEGIES: [&str; 4] = [
    "exact match",
    "semantic similarity",
    "age-based eviction",
    "TTL expiration",
];

/// Unit economics used to price avoided backend calls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostModel {
    /// Units consumed by one backend call (e.g. tokens)
    #[serde(default = "default_cost_per_call")]
    pub cost_per_call: f64,

    /// Price per `scale` units
    #[serde(default = "default_price_per_unit")]
    pub price_per_unit: f64,

    #[serde(default = "default_scale")]
    pub scale: f64,
}

fn default_cost_per_call() -> f64 {
    300.0
}

fn default_price_per_unit() -> f64 {
    0.40
}

fn default_scale() -> f64 {
    1_000_000.0
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            cost_per_call: default_cost_per_call(),
            price_per_unit: default_price_per_unit(),
            scale: default_scale(),
        }
    }
}

impl CostModel {
    /// Money saved by serving `hits` requests from cache
    pub fn savings(&self, hits: u64) -> f64 {
        hits as f64 * self.cost_per_call * self.price_per_unit / self.scale
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.scale <= 0.0 {
            return Err(DomainError::configuration("economics.scale must be positive"));
        }

        if self.cost_per_call < 0.0 || self.price_per_unit < 0.0 {
            return Err(DomainError::configuration(
                "economics.cost_per_call and economics.price_per_unit must not be negative",
            ));
        }

        Ok(())
    }
}

/// Point-in-time copy of the request counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub hits: u64,
    pub misses: u64,
}

impl StatsSnapshot {
    pub fn total(&self) -> u64 {
        self.hits + self.misses
    }

    /// Calculate hit rate, 0 when nothing was requested yet
    pub fn hit_rate(&self) -> f64 {
        let total = self.total();

        if total == 0 {
            return 0.0;
        }

        self.hits as f64 / total as f64
    }
}

/// Analytics report exposed to operators
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub hit_rate: f64,
    pub total_requests: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub cache_size: usize,
    pub cost_savings: f64,
    pub savings_percent: f64,
    pub evictions: u64,
    pub expirations: u64,
    pub strategies: Vec<String>,
}

impl Analytics {
    pub fn build(
        snapshot: StatsSnapshot,
        cost_model: &CostModel,
        cache_size: usize,
        evictions: u64,
        expirations: u64,
    ) -> Self {
        let hit_rate = snapshot.hit_rate();

        Self {
            hit_rate: round2(hit_rate),
            total_requests: snapshot.total(),
            cache_hits: snapshot.hits,
            cache_misses: snapshot.misses,
            cache_size,
            cost_savings: round2(cost_model.savings(snapshot.hits)),
            savings_percent: round2(hit_rate * 100.0),
            evictions,
            expirations,
            strategies: STRATEGIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_rate_without_requests() {
        assert_eq!(StatsSnapshot::default().hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate() {
        let snapshot = StatsSnapshot { hits: 3, misses: 1 };

        assert_eq!(snapshot.total(), 4);
        assert!((snapshot.hit_rate() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_default_cost_model_savings() {
        let model = CostModel::default();
        // 300 * 0.40 / 1_000_000 per hit
        assert!((model.savings(1) - 0.00012).abs() < 1e-12);
        assert!((model.savings(100_000) - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_cost_model_validation() {
        assert!(CostModel::default().validate().is_ok());

        let model = CostModel {
            scale: 0.0,
            ..CostModel::default()
        };
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_analytics_rounding() {
        let snapshot = StatsSnapshot { hits: 2, misses: 1 };
        let analytics = Analytics::build(snapshot, &CostModel::default(), 1, 0, 0);

        assert_eq!(analytics.hit_rate, 0.67);
        assert_eq!(analytics.savings_percent, 66.67);
        assert_eq!(analytics.cost_savings, 0.0);
        assert_eq!(analytics.total_requests, 3);
    }

    #[test]
    fn test_analytics_serializes_camel_case() {
        let analytics = Analytics::build(StatsSnapshot::default(), &CostModel::default(), 0, 0, 0);
        let json = serde_json::to_value(&analytics).unwrap();

        assert_eq!(json["hitRate"], 0.0);
        assert_eq!(json["totalRequests"], 0);
        assert_eq!(json["cacheSize"], 0);
        assert_eq!(json["savingsPercent"], 0.0);
        assert_eq!(json["strategies"][2], "age-based eviction");
    }
}
