//! Result of answering a single query

use serde::Serialize;

use super::CacheKey;

/// How a query was answered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// Hash of the normalized query was already cached
    Exact,
    /// A cached embedding was similar enough
    Semantic,
    /// The backend had to be called
    Miss,
}

impl MatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Semantic => "semantic",
            Self::Miss => "miss",
        }
    }

    pub fn is_hit(&self) -> bool {
        !matches!(self, Self::Miss)
    }
}

/// Answer returned to the caller together with cache metadata
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome {
    pub answer: String,
    pub cached: bool,
    pub latency_ms: u64,
    pub cache_key: CacheKey,
    pub match_kind: MatchKind,
}
