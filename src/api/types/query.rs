//! Request and response bodies for query answering

use serde::Serialize;
use serde_json::Value;

use crate::domain::query::{MatchKind, QueryOutcome};

/// Pull the query text out of a request body.
///
/// Anything other than a JSON string under `query` counts as absent.
pub fn query_text(body: &Value) -> Option<&str> {
    body.get("query").and_then(Value::as_str)
}

/// Response body for `POST /`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    pub answer: String,
    pub cached: bool,
    /// Milliseconds spent answering
    pub latency: u64,
    pub cache_key: String,
    pub match_kind: MatchKind,
}

impl From<QueryOutcome> for QueryResponse {
    fn from(outcome: QueryOutcome) -> Self {
        Self {
            answer: outcome.answer,
            cached: outcome.cached,
            latency: outcome.latency_ms,
            cache_key: outcome.cache_key.into_inner(),
            match_kind: outcome.match_kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::query::CacheKey;
    use serde_json::json;

    #[test]
    fn test_query_text_extraction() {
        assert_eq!(query_text(&json!({"query": "Hello"})), Some("Hello"));
        assert_eq!(query_text(&json!({"query": ""})), Some(""));
        assert_eq!(query_text(&json!({"query": 42})), None);
        assert_eq!(query_text(&json!({"query": null})), None);
        assert_eq!(query_text(&json!({"text": "Hello"})), None);
        assert_eq!(query_text(&json!(["Hello"])), None);
    }

    #[test]
    fn test_response_uses_camel_case() {
        let response = QueryResponse::from(QueryOutcome {
            answer: "Moderation result: SAFE".to_string(),
            cached: true,
            latency_ms: 3,
            cache_key: CacheKey::new("abc123"),
            match_kind: MatchKind::Semantic,
        });

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["cacheKey"], "abc123");
        assert_eq!(json["latency"], 3);
        assert_eq!(json["cached"], true);
        assert_eq!(json["matchKind"], "semantic");
    }
}
