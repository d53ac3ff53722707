use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::analytics;
use super::health;
use super::middleware::{logging_middleware, metrics_middleware};
use super::query;
use super::state::AppState;

/// Create the full router with application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", post(query::answer_query))
        .route("/analytics", get(analytics::get_analytics))
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        .with_state(state)
        .layer(from_fn(metrics_middleware))
        .layer(from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::AppConfig;
    use crate::domain::backend::MockBackendProvider;
    use crate::domain::cache::CacheConfig;
    use crate::domain::DomainError;
    use crate::infrastructure::cache::InMemoryQueryCache;
    use crate::infrastructure::services::QueryCacheService;

    fn test_app() -> Router {
        let mut config = AppConfig::default();
        config.backend.latency_ms = 0;

        create_router(crate::create_app_state_with_config(&config).unwrap())
    }

    fn post_query(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_query_miss_then_hit() {
        let app = test_app();

        let first = app
            .clone()
            .oneshot(post_query(json!({"query": "What is 2+2?"})))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);
        let first = body_json(first).await;
        assert_eq!(first["answer"], "Moderation result: SAFE");
        assert_eq!(first["cached"], false);
        assert_eq!(first["cacheKey"].as_str().unwrap().len(), 64);
        assert!(first["latency"].is_u64());

        let second = app
            .oneshot(post_query(json!({"query": "  what is 2+2?  "})))
            .await
            .unwrap();
        let second = body_json(second).await;
        assert_eq!(second["cached"], true);
        assert_eq!(second["cacheKey"], first["cacheKey"]);
        assert_eq!(second["matchKind"], "exact");
    }

    #[tokio::test]
    async fn test_missing_query_is_bad_request() {
        let response = test_app()
            .oneshot(post_query(json!({"text": "hello"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["type"], "invalid_request_error");
        assert_eq!(body["error"]["param"], "query");
    }

    #[tokio::test]
    async fn test_non_string_query_is_bad_request() {
        let response = test_app()
            .oneshot(post_query(json!({"query": ["a", "b"]})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"query\":"))
            .unwrap();

        let response = test_app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_backend_failure_is_service_unavailable() {
        let mut backend = MockBackendProvider::new();
        backend
            .expect_call()
            .returning(|_| Err(DomainError::backend("moderation service down")));
        backend.expect_provider_name().return_const("mock");

        let config = CacheConfig::default();
        let cache = Arc::new(InMemoryQueryCache::new(&config));
        let service = QueryCacheService::new(cache, Arc::new(backend), config);
        let app = create_router(AppState::new(Arc::new(service)));

        let response = app
            .clone()
            .oneshot(post_query(json!({"query": "hello"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = body_json(response).await;
        assert_eq!(body["error"]["type"], "service_unavailable_error");

        let analytics = body_json(app.oneshot(get("/analytics")).await.unwrap()).await;
        assert_eq!(analytics["cacheMisses"], 1);
        assert_eq!(analytics["cacheSize"], 0);
    }

    #[tokio::test]
    async fn test_analytics_shape() {
        let app = test_app();

        for query in ["hello", "hello", "goodbye"] {
            app.clone()
                .oneshot(post_query(json!({ "query": query })))
                .await
                .unwrap();
        }

        let response = app.oneshot(get("/analytics")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["totalRequests"], 3);
        assert_eq!(body["cacheHits"], 1);
        assert_eq!(body["cacheMisses"], 2);
        assert_eq!(body["cacheSize"], 2);
        assert_eq!(body["hitRate"], 0.33);
        assert_eq!(body["savingsPercent"], 33.33);
        assert_eq!(body["strategies"][2], "age-based eviction");
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let app = test_app();

        let health = app.clone().oneshot(get("/health")).await.unwrap();
        assert_eq!(health.status(), StatusCode::OK);

        let live = app.clone().oneshot(get("/live")).await.unwrap();
        assert_eq!(live.status(), StatusCode::OK);

        let ready = app.oneshot(get("/ready")).await.unwrap();
        assert_eq!(ready.status(), StatusCode::OK);
        let body = body_json(ready).await;
        assert_eq!(body["checks"][0]["name"], "cache_store");
        assert_eq!(body["checks"][0]["entries"], 0);
    }

    #[tokio::test]
    async fn test_get_on_query_route_is_not_allowed() {
        let response = test_app().oneshot(get("/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
