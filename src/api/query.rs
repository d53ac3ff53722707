//! Query answering endpoint

use axum::extract::State;
use serde_json::Value;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{query_text, ApiError, Json, QueryResponse};
use crate::domain::DomainError;

/// POST / - answer a query from cache or backend
pub async fn answer_query(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<QueryResponse>, ApiError> {
    let outcome = state
        .query_service
        .handle_query(query_text(&body))
        .await
        .map_err(|e| match e {
            DomainError::InvalidInput { .. } => ApiError::from(e).with_param("query"),
            other => ApiError::from(other),
        })?;

    debug!(
        cache_key = %outcome.cache_key,
        cached = outcome.cached,
        "Query handled"
    );

    Ok(Json(QueryResponse::from(outcome)))
}
