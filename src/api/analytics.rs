//! Cache analytics endpoint

use axum::extract::State;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::stats::Analytics;

/// GET /analytics - hit rate, size and estimated savings
pub async fn get_analytics(State(state): State<AppState>) -> Result<Json<Analytics>, ApiError> {
    let analytics = state.query_service.analytics().await?;

    Ok(Json(analytics))
}
